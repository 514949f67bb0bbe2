//! Melee chaser that loses its nerve at half health.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::effects::NpcMind;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::state::{Direction, GameState, NpcHandle};

const DECISION_INTERVAL: Millis = Millis(750);
const FLIGHT_DURATION: Millis = Millis(3000);
/// Percent chance of a sideways juke on each decision.
const JUKE_CHANCE: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Chasing,
    Fleeing,
    /// Flight has run its course; the brute stands and fights again, but
    /// never flees a second time.
    StoppedFleeing,
}

/// Chasing → Fleeing → StoppedFleeing, the flip at half health being
/// irreversible even if health later recovers.
pub struct BruteMind {
    decision: PeriodicTimer,
    phase: Phase,
    time_fleeing: Millis,
}

impl BruteMind {
    pub fn new() -> Self {
        Self {
            decision: PeriodicTimer::new(DECISION_INTERVAL),
            phase: Phase::Chasing,
            time_fleeing: Millis::ZERO,
        }
    }
}

impl Default for BruteMind {
    fn default() -> Self {
        Self::new()
    }
}

impl NpcMind for BruteMind {
    fn decide(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<(), EngineError> {
        if self.phase == Phase::Fleeing {
            self.time_fleeing += elapsed;
        }
        if !self.decision.advance(elapsed) {
            return Ok(());
        }

        let world = &mut state.world;
        let Some(me) = world.npc(npc) else {
            return Ok(());
        };
        let own_position = me.entity.center();
        let health = &me.combatant.health;
        let low_health = health.value() <= health.max() / 2;
        let player_position = world.player.entity.center();
        let player_invisible = world.player.invisible;

        if self.phase == Phase::Chasing && low_health {
            self.phase = Phase::Fleeing;
        }
        if self.phase == Phase::Fleeing && self.time_fleeing > FLIGHT_DURATION {
            self.phase = Phase::StoppedFleeing;
        }

        let direction = if player_invisible {
            *world.rng.pick(&Direction::ALL)
        } else {
            let mut direction = env
                .pathfind
                .next_step(world, own_position, player_position)
                .unwrap_or(me.entity.direction);
            if self.phase == Phase::Fleeing {
                direction = direction.opposite();
            }
            if world.rng.chance(JUKE_CHANCE) {
                direction = *world.rng.pick(&direction.perpendicular());
            }
            direction
        };

        if let Some(me) = world.npc_mut(npc) {
            me.entity.set_moving_in(direction);
        }
        Ok(())
    }
}
