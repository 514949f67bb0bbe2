//! Area caster: periodically vents a venom burst in all four directions
//! and mends nearby wounded allies. Barely moves.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::combat::apply_healing;
use ashfall_core::effects::NpcMind;
use ashfall_core::engine::spawn_projectile;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::ProjectileId;
use ashfall_core::state::{CombatantId, Direction, GameState, NpcHandle, Size, VisualEffect};

const DECISION_INTERVAL: Millis = Millis(750);
const BURST_COOLDOWN: Millis = Millis(3000);
const HEAL_COOLDOWN: Millis = Millis(5000);
const HEAL_RANGE: i32 = 200;
const HEAL_AMOUNT: u32 = 5;
/// Percent chance of strolling instead of standing on each decision.
const STROLL_CHANCE: u32 = 20;
const BOLT_SIZE: Size = Size::new(40, 40);
const BOLT_SPEED: u32 = 200;

pub struct WarlockMind {
    decision: PeriodicTimer,
    burst: PeriodicTimer,
    heal: PeriodicTimer,
}

impl WarlockMind {
    pub fn new() -> Self {
        Self {
            decision: PeriodicTimer::new(DECISION_INTERVAL),
            burst: PeriodicTimer::new(BURST_COOLDOWN),
            heal: PeriodicTimer::new(HEAL_COOLDOWN),
        }
    }
}

impl Default for WarlockMind {
    fn default() -> Self {
        Self::new()
    }
}

impl NpcMind for WarlockMind {
    fn decide(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<(), EngineError> {
        if self.burst.advance(elapsed) {
            if let Some(source) = state.world.npc(npc).map(|me| me.entity) {
                for direction in Direction::ALL {
                    let mut facing = source;
                    facing.direction = direction;
                    let bolt = crate::abilities::projectile_from(&facing, BOLT_SIZE, BOLT_SPEED, 10);
                    spawn_projectile(&mut state.world, env, ProjectileId::VenomBolt, bolt)?;
                }
            }
        }

        if self.heal.advance(elapsed) {
            if let Some(own_center) = state.world.npc(npc).map(|me| me.entity.center()) {
                let nearby = env.spatial.enemies_within(&state.world, own_center, HEAL_RANGE);
                let wounded = nearby.into_iter().find(|handle| {
                    *handle != npc
                        && state
                            .world
                            .npc(*handle)
                            .is_some_and(|ally| ally.alive && !ally.combatant.health.is_at_max())
                });
                if let Some(target) = wounded {
                    let target_center = state
                        .world
                        .npc(target)
                        .map(|ally| ally.entity.center())
                        .unwrap_or(own_center);
                    apply_healing(state, env, CombatantId::Npc(target), HEAL_AMOUNT, 0)?;
                    state.world.push_visual(VisualEffect::line(
                        (80, 80, 250),
                        own_center,
                        target_center,
                        Millis(350),
                    ));
                }
            }
        }

        if self.decision.advance(elapsed) {
            if state.world.rng.chance(STROLL_CHANCE) {
                let direction = *state.world.rng.pick(&Direction::ALL);
                if let Some(me) = state.world.npc_mut(npc) {
                    me.entity.set_moving_in(direction);
                }
            } else if let Some(me) = state.world.npc_mut(npc) {
                me.entity.set_not_moving();
            }
        }
        Ok(())
    }
}
