//! Ranged kiter: closes in, stops to fire a venom bolt, then moves again.
//!
//! Movement and firing are gated by independent timers; the firing
//! cooldown is re-rolled with jitter after every shot so packs of
//! skirmishers don't volley in lockstep.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::effects::NpcMind;
use ashfall_core::engine::spawn_projectile;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::ProjectileId;
use ashfall_core::state::{Direction, GameState, NpcHandle, Size};

const DECISION_INTERVAL: Millis = Millis(350);
const PAUSE_AFTER_FIRE: Millis = Millis(700);
const BASE_FIRE_COOLDOWN: u64 = 1500;
const FIRE_JITTER: u32 = 5000;
const BOLT_SIZE: Size = Size::new(40, 40);
const BOLT_SPEED: u32 = 200;

pub struct SkirmisherMind {
    decision: PeriodicTimer,
    since_fire: Millis,
    firing_cooldown: Millis,
}

impl SkirmisherMind {
    pub fn new() -> Self {
        Self {
            decision: PeriodicTimer::new(DECISION_INTERVAL),
            since_fire: Millis::ZERO,
            firing_cooldown: Millis(BASE_FIRE_COOLDOWN),
        }
    }
}

impl Default for SkirmisherMind {
    fn default() -> Self {
        Self::new()
    }
}

impl NpcMind for SkirmisherMind {
    fn decide(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<(), EngineError> {
        self.since_fire += elapsed;
        if !self.decision.advance(elapsed) {
            return Ok(());
        }
        // Stand still briefly after each shot.
        if self.since_fire <= PAUSE_AFTER_FIRE {
            return Ok(());
        }

        let world = &mut state.world;
        if world.player.invisible {
            let direction = *world.rng.pick(&Direction::ALL);
            if let Some(me) = world.npc_mut(npc) {
                me.entity.set_moving_in(direction);
            }
            return Ok(());
        }

        let Some(own_position) = world.npc(npc).map(|me| me.entity.center()) else {
            return Ok(());
        };
        let player_position = world.player.entity.center();
        let toward_player = env.pathfind.next_step(world, own_position, player_position);

        if self.since_fire > self.firing_cooldown {
            self.since_fire = Millis::ZERO;
            self.firing_cooldown = Millis(BASE_FIRE_COOLDOWN + world.rng.range(0, FIRE_JITTER) as u64);

            let Some(me) = world.npc_mut(npc) else {
                return Ok(());
            };
            if let Some(direction) = toward_player {
                me.entity.direction = direction;
            }
            me.entity.set_not_moving();
            let source = me.entity;
            let bolt = crate::abilities::projectile_from(&source, BOLT_SIZE, BOLT_SPEED, 10);
            spawn_projectile(world, env, ProjectileId::VenomBolt, bolt)?;
        } else if let Some(direction) = toward_player {
            if let Some(me) = world.npc_mut(npc) {
                me.entity.set_moving_in(direction);
            }
        }
        Ok(())
    }
}
