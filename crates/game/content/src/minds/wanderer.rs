//! Neutral stroller: mostly stands around, occasionally picks a random
//! direction. Never attacks anyone.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::effects::NpcMind;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::state::{Direction, GameState, NpcHandle};

const DECISION_INTERVAL: Millis = Millis(900);
/// Percent chance of standing still on each decision.
const IDLE_CHANCE: u32 = 80;

pub struct WandererMind {
    decision: PeriodicTimer,
}

impl WandererMind {
    pub fn new() -> Self {
        Self {
            decision: PeriodicTimer::new(DECISION_INTERVAL),
        }
    }
}

impl Default for WandererMind {
    fn default() -> Self {
        Self::new()
    }
}

impl NpcMind for WandererMind {
    fn decide(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        _env: &Env,
        elapsed: Millis,
    ) -> Result<(), EngineError> {
        if !self.decision.advance(elapsed) {
            return Ok(());
        }
        if state.world.rng.chance(IDLE_CHANCE) {
            if let Some(me) = state.world.npc_mut(npc) {
                me.entity.set_not_moving();
            }
        } else {
            let direction = *state.world.rng.pick(&Direction::ALL);
            if let Some(me) = state.world.npc_mut(npc) {
                me.entity.set_moving_in(direction);
            }
        }
        Ok(())
    }
}
