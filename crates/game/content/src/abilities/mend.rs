//! Mend: restores health over a short duration.

use ashfall_core::clock::Millis;
use ashfall_core::effects::{AbilityData, AbilityEffect, AbilityOutcome};
use ashfall_core::engine::start_buff_now;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{AbilityId, BuffId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, GameState};

use crate::buffs::HealOverTime;

const DURATION: Millis = Millis(2000);
const TICK_INTERVAL: Millis = Millis(400);
const HEAL_PER_TICK: u32 = 2;

struct Mend;

impl AbilityEffect for Mend {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        if state.world.player.combatant.health.is_at_max() {
            return Ok(AbilityOutcome::failed("Already at full health"));
        }
        start_buff_now(state, env, CombatantId::Player, BuffId::Mending, DURATION)?;
        Ok(AbilityOutcome::success())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .ability(
            AbilityId::Mend,
            AbilityData {
                mana_cost: 10,
                cooldown: Millis(15000),
                sound: Some(SoundId::AbilityMend),
            },
            Mend,
        )
        .buff(BuffId::Mending, || {
            Box::new(HealOverTime::new(TICK_INTERVAL, HEAL_PER_TICK))
        })
}
