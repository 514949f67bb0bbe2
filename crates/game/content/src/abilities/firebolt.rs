//! Firebolt: a one-shot fire projectile that burns its victim.

use ashfall_core::clock::Millis;
use ashfall_core::combat::{DamageSource, DamageType};
use ashfall_core::effects::{AbilityData, AbilityEffect, AbilityOutcome};
use ashfall_core::engine::spawn_projectile;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{AbilityId, BuffId, ProjectileId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{GameState, Size};

use crate::buffs::DamageOverTime;

const BOLT_SIZE: Size = Size::new(30, 30);
const BOLT_SPEED: u32 = 300;
pub(crate) const BURN_INTERVAL: Millis = Millis(600);
pub(crate) const BURN_DAMAGE: u32 = 1;

struct Firebolt;

impl AbilityEffect for Firebolt {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        let entity = super::projectile_from(&state.world.player.entity, BOLT_SIZE, BOLT_SPEED, 10);
        spawn_projectile(&mut state.world, env, ProjectileId::Firebolt, entity)?;
        Ok(AbilityOutcome::success())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .ability(
            AbilityId::Firebolt,
            AbilityData {
                mana_cost: 4,
                cooldown: Millis(700),
                sound: Some(SoundId::AbilityFirebolt),
            },
            Firebolt,
        )
        .buff(BuffId::Burning, || {
            Box::new(DamageOverTime::new(
                BURN_INTERVAL,
                BURN_DAMAGE,
                DamageType::Magic,
                DamageSource::Buff(BuffId::Burning),
                true,
            ))
        })
}
