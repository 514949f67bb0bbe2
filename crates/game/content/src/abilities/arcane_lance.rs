//! Arcane lance: a fast bolt that pierces through enemies, striking each
//! of them at most once.

use ashfall_core::clock::Millis;
use ashfall_core::effects::{AbilityData, AbilityEffect, AbilityOutcome};
use ashfall_core::engine::spawn_projectile;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{AbilityId, ProjectileId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{GameState, Size};

const LANCE_SIZE: Size = Size::new(30, 30);
const LANCE_SPEED: u32 = 400;

struct ArcaneLance;

impl AbilityEffect for ArcaneLance {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        let entity = super::projectile_from(&state.world.player.entity, LANCE_SIZE, LANCE_SPEED, 10);
        spawn_projectile(&mut state.world, env, ProjectileId::Piercer, entity)?;
        Ok(AbilityOutcome::success())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder.ability(
        AbilityId::ArcaneLance,
        AbilityData {
            mana_cost: 8,
            cooldown: Millis(2000),
            sound: Some(SoundId::AbilityArcaneLance),
        },
        ArcaneLance,
    )
}
