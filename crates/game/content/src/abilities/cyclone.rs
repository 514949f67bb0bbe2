//! Cyclone: a slow drifting vortex that grinds everything it touches.

use ashfall_core::clock::Millis;
use ashfall_core::effects::{AbilityData, AbilityEffect, AbilityOutcome};
use ashfall_core::engine::spawn_projectile;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{AbilityId, ProjectileId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{GameState, Size};

const VORTEX_SIZE: Size = Size::new(100, 100);
const VORTEX_SPEED: u32 = 80;

struct Cyclone;

impl AbilityEffect for Cyclone {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        let entity = super::projectile_from(&state.world.player.entity, VORTEX_SIZE, VORTEX_SPEED, 20);
        spawn_projectile(&mut state.world, env, ProjectileId::Cyclone, entity)?;
        Ok(AbilityOutcome::success())
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder.ability(
        AbilityId::Cyclone,
        AbilityData {
            mana_cost: 5,
            cooldown: Millis(1500),
            sound: Some(SoundId::AbilityCyclone),
        },
        Cyclone,
    )
}
