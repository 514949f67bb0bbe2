//! Consumables usable from the player's belt, and the buffs the
//! buff-granting potions apply.

use ashfall_core::clock::Millis;
use ashfall_core::combat::apply_healing;
use ashfall_core::effects::{ConsumableEffect, ConsumableOutcome, StatModifyingBuff};
use ashfall_core::engine::start_buff_now;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{BuffId, ConsumableId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, GameState, VisualEffect};
use ashfall_core::stats::{Bonus, StatKind, StatModifier};

use crate::buffs::VeilBuff;

const HEALTH_RESTORED: u32 = 100;
const MANA_RESTORED: u32 = 50;
const VEIL_DURATION: Millis = Millis(5000);
const SWIFTNESS_DURATION: Millis = Millis(3500);
const SWIFTNESS_SPEED: i32 = 40;

fn potion_swirl(state: &mut GameState) {
    let center = state.world.player.entity.center();
    state
        .world
        .push_visual(VisualEffect::circle((230, 230, 230), center, 15, 40, Millis(250)));
}

struct HealthPotion;

impl ConsumableEffect for HealthPotion {
    fn consume(&self, state: &mut GameState, env: &Env) -> Result<ConsumableOutcome, EngineError> {
        if state.world.player.combatant.health.is_at_max() {
            return Ok(ConsumableOutcome::Failed {
                reason: "Already at full health",
            });
        }
        potion_swirl(state);
        apply_healing(state, env, CombatantId::Player, HEALTH_RESTORED, 0)?;
        Ok(ConsumableOutcome::Consumed)
    }
}

struct ManaPotion;

impl ConsumableEffect for ManaPotion {
    fn consume(&self, state: &mut GameState, _env: &Env) -> Result<ConsumableOutcome, EngineError> {
        let Some(mana) = state.world.player.combatant.mana.as_mut() else {
            return Ok(ConsumableOutcome::Failed {
                reason: "No mana pool",
            });
        };
        if mana.is_at_max() {
            return Ok(ConsumableOutcome::Failed {
                reason: "Already at full mana",
            });
        }
        mana.gain(MANA_RESTORED);
        potion_swirl(state);
        Ok(ConsumableOutcome::Consumed)
    }
}

struct VeilPotion;

impl ConsumableEffect for VeilPotion {
    fn consume(&self, state: &mut GameState, env: &Env) -> Result<ConsumableOutcome, EngineError> {
        potion_swirl(state);
        start_buff_now(state, env, CombatantId::Player, BuffId::Veil, VEIL_DURATION)?;
        Ok(ConsumableOutcome::Consumed)
    }
}

struct SwiftnessPotion;

impl ConsumableEffect for SwiftnessPotion {
    fn consume(&self, state: &mut GameState, env: &Env) -> Result<ConsumableOutcome, EngineError> {
        potion_swirl(state);
        start_buff_now(
            state,
            env,
            CombatantId::Player,
            BuffId::Swiftness,
            SWIFTNESS_DURATION,
        )?;
        Ok(ConsumableOutcome::Consumed)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .consumable(ConsumableId::HealthPotion, HealthPotion)
        .consumable(ConsumableId::ManaPotion, ManaPotion)
        .consumable(ConsumableId::VeilPotion, VeilPotion)
        .consumable(ConsumableId::SwiftnessPotion, SwiftnessPotion)
        .buff(BuffId::Veil, || Box::new(VeilBuff::new()))
        .buff(BuffId::Swiftness, || {
            Box::new(StatModifyingBuff::new(vec![StatModifier::new(
                StatKind::MoveSpeed,
                Bonus::increased(SWIFTNESS_SPEED),
            )]))
        })
}
