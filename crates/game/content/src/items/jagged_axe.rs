//! Jagged axe: heavier physical hits, with a chance to leave deep cuts
//! bleeding.

use ashfall_core::clock::Millis;
use ashfall_core::combat::{DamageSource, DamageType};
use ashfall_core::effects::ItemEffect;
use ashfall_core::events::{GameEvent, Reaction, Reactions};
use ashfall_core::ids::{BuffId, ItemId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, EquipCategory, World};
use ashfall_core::stats::{StatKind, StatModifier};

use crate::buffs::DamageOverTime;

const PROC_CHANCE: u32 = 20;
const BLEED_DURATION: Millis = Millis(10_000);
const BLEED_INTERVAL: Millis = Millis(750);
const BLEED_DAMAGE: u32 = 1;

struct JaggedAxe {
    modifiers: [StatModifier; 1],
}

impl JaggedAxe {
    fn new() -> Self {
        Self {
            modifiers: [StatModifier::flat(StatKind::PhysicalDamage, 20)],
        }
    }
}

impl ItemEffect for JaggedAxe {
    fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    fn is_reactive(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &GameEvent, world: &mut World, out: &mut Reactions) {
        if let GameEvent::PlayerDealtDamage { npc, source, .. } = event {
            // The bleed must not trigger new bleeds off its own ticks.
            if *source == DamageSource::Buff(BuffId::Bleeding) {
                return;
            }
            if world.rng.chance(PROC_CHANCE) {
                out.push(Reaction::StartBuff {
                    target: CombatantId::Npc(*npc),
                    buff: BuffId::Bleeding,
                    duration: BLEED_DURATION,
                });
            }
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .item(ItemId::JaggedAxe, EquipCategory::MainHand, || {
            Box::new(JaggedAxe::new())
        })
        .buff(BuffId::Bleeding, || {
            Box::new(DamageOverTime::new(
                BLEED_INTERVAL,
                BLEED_DAMAGE,
                DamageType::Physical,
                DamageSource::Buff(BuffId::Bleeding),
                true,
            ))
        })
}
