//! Pendant of anguish: pain feeds power. Losing health briefly empowers
//! all outgoing damage.

use ashfall_core::clock::Millis;
use ashfall_core::effects::{ItemEffect, StatModifyingBuff};
use ashfall_core::events::{GameEvent, Reaction, Reactions};
use ashfall_core::ids::{BuffId, ItemId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, EquipCategory, World};
use ashfall_core::stats::{StatKind, StatModifier};

const EMPOWER_DURATION: Millis = Millis(3000);
const EMPOWER_DAMAGE: i32 = 20;

struct PendantOfAnguish {
    modifiers: [StatModifier; 1],
}

impl PendantOfAnguish {
    fn new() -> Self {
        Self {
            modifiers: [StatModifier::flat(StatKind::Damage, 10)],
        }
    }
}

impl ItemEffect for PendantOfAnguish {
    fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    fn is_reactive(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &GameEvent, _world: &mut World, out: &mut Reactions) {
        if matches!(event, GameEvent::PlayerLostHealth { .. }) {
            out.push(Reaction::StartBuff {
                target: CombatantId::Player,
                buff: BuffId::Empowered,
                duration: EMPOWER_DURATION,
            });
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .item(ItemId::PendantOfAnguish, EquipCategory::Neck, || {
            Box::new(PendantOfAnguish::new())
        })
        .buff(BuffId::Empowered, || {
            Box::new(StatModifyingBuff::new(vec![StatModifier::flat(
                StatKind::Damage,
                EMPOWER_DAMAGE,
            )]))
        })
}
