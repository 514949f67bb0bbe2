//! Oathkeeper's aegis: a heavy shield that staggers whoever strikes it.

use ashfall_core::clock::Millis;
use ashfall_core::effects::ItemEffect;
use ashfall_core::events::{GameEvent, Reaction, Reactions};
use ashfall_core::ids::{BuffId, ItemId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, EquipCategory, World};
use ashfall_core::stats::{StatKind, StatModifier};

use crate::buffs::StunBuff;

const STUN_DURATION: Millis = Millis(2500);

struct OathkeepersAegis {
    modifiers: [StatModifier; 2],
}

impl OathkeepersAegis {
    fn new() -> Self {
        Self {
            modifiers: [
                StatModifier::flat(StatKind::Armor, 3),
                StatModifier::flat(StatKind::BlockAmount, 8),
            ],
        }
    }
}

impl ItemEffect for OathkeepersAegis {
    fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    fn is_reactive(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &GameEvent, _world: &mut World, out: &mut Reactions) {
        if let GameEvent::PlayerBlocked {
            attacker: Some(npc),
        } = event
        {
            out.push(Reaction::StartBuff {
                target: CombatantId::Npc(*npc),
                buff: BuffId::StunnedByAegis,
                duration: STUN_DURATION,
            });
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .item(ItemId::OathkeepersAegis, EquipCategory::OffHand, || {
            Box::new(OathkeepersAegis::new())
        })
        .buff(BuffId::StunnedByAegis, || Box::new(StunBuff))
}
