//! Vein amulet: a chance to siphon life whenever an enemy falls.

use ashfall_core::effects::ItemEffect;
use ashfall_core::events::{GameEvent, Reaction, Reactions};
use ashfall_core::ids::ItemId;
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, EquipCategory, World};

const PROC_CHANCE: u32 = 30;
const HEALTH_ON_KILL: u32 = 5;

struct VeinAmulet;

impl ItemEffect for VeinAmulet {
    fn is_reactive(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &GameEvent, world: &mut World, out: &mut Reactions) {
        if matches!(event, GameEvent::EnemyDied { .. }) && world.rng.chance(PROC_CHANCE) {
            out.push(Reaction::Heal {
                target: CombatantId::Player,
                amount: HEALTH_ON_KILL,
            });
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder.item(ItemId::VeinAmulet, EquipCategory::Neck, || {
        Box::new(VeinAmulet)
    })
}
