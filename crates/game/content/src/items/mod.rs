//! Equippable items.
//!
//! Plain stat items are registered here through the shared helper;
//! items with reactive procs get their own module, which also registers
//! the buff the proc applies.

mod jagged_axe;
mod oathkeepers_aegis;
mod pendant_of_anguish;
mod vein_amulet;

use ashfall_core::effects::StatModifyingItem;
use ashfall_core::ids::ItemId;
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::EquipCategory;
use ashfall_core::stats::{StatKind, StatModifier};

/// Registers an item whose whole effect is a set of stat modifiers.
fn stat_item(
    builder: RegistryBuilder,
    id: ItemId,
    category: EquipCategory,
    modifiers: Vec<StatModifier>,
) -> RegistryBuilder {
    builder.item(id, category, move || {
        Box::new(StatModifyingItem::new(modifiers.clone()))
    })
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let builder = stat_item(
        builder,
        ItemId::WardensHelm,
        EquipCategory::Head,
        vec![StatModifier::flat(StatKind::MaxHealth, 15)],
    );
    let builder = stat_item(
        builder,
        ItemId::HuntersCowl,
        EquipCategory::Head,
        vec![StatModifier::flat(StatKind::DodgeChance, 5)],
    );
    let builder = stat_item(
        builder,
        ItemId::AshenWand,
        EquipCategory::MainHand,
        vec![
            StatModifier::flat(StatKind::ManaRegen, 1),
            StatModifier::flat(StatKind::MagicDamage, 10),
        ],
    );
    let builder = stat_item(
        builder,
        ItemId::IronwoodShield,
        EquipCategory::OffHand,
        vec![
            StatModifier::flat(StatKind::BlockChance, 15),
            StatModifier::flat(StatKind::BlockAmount, 6),
        ],
    );
    let builder = stat_item(
        builder,
        ItemId::LifewardOrb,
        EquipCategory::OffHand,
        vec![StatModifier::flat(StatKind::LifeSteal, 5)],
    );
    let builder = stat_item(
        builder,
        ItemId::SigilRing,
        EquipCategory::Ring,
        vec![StatModifier::flat(StatKind::Damage, 8)],
    );

    let builder = jagged_axe::register(builder);
    let builder = oathkeepers_aegis::register(builder);
    let builder = vein_amulet::register(builder);
    pendant_of_anguish::register(builder)
}
