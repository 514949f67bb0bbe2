//! Player abilities and the buffs that belong to them.

mod arcane_lance;
mod cyclone;
mod firebolt;
mod mend;
mod surge;
mod war_stomp;

use ashfall_core::registry::RegistryBuilder;

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    let builder = firebolt::register(builder);
    let builder = surge::register(builder);
    let builder = war_stomp::register(builder);
    let builder = cyclone::register(builder);
    let builder = arcane_lance::register(builder);
    mend::register(builder)
}

use ashfall_core::state::{Position, Size, WorldEntity};

/// Projectile body spawned from an entity's center, facing the entity's
/// direction and offset slightly ahead of it.
pub(crate) fn projectile_from(
    source: &WorldEntity,
    size: Size,
    speed: u32,
    lead: i32,
) -> WorldEntity {
    let center = source.center();
    let top_left = Position::new(center.x - size.w / 2, center.y - size.h / 2)
        .translated(source.direction, lead);
    let mut entity = WorldEntity::new(top_left, size, source.direction, speed);
    entity.set_moving_in(source.direction);
    entity
}
