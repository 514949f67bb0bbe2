//! Live projectile state.

use crate::ids::ProjectileId;

use super::entity::WorldEntity;

/// A projectile in flight, paired with the controller that owns its
/// behavior (aging, collision response, repeated-hit suppression).
pub struct Projectile {
    pub kind: ProjectileId,
    pub entity: WorldEntity,
    pub controller: Box<dyn crate::effects::ProjectileController>,
    /// Set when the controller expires or consumes the projectile; the
    /// engine drops expired projectiles at the tick boundary.
    pub expired: bool,
}

impl Projectile {
    pub fn new(
        kind: ProjectileId,
        entity: WorldEntity,
        controller: Box<dyn crate::effects::ProjectileController>,
    ) -> Self {
        Self {
            kind,
            entity,
            controller,
            expired: false,
        }
    }
}
