//! Concrete game content registered into the core's lookup tables.
//!
//! Each module owns the identities it defines: an ability file registers
//! the ability plus the buffs only it uses, a reactive item file registers
//! the item plus the buff its proc applies, and so on. [`register_all`]
//! assembles the complete registry and validates that every enumerated
//! identity got a descriptor, failing fast on gaps.

pub mod abilities;
pub mod buffs;
pub mod consumables;
pub mod items;
pub mod loaders;
pub mod minds;
pub mod projectiles;

use ashfall_core::registry::{ContentRegistry, RegistryBuilder, RegistryError};

/// Builds the full, validated content registry.
pub fn register_all() -> Result<ContentRegistry, RegistryError> {
    let builder = RegistryBuilder::new();
    let builder = abilities::register(builder);
    let builder = items::register(builder);
    let builder = consumables::register(builder);
    let builder = projectiles::register(builder);
    let builder = minds::register(builder);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identity_has_a_descriptor() {
        register_all().expect("complete content registry");
    }
}
