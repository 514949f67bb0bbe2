//! Immutable content lookup tables, assembled in an explicit startup phase.
//!
//! Content registration happens once, through [`RegistryBuilder`];
//! [`RegistryBuilder::build`] validates completeness (every enumerated
//! identity must have a descriptor) and fails fast naming every gap.
//! After that the registry is read-only and the simulation never misses a
//! lookup.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::effects::{
    AbilityData, AbilityEffect, BuffEffect, ConsumableEffect, ItemEffect, NpcMind,
    ProjectileController,
};
use crate::error::{ErrorSeverity, GameError, MissingIdentity};
use crate::ids::{AbilityId, BuffId, ConsumableId, ItemId, MindId, ProjectileId};
use crate::state::EquipCategory;

/// Registered ability: static parameters plus the shared effect object.
pub struct AbilityEntry {
    pub data: AbilityData,
    pub effect: Box<dyn AbilityEffect>,
}

impl std::fmt::Debug for AbilityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityEntry").finish_non_exhaustive()
    }
}

/// Registered item: its equipment category and a factory for per-equip
/// effect instances.
pub struct ItemEntry {
    pub category: EquipCategory,
    factory: Box<dyn Fn() -> Box<dyn ItemEffect>>,
}

type BuffFactory = Box<dyn Fn() -> Box<dyn BuffEffect>>;
type ProjectileFactory = Box<dyn Fn() -> Box<dyn ProjectileController>>;
type MindFactory = Box<dyn Fn() -> Box<dyn NpcMind>>;

/// Registry validation and lookup failures.
///
/// Both variants are fatal: a missing descriptor is a content defect, not
/// a runtime condition to recover from.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("content registry is missing descriptors: {}", format_missing(.0))]
    MissingContent(Vec<MissingIdentity>),

    #[error("no descriptor registered for {0}")]
    Unregistered(MissingIdentity),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}

fn format_missing(missing: &[MissingIdentity]) -> String {
    let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
    names.join(", ")
}

/// Immutable lookup tables for every kind of registered content.
pub struct ContentRegistry {
    abilities: HashMap<AbilityId, AbilityEntry>,
    buffs: HashMap<BuffId, BuffFactory>,
    items: HashMap<ItemId, ItemEntry>,
    consumables: HashMap<ConsumableId, Box<dyn ConsumableEffect>>,
    projectiles: HashMap<ProjectileId, ProjectileFactory>,
    minds: HashMap<MindId, MindFactory>,
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRegistry").finish_non_exhaustive()
    }
}

impl ContentRegistry {
    /// An empty registry whose every lookup fails with `Unregistered`.
    ///
    /// For unit tests and hosts that assemble content piecemeal;
    /// production hosts go through [`RegistryBuilder::build`], which
    /// refuses gaps.
    pub fn empty() -> Self {
        RegistryBuilder::new().build_unvalidated()
    }

    pub fn ability(&self, id: AbilityId) -> Result<&AbilityEntry, RegistryError> {
        self.abilities
            .get(&id)
            .ok_or(RegistryError::Unregistered(MissingIdentity::Ability(id)))
    }

    /// Creates a fresh stateful effect instance for a buff.
    pub fn buff_effect(&self, id: BuffId) -> Result<Box<dyn BuffEffect>, RegistryError> {
        self.buffs
            .get(&id)
            .map(|factory| factory())
            .ok_or(RegistryError::Unregistered(MissingIdentity::Buff(id)))
    }

    pub fn item_category(&self, id: ItemId) -> Result<EquipCategory, RegistryError> {
        self.items
            .get(&id)
            .map(|entry| entry.category)
            .ok_or(RegistryError::Unregistered(MissingIdentity::Item(id)))
    }

    /// Creates a fresh effect instance for an item being activated.
    pub fn item_effect(&self, id: ItemId) -> Result<Box<dyn ItemEffect>, RegistryError> {
        self.items
            .get(&id)
            .map(|entry| (entry.factory)())
            .ok_or(RegistryError::Unregistered(MissingIdentity::Item(id)))
    }

    pub fn consumable(&self, id: ConsumableId) -> Result<&dyn ConsumableEffect, RegistryError> {
        self.consumables
            .get(&id)
            .map(|effect| effect.as_ref())
            .ok_or(RegistryError::Unregistered(MissingIdentity::Consumable(id)))
    }

    /// Creates a fresh controller for a spawned projectile.
    pub fn projectile_controller(
        &self,
        id: ProjectileId,
    ) -> Result<Box<dyn ProjectileController>, RegistryError> {
        self.projectiles
            .get(&id)
            .map(|factory| factory())
            .ok_or(RegistryError::Unregistered(MissingIdentity::Projectile(id)))
    }

    /// Creates a fresh decision mind for a spawned NPC.
    pub fn mind(&self, id: MindId) -> Result<Box<dyn NpcMind>, RegistryError> {
        self.minds
            .get(&id)
            .map(|factory| factory())
            .ok_or(RegistryError::Unregistered(MissingIdentity::Mind(id)))
    }
}

/// Mutable registration phase preceding the simulation.
#[derive(Default)]
pub struct RegistryBuilder {
    abilities: HashMap<AbilityId, AbilityEntry>,
    buffs: HashMap<BuffId, BuffFactory>,
    items: HashMap<ItemId, ItemEntry>,
    consumables: HashMap<ConsumableId, Box<dyn ConsumableEffect>>,
    projectiles: HashMap<ProjectileId, ProjectileFactory>,
    minds: HashMap<MindId, MindFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ability(
        mut self,
        id: AbilityId,
        data: AbilityData,
        effect: impl AbilityEffect + 'static,
    ) -> Self {
        self.abilities.insert(
            id,
            AbilityEntry {
                data,
                effect: Box::new(effect),
            },
        );
        self
    }

    pub fn buff(
        mut self,
        id: BuffId,
        factory: impl Fn() -> Box<dyn BuffEffect> + 'static,
    ) -> Self {
        self.buffs.insert(id, Box::new(factory));
        self
    }

    pub fn item(
        mut self,
        id: ItemId,
        category: EquipCategory,
        factory: impl Fn() -> Box<dyn ItemEffect> + 'static,
    ) -> Self {
        self.items.insert(
            id,
            ItemEntry {
                category,
                factory: Box::new(factory),
            },
        );
        self
    }

    pub fn consumable(mut self, id: ConsumableId, effect: impl ConsumableEffect + 'static) -> Self {
        self.consumables.insert(id, Box::new(effect));
        self
    }

    pub fn projectile(
        mut self,
        id: ProjectileId,
        factory: impl Fn() -> Box<dyn ProjectileController> + 'static,
    ) -> Self {
        self.projectiles.insert(id, Box::new(factory));
        self
    }

    pub fn mind(mut self, id: MindId, factory: impl Fn() -> Box<dyn NpcMind> + 'static) -> Self {
        self.minds.insert(id, Box::new(factory));
        self
    }

    /// Finishes registration, validating that every enumerated identity
    /// has a descriptor. The error names every gap at once.
    pub fn build(self) -> Result<ContentRegistry, RegistryError> {
        let mut missing = Vec::new();
        for id in AbilityId::iter() {
            if !self.abilities.contains_key(&id) {
                missing.push(MissingIdentity::Ability(id));
            }
        }
        for id in BuffId::iter() {
            if !self.buffs.contains_key(&id) {
                missing.push(MissingIdentity::Buff(id));
            }
        }
        for id in ItemId::iter() {
            if !self.items.contains_key(&id) {
                missing.push(MissingIdentity::Item(id));
            }
        }
        for id in ConsumableId::iter() {
            if !self.consumables.contains_key(&id) {
                missing.push(MissingIdentity::Consumable(id));
            }
        }
        for id in ProjectileId::iter() {
            if !self.projectiles.contains_key(&id) {
                missing.push(MissingIdentity::Projectile(id));
            }
        }
        for id in MindId::iter() {
            if !self.minds.contains_key(&id) {
                missing.push(MissingIdentity::Mind(id));
            }
        }
        if !missing.is_empty() {
            return Err(RegistryError::MissingContent(missing));
        }
        Ok(self.build_unvalidated())
    }

    /// Finishes registration without the completeness check.
    pub fn build_unvalidated(self) -> ContentRegistry {
        ContentRegistry {
            abilities: self.abilities,
            buffs: self.buffs,
            items: self.items,
            consumables: self.consumables,
            projectiles: self.projectiles,
            minds: self.minds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_build_names_every_gap() {
        let err = RegistryBuilder::new().build().unwrap_err();
        let RegistryError::MissingContent(missing) = err else {
            panic!("expected MissingContent");
        };
        assert!(missing.contains(&MissingIdentity::Ability(AbilityId::Firebolt)));
        assert!(missing.contains(&MissingIdentity::Buff(BuffId::Bleeding)));
        assert!(missing.contains(&MissingIdentity::Mind(MindId::Brute)));
        // Every single identity is reported, not just the first.
        let expected = AbilityId::iter().count()
            + BuffId::iter().count()
            + ItemId::iter().count()
            + ConsumableId::iter().count()
            + ProjectileId::iter().count()
            + MindId::iter().count();
        assert_eq!(missing.len(), expected);
    }

    #[test]
    fn unregistered_lookup_is_fatal() {
        let registry = ContentRegistry::empty();
        let err = registry.ability(AbilityId::Mend).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }
}
