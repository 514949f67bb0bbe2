//! Player item inventory and the record of applied item effects.
//!
//! A slot either enforces an equipment category, making it an *active*
//! slot whose occupant's effect is live, or it is plain storage. The
//! inventory itself only reports [`SlotTransition`]s; actually applying or
//! removing an item's effect happens through the engine's
//! `on_item_equipped` / `on_item_unequipped` hooks, driven by the external
//! inventory UI. The core never infers activation from slot contents.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::ItemId;

/// Slot categories an item can occupy while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipCategory {
    Head,
    Chest,
    MainHand,
    OffHand,
    Neck,
    Ring,
}

impl EquipCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Chest => "Chest",
            Self::MainHand => "Main-Hand",
            Self::OffHand => "Off-Hand",
            Self::Neck => "Neck",
            Self::Ring => "Ring",
        }
    }
}

/// An item occupying an inventory slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredItem {
    pub id: ItemId,
    pub category: EquipCategory,
}

/// Activation change produced by a slot mutation.
///
/// The external inventory layer forwards `Activated`/`Deactivated` to the
/// engine's equip hooks; `Unchanged` needs no action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotTransition {
    Activated(ItemId),
    Deactivated(ItemId),
    Unchanged(ItemId),
}

/// Slot-state precondition violations. These indicate misuse by the
/// caller, not recoverable gameplay conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory slot {0} is out of bounds")]
    BadSlotIndex(usize),

    #[error("inventory slot {0} is empty")]
    EmptySlot(usize),

    #[error("inventory slot {0} is already occupied")]
    OccupiedSlot(usize),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }
}

/// One inventory slot, optionally locked to an equipment category.
#[derive(Clone, Copy, Debug, Default)]
pub struct InventorySlot {
    pub item: Option<StoredItem>,
    /// An enforced category makes this an active equipment slot; `None`
    /// makes it storage.
    pub enforced: Option<EquipCategory>,
}

impl InventorySlot {
    pub fn equipment(category: EquipCategory) -> Self {
        Self {
            item: None,
            enforced: Some(category),
        }
    }

    pub fn storage() -> Self {
        Self {
            item: None,
            enforced: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// An item in an active slot has its effect enabled; storage slots
    /// only hold items.
    pub fn is_active(&self) -> bool {
        self.enforced.is_some()
    }

    fn can_contain(&self, item: Option<&StoredItem>) -> bool {
        match (self.enforced, item) {
            (Some(category), Some(item)) => item.category == category,
            _ => true,
        }
    }
}

/// The player's item inventory.
pub struct ItemInventory {
    slots: Vec<InventorySlot>,
}

impl ItemInventory {
    pub fn new(slots: Vec<InventorySlot>) -> Self {
        Self { slots }
    }

    /// One active slot per equipment category followed by a few storage
    /// slots; the layout used by every hero.
    pub fn standard() -> Self {
        use strum::IntoEnumIterator;
        let mut slots: Vec<InventorySlot> = EquipCategory::iter()
            .map(InventorySlot::equipment)
            .collect();
        slots.extend((0..GameConfig::STORAGE_SLOTS).map(|_| InventorySlot::storage()));
        Self::new(slots)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Result<&InventorySlot, InventoryError> {
        self.slots.get(index).ok_or(InventoryError::BadSlotIndex(index))
    }

    pub fn is_slot_empty(&self, index: usize) -> Result<bool, InventoryError> {
        Ok(self.slot(index)?.is_empty())
    }

    pub fn item_in_slot(&self, index: usize) -> Result<ItemId, InventoryError> {
        self.slot(index)?
            .item
            .map(|item| item.id)
            .ok_or(InventoryError::EmptySlot(index))
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.item.is_some_and(|item| item.id == id))
    }

    /// Item ids in active slots, in slot order. This is the listener order
    /// for event delivery.
    pub fn active_item_ids(&self) -> Vec<ItemId> {
        self.slots
            .iter()
            .filter(|slot| slot.is_active())
            .filter_map(|slot| slot.item.map(|item| item.id))
            .collect()
    }

    /// Swaps the contents of two slots if both category constraints allow
    /// it, reporting the activation transitions the move produced. A
    /// disallowed swap is a silent no-op with no transitions.
    pub fn switch_slots(
        &mut self,
        a: usize,
        b: usize,
    ) -> Result<Vec<SlotTransition>, InventoryError> {
        if a >= self.slots.len() {
            return Err(InventoryError::BadSlotIndex(a));
        }
        if b >= self.slots.len() {
            return Err(InventoryError::BadSlotIndex(b));
        }
        if a == b {
            return Ok(Vec::new());
        }

        let content_a = self.slots[a].item;
        let content_b = self.slots[b].item;
        let allowed = self.slots[b].can_contain(content_a.as_ref())
            && self.slots[a].can_contain(content_b.as_ref());
        if !allowed {
            return Ok(Vec::new());
        }

        let mut transitions = Vec::new();
        let active_a = self.slots[a].is_active();
        let active_b = self.slots[b].is_active();
        if let Some(item) = content_a {
            transitions.push(Self::transition_for(item.id, active_a, active_b));
        }
        if let Some(item) = content_b {
            transitions.push(Self::transition_for(item.id, active_b, active_a));
        }

        self.slots[a].item = content_b;
        self.slots[b].item = content_a;
        Ok(transitions)
    }

    fn transition_for(id: ItemId, was_active: bool, now_active: bool) -> SlotTransition {
        match (was_active, now_active) {
            (true, false) => SlotTransition::Deactivated(id),
            (false, true) => SlotTransition::Activated(id),
            _ => SlotTransition::Unchanged(id),
        }
    }

    /// Places an item in the first compatible empty slot.
    ///
    /// Returns `None` when the inventory is full.
    pub fn try_add(&mut self, item: StoredItem) -> Option<SlotTransition> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.is_empty() && slot.can_contain(Some(&item)))?;
        self.slots[index].item = Some(item);
        Some(if self.slots[index].is_active() {
            SlotTransition::Activated(item.id)
        } else {
            SlotTransition::Unchanged(item.id)
        })
    }

    /// Places an item in a specific slot, which must be empty.
    pub fn put_in_slot(
        &mut self,
        index: usize,
        item: StoredItem,
    ) -> Result<SlotTransition, InventoryError> {
        if index >= self.slots.len() {
            return Err(InventoryError::BadSlotIndex(index));
        }
        if !self.slots[index].is_empty() {
            return Err(InventoryError::OccupiedSlot(index));
        }
        self.slots[index].item = Some(item);
        Ok(if self.slots[index].is_active() {
            SlotTransition::Activated(item.id)
        } else {
            SlotTransition::Unchanged(item.id)
        })
    }

    /// Removes the item from a slot, which must be occupied.
    pub fn remove_from_slot(&mut self, index: usize) -> Result<SlotTransition, InventoryError> {
        if index >= self.slots.len() {
            return Err(InventoryError::BadSlotIndex(index));
        }
        let item = self.slots[index]
            .item
            .take()
            .ok_or(InventoryError::EmptySlot(index))?;
        Ok(if self.slots[index].is_active() {
            SlotTransition::Deactivated(item.id)
        } else {
            SlotTransition::Unchanged(item.id)
        })
    }
}

/// An item effect currently applied to the player.
pub struct ActiveItem {
    pub id: ItemId,
    pub effect: Box<dyn crate::effects::ItemEffect>,
}

/// The player's gear: inventory layout plus the live effects of applied
/// items.
///
/// `applied` tracks which item identities currently have their effect in
/// force, making the equip/unequip hooks idempotent when the external
/// inventory layer calls them out of order.
pub struct PlayerGear {
    pub inventory: ItemInventory,
    pub(crate) active: Vec<ActiveItem>,
    pub(crate) applied: HashSet<ItemId>,
}

impl PlayerGear {
    pub fn new(inventory: ItemInventory) -> Self {
        Self {
            inventory,
            active: Vec::new(),
            applied: HashSet::new(),
        }
    }

    pub fn is_applied(&self, id: ItemId) -> bool {
        self.applied.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helm() -> StoredItem {
        StoredItem {
            id: ItemId::WardensHelm,
            category: EquipCategory::Head,
        }
    }

    fn axe() -> StoredItem {
        StoredItem {
            id: ItemId::JaggedAxe,
            category: EquipCategory::MainHand,
        }
    }

    #[test]
    fn try_add_prefers_matching_equipment_slot() {
        let mut inventory = ItemInventory::standard();
        let transition = inventory.try_add(helm()).unwrap();
        assert_eq!(transition, SlotTransition::Activated(ItemId::WardensHelm));
        assert_eq!(inventory.active_item_ids(), vec![ItemId::WardensHelm]);
    }

    #[test]
    fn switch_to_storage_deactivates() {
        let mut inventory = ItemInventory::standard();
        inventory.try_add(helm()).unwrap();
        let storage = inventory.slot_count() - 1;
        let transitions = inventory.switch_slots(0, storage).unwrap();
        assert_eq!(
            transitions,
            vec![SlotTransition::Deactivated(ItemId::WardensHelm)]
        );
        assert!(inventory.active_item_ids().is_empty());
    }

    #[test]
    fn category_mismatch_is_a_silent_no_op() {
        let mut inventory = ItemInventory::standard();
        let storage = inventory.slot_count() - 1;
        inventory.put_in_slot(storage, axe()).unwrap();
        // Head slot cannot hold a main-hand weapon.
        let transitions = inventory.switch_slots(storage, 0).unwrap();
        assert!(transitions.is_empty());
        assert_eq!(inventory.item_in_slot(storage).unwrap(), ItemId::JaggedAxe);
    }

    #[test]
    fn slot_preconditions_are_errors() {
        let mut inventory = ItemInventory::standard();
        assert_eq!(
            inventory.remove_from_slot(0),
            Err(InventoryError::EmptySlot(0))
        );
        inventory.put_in_slot(0, helm()).unwrap();
        assert_eq!(
            inventory.put_in_slot(0, helm()),
            Err(InventoryError::OccupiedSlot(0))
        );
        assert_eq!(
            inventory.item_in_slot(99),
            Err(InventoryError::BadSlotIndex(99))
        );
    }

    #[test]
    fn storage_swap_keeps_items_inactive() {
        let mut inventory = ItemInventory::standard();
        let s1 = inventory.slot_count() - 1;
        let s2 = inventory.slot_count() - 2;
        inventory.put_in_slot(s1, axe()).unwrap();
        let transitions = inventory.switch_slots(s1, s2).unwrap();
        assert_eq!(transitions, vec![SlotTransition::Unchanged(ItemId::JaggedAxe)]);
    }
}
