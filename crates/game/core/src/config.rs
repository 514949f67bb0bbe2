/// Compile-time bounds and structural constants of the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Consumable belt slots available to the player.
    pub const MAX_CONSUMABLE_SLOTS: usize = 6;

    // ===== structural defaults =====
    /// Storage-only inventory slots appended after the equipment slots
    /// by [`crate::state::ItemInventory::standard`].
    pub const STORAGE_SLOTS: usize = 3;
}
