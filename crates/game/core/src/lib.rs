//! Deterministic real-time combat core.
//!
//! `ashfall-core` turns player input, ability activation, and NPC
//! decisions into state changes on entities: health and mana deltas,
//! timed buffs and debuffs, spawned projectiles, and reactive item procs.
//! All state mutation flows through [`engine::CombatEngine`]; rendering,
//! audio, input, pathfinding, and collision live behind the sink vectors
//! and oracle traits in [`env`].
//!
//! The crate is single-threaded and tick-based: nothing blocks, nothing
//! runs in the background, and a seeded state replays identically.
//! Concrete abilities, buffs, items, and minds live in the companion
//! content crate and are registered through [`registry::RegistryBuilder`]
//! before the simulation starts.

pub mod buffs;
pub mod clock;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod ids;
pub mod registry;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Millis, PeriodicTimer};
pub use combat::{DamageOutcome, DamageSource, DamageType};
pub use config::GameConfig;
pub use effects::{
    AbilityData, AbilityEffect, AbilityOutcome, BuffEffect, BuffTick, ConsumableEffect,
    ConsumableOutcome, ItemEffect, Lifespan, NpcMind, ProjectileController, ProjectileFate,
    StatModifyingBuff, StatModifyingItem,
};
pub use engine::{CombatEngine, spawn_projectile, start_buff_now};
pub use env::{BalanceTable, Env, MovingActor, PathfindOracle, PcgRng, SpatialOracle};
pub use error::{EngineError, ErrorSeverity, GameError, MissingIdentity};
pub use events::{GameEvent, Reaction, Reactions};
pub use ids::{AbilityId, BuffId, ConsumableId, ItemId, MindId, ProjectileId, SoundId};
pub use registry::{ContentRegistry, RegistryBuilder, RegistryError};
pub use state::{
    Combatant, CombatantId, Direction, EquipCategory, GameState, InventoryError, InventorySlot,
    ItemInventory, Npc, NpcHandle, NpcSpec, PlayerState, Position, Rect, Size, SlotTransition,
    StoredItem, VisualEffect, VisualShape, World, WorldEntity,
};
pub use stats::{Bonus, BonusStack, ResourceMeter, StatBaseline, StatKind, StatModifier, StatSheet};
