//! Common error infrastructure for the simulation core.
//!
//! Domain-specific errors (`InventoryError`, `RegistryError`) live next to
//! the code they guard; this module provides the shared severity
//! classification and the umbrella [`EngineError`] surfaced by the engine
//! facade.
//!
//! Three failure families exist, and only one of them is an error type:
//! - Expected domain failures (ability blocked by a wall, potion at full
//!   health) are *outcome values*, never errors, and never mutate state.
//! - Precondition violations (acting on an empty inventory slot) are
//!   programmer errors: `Internal` severity, asserted in debug builds.
//! - Content gaps (an identity with no registered descriptor) are `Fatal`
//!   and refused at startup validation.

use crate::ids::{AbilityId, BuffId, ConsumableId, ItemId, MindId, ProjectileId};
use crate::state::NpcHandle;

/// Severity level of an error, used for categorization and recovery
/// strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Temporary condition; retrying or choosing another action may succeed.
    Recoverable,
    /// Invalid input; should be rejected without retry.
    Validation,
    /// Unexpected state inconsistency; indicates a bug.
    Internal,
    /// Unrecoverable; the simulation cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for error types in the core.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;
}

/// Errors surfaced by the engine facade.
///
/// Expected domain failures are NOT represented here; they are reported via
/// `AbilityOutcome` / `ConsumableOutcome` values.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A content identity had no registered descriptor.
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),

    /// Inventory slot operation violated a slot-state precondition.
    #[error(transparent)]
    Inventory(#[from] crate::state::InventoryError),

    /// An operation referenced an NPC that is not in the world.
    #[error("unknown NPC {0:?}")]
    UnknownNpc(NpcHandle),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(e) => e.severity(),
            Self::Inventory(e) => e.severity(),
            Self::UnknownNpc(_) => ErrorSeverity::Internal,
        }
    }
}

/// Marker for identities missing from a registry at validation time.
///
/// Collected so a single validation failure can name every gap at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingIdentity {
    Ability(AbilityId),
    Buff(BuffId),
    Item(ItemId),
    Consumable(ConsumableId),
    Projectile(ProjectileId),
    Mind(MindId),
}

impl core::fmt::Display for MissingIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ability(id) => write!(f, "ability {id:?}"),
            Self::Buff(id) => write!(f, "buff {id:?}"),
            Self::Item(id) => write!(f, "item {id:?}"),
            Self::Consumable(id) => write!(f, "consumable {id:?}"),
            Self::Projectile(id) => write!(f, "projectile {id:?}"),
            Self::Mind(id) => write!(f, "mind {id:?}"),
        }
    }
}
