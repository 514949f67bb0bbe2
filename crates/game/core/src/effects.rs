//! Behavior traits implemented by registered content.
//!
//! Every dynamic piece of the simulation (abilities, buffs, item effects,
//! consumables, projectile controllers, NPC minds) is an object behind one
//! of these traits, created from the [`crate::registry::ContentRegistry`].
//!
//! Abilities, consumables, projectile controllers, and minds run at the top
//! of the engine call stack and receive the full [`GameState`]. Buff and
//! item effects are *stored inside* the state, so they receive only the
//! disjoint [`World`] view (or nothing mutable at all) and request
//! aliasing work, such as starting buffs or dealing damage, as
//! [`Reaction`](crate::events::Reaction) values.

use crate::clock::Millis;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::{GameEvent, Reactions};
use crate::ids::SoundId;
use crate::state::{CombatantId, GameState, NpcHandle, World, WorldEntity};
use crate::stats::StatModifier;

// ============================================================================
// Abilities
// ============================================================================

/// Result of an ability activation.
///
/// Expected failures carry a short human-readable reason and guarantee that
/// no state was mutated. Resource cost and cooldown gating happen *before*
/// the cast, in the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    Succeeded {
        /// The activation asks the caller to refund its cost and cooldown
        /// (on-kill-reset mechanics).
        refund: bool,
    },
    Failed {
        reason: &'static str,
    },
}

impl AbilityOutcome {
    pub fn success() -> Self {
        Self::Succeeded { refund: false }
    }

    pub fn refunding() -> Self {
        Self::Succeeded { refund: true }
    }

    pub fn failed(reason: &'static str) -> Self {
        Self::Failed { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Static ability parameters used by the external gating layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityData {
    pub mana_cost: u32,
    pub cooldown: Millis,
    pub sound: Option<SoundId>,
}

/// A castable ability. Stateless; per-cast state lives in the buffs and
/// projectiles the cast creates.
pub trait AbilityEffect {
    /// Executes the ability. Must be all-or-nothing: a `Failed` outcome
    /// means no state was mutated.
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError>;
}

// ============================================================================
// Consumables
// ============================================================================

/// Result of using a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumableOutcome {
    Consumed,
    Failed { reason: &'static str },
}

/// A usable consumable (potion, elixir).
pub trait ConsumableEffect {
    /// Applies the consumable. A `Failed` outcome leaves the slot and all
    /// state untouched.
    fn consume(&self, state: &mut GameState, env: &Env) -> Result<ConsumableOutcome, EngineError>;
}

// ============================================================================
// Buffs
// ============================================================================

/// Continuation decision returned by a buff tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffTick {
    Continue,
    /// Terminate early: run the end effect and remove the instance now.
    Expire,
}

/// A stateful timed effect on a combatant.
///
/// The start effect runs once per instance (refreshing an active buff
/// resets only its timer) and the end effect runs exactly once, on expiry
/// or cancellation.
pub trait BuffEffect {
    fn on_start(
        &mut self,
        _target: CombatantId,
        _world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
    }

    fn on_tick(
        &mut self,
        _target: CombatantId,
        _world: &mut World,
        _env: &Env,
        _elapsed: Millis,
        _out: &mut Reactions,
    ) -> BuffTick {
        BuffTick::Continue
    }

    fn on_end(
        &mut self,
        _target: CombatantId,
        _world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
    }

    /// Whether this buff subscribes to its owner's event bus.
    fn is_reactive(&self) -> bool {
        false
    }

    /// Reacts to an event on the owner's bus. Buff listeners may only
    /// request reactions; they get no direct world access because their
    /// own storage is being iterated during delivery.
    fn handle_event(&mut self, _event: &GameEvent, _out: &mut Reactions) {}
}

/// A buff that only contributes stat modifiers for its duration.
pub struct StatModifyingBuff {
    modifiers: Vec<StatModifier>,
}

impl StatModifyingBuff {
    pub fn new(modifiers: Vec<StatModifier>) -> Self {
        Self { modifiers }
    }
}

impl BuffEffect for StatModifyingBuff {
    fn on_start(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        world.apply_stat_modifiers(target, &self.modifiers, false);
    }

    fn on_end(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        world.apply_stat_modifiers(target, &self.modifiers, true);
    }
}

// ============================================================================
// Items
// ============================================================================

/// The effect of an equippable item.
///
/// Stat modifiers are applied by the engine when the item becomes active
/// and removed when it is deactivated; reactive items additionally listen
/// on the player's event bus while active.
pub trait ItemEffect {
    fn modifiers(&self) -> &[StatModifier] {
        &[]
    }

    /// Whether this item subscribes to the player's event bus.
    fn is_reactive(&self) -> bool {
        false
    }

    /// Reacts to an event. Item listeners may mutate the world directly
    /// (their storage is separate from it) but must publish nothing: any
    /// work that would raise further events goes through `out`.
    fn handle_event(&mut self, _event: &GameEvent, _world: &mut World, _out: &mut Reactions) {}
}

/// An item that only contributes stat modifiers while equipped.
pub struct StatModifyingItem {
    modifiers: Vec<StatModifier>,
}

impl StatModifyingItem {
    pub fn new(modifiers: Vec<StatModifier>) -> Self {
        Self { modifiers }
    }
}

impl ItemEffect for StatModifyingItem {
    fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }
}

// ============================================================================
// Projectiles
// ============================================================================

/// Continuation decision returned by a projectile tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileFate {
    Alive,
    Expired,
}

/// Finite projectile lifetime, aged by the controller each tick.
#[derive(Clone, Copy, Debug)]
pub struct Lifespan {
    age: Millis,
    max_age: Millis,
}

impl Lifespan {
    pub fn new(max_age: Millis) -> Self {
        Self {
            age: Millis::ZERO,
            max_age,
        }
    }

    /// Ages the lifespan; true once the maximum age is exceeded.
    pub fn advance(&mut self, elapsed: Millis) -> bool {
        self.age += elapsed;
        self.age > self.max_age
    }
}

/// Kind-specific projectile behavior.
///
/// Controllers own their lifetime, their collision response, and any
/// repeated-hit suppression. The engine moves the projectile body, detects
/// overlaps through the spatial oracle, and calls back here.
pub trait ProjectileController {
    /// Ages the projectile and runs periodic behavior.
    fn on_tick(
        &mut self,
        entity: &mut WorldEntity,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<ProjectileFate, EngineError>;

    /// Responds to overlapping a live enemy. Returns true when the
    /// projectile is consumed by the hit.
    fn on_enemy_hit(
        &mut self,
        _npc: NpcHandle,
        _state: &mut GameState,
        _env: &Env,
    ) -> Result<bool, EngineError> {
        Ok(false)
    }

    /// Responds to overlapping the player. Returns true when the
    /// projectile is consumed by the hit.
    fn on_player_hit(&mut self, _state: &mut GameState, _env: &Env) -> Result<bool, EngineError> {
        Ok(false)
    }
}

// ============================================================================
// NPC minds
// ============================================================================

/// Per-NPC decision state machine.
///
/// Called every tick with the elapsed slice; implementations keep their
/// own decision timers and re-issue movement intent at low frequency.
/// Minds are never called while their NPC is stunned.
pub trait NpcMind {
    fn decide(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<(), EngineError>;
}
