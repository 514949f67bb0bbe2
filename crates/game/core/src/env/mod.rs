//! Read-only environment consumed by the engine.
//!
//! The world/collision module and the pathfinder are external
//! collaborators; the engine sees them only through the oracle traits
//! here. The [`Env`] aggregate bundles them with the validated content
//! registry and the balance table so engine code and effects can reach
//! everything they need without hard coupling to concrete implementations.

mod rng;

pub use rng::PcgRng;

use crate::clock::Millis;
use crate::registry::ContentRegistry;
use crate::state::{Direction, NpcHandle, Position, Rect, Size, World};

/// Spatial queries answered by the excluded world/collision module.
pub trait SpatialOracle {
    /// Live enemies whose hitbox intersects `rect`.
    fn enemies_intersecting(&self, world: &World, rect: Rect) -> Vec<NpcHandle>;

    /// Live enemies within `radius` (chebyshev) of a point.
    fn enemies_within(&self, world: &World, center: Position, radius: i32) -> Vec<NpcHandle>;

    /// Whether the player's hitbox intersects `rect`.
    fn player_intersects(&self, world: &World, rect: Rect) -> bool;

    /// Whether an entity of `size` would collide with terrain or another
    /// actor if placed at `position`. `moving` names the actor being
    /// moved so it does not collide with itself.
    fn would_collide(
        &self,
        world: &World,
        size: Size,
        position: Position,
        moving: MovingActor,
    ) -> bool;

    /// Whether `rect` intersects a wall. Used by dash-style abilities that
    /// may pass over enemies but never through terrain.
    fn wall_blocks(&self, world: &World, rect: Rect) -> bool;
}

/// The actor a collision query is being made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovingActor {
    Player,
    Npc(NpcHandle),
}

/// Next-step oracle supplied by the excluded pathfinding module.
pub trait PathfindOracle {
    /// Direction of the next step from `from` toward `to`, or `None` when
    /// already there.
    fn next_step(&self, world: &World, from: Position, to: Position) -> Option<Direction>;
}

/// Runtime-tunable balance values.
///
/// Loaded from TOML by the content crate's config loader; defaults are the
/// shipped balance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTable {
    /// Damage floor after a successful block.
    pub min_chip_damage: u32,
    /// Physical mitigation divisor: damage is reduced by `armor / divisor`.
    pub armor_divisor: u32,
    /// Maximum depth of reactive event chains before further publishes are
    /// dropped.
    pub reactive_depth_limit: u32,
    /// Whether a surge that kills the enemy it passed through refunds its
    /// cost and cooldown.
    pub surge_kill_refund: bool,
    /// Duration of the stun applied by the war stomp shockwave.
    pub stomp_stun: Millis,
}

impl Default for BalanceTable {
    fn default() -> Self {
        Self {
            min_chip_damage: 0,
            armor_divisor: 1,
            reactive_depth_limit: 4,
            surge_kill_refund: true,
            stomp_stun: Millis(3500),
        }
    }
}

/// Aggregates the read-only collaborators required by the engine.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub spatial: &'a dyn SpatialOracle,
    pub pathfind: &'a dyn PathfindOracle,
    pub registry: &'a ContentRegistry,
    pub balance: &'a BalanceTable,
}

impl<'a> Env<'a> {
    pub fn new(
        spatial: &'a dyn SpatialOracle,
        pathfind: &'a dyn PathfindOracle,
        registry: &'a ContentRegistry,
        balance: &'a BalanceTable,
    ) -> Self {
        Self {
            spatial,
            pathfind,
            registry,
            balance,
        }
    }
}
