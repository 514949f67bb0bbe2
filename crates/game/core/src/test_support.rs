//! Shared fixtures for unit tests: a collision-free oracle and a minimal
//! world with one player and one melee NPC.

use crate::env::{MovingActor, PathfindOracle, SpatialOracle};
use crate::state::{
    Combatant, Direction, GameState, ItemInventory, Npc, NpcHandle, PlayerState, Position, Rect,
    Size, World, WorldEntity,
};
use crate::stats::{ResourceMeter, StatBaseline};

/// Oracle for an empty, unbounded arena: nothing collides, straight-line
/// steps, entity overlap by plain rect intersection.
pub(crate) struct OpenArena;

impl SpatialOracle for OpenArena {
    fn enemies_intersecting(&self, world: &World, rect: Rect) -> Vec<NpcHandle> {
        world
            .npcs
            .iter()
            .filter(|npc| npc.alive && npc.entity.rect().intersects(&rect))
            .map(|npc| npc.handle)
            .collect()
    }

    fn enemies_within(&self, world: &World, center: Position, radius: i32) -> Vec<NpcHandle> {
        world
            .npcs
            .iter()
            .filter(|npc| {
                let c = npc.entity.center();
                npc.alive && (c.x - center.x).abs() <= radius && (c.y - center.y).abs() <= radius
            })
            .map(|npc| npc.handle)
            .collect()
    }

    fn player_intersects(&self, world: &World, rect: Rect) -> bool {
        world.player.alive && world.player.entity.rect().intersects(&rect)
    }

    fn would_collide(
        &self,
        _world: &World,
        _size: Size,
        _position: Position,
        _moving: MovingActor,
    ) -> bool {
        false
    }

    fn wall_blocks(&self, _world: &World, _rect: Rect) -> bool {
        false
    }
}

impl PathfindOracle for OpenArena {
    fn next_step(&self, _world: &World, from: Position, to: Position) -> Option<Direction> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        Some(if dx.abs() >= dy.abs() {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// One full-health player at the origin and one 40 hp NPC at (60, 0).
pub(crate) fn small_world(seed: u64) -> GameState {
    let entity = WorldEntity::new(Position::ORIGIN, Size::new(30, 30), Direction::Down, 100);
    let combatant = Combatant::new(
        ResourceMeter::new(100, 0),
        Some(ResourceMeter::new(60, 0)),
        StatBaseline::none(),
    );
    let mut state = GameState::new(
        seed,
        PlayerState::new(entity, combatant),
        ItemInventory::standard(),
    );
    let handle = state.world.allocate_npc_handle();
    state.world.npcs.push(Npc {
        handle,
        behavior: crate::ids::MindId::Brute,
        entity: WorldEntity::new(Position::new(60, 0), Size::new(28, 28), Direction::Left, 60),
        combatant: Combatant::new(ResourceMeter::new(40, 0), None, StatBaseline::none()),
        melee: None,
        mind: None,
        alive: true,
    });
    state
}
