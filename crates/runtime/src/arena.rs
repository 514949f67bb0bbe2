//! A rectangular arena world implementing the spatial and pathfinding
//! oracles the core consumes.
//!
//! This is the host-side stand-in for the full world/collision module:
//! axis-aligned walls, hard bounds, straight-line next steps. Entity
//! overlap is answered from the core's own state.

use ashfall_core::env::{MovingActor, PathfindOracle, SpatialOracle};
use ashfall_core::state::{Direction, NpcHandle, Position, Rect, Size, World};

pub struct ArenaWorld {
    bounds: Rect,
    walls: Vec<Rect>,
}

impl ArenaWorld {
    /// An open arena with the given pixel dimensions and no interior
    /// walls.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            bounds: Rect::new(0, 0, width, height),
            walls: Vec::new(),
        }
    }

    pub fn add_wall(&mut self, wall: Rect) {
        self.walls.push(wall);
    }

    fn inside_bounds(&self, rect: Rect) -> bool {
        rect.x >= self.bounds.x
            && rect.y >= self.bounds.y
            && rect.x + rect.w <= self.bounds.x + self.bounds.w
            && rect.y + rect.h <= self.bounds.y + self.bounds.h
    }
}

impl SpatialOracle for ArenaWorld {
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
        world: &World,
        size: Size,
        position: Position,
        moving: MovingActor,
    ) -> bool {
        let rect = Rect::at(position, size);
        if !self.inside_bounds(rect) {
            return true;
        }
        if self.walls.iter().any(|wall| wall.intersects(&rect)) {
            return true;
        }
        // Actors block each other, except the one being moved.
        if !matches!(moving, MovingActor::Player)
            && world.player.alive
            && world.player.entity.rect().intersects(&rect)
        {
            return true;
        }
        world.npcs.iter().any(|npc| {
            npc.alive
                && !matches!(moving, MovingActor::Npc(handle) if handle == npc.handle)
                && npc.entity.rect().intersects(&rect)
        })
    }

    fn wall_blocks(&self, _world: &World, rect: Rect) -> bool {
        !self.inside_bounds(rect) || self.walls.iter().any(|wall| wall.intersects(&rect))
    }
}

impl PathfindOracle for ArenaWorld {
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
