//! Positional actors: geometry primitives and the world entity.

use crate::clock::Millis;

/// Pixel position of an entity's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position moved `distance` pixels in the given direction.
    pub fn translated(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Entity extent in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle used for overlap queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn at(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.w,
            h: size.h,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Rectangle grown by `margin` pixels on every side. Used for reach
    /// checks where touching counts, since collision keeps actual
    /// hitboxes from overlapping.
    pub fn inflated(&self, margin: i32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + margin * 2,
            h: self.h + margin * 2,
        }
    }
}

/// Cardinal facing/movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as (dx, dy) in pixel space (y grows downward).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The two directions orthogonal to this one.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
        }
    }
}

/// A positional actor in the world: player, NPC, or projectile body.
///
/// Movement direction is *intent*; the engine integrates actual movement
/// once per tick, gated by the stun counter and the collision oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldEntity {
    pub position: Position,
    pub size: Size,
    /// Facing direction; also the travel direction while moving.
    pub direction: Direction,
    /// Whether the entity intends to move this tick.
    pub moving: bool,
    /// Movement speed in pixels per second, before speed bonuses.
    pub speed: u32,
    /// Sub-pixel movement remainder, in pixel-milliseconds.
    move_carry: i64,
}

impl WorldEntity {
    pub fn new(position: Position, size: Size, direction: Direction, speed: u32) -> Self {
        Self {
            position,
            size,
            direction,
            moving: false,
            speed,
            move_carry: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.size)
    }

    pub fn center(&self) -> Position {
        self.rect().center()
    }

    /// Sets the facing direction and starts moving.
    pub fn set_moving_in(&mut self, direction: Direction) {
        self.direction = direction;
        self.moving = true;
    }

    pub fn set_not_moving(&mut self) {
        self.moving = false;
    }

    /// Computes the position after moving for `elapsed` at `speed_percent`
    /// of normal speed, along with the new sub-pixel carry.
    ///
    /// Pure: the caller applies the result only if the move is not blocked.
    pub fn plan_step(&self, elapsed: Millis, speed_percent: u32) -> (Position, i64) {
        let total =
            self.move_carry + self.speed as i64 * speed_percent as i64 * elapsed.0 as i64 / 100;
        let pixels = (total / 1000) as i32;
        let carry = total % 1000;
        (self.position.translated(self.direction, pixels), carry)
    }

    /// Commits a step previously produced by [`plan_step`](Self::plan_step).
    pub fn commit_step(&mut self, position: Position, carry: i64) {
        self.position = position;
        self.move_carry = carry;
    }

    /// Drops any accumulated sub-pixel remainder (used when a move is
    /// blocked, so the entity does not lurch when the path clears).
    pub fn clear_move_carry(&mut self) {
        self.move_carry = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection_is_exclusive_of_touching_edges() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    }

    #[test]
    fn plan_step_accumulates_subpixels() {
        let mut entity = WorldEntity::new(Position::ORIGIN, Size::new(10, 10), Direction::Right, 90);
        entity.set_moving_in(Direction::Right);
        // 90 px/s for 16ms = 1.44 px: one pixel now, 0.44 carried.
        let (pos, carry) = entity.plan_step(Millis(16), 100);
        assert_eq!(pos.x, 1);
        entity.commit_step(pos, carry);
        let (pos, _) = entity.plan_step(Millis(16), 100);
        // 0.44 + 1.44 = 2.88 total: another pixel plus carry.
        assert_eq!(pos.x, 2);
    }

    #[test]
    fn speed_percent_scales_the_step() {
        let entity = WorldEntity::new(Position::ORIGIN, Size::new(10, 10), Direction::Down, 100);
        let (slow, _) = entity.plan_step(Millis(1000), 50);
        let (fast, _) = entity.plan_step(Millis(1000), 140);
        assert_eq!(slow.y, 50);
        assert_eq!(fast.y, 140);
    }
}
