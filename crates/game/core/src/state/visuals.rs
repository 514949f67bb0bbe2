//! Visual-effect descriptors emitted to the presentation sink.
//!
//! The core never draws anything: it appends these plain values to
//! [`crate::state::World::visuals`] and the excluded rendering layer drains
//! them each frame.

use crate::clock::Millis;

use super::entity::Position;

/// RGB color triple.
pub type Color = (u8, u8, u8);

/// Geometry of a visual effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualShape {
    /// Expanding circle.
    Circle { start_radius: i32, end_radius: i32 },
    /// Flash rectangle.
    Rect { w: i32, h: i32 },
    /// Line from the effect position to `to`.
    Line { to: Position },
    /// Floating combat number.
    Number { value: u32 },
    /// Short floating label ("Dodge", "Block", "Stunned").
    Text { text: &'static str },
}

/// A transient visual effect, described as pure data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualEffect {
    pub color: Color,
    pub position: Position,
    pub shape: VisualShape,
    pub duration: Millis,
}

impl VisualEffect {
    pub fn circle(
        color: Color,
        position: Position,
        start_radius: i32,
        end_radius: i32,
        duration: Millis,
    ) -> Self {
        Self {
            color,
            position,
            shape: VisualShape::Circle {
                start_radius,
                end_radius,
            },
            duration,
        }
    }

    pub fn rect(color: Color, position: Position, w: i32, h: i32, duration: Millis) -> Self {
        Self {
            color,
            position,
            shape: VisualShape::Rect { w, h },
            duration,
        }
    }

    pub fn line(color: Color, from: Position, to: Position, duration: Millis) -> Self {
        Self {
            color,
            position: from,
            shape: VisualShape::Line { to },
            duration,
        }
    }

    /// White floating damage number.
    pub fn damage_number(position: Position, value: u32) -> Self {
        Self {
            color: (255, 255, 255),
            position,
            shape: VisualShape::Number { value },
            duration: Millis(800),
        }
    }

    /// Floating status label.
    pub fn label(position: Position, text: &'static str) -> Self {
        Self {
            color: (230, 230, 230),
            position,
            shape: VisualShape::Text { text },
            duration: Millis(800),
        }
    }
}
