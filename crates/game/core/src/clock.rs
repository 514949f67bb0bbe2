//! Millisecond time unit and the repeating countdown timer.
//!
//! Every duration in the simulation is expressed in [`Millis`]. The engine is
//! advanced by variable elapsed-time slices, and [`PeriodicTimer`] is the one
//! primitive that turns those slices into discrete trigger points for buffs,
//! NPC minds, and periodic projectile damage.

use core::fmt;
use core::ops::{Add, AddAssign};

/// Duration or timestamp in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Millis {
    type Output = Millis;
    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl AddAssign for Millis {
    fn add_assign(&mut self, rhs: Millis) {
        self.0 += rhs.0;
    }
}

impl From<u64> for Millis {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Repeating countdown used for timing-related bookkeeping in buffs, item
/// procs, NPC minds, and area projectiles.
///
/// The timer is told how much time has passed since the last call. When the
/// internal countdown crosses zero it adds the cooldown back (carrying the
/// overshoot into the next period) and reports ready.
///
/// A single `advance` call fires at most once, even when `elapsed` spans
/// several periods; the surplus periods are dropped. Callers rely on this,
/// so it must not be "fixed" to multi-trigger.
///
/// # Example
/// ```
/// # use ashfall_core::clock::{Millis, PeriodicTimer};
/// let mut timer = PeriodicTimer::new(Millis(750));
/// assert!(!timer.advance(Millis(400)));
/// assert!(timer.advance(Millis(400)));
/// assert!(!timer.advance(Millis(400)));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicTimer {
    cooldown: Millis,
    /// Signed so a large elapsed slice can push the countdown below zero
    /// before the cooldown is added back.
    remaining: i64,
}

impl PeriodicTimer {
    /// Creates a timer that first fires after one full cooldown.
    pub fn new(cooldown: Millis) -> Self {
        Self {
            cooldown,
            remaining: cooldown.0 as i64,
        }
    }

    /// Creates a timer that fires on the first `advance` call.
    pub fn ready(cooldown: Millis) -> Self {
        Self {
            cooldown,
            remaining: 0,
        }
    }

    /// Notifies the timer of elapsed time. Returns true exactly once per
    /// zero crossing; the overshoot is carried into the next period.
    pub fn advance(&mut self, elapsed: Millis) -> bool {
        self.remaining -= elapsed.0 as i64;
        if self.remaining <= 0 {
            self.remaining += self.cooldown.0 as i64;
            return true;
        }
        false
    }

    /// Replaces the cooldown and restarts the countdown from it.
    pub fn reset_with(&mut self, cooldown: Millis) {
        self.cooldown = cooldown;
        self.remaining = cooldown.0 as i64;
    }

    pub fn cooldown(&self) -> Millis {
        self.cooldown
    }
}
