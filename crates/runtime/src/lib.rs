//! Host shell around the combat core.
//!
//! The core consumes its world through oracle traits and produces visual,
//! audio, and event data through sinks; this crate supplies a simple
//! arena implementation of the oracles, owns the validated content
//! registry, and mirrors combat events into `tracing` for observability.
//! Rendering, audio, and input stay out; the headless harness binary
//! drives a scripted battle instead.

pub mod arena;
pub mod session;

pub use arena::ArenaWorld;
pub use session::{FrameOutput, PlayerSpec, Session, SessionConfig};
