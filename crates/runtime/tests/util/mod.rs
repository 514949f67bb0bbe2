//! Shared scenario-test helpers.
#![allow(dead_code)]

use ashfall_core::clock::Millis;
use ashfall_core::ids::MindId;
use ashfall_core::state::{NpcSpec, Size};
use ashfall_core::stats::StatBaseline;
use ashfall_runtime::{ArenaWorld, PlayerSpec, Session, SessionConfig};

pub const FRAME: Millis = Millis(16);

pub fn session(seed: u64) -> Session {
    session_with_baseline(seed, StatBaseline::none())
}

pub fn session_with_baseline(seed: u64, baseline: StatBaseline) -> Session {
    Session::new(SessionConfig {
        seed,
        player: PlayerSpec {
            baseline,
            ..PlayerSpec::default()
        },
        arena: ArenaWorld::open(1600, 1200),
        ..SessionConfig::default()
    })
    .expect("content registry is complete")
}

/// Melee chaser: 40 hp, hits for 10 every 500ms of contact.
pub fn melee_brute() -> NpcSpec {
    NpcSpec {
        behavior: MindId::Brute,
        max_health: 40,
        speed: 60,
        size: Size::new(28, 28),
        melee: Some((10, Millis(500))),
    }
}

/// Harmless chaser used as a target dummy.
pub fn passive_brute(max_health: u32) -> NpcSpec {
    NpcSpec {
        behavior: MindId::Brute,
        max_health,
        speed: 60,
        size: Size::new(28, 28),
        melee: None,
    }
}

/// Target dummy that cannot move (speed zero).
pub fn anchored_brute(max_health: u32) -> NpcSpec {
    NpcSpec {
        speed: 0,
        ..passive_brute(max_health)
    }
}

pub fn skirmisher() -> NpcSpec {
    NpcSpec {
        behavior: MindId::Skirmisher,
        max_health: 25,
        speed: 80,
        size: Size::new(28, 28),
        melee: None,
    }
}

pub fn warlock() -> NpcSpec {
    NpcSpec {
        behavior: MindId::Warlock,
        max_health: 50,
        speed: 40,
        size: Size::new(40, 40),
        melee: None,
    }
}
