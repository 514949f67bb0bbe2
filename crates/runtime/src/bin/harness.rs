//! Headless battle harness: a scripted fight at fixed 16ms frames,
//! useful for smoke-testing the simulation and watching its logs.

use ashfall_core::clock::Millis;
use ashfall_core::ids::{AbilityId, ConsumableId, ItemId, MindId};
use ashfall_core::state::{NpcSpec, Position, Size};
use ashfall_runtime::{Session, SessionConfig};

const FRAME: Millis = Millis(16);
const BATTLE_FRAMES: u32 = 900; // ~14 seconds

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ashfall=debug".into()),
        )
        .init();

    let mut session = Session::new(SessionConfig {
        seed: 2024,
        ..SessionConfig::default()
    })
    .expect("content registry is complete");

    session.give_item(ItemId::JaggedAxe).unwrap();
    session.give_item(ItemId::OathkeepersAegis).unwrap();
    session.give_item(ItemId::VeinAmulet).unwrap();
    session.give_consumable(ConsumableId::HealthPotion);

    let brute = NpcSpec {
        behavior: MindId::Brute,
        max_health: 40,
        speed: 60,
        size: Size::new(28, 28),
        melee: Some((8, Millis(900))),
    };
    let skirmisher = NpcSpec {
        behavior: MindId::Skirmisher,
        max_health: 25,
        speed: 80,
        size: Size::new(28, 28),
        melee: None,
    };
    let warlock = NpcSpec {
        behavior: MindId::Warlock,
        max_health: 50,
        speed: 40,
        size: Size::new(40, 40),
        melee: None,
    };
    session.spawn_npc(&brute, Position::new(600, 400)).unwrap();
    session.spawn_npc(&brute, Position::new(400, 600)).unwrap();
    session.spawn_npc(&skirmisher, Position::new(700, 500)).unwrap();
    session.spawn_npc(&warlock, Position::new(800, 400)).unwrap();

    for frame in 0..BATTLE_FRAMES {
        // A crude scripted player: periodic casts at whatever is ahead.
        match frame {
            30 => drop(session.activate_ability(AbilityId::Firebolt)),
            120 => drop(session.activate_ability(AbilityId::Cyclone)),
            240 => drop(session.activate_ability(AbilityId::WarStomp)),
            420 => drop(session.activate_ability(AbilityId::ArcaneLance)),
            600 => drop(session.use_consumable(0)),
            720 => drop(session.activate_ability(AbilityId::Mend)),
            _ => {}
        }
        session.advance(FRAME).expect("tick");
        session.drain_frame();
    }

    let player = &session.state.world.player;
    tracing::info!(
        health = player.combatant.health.value(),
        alive = player.alive,
        npcs_left = session.state.world.npcs.len(),
        "battle over"
    );
}
