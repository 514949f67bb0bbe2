//! Identical seeds and identical inputs replay identical battles.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::events::GameEvent;
use ashfall_core::ids::{AbilityId, ItemId};
use ashfall_core::state::Position;

struct Trace {
    events: Vec<GameEvent>,
    player_health: u32,
    player_mana: u32,
    npcs: Vec<(u32, u32, Position)>,
}

fn run(seed: u64) -> Trace {
    let mut session = util::session(seed);
    session.give_item(ItemId::JaggedAxe).unwrap();
    session.give_item(ItemId::LifewardOrb).unwrap();
    session.give_item(ItemId::VeinAmulet).unwrap();

    session
        .spawn_npc(&util::melee_brute(), Position::new(500, 400))
        .unwrap();
    session
        .spawn_npc(&util::skirmisher(), Position::new(700, 420))
        .unwrap();
    session
        .spawn_npc(&util::warlock(), Position::new(650, 600))
        .unwrap();

    for frame in 0..600u32 {
        match frame {
            20 => drop(session.activate_ability(AbilityId::Firebolt)),
            90 => drop(session.activate_ability(AbilityId::Cyclone)),
            200 => drop(session.activate_ability(AbilityId::WarStomp)),
            360 => drop(session.activate_ability(AbilityId::ArcaneLance)),
            480 => drop(session.activate_ability(AbilityId::Mend)),
            _ => {}
        }
        session.advance(util::FRAME).unwrap();
    }

    let world = &session.state.world;
    Trace {
        events: world.event_log.clone(),
        player_health: world.player.combatant.health.value(),
        player_mana: world.player.combatant.mana.as_ref().unwrap().value(),
        npcs: world
            .npcs
            .iter()
            .map(|npc| (npc.handle.0, npc.combatant.health.value(), npc.entity.position))
            .collect(),
    }
}

#[test]
fn same_seed_same_battle() {
    let a = run(1234);
    let b = run(1234);
    assert_eq!(a.events, b.events);
    assert_eq!(a.player_health, b.player_health);
    assert_eq!(a.player_mana, b.player_mana);
    assert_eq!(a.npcs, b.npcs);
}

#[test]
fn clock_accumulates_elapsed_time() {
    let mut session = util::session(1);
    for _ in 0..10 {
        session.advance(Millis(16)).unwrap();
    }
    assert_eq!(session.state.world.clock, Millis(160));
}
