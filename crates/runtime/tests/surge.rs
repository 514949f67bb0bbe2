//! Surge: expected failures mutate nothing; a connecting dash damages
//! the enemy, raises the guard stance, and refunds on a killing pass.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::effects::AbilityOutcome;
use ashfall_core::ids::{AbilityId, BuffId};
use ashfall_core::state::{Position, Rect};
use ashfall_core::stats::StatKind;
use ashfall_runtime::{ArenaWorld, PlayerSpec, Session, SessionConfig};

fn walled_session() -> Session {
    let mut arena = ArenaWorld::open(1600, 1200);
    // A thin wall just below the player's dash path.
    arena.add_wall(Rect::new(390, 440, 60, 10));
    Session::new(SessionConfig {
        seed: 9,
        arena,
        player: PlayerSpec::default(),
        ..SessionConfig::default()
    })
    .expect("content registry is complete")
}

#[test]
fn wall_blocks_without_mutating_anything() {
    let mut session = walled_session();
    let npc = session
        .spawn_npc(&util::anchored_brute(40), Position::new(400, 700))
        .unwrap();
    let position = session.state.world.player.entity.position;

    let outcome = session.activate_ability(AbilityId::Surge).unwrap();
    assert_eq!(outcome, AbilityOutcome::failed("Wall is blocking"));
    assert_eq!(session.state.world.player.entity.position, position);
    assert!(!session.state.buffs.player.has(BuffId::SurgeGuard));
    assert_eq!(session.state.world.npc(npc).unwrap().combatant.health.value(), 40);
}

#[test]
fn dashing_through_an_enemy_damages_and_guards() {
    let mut session = util::session(9);
    // Player faces Down by default; the enemy sits on the dash path.
    let npc = session
        .spawn_npc(&util::anchored_brute(40), Position::new(400, 460))
        .unwrap();

    let outcome = session.activate_ability(AbilityId::Surge).unwrap();
    assert_eq!(outcome, AbilityOutcome::success());

    // Landed past the enemy, not on top of it.
    let player = session.state.world.player.entity;
    assert!(player.position.y > 460);
    assert!(!player.rect().intersects(
        &session.state.world.npc(npc).unwrap().entity.rect()
    ));

    assert_eq!(session.state.world.npc(npc).unwrap().combatant.health.value(), 35);
    assert!(session.state.buffs.player.has(BuffId::SurgeGuard));
    assert_eq!(
        session.state.world.player.combatant.sheet.value(StatKind::Armor),
        3
    );

    // The guard is temporary.
    for _ in 0..4 {
        session.advance(Millis(800)).unwrap();
    }
    assert!(!session.state.buffs.player.has(BuffId::SurgeGuard));
    assert_eq!(
        session.state.world.player.combatant.sheet.value(StatKind::Armor),
        0
    );
}

#[test]
fn killing_pass_requests_a_refund() {
    let mut session = util::session(9);
    let npc = session
        .spawn_npc(&util::anchored_brute(5), Position::new(400, 460))
        .unwrap();

    let outcome = session.activate_ability(AbilityId::Surge).unwrap();
    assert_eq!(outcome, AbilityOutcome::refunding());
    assert!(!session.state.world.npc(npc).unwrap().alive);

    // The corpse leaves the world at the next tick boundary.
    session.advance(Millis(16)).unwrap();
    assert!(session.state.world.npc(npc).is_none());
}

#[test]
fn no_landing_space_fails_cleanly() {
    let mut session = util::session(9);
    // Park the player just above the bottom bound, facing down.
    session.state.world.player.entity.position = Position::new(400, 1165);

    let position = session.state.world.player.entity.position;
    let outcome = session.activate_ability(AbilityId::Surge).unwrap();
    assert_eq!(outcome, AbilityOutcome::failed("No space"));
    assert_eq!(session.state.world.player.entity.position, position);
}
