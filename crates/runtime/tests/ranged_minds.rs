//! The skirmisher's kite-and-fire loop and the warlock's burst and
//! ally-heal pulses.

mod util;

use ashfall_core::ids::{BuffId, ProjectileId};
use ashfall_core::state::Position;

#[test]
fn skirmisher_fires_and_poisons_the_player() {
    let mut session = util::session(31);
    session
        .spawn_npc(&util::skirmisher(), Position::new(700, 400))
        .unwrap();

    // The first shot comes after the jittered cooldown; the bolt then
    // needs time to fly home.
    let mut fired = false;
    let mut poisoned = false;
    for _ in 0..1500 {
        session.advance(util::FRAME).unwrap();
        fired |= session
            .state
            .world
            .projectiles
            .iter()
            .any(|projectile| projectile.kind == ProjectileId::VenomBolt);
        if session.state.buffs.player.has(BuffId::Venom) {
            poisoned = true;
            break;
        }
    }
    assert!(fired, "skirmisher never fired");
    assert!(poisoned, "venom bolt never connected");
    assert!(session.state.world.player.combatant.health.value() < 100);
}

#[test]
fn warlock_bursts_and_heals_wounded_allies() {
    let mut session = util::session(32);
    let warlock = session
        .spawn_npc(&util::warlock(), Position::new(1000, 800))
        .unwrap();
    let ally = session
        .spawn_npc(&util::anchored_brute(40), Position::new(1080, 800))
        .unwrap();
    session
        .state
        .world
        .npc_mut(ally)
        .unwrap()
        .combatant
        .health
        .lose(15);

    let mut burst_seen = false;
    let mut healed = false;
    for _ in 0..400 {
        session.advance(util::FRAME).unwrap();
        let bolts = session
            .state
            .world
            .projectiles
            .iter()
            .filter(|projectile| projectile.kind == ProjectileId::VenomBolt)
            .count();
        burst_seen |= bolts >= 4;
        if session.state.world.npc(ally).unwrap().combatant.health.value() > 25 {
            healed = true;
            break;
        }
    }
    assert!(burst_seen, "warlock never vented its burst");
    assert!(healed, "warlock never healed its ally");
    // The warlock never heals itself.
    assert_eq!(
        session
            .state
            .world
            .npc(warlock)
            .unwrap()
            .combatant
            .health
            .value(),
        50
    );
}
