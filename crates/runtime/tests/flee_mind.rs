//! The brute flees at half health, exactly once, and never flips back,
//! even if its health recovers mid-flight.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::state::{Direction, Position};

#[test]
fn flips_to_fleeing_at_half_health_and_never_back() {
    let mut session = util::session(21);
    // Player at (400, 400); brute to the right, so "toward" is Left.
    let npc = session
        .spawn_npc(&util::passive_brute(40), Position::new(700, 400))
        .unwrap();

    // Exactly half health.
    session
        .state
        .world
        .npc_mut(npc)
        .unwrap()
        .combatant
        .health
        .lose(20);

    // Next decision tick: the brute turns away (or jukes sideways), but
    // never keeps closing in.
    session.advance(Millis(800)).unwrap();
    let entity = session.state.world.npc(npc).unwrap().entity;
    assert!(entity.moving);
    assert_ne!(entity.direction, Direction::Left);

    // Health recovering above half must not cancel the flight.
    session
        .state
        .world
        .npc_mut(npc)
        .unwrap()
        .combatant
        .health
        .gain(20);
    session.advance(Millis(800)).unwrap();
    assert_ne!(
        session.state.world.npc(npc).unwrap().entity.direction,
        Direction::Left
    );

    // Let the flight duration run out.
    for _ in 0..4 {
        session.advance(Millis(800)).unwrap();
    }

    // Back to engaging: over the following decisions the brute closes in
    // again (modulo sideways jukes) and never resumes fleeing.
    let mut chased = false;
    for _ in 0..6 {
        session.advance(Millis(800)).unwrap();
        let direction = session.state.world.npc(npc).unwrap().entity.direction;
        assert_ne!(direction, Direction::Right, "the flight phase is one-way");
        chased |= direction == Direction::Left;
    }
    assert!(chased);
}
