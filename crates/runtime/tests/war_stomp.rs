//! War stomp: the channel roots the caster, and the shockwave stuns and
//! damages everything in range when the channel ends.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::ids::{AbilityId, BuffId};
use ashfall_core::state::{Direction, Position};

#[test]
fn channel_roots_caster_then_shockwave_stuns_enemies() {
    let mut session = util::session(2);
    // Within the 80px shockwave radius of the player at (400, 400).
    let near = session
        .spawn_npc(&util::anchored_brute(40), Position::new(450, 400))
        .unwrap();
    // Far outside the radius.
    let far = session
        .spawn_npc(&util::anchored_brute(40), Position::new(900, 400))
        .unwrap();

    let outcome = session.activate_ability(AbilityId::WarStomp).unwrap();
    assert!(outcome.is_success());
    assert!(session.state.world.player.combatant.stun.is_stunned());

    // Movement intent is suppressed while channeling.
    session
        .state
        .world
        .player
        .entity
        .set_moving_in(Direction::Right);
    let rooted_at = session.state.world.player.entity.position;
    session.advance(Millis(250)).unwrap();
    assert_eq!(session.state.world.player.entity.position, rooted_at);

    // Channel runs out; the shockwave lands.
    session.advance(Millis(250)).unwrap();
    assert!(!session.state.world.player.combatant.stun.is_stunned());

    let near_npc = session.state.world.npc(near).unwrap();
    let dealt = 40 - near_npc.combatant.health.value();
    assert!((6..=8).contains(&dealt), "scatter damage 6-8, got {dealt}");
    assert!(session.state.buffs.npc_has(near, BuffId::StunnedByStomp));

    let far_npc = session.state.world.npc(far).unwrap();
    assert_eq!(far_npc.combatant.health.value(), 40);
    assert!(!session.state.buffs.npc_has(far, BuffId::StunnedByStomp));

    // A second cast while the first stun holds refreshes, not stacks:
    // when the refreshed stun finally ends, the enemy can act again
    // (the counter did not double up).
    session.activate_ability(AbilityId::WarStomp).unwrap();
    session.advance(Millis(500)).unwrap();
    // Refreshed to the full 3500ms by the shockwave, then aged by this
    // tick's own 500ms in the NPC aging pass.
    let stun_left = session
        .state
        .buffs
        .set(ashfall_core::state::CombatantId::Npc(near))
        .unwrap()
        .remaining(BuffId::StunnedByStomp)
        .unwrap();
    assert_eq!(stun_left, Millis(3000));
    // Let the stun run out fully.
    for _ in 0..8 {
        session.advance(Millis(500)).unwrap();
    }
    assert!(!session.state.buffs.npc_has(near, BuffId::StunnedByStomp));
    let near_npc = session.state.world.npc(near).unwrap();
    assert!(!near_npc.combatant.stun.is_stunned());
}
