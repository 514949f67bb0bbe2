//! Consumable belt behavior: clamped healing, full-health refusal, and
//! the veil's invisibility window.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::effects::ConsumableOutcome;
use ashfall_core::ids::{BuffId, ConsumableId};

#[test]
fn health_potion_clamps_at_max() {
    let mut session = util::session(41);
    session.give_consumable(ConsumableId::HealthPotion);
    session.state.world.player.combatant.health.lose(20);

    let outcome = session.use_consumable(0).unwrap();
    assert_eq!(outcome, ConsumableOutcome::Consumed);
    // 80 + 100 clamps to 100, not 180.
    assert_eq!(session.state.world.player.combatant.health.value(), 100);
    assert!(session.state.world.player.consumables[0].is_none());
}

#[test]
fn health_potion_at_full_health_is_refused_and_kept() {
    let mut session = util::session(41);
    session.give_consumable(ConsumableId::HealthPotion);

    let outcome = session.use_consumable(0).unwrap();
    assert_eq!(
        outcome,
        ConsumableOutcome::Failed {
            reason: "Already at full health"
        }
    );
    // The potion stays in the slot.
    assert_eq!(
        session.state.world.player.consumables[0],
        Some(ConsumableId::HealthPotion)
    );
}

#[test]
fn empty_slot_is_an_expected_failure() {
    let mut session = util::session(41);
    let outcome = session.use_consumable(3).unwrap();
    assert_eq!(
        outcome,
        ConsumableOutcome::Failed {
            reason: "Nothing in that slot"
        }
    );
}

#[test]
fn veil_potion_hides_the_player_for_its_duration() {
    let mut session = util::session(42);
    session.give_consumable(ConsumableId::VeilPotion);

    assert_eq!(session.use_consumable(0).unwrap(), ConsumableOutcome::Consumed);
    assert!(session.state.world.player.invisible);
    assert!(session.state.buffs.player.has(BuffId::Veil));

    // Still veiled just before expiry.
    session.advance(Millis(4900)).unwrap();
    assert!(session.state.world.player.invisible);

    session.advance(Millis(200)).unwrap();
    assert!(!session.state.world.player.invisible);
    assert!(!session.state.buffs.player.has(BuffId::Veil));
}

#[test]
fn mana_potion_restores_spent_mana() {
    let mut session = util::session(43);
    session.give_consumable(ConsumableId::ManaPotion);
    let mana = session.state.world.player.combatant.mana.as_mut().unwrap();
    mana.lose(40);

    assert_eq!(session.use_consumable(0).unwrap(), ConsumableOutcome::Consumed);
    let mana = session.state.world.player.combatant.mana.as_ref().unwrap();
    assert_eq!(mana.value(), 60);
}
