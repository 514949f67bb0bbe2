//! Mend's full-health refusal and healing window, and the pendant's
//! pain-triggered damage buff.

mod util;

use ashfall_core::clock::Millis;
use ashfall_core::combat::{self, DamageSource, DamageType};
use ashfall_core::effects::AbilityOutcome;
use ashfall_core::ids::{AbilityId, BuffId, ItemId};
use ashfall_core::state::CombatantId;
use ashfall_core::stats::StatKind;

#[test]
fn mend_refuses_at_full_health_and_heals_over_time() {
    let mut session = util::session(51);

    let outcome = session.activate_ability(AbilityId::Mend).unwrap();
    assert_eq!(outcome, AbilityOutcome::failed("Already at full health"));
    assert!(!session.state.buffs.player.has(BuffId::Mending));

    session.state.world.player.combatant.health.lose(30);
    let outcome = session.activate_ability(AbilityId::Mend).unwrap();
    assert!(outcome.is_success());

    // 2000ms at 2 health per 400ms tick: 10 health total.
    for _ in 0..5 {
        session.advance(Millis(400)).unwrap();
    }
    assert_eq!(session.state.world.player.combatant.health.value(), 80);
    assert!(!session.state.buffs.player.has(BuffId::Mending));
}

#[test]
fn mend_terminates_early_once_health_is_full() {
    let mut session = util::session(53);
    session.state.world.player.combatant.health.lose(4);
    assert!(session.activate_ability(AbilityId::Mend).unwrap().is_success());

    // Two ticks cover the missing 4 health; the third notices the full
    // pool and ends the buff well before its 2000ms duration.
    session.advance(Millis(400)).unwrap();
    session.advance(Millis(400)).unwrap();
    assert_eq!(session.state.world.player.combatant.health.value(), 100);
    session.advance(Millis(400)).unwrap();
    assert!(!session.state.buffs.player.has(BuffId::Mending));
}

#[test]
fn losing_health_empowers_through_the_pendant() {
    let mut session = util::session(52);
    session.give_item(ItemId::PendantOfAnguish).unwrap();
    assert_eq!(
        session.state.world.player.combatant.sheet.value(StatKind::Damage),
        10
    );

    session
        .with_env(|state, env| {
            combat::apply_combat_damage(
                state,
                env,
                None,
                CombatantId::Player,
                5,
                DamageType::Magic,
                DamageSource::Melee,
                0,
            )
        })
        .unwrap();

    assert!(session.state.buffs.player.has(BuffId::Empowered));
    assert_eq!(
        session.state.world.player.combatant.sheet.value(StatKind::Damage),
        30
    );

    // The surge of power fades; the pendant's own bonus stays.
    for _ in 0..4 {
        session.advance(Millis(800)).unwrap();
    }
    assert!(!session.state.buffs.player.has(BuffId::Empowered));
    assert_eq!(
        session.state.world.player.combatant.sheet.value(StatKind::Damage),
        10
    );
}
