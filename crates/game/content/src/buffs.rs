//! Reusable buff effect shapes shared by abilities, items, and
//! projectiles.
//!
//! The concrete registrations live with their owners (the war stomp
//! registers its stun, the jagged axe registers its bleed); this module
//! only provides the building blocks.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::combat::{DamageSource, DamageType};
use ashfall_core::effects::{BuffEffect, BuffTick};
use ashfall_core::env::Env;
use ashfall_core::events::{Reaction, Reactions};
use ashfall_core::state::{CombatantId, VisualEffect, World};

/// Increments the owner's stun counter for the duration.
///
/// The counter-based stun status is why refreshing must not re-run the
/// start effect: a refreshed stun would otherwise leave a permanent
/// count behind.
pub struct StunBuff;

impl BuffEffect for StunBuff {
    fn on_start(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        if let Some(combatant) = world.combatant_mut(target) {
            combatant.stun.add_one();
        }
        if let Some(entity) = world.entity_of_mut(target) {
            entity.set_not_moving();
        }
        if let Some(entity) = world.entity_of(target) {
            let center = entity.center();
            world.push_visual(VisualEffect::label(center, "Stunned"));
            world.push_visual(VisualEffect::circle((220, 220, 50), center, 9, 16, Millis(250)));
        }
    }

    fn on_end(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        if let Some(combatant) = world.combatant_mut(target) {
            combatant.stun.remove_one();
        }
    }
}

/// Periodic damage against the buff's owner.
pub struct DamageOverTime {
    timer: PeriodicTimer,
    amount: u32,
    damage_type: DamageType,
    source: DamageSource,
    /// Whether the player is credited as the attacker (and so gets stat
    /// scaling and the damage-dealt event).
    from_player: bool,
}

impl DamageOverTime {
    pub fn new(
        interval: Millis,
        amount: u32,
        damage_type: DamageType,
        source: DamageSource,
        from_player: bool,
    ) -> Self {
        Self {
            timer: PeriodicTimer::new(interval),
            amount,
            damage_type,
            source,
            from_player,
        }
    }
}

impl BuffEffect for DamageOverTime {
    fn on_tick(
        &mut self,
        target: CombatantId,
        _world: &mut World,
        _env: &Env,
        elapsed: Millis,
        out: &mut Reactions,
    ) -> BuffTick {
        if self.timer.advance(elapsed) {
            out.push(Reaction::DealDamage {
                attacker: self.from_player.then_some(CombatantId::Player),
                defender: target,
                amount: self.amount,
                damage_type: self.damage_type,
                source: self.source,
            });
        }
        BuffTick::Continue
    }
}

/// Periodic healing of the buff's owner.
///
/// Ends itself early once the owner is back at full health; the
/// remaining duration would only waste ticks.
pub struct HealOverTime {
    timer: PeriodicTimer,
    amount: u32,
}

impl HealOverTime {
    pub fn new(interval: Millis, amount: u32) -> Self {
        Self {
            timer: PeriodicTimer::new(interval),
            amount,
        }
    }
}

impl BuffEffect for HealOverTime {
    fn on_tick(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        elapsed: Millis,
        out: &mut Reactions,
    ) -> BuffTick {
        if world
            .combatant(target)
            .is_some_and(|combatant| combatant.health.is_at_max())
        {
            return BuffTick::Expire;
        }
        if self.timer.advance(elapsed) {
            out.push(Reaction::Heal {
                target,
                amount: self.amount,
            });
        }
        BuffTick::Continue
    }
}

/// Hides the player from NPC minds for the duration.
pub struct VeilBuff {
    sparkle: PeriodicTimer,
}

impl VeilBuff {
    pub fn new() -> Self {
        Self {
            sparkle: PeriodicTimer::new(Millis(320)),
        }
    }
}

impl Default for VeilBuff {
    fn default() -> Self {
        Self::new()
    }
}

impl BuffEffect for VeilBuff {
    fn on_start(
        &mut self,
        target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        debug_assert_eq!(target, CombatantId::Player, "only the player can veil");
        world.player.invisible = true;
    }

    fn on_tick(
        &mut self,
        _target: CombatantId,
        world: &mut World,
        _env: &Env,
        elapsed: Millis,
        _out: &mut Reactions,
    ) -> BuffTick {
        if self.sparkle.advance(elapsed) {
            let center = world.player.entity.center();
            world.push_visual(VisualEffect::rect((0, 0, 250), center, 60, 60, Millis(400)));
        }
        BuffTick::Continue
    }

    fn on_end(
        &mut self,
        _target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        world.player.invisible = false;
    }
}
