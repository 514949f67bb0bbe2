//! The damage pipeline: layered mitigation with a fixed resolution order.
//!
//! `apply_combat_damage` resolves one hit. The step order is load-bearing
//! and must not be rearranged:
//!
//! 1. dodge roll: on success nothing else runs
//! 2. block roll: reduces damage and raises the block event *before* any
//!    resource mutation, so block-reactive items act on the pre-hit state
//! 3. type-specific mitigation (armor against physical; magic passes)
//! 4. health loss, death marking, death event
//! 5. life steal, only when damage was actually dealt
//! 6. damage-dealt event, tagged with its source
//!
//! Healing is the short path: gain, clamp, health-change event.

use crate::clock::Millis;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::{self, GameEvent};
use crate::ids::{AbilityId, BuffId, ItemId, ProjectileId, SoundId};
use crate::state::{CombatantId, GameState, VisualEffect};

/// Damage classification for mitigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Reduced by armor.
    Physical,
    /// Unaffected by armor.
    Magic,
}

/// Origin tag carried by damage and its resulting event.
///
/// Reactive effects use this to exclude themselves: a bleed proc must not
/// trigger on the bleed's own ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Plain contact attack.
    Melee,
    Ability(AbilityId),
    Buff(BuffId),
    Item(ItemId),
    Projectile(ProjectileId),
}

/// Result of one pass through the damage pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The defender no longer exists or is already dead; nothing happened.
    NoTarget,
    /// The dodge roll succeeded; no resource was mutated and no damage
    /// event was published.
    Dodged,
    Dealt {
        /// Damage actually subtracted from the defender's health. Zero
        /// when block and mitigation absorbed the hit entirely.
        final_damage: u32,
        blocked: bool,
        defender_died: bool,
    },
}

impl DamageOutcome {
    pub fn defender_died(&self) -> bool {
        matches!(
            self,
            DamageOutcome::Dealt {
                defender_died: true,
                ..
            }
        )
    }
}

/// Resolves one hit from `attacker` against `defender`.
///
/// `attacker` is `None` for unowned damage (environmental, orphaned
/// projectiles); such damage gets no stat scaling and no life steal.
/// `depth` is the reactive chain depth; top-level calls pass zero.
#[allow(clippy::too_many_arguments)]
pub fn apply_combat_damage(
    state: &mut GameState,
    env: &Env,
    attacker: Option<CombatantId>,
    defender: CombatantId,
    base_amount: u32,
    damage_type: DamageType,
    source: DamageSource,
    depth: u32,
) -> Result<DamageOutcome, EngineError> {
    let defender_alive = match defender {
        CombatantId::Player => state.world.player.alive,
        CombatantId::Npc(handle) => state.world.npc(handle).is_some_and(|npc| npc.alive),
    };
    if !defender_alive {
        return Ok(DamageOutcome::NoTarget);
    }

    // Attacker-side scaling.
    let attacker_snapshot = attacker
        .and_then(|id| state.world.combatant(id))
        .map(|combatant| combatant.sheet.snapshot());
    let mut amount = base_amount as i64;
    if let Some(snap) = &attacker_snapshot {
        let type_bonus = match damage_type {
            DamageType::Physical => snap.physical_damage,
            DamageType::Magic => snap.magic_damage,
        };
        amount = amount * (100 + snap.damage as i64 + type_bonus as i64) / 100;
    }
    let mut amount = amount.max(0) as u32;

    let defender_snapshot = state
        .world
        .combatant(defender)
        .map(|combatant| combatant.sheet.snapshot())
        .unwrap_or_default();
    let attacker_npc = match attacker {
        Some(CombatantId::Npc(handle)) => Some(handle),
        _ => None,
    };

    // 1. Dodge: nullifies the hit entirely.
    if state.world.rng.chance(defender_snapshot.dodge_chance) {
        let position = defender_position(state, defender);
        state
            .world
            .push_visual(VisualEffect::label(position, "Dodge"));
        state.world.push_sound(SoundId::AttackDodged);
        if defender == CombatantId::Player {
            events::publish(
                state,
                env,
                CombatantId::Player,
                GameEvent::PlayerDodged {
                    attacker: attacker_npc,
                },
                depth,
            )?;
        }
        return Ok(DamageOutcome::Dodged);
    }

    // 2. Block: flat reduction, event raised before any resource mutation.
    let mut blocked = false;
    if state.world.rng.chance(defender_snapshot.block_chance) {
        blocked = true;
        amount = amount
            .saturating_sub(defender_snapshot.block_amount)
            .max(env.balance.min_chip_damage);
        let position = defender_position(state, defender);
        state
            .world
            .push_visual(VisualEffect::label(position, "Block"));
        state.world.push_sound(SoundId::AttackBlocked);
        if defender == CombatantId::Player {
            events::publish(
                state,
                env,
                CombatantId::Player,
                GameEvent::PlayerBlocked {
                    attacker: attacker_npc,
                },
                depth,
            )?;
        }
    }

    // 3. Type-specific mitigation.
    if damage_type == DamageType::Physical {
        let reduction = (defender_snapshot.armor.max(0) as u32) / env.balance.armor_divisor.max(1);
        amount = amount.saturating_sub(reduction);
    }

    if amount == 0 {
        return Ok(DamageOutcome::Dealt {
            final_damage: 0,
            blocked,
            defender_died: false,
        });
    }

    // 4. Health loss and death.
    let mut defender_died = false;
    {
        let Some(combatant) = state.world.combatant_mut(defender) else {
            return Ok(DamageOutcome::NoTarget);
        };
        combatant.health.lose(amount);
        if combatant.health.is_at_or_below_zero() {
            defender_died = true;
        }
    }
    let position = defender_position(state, defender);
    state
        .world
        .push_visual(VisualEffect::damage_number(position, amount));

    match defender {
        CombatantId::Player => {
            state.world.push_sound(SoundId::PlayerPain);
            events::publish(
                state,
                env,
                CombatantId::Player,
                GameEvent::PlayerLostHealth { amount },
                depth,
            )?;
        }
        CombatantId::Npc(_) => {}
    }

    if defender_died {
        match defender {
            CombatantId::Player => {
                state.world.player.alive = false;
                state.world.push_sound(SoundId::PlayerDied);
                events::publish(state, env, CombatantId::Player, GameEvent::PlayerDied, depth)?;
            }
            CombatantId::Npc(handle) => {
                if let Some(npc) = state.world.npc_mut(handle) {
                    npc.alive = false;
                    npc.entity.set_not_moving();
                }
                state.world.push_sound(SoundId::EnemyDied);
                events::publish(
                    state,
                    env,
                    CombatantId::Player,
                    GameEvent::EnemyDied { npc: handle },
                    depth,
                )?;
            }
        }
    }

    // 5. Life steal, capped by the attacker's own max health via the
    // meter clamp. Dodge and block short-circuits never reach this point.
    if let (Some(attacker_id), Some(snap)) = (attacker, &attacker_snapshot) {
        if snap.life_steal > 0 {
            let healed = amount * snap.life_steal / 100;
            if healed > 0 {
                if let Some(combatant) = state.world.combatant_mut(attacker_id) {
                    combatant.health.gain(healed);
                }
            }
        }
    }

    // 6. Damage-dealt event, tagged with its source.
    if attacker == Some(CombatantId::Player) {
        if let CombatantId::Npc(handle) = defender {
            events::publish(
                state,
                env,
                CombatantId::Player,
                GameEvent::PlayerDealtDamage {
                    npc: handle,
                    amount,
                    source,
                },
                depth,
            )?;
        }
    }

    Ok(DamageOutcome::Dealt {
        final_damage: amount,
        blocked,
        defender_died,
    })
}

/// Restores health: gain, clamp, health-change event.
pub fn apply_healing(
    state: &mut GameState,
    env: &Env,
    target: CombatantId,
    amount: u32,
    depth: u32,
) -> Result<(), EngineError> {
    let target_alive = match target {
        CombatantId::Player => state.world.player.alive,
        CombatantId::Npc(handle) => state.world.npc(handle).is_some_and(|npc| npc.alive),
    };
    if !target_alive || amount == 0 {
        return Ok(());
    }

    if let Some(combatant) = state.world.combatant_mut(target) {
        combatant.health.gain(amount);
    }
    let position = defender_position(state, target);
    state
        .world
        .push_visual(VisualEffect::circle((80, 200, 80), position, 20, 30, Millis(400)));

    if target == CombatantId::Player {
        events::publish(
            state,
            env,
            CombatantId::Player,
            GameEvent::PlayerHealed { amount },
            depth,
        )?;
    }
    Ok(())
}

fn defender_position(state: &GameState, id: CombatantId) -> crate::state::Position {
    state
        .world
        .entity_of(id)
        .map(|entity| entity.center())
        .unwrap_or_default()
}
