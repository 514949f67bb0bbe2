//! Combat events and their synchronous, per-combatant delivery.
//!
//! Events are immutable values created by the damage pipeline and other
//! mutators, delivered to every currently-registered listener of the
//! audience combatant, then discarded. They are never queued across ticks.
//!
//! Delivery order is fixed: active item effects in inventory slot order,
//! then active buffs in application order. Listeners must not publish to
//! the bus they are being invoked from; instead they return [`Reaction`]
//! values, which the engine applies, including any events *those* raise,
//! before [`publish`] returns. Chains are capped by
//! [`BalanceTable::reactive_depth_limit`](crate::env::BalanceTable) so a
//! reactive loop cannot recurse unboundedly.

use crate::buffs;
use crate::clock::Millis;
use crate::combat::{self, DamageSource, DamageType};
use crate::env::Env;
use crate::error::EngineError;
use crate::ids::BuffId;
use crate::state::{CombatantId, GameState, NpcHandle};

/// Something that happened this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    EnemyDied {
        npc: NpcHandle,
    },
    PlayerDied,
    PlayerLostHealth {
        amount: u32,
    },
    PlayerHealed {
        amount: u32,
    },
    PlayerDealtDamage {
        npc: NpcHandle,
        amount: u32,
        /// Lets reactive effects exclude their own damage (a bleed must
        /// not re-trigger itself).
        source: DamageSource,
    },
    PlayerBlocked {
        attacker: Option<NpcHandle>,
    },
    PlayerDodged {
        attacker: Option<NpcHandle>,
    },
}

/// Follow-up work requested by a listener or stored effect.
///
/// Reactions exist because stored effects cannot touch the collections
/// they live in while those collections are being iterated; the engine
/// applies them at well-defined points within the same call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    StartBuff {
        target: CombatantId,
        buff: BuffId,
        duration: Millis,
    },
    CancelBuff {
        target: CombatantId,
        buff: BuffId,
    },
    DealDamage {
        attacker: Option<CombatantId>,
        defender: CombatantId,
        amount: u32,
        damage_type: DamageType,
        source: DamageSource,
    },
    Heal {
        target: CombatantId,
        amount: u32,
    },
}

/// Reactions collected during one listener pass or effect phase.
pub type Reactions = Vec<Reaction>;

/// Publishes an event to a combatant's listeners.
///
/// Fully synchronous: every listener runs, and every reaction they
/// requested (plus the events those reactions raise, up to the depth cap)
/// is applied before this returns. Events past the depth cap are dropped.
pub fn publish(
    state: &mut GameState,
    env: &Env,
    audience: CombatantId,
    event: GameEvent,
    depth: u32,
) -> Result<(), EngineError> {
    if depth > env.balance.reactive_depth_limit {
        return Ok(());
    }

    state.world.event_log.push(event);

    let mut reactions: Reactions = Vec::new();
    {
        let GameState { world, gear, buffs } = state;
        match audience {
            CombatantId::Player => {
                // Items first, in inventory slot order.
                for id in gear.inventory.active_item_ids() {
                    if let Some(item) = gear.active.iter_mut().find(|item| item.id == id) {
                        if item.effect.is_reactive() {
                            item.effect.handle_event(&event, world, &mut reactions);
                        }
                    }
                }
                // Then buffs, in application order.
                for instance in buffs.player.instances_mut() {
                    if instance.effect.is_reactive() {
                        instance.effect.handle_event(&event, &mut reactions);
                    }
                }
            }
            CombatantId::Npc(handle) => {
                if let Some(set) = buffs.npc_set_mut(handle) {
                    for instance in set.instances_mut() {
                        if instance.effect.is_reactive() {
                            instance.effect.handle_event(&event, &mut reactions);
                        }
                    }
                }
            }
        }
    }

    if !reactions.is_empty() {
        apply_reactions(state, env, reactions, depth + 1)?;
    }
    Ok(())
}

/// Applies a batch of reactions, draining any further reactions produced
/// by buff start/end effects along the way.
///
/// `depth` is the reactive chain depth used for events raised while
/// applying; callers outside a listener pass use zero.
pub fn apply_reactions(
    state: &mut GameState,
    env: &Env,
    reactions: Reactions,
    depth: u32,
) -> Result<(), EngineError> {
    let mut queue = std::collections::VecDeque::from(reactions);
    while let Some(reaction) = queue.pop_front() {
        match reaction {
            Reaction::StartBuff {
                target,
                buff,
                duration,
            } => {
                let mut out = Vec::new();
                {
                    let GameState { world, buffs, .. } = state;
                    buffs::start_buff(world, buffs, env, target, buff, duration, &mut out)?;
                }
                queue.extend(out);
            }
            Reaction::CancelBuff { target, buff } => {
                let mut out = Vec::new();
                {
                    let GameState { world, buffs, .. } = state;
                    buffs::cancel_buff(world, buffs, env, target, buff, &mut out);
                }
                queue.extend(out);
            }
            Reaction::DealDamage {
                attacker,
                defender,
                amount,
                damage_type,
                source,
            } => {
                combat::apply_combat_damage(
                    state, env, attacker, defender, amount, damage_type, source, depth,
                )?;
            }
            Reaction::Heal { target, amount } => {
                combat::apply_healing(state, env, target, amount, depth)?;
            }
        }
    }
    Ok(())
}
