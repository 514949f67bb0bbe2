//! Per-tick phase sequencing.
//!
//! Ordering is part of the engine contract: buff aging and expiry run
//! before projectile, melee, and mind work in the same tick, and removal
//! of dead NPCs or spent projectiles happens only at the tick boundary.

use crate::clock::Millis;
use crate::combat::{self, DamageSource, DamageType};
use crate::effects::{BuffTick, ProjectileFate};
use crate::env::{Env, MovingActor};
use crate::error::EngineError;
use crate::events;
use crate::state::{CombatantId, GameState, NpcHandle, World};
use crate::stats::StatKind;

pub(crate) fn advance(state: &mut GameState, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
    state.world.clock += elapsed;

    regenerate(&mut state.world, elapsed);
    tick_buffs(state, env, elapsed)?;
    tick_projectiles(state, env, elapsed)?;
    tick_melee(state, env, elapsed)?;
    tick_minds(state, env, elapsed)?;
    integrate_movement(&mut state.world, env, elapsed);
    cleanup(state);
    Ok(())
}

fn regenerate(world: &mut World, elapsed: Millis) {
    if world.player.alive {
        world.player.combatant.health.regenerate(elapsed);
        if let Some(mana) = world.player.combatant.mana.as_mut() {
            mana.regenerate(elapsed);
        }
    }
    for npc in world.npcs.iter_mut().filter(|npc| npc.alive) {
        npc.combatant.health.regenerate(elapsed);
    }
}

fn tick_buffs(state: &mut GameState, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
    tick_buff_set(state, env, CombatantId::Player, elapsed)?;
    for handle in state.buffs.npc_owners() {
        tick_buff_set(state, env, CombatantId::Npc(handle), elapsed)?;
    }
    Ok(())
}

/// Ages one combatant's buffs: tick effect, duration decrement, then end
/// effects for everything that ran out. End effects run exactly once per
/// instance because expired instances are drained out of the set.
fn tick_buff_set(
    state: &mut GameState,
    env: &Env,
    target: CombatantId,
    elapsed: Millis,
) -> Result<(), EngineError> {
    let mut reactions = Vec::new();
    {
        let GameState { world, buffs, .. } = state;
        let set = match target {
            CombatantId::Player => Some(&mut buffs.player),
            CombatantId::Npc(handle) => buffs.npc_set_mut(handle),
        };
        let Some(set) = set else {
            return Ok(());
        };
        for instance in set.instances_mut() {
            let fate = instance
                .effect
                .on_tick(target, world, env, elapsed, &mut reactions);
            instance.remaining = instance.remaining.saturating_sub(elapsed);
            if fate == BuffTick::Expire {
                instance.remaining = Millis::ZERO;
            }
        }
        for mut instance in set.drain_expired() {
            instance.effect.on_end(target, world, env, &mut reactions);
        }
    }
    if !reactions.is_empty() {
        events::apply_reactions(state, env, reactions, 0)?;
    }
    Ok(())
}

/// Moves, ages, and collides every live projectile.
///
/// The projectile list is checked out for the duration of the pass;
/// projectiles spawned by controllers during the pass land in the live
/// (empty) list and are merged back afterwards, so they first act on the
/// following tick.
fn tick_projectiles(state: &mut GameState, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
    let mut projectiles = std::mem::take(&mut state.world.projectiles);
    for projectile in projectiles.iter_mut() {
        if projectile.entity.moving {
            let (position, carry) = projectile.entity.plan_step(elapsed, 100);
            projectile.entity.commit_step(position, carry);
        }

        match projectile
            .controller
            .on_tick(&mut projectile.entity, state, env, elapsed)?
        {
            ProjectileFate::Expired => {
                projectile.expired = true;
                continue;
            }
            ProjectileFate::Alive => {}
        }

        let rect = projectile.entity.rect();
        for handle in env.spatial.enemies_intersecting(&state.world, rect) {
            if projectile.controller.on_enemy_hit(handle, state, env)? {
                projectile.expired = true;
                break;
            }
        }
        if !projectile.expired
            && state.world.player.alive
            && env.spatial.player_intersects(&state.world, rect)
            && projectile.controller.on_player_hit(state, env)?
        {
            projectile.expired = true;
        }
    }
    projectiles.retain(|projectile| !projectile.expired);

    let spawned = std::mem::take(&mut state.world.projectiles);
    projectiles.extend(spawned);
    state.world.projectiles = projectiles;
    Ok(())
}

/// Melee reach in pixels beyond the attacker's hitbox. Collision keeps
/// bodies from overlapping, so contact is judged with a small margin.
const MELEE_REACH: i32 = 4;

/// Contact attacks from melee NPCs, gated by their attack timer and stun.
fn tick_melee(state: &mut GameState, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
    for handle in state.world.npc_handles() {
        let Some(npc) = state.world.npc_mut(handle) else {
            continue;
        };
        if !npc.alive || npc.combatant.stun.is_stunned() {
            continue;
        }
        let Some(melee) = npc.melee.as_mut() else {
            continue;
        };
        let damage = melee.damage;
        if !melee.timer.advance(elapsed) {
            continue;
        }
        let reach = npc.entity.rect().inflated(MELEE_REACH);
        if state.world.player.alive && env.spatial.player_intersects(&state.world, reach) {
            combat::apply_combat_damage(
                state,
                env,
                Some(CombatantId::Npc(handle)),
                CombatantId::Player,
                damage,
                DamageType::Physical,
                DamageSource::Melee,
                0,
            )?;
        }
    }
    Ok(())
}

/// Lets every live, unstunned NPC's mind run.
///
/// The mind is checked out of the NPC while it runs so it can mutate the
/// rest of the world freely, then put back.
fn tick_minds(state: &mut GameState, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
    for handle in state.world.npc_handles() {
        let Some(npc) = state.world.npc_mut(handle) else {
            continue;
        };
        if !npc.alive || npc.combatant.stun.is_stunned() {
            continue;
        }
        let Some(mut mind) = npc.mind.take() else {
            continue;
        };
        let result = mind.decide(handle, state, env, elapsed);
        if let Some(npc) = state.world.npc_mut(handle) {
            npc.mind = Some(mind);
        }
        result?;
    }
    Ok(())
}

/// Turns movement intent into position changes, gated by stun and the
/// collision oracle. Blocked movers drop their sub-pixel remainder so
/// they don't lurch when the path clears.
fn integrate_movement(world: &mut World, env: &Env, elapsed: Millis) {
    if world.player.alive
        && world.player.entity.moving
        && !world.player.combatant.stun.is_stunned()
    {
        let speed = world.player.combatant.sheet.value(StatKind::MoveSpeed).max(0) as u32;
        let entity = world.player.entity;
        let (position, carry) = entity.plan_step(elapsed, speed);
        if position != entity.position
            && env
                .spatial
                .would_collide(world, entity.size, position, MovingActor::Player)
        {
            world.player.entity.clear_move_carry();
        } else {
            world.player.entity.commit_step(position, carry);
        }
    }

    let handles: Vec<NpcHandle> = world.npc_handles();
    for handle in handles {
        let Some(npc) = world.npc(handle) else {
            continue;
        };
        if !npc.entity.moving || npc.combatant.stun.is_stunned() {
            continue;
        }
        let speed = npc.combatant.sheet.value(StatKind::MoveSpeed).max(0) as u32;
        let entity = npc.entity;
        let (position, carry) = entity.plan_step(elapsed, speed);
        let blocked = position != entity.position
            && env
                .spatial
                .would_collide(world, entity.size, position, MovingActor::Npc(handle));
        if let Some(npc) = world.npc_mut(handle) {
            if blocked {
                npc.entity.clear_move_carry();
            } else {
                npc.entity.commit_step(position, carry);
            }
        }
    }
}

/// Tick-boundary removal of combat corpses and their buff state.
fn cleanup(state: &mut GameState) {
    let dead: Vec<NpcHandle> = state
        .world
        .npcs
        .iter()
        .filter(|npc| !npc.alive)
        .map(|npc| npc.handle)
        .collect();
    for handle in dead {
        state.buffs.forget_npc(handle);
    }
    state.world.npcs.retain(|npc| npc.alive);
}
