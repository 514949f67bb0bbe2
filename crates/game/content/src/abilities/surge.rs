//! Surge: a short dash through an enemy, with a protective stance after
//! a connecting hit.
//!
//! The cast is all-or-nothing: the landing spot and the path are probed
//! before anything is mutated, so "Wall is blocking" and "No space"
//! leave the player exactly where they were.

use ashfall_core::clock::Millis;
use ashfall_core::combat::{self, DamageSource, DamageType};
use ashfall_core::effects::{AbilityData, AbilityEffect, AbilityOutcome, StatModifyingBuff};
use ashfall_core::engine::start_buff_now;
use ashfall_core::env::{Env, MovingActor};
use ashfall_core::error::EngineError;
use ashfall_core::ids::{AbilityId, BuffId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, GameState, NpcHandle, Rect, VisualEffect};
use ashfall_core::stats::{StatKind, StatModifier};

const DAMAGE: u32 = 5;
const GUARD_DURATION: Millis = Millis(3000);
const GUARD_ARMOR: i32 = 3;
const GUARD_REGEN: i32 = 5;
/// Landing spots probed outward from the caster, in pixels.
const MIN_DISTANCE: i32 = 40;
const MAX_DISTANCE: i32 = 200;
const PROBE_STEP: i32 = 10;

struct Surge;

impl Surge {
    /// First enemy whose hitbox the dash path crosses.
    fn enemy_along_path(
        state: &GameState,
        env: &Env,
        distance: i32,
    ) -> Option<NpcHandle> {
        let player = &state.world.player.entity;
        let mut partial = PROBE_STEP;
        while partial < distance {
            let probe = Rect::at(
                player.position.translated(player.direction, partial),
                player.size,
            );
            if let Some(handle) = env
                .spatial
                .enemies_intersecting(&state.world, probe)
                .first()
            {
                return Some(*handle);
            }
            partial += PROBE_STEP;
        }
        None
    }

    fn wall_along_path(state: &GameState, env: &Env, distance: i32) -> bool {
        let player = &state.world.player.entity;
        let mut partial = PROBE_STEP;
        while partial < distance {
            let probe = Rect::at(
                player.position.translated(player.direction, partial),
                player.size,
            );
            if env.spatial.wall_blocks(&state.world, probe) {
                return true;
            }
            partial += PROBE_STEP;
        }
        false
    }
}

impl AbilityEffect for Surge {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        let player = state.world.player.entity;
        let previous_center = player.center();

        let mut distance = MIN_DISTANCE;
        while distance <= MAX_DISTANCE {
            let landing = player.position.translated(player.direction, distance);
            let clear = !env.spatial.would_collide(
                &state.world,
                player.size,
                landing,
                MovingActor::Player,
            );
            if clear {
                if Self::wall_along_path(state, env, distance) {
                    return Ok(AbilityOutcome::failed("Wall is blocking"));
                }

                let mut refund = false;
                if let Some(enemy) = Self::enemy_along_path(state, env, distance) {
                    let outcome = combat::apply_combat_damage(
                        state,
                        env,
                        Some(CombatantId::Player),
                        CombatantId::Npc(enemy),
                        DAMAGE,
                        DamageType::Physical,
                        DamageSource::Ability(AbilityId::Surge),
                        0,
                    )?;
                    start_buff_now(
                        state,
                        env,
                        CombatantId::Player,
                        BuffId::SurgeGuard,
                        GUARD_DURATION,
                    )?;
                    refund = env.balance.surge_kill_refund && outcome.defender_died();
                }

                let entity = &mut state.world.player.entity;
                entity.position = landing;
                let new_center = entity.center();

                let color = (250, 140, 80);
                state
                    .world
                    .push_visual(VisualEffect::circle(color, previous_center, 17, 35, Millis(150)));
                state
                    .world
                    .push_visual(VisualEffect::line(color, previous_center, new_center, Millis(250)));
                state
                    .world
                    .push_visual(VisualEffect::circle(color, new_center, 25, 40, Millis(300)));

                return Ok(if refund {
                    AbilityOutcome::refunding()
                } else {
                    AbilityOutcome::success()
                });
            }
            distance += PROBE_STEP;
        }
        Ok(AbilityOutcome::failed("No space"))
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .ability(
            AbilityId::Surge,
            AbilityData {
                mana_cost: 12,
                cooldown: Millis(4000),
                sound: Some(SoundId::AbilitySurge),
            },
            Surge,
        )
        .buff(BuffId::SurgeGuard, || {
            Box::new(StatModifyingBuff::new(vec![
                StatModifier::flat(StatKind::Armor, GUARD_ARMOR),
                StatModifier::flat(StatKind::HealthRegen, GUARD_REGEN),
            ]))
        })
}
