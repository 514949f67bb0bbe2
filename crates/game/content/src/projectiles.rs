//! Projectile controllers: per-kind aging, collision response, and
//! repeated-hit suppression.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::combat::{self, DamageSource, DamageType};
use ashfall_core::effects::{Lifespan, ProjectileController, ProjectileFate};
use ashfall_core::engine::start_buff_now;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::ids::{BuffId, ProjectileId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, GameState, NpcHandle, VisualEffect, WorldEntity};

use crate::buffs::DamageOverTime;

const FIREBOLT_DAMAGE: u32 = 3;
const FIREBOLT_LIFETIME: Millis = Millis(1500);
const BURN_DURATION: Millis = Millis(2500);

const CYCLONE_LIFETIME: Millis = Millis(3000);
const CYCLONE_DAMAGE_INTERVAL: Millis = Millis(350);
const CYCLONE_DAMAGE: u32 = 1;
/// Percent chance per damage pulse that the vortex veers sideways.
const CYCLONE_DRIFT_CHANCE: u32 = 7;

const PIERCER_DAMAGE: u32 = 2;
const PIERCER_LIFETIME: Millis = Millis(900);

const VENOM_BOLT_DAMAGE: u32 = 1;
const VENOM_BOLT_LIFETIME: Millis = Millis(2000);
const VENOM_DURATION: Millis = Millis(2000);
const VENOM_INTERVAL: Millis = Millis(500);

/// One-shot fire bolt: consumed by the first enemy it touches, leaving a
/// burn behind.
struct FireboltBolt {
    life: Lifespan,
}

impl ProjectileController for FireboltBolt {
    fn on_tick(
        &mut self,
        _entity: &mut WorldEntity,
        _state: &mut GameState,
        _env: &Env,
        elapsed: Millis,
    ) -> Result<ProjectileFate, EngineError> {
        Ok(if self.life.advance(elapsed) {
            ProjectileFate::Expired
        } else {
            ProjectileFate::Alive
        })
    }

    fn on_enemy_hit(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
    ) -> Result<bool, EngineError> {
        combat::apply_combat_damage(
            state,
            env,
            Some(CombatantId::Player),
            CombatantId::Npc(npc),
            FIREBOLT_DAMAGE,
            DamageType::Magic,
            DamageSource::Projectile(ProjectileId::Firebolt),
            0,
        )?;
        start_buff_now(state, env, CombatantId::Npc(npc), BuffId::Burning, BURN_DURATION)?;
        if let Some(target) = state.world.npc(npc) {
            let center = target.entity.center();
            state
                .world
                .push_visual(VisualEffect::circle((250, 100, 50), center, 10, 25, Millis(150)));
        }
        Ok(true)
    }
}

/// Area-persistent vortex: damages everything inside it on a fixed pulse
/// and occasionally veers off sideways. Never consumed by contact.
struct CycloneVortex {
    life: Lifespan,
    pulse: PeriodicTimer,
}

impl ProjectileController for CycloneVortex {
    fn on_tick(
        &mut self,
        entity: &mut WorldEntity,
        state: &mut GameState,
        env: &Env,
        elapsed: Millis,
    ) -> Result<ProjectileFate, EngineError> {
        if self.life.advance(elapsed) {
            return Ok(ProjectileFate::Expired);
        }
        if self.pulse.advance(elapsed) {
            for handle in env.spatial.enemies_intersecting(&state.world, entity.rect()) {
                combat::apply_combat_damage(
                    state,
                    env,
                    Some(CombatantId::Player),
                    CombatantId::Npc(handle),
                    CYCLONE_DAMAGE,
                    DamageType::Magic,
                    DamageSource::Projectile(ProjectileId::Cyclone),
                    0,
                )?;
            }
            if state.world.rng.chance(CYCLONE_DRIFT_CHANCE) {
                let sideways = entity.direction.perpendicular();
                entity.set_moving_in(*state.world.rng.pick(&sideways));
            }
        }
        Ok(ProjectileFate::Alive)
    }
}

/// Piercing bolt: passes through enemies, striking each at most once.
struct PiercerBolt {
    life: Lifespan,
    enemies_hit: Vec<NpcHandle>,
}

impl ProjectileController for PiercerBolt {
    fn on_tick(
        &mut self,
        _entity: &mut WorldEntity,
        _state: &mut GameState,
        _env: &Env,
        elapsed: Millis,
    ) -> Result<ProjectileFate, EngineError> {
        Ok(if self.life.advance(elapsed) {
            ProjectileFate::Expired
        } else {
            ProjectileFate::Alive
        })
    }

    fn on_enemy_hit(
        &mut self,
        npc: NpcHandle,
        state: &mut GameState,
        env: &Env,
    ) -> Result<bool, EngineError> {
        if !self.enemies_hit.contains(&npc) {
            self.enemies_hit.push(npc);
            combat::apply_combat_damage(
                state,
                env,
                Some(CombatantId::Player),
                CombatantId::Npc(npc),
                PIERCER_DAMAGE,
                DamageType::Magic,
                DamageSource::Projectile(ProjectileId::Piercer),
                0,
            )?;
        }
        Ok(false)
    }
}

/// Enemy venom bolt: consumed against the player, leaving a poison
/// behind. Ignores other enemies.
struct VenomBolt {
    life: Lifespan,
}

impl ProjectileController for VenomBolt {
    fn on_tick(
        &mut self,
        _entity: &mut WorldEntity,
        _state: &mut GameState,
        _env: &Env,
        elapsed: Millis,
    ) -> Result<ProjectileFate, EngineError> {
        Ok(if self.life.advance(elapsed) {
            ProjectileFate::Expired
        } else {
            ProjectileFate::Alive
        })
    }

    fn on_player_hit(&mut self, state: &mut GameState, env: &Env) -> Result<bool, EngineError> {
        combat::apply_combat_damage(
            state,
            env,
            None,
            CombatantId::Player,
            VENOM_BOLT_DAMAGE,
            DamageType::Magic,
            DamageSource::Projectile(ProjectileId::VenomBolt),
            0,
        )?;
        start_buff_now(state, env, CombatantId::Player, BuffId::Venom, VENOM_DURATION)?;
        let center = state.world.player.entity.center();
        state
            .world
            .push_visual(VisualEffect::circle((50, 180, 50), center, 25, 50, Millis(100)));
        Ok(true)
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .projectile(ProjectileId::Firebolt, || {
            Box::new(FireboltBolt {
                life: Lifespan::new(FIREBOLT_LIFETIME),
            })
        })
        .projectile(ProjectileId::Cyclone, || {
            Box::new(CycloneVortex {
                life: Lifespan::new(CYCLONE_LIFETIME),
                pulse: PeriodicTimer::new(CYCLONE_DAMAGE_INTERVAL),
            })
        })
        .projectile(ProjectileId::Piercer, || {
            Box::new(PiercerBolt {
                life: Lifespan::new(PIERCER_LIFETIME),
                enemies_hit: Vec::new(),
            })
        })
        .projectile(ProjectileId::VenomBolt, || {
            Box::new(VenomBolt {
                life: Lifespan::new(VENOM_BOLT_LIFETIME),
            })
        })
        .buff(BuffId::Venom, || {
            Box::new(DamageOverTime::new(
                VENOM_INTERVAL,
                1,
                DamageType::Magic,
                DamageSource::Buff(BuffId::Venom),
                false,
            ))
        })
}
