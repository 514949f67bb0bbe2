//! War stomp: a short channel that roots the caster, then a shockwave
//! that stuns and damages everything nearby.

use ashfall_core::clock::{Millis, PeriodicTimer};
use ashfall_core::combat::{DamageSource, DamageType};
use ashfall_core::effects::{
    AbilityData, AbilityEffect, AbilityOutcome, BuffEffect, BuffTick,
};
use ashfall_core::engine::start_buff_now;
use ashfall_core::env::Env;
use ashfall_core::error::EngineError;
use ashfall_core::events::{Reaction, Reactions};
use ashfall_core::ids::{AbilityId, BuffId, SoundId};
use ashfall_core::registry::RegistryBuilder;
use ashfall_core::state::{CombatantId, GameState, VisualEffect, World};

use crate::buffs::StunBuff;

const CHANNEL_DURATION: Millis = Millis(500);
const SHOCKWAVE_RADIUS: i32 = 80;
const MIN_DAMAGE: u32 = 6;
const MAX_DAMAGE: u32 = 8;

struct WarStomp;

impl AbilityEffect for WarStomp {
    fn cast(&self, state: &mut GameState, env: &Env) -> Result<AbilityOutcome, EngineError> {
        start_buff_now(
            state,
            env,
            CombatantId::Player,
            BuffId::ChannelingStomp,
            CHANNEL_DURATION,
        )?;
        Ok(AbilityOutcome::success())
    }
}

/// The wind-up: the caster is rooted and stunned by their own channel,
/// and a shrinking circle telegraphs the shockwave.
struct ChannelingStomp {
    graphics: PeriodicTimer,
    graphics_size: i32,
}

impl ChannelingStomp {
    fn new() -> Self {
        Self {
            graphics: PeriodicTimer::new(Millis(80)),
            graphics_size: 40,
        }
    }
}

impl BuffEffect for ChannelingStomp {
    fn on_start(
        &mut self,
        _target: CombatantId,
        world: &mut World,
        _env: &Env,
        _out: &mut Reactions,
    ) {
        world.player.combatant.stun.add_one();
        world.player.entity.set_not_moving();
    }

    fn on_tick(
        &mut self,
        _target: CombatantId,
        world: &mut World,
        _env: &Env,
        elapsed: Millis,
        _out: &mut Reactions,
    ) -> BuffTick {
        if self.graphics.advance(elapsed) {
            let center = world.player.entity.center();
            world.push_visual(VisualEffect::circle(
                (250, 250, 250),
                center,
                self.graphics_size,
                self.graphics_size + 10,
                Millis(70),
            ));
            self.graphics_size -= 7;
        }
        BuffTick::Continue
    }

    fn on_end(
        &mut self,
        _target: CombatantId,
        world: &mut World,
        env: &Env,
        out: &mut Reactions,
    ) {
        world.player.combatant.stun.remove_one();

        let center = world.player.entity.center();
        world.push_visual(VisualEffect::rect(
            (50, 50, 50),
            center,
            SHOCKWAVE_RADIUS * 2,
            SHOCKWAVE_RADIUS * 2,
            Millis(200),
        ));
        world.push_visual(VisualEffect::rect(
            (250, 250, 0),
            center,
            SHOCKWAVE_RADIUS,
            SHOCKWAVE_RADIUS * 2,
            Millis(100),
        ));
        world.push_sound(SoundId::AbilityWarStomp);

        for handle in env.spatial.enemies_within(world, center, SHOCKWAVE_RADIUS) {
            let amount = world.rng.range(MIN_DAMAGE, MAX_DAMAGE);
            out.push(Reaction::DealDamage {
                attacker: Some(CombatantId::Player),
                defender: CombatantId::Npc(handle),
                amount,
                damage_type: DamageType::Physical,
                source: DamageSource::Ability(AbilityId::WarStomp),
            });
            out.push(Reaction::StartBuff {
                target: CombatantId::Npc(handle),
                buff: BuffId::StunnedByStomp,
                duration: env.balance.stomp_stun,
            });
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .ability(
            AbilityId::WarStomp,
            AbilityData {
                mana_cost: 12,
                cooldown: Millis(7000),
                sound: None,
            },
            WarStomp,
        )
        .buff(BuffId::ChannelingStomp, || Box::new(ChannelingStomp::new()))
        .buff(BuffId::StunnedByStomp, || Box::new(StunBuff))
}
