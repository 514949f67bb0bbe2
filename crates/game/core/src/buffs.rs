//! Active buff storage and the buff lifecycle.
//!
//! Instances move through Pending → Active → Expired. Creation runs the
//! start effect exactly once; starting a buff whose identity is already
//! active only resets the remaining duration (some start effects are
//! deliberately not idempotent; a stun counter must not be incremented
//! twice by a refreshed stun). Expiry and cancellation run the end effect
//! exactly once.
//!
//! Buff instances are stored apart from the world data (see
//! [`crate::state`]) so their effects can mutate the world without
//! aliasing their own storage. Aging is driven by the engine tick.

use std::collections::BTreeMap;

use crate::clock::Millis;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::Reactions;
use crate::ids::BuffId;
use crate::state::{CombatantId, NpcHandle, World};

/// One active buff on a combatant.
pub struct BuffInstance {
    pub id: BuffId,
    pub remaining: Millis,
    pub effect: Box<dyn crate::effects::BuffEffect>,
}

/// The buffs active on a single combatant, in application order.
#[derive(Default)]
pub struct BuffSet {
    instances: Vec<BuffInstance>,
}

impl BuffSet {
    pub fn has(&self, id: BuffId) -> bool {
        self.instances.iter().any(|instance| instance.id == id)
    }

    pub fn remaining(&self, id: BuffId) -> Option<Millis> {
        self.instances
            .iter()
            .find(|instance| instance.id == id)
            .map(|instance| instance.remaining)
    }

    pub fn active_ids(&self) -> Vec<BuffId> {
        self.instances.iter().map(|instance| instance.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub(crate) fn find_mut(&mut self, id: BuffId) -> Option<&mut BuffInstance> {
        self.instances
            .iter_mut()
            .find(|instance| instance.id == id)
    }

    pub(crate) fn instances_mut(&mut self) -> impl Iterator<Item = &mut BuffInstance> {
        self.instances.iter_mut()
    }

    pub(crate) fn push(&mut self, instance: BuffInstance) {
        self.instances.push(instance);
    }

    pub(crate) fn take(&mut self, id: BuffId) -> Option<BuffInstance> {
        let index = self
            .instances
            .iter()
            .position(|instance| instance.id == id)?;
        Some(self.instances.remove(index))
    }

    /// Removes and returns every instance whose duration has run out.
    pub(crate) fn drain_expired(&mut self) -> Vec<BuffInstance> {
        let mut expired = Vec::new();
        let mut index = 0;
        while index < self.instances.len() {
            if self.instances[index].remaining.is_zero() {
                expired.push(self.instances.remove(index));
            } else {
                index += 1;
            }
        }
        expired
    }
}

/// Every active buff in the simulation, keyed by owner.
#[derive(Default)]
pub struct BuffBook {
    pub player: BuffSet,
    npcs: BTreeMap<NpcHandle, BuffSet>,
}

impl BuffBook {
    pub fn set(&self, target: CombatantId) -> Option<&BuffSet> {
        match target {
            CombatantId::Player => Some(&self.player),
            CombatantId::Npc(handle) => self.npcs.get(&handle),
        }
    }

    pub(crate) fn set_mut(&mut self, target: CombatantId) -> &mut BuffSet {
        match target {
            CombatantId::Player => &mut self.player,
            CombatantId::Npc(handle) => self.npcs.entry(handle).or_default(),
        }
    }

    pub(crate) fn npc_set_mut(&mut self, handle: NpcHandle) -> Option<&mut BuffSet> {
        self.npcs.get_mut(&handle)
    }

    /// NPC owners with at least one active buff, in handle order.
    pub(crate) fn npc_owners(&self) -> Vec<NpcHandle> {
        self.npcs.keys().copied().collect()
    }

    /// Drops all buff state of a removed NPC. End effects do not run; the
    /// combatant is gone.
    pub(crate) fn forget_npc(&mut self, handle: NpcHandle) {
        self.npcs.remove(&handle);
    }

    pub fn npc_has(&self, handle: NpcHandle, id: BuffId) -> bool {
        self.npcs.get(&handle).is_some_and(|set| set.has(id))
    }
}

/// Starts a buff on a combatant, or refreshes it if the identity is
/// already active.
///
/// Refreshing resets the remaining duration to `duration` and does NOT
/// re-run the start effect. Dead targets are ignored.
pub fn start_buff(
    world: &mut World,
    buffs: &mut BuffBook,
    env: &Env,
    target: CombatantId,
    id: BuffId,
    duration: Millis,
    out: &mut Reactions,
) -> Result<(), EngineError> {
    let target_alive = match target {
        CombatantId::Player => world.player.alive,
        CombatantId::Npc(handle) => world.npc(handle).is_some_and(|npc| npc.alive),
    };
    if !target_alive {
        return Ok(());
    }

    if let Some(instance) = buffs.set_mut(target).find_mut(id) {
        instance.remaining = duration;
        return Ok(());
    }

    let mut effect = env.registry.buff_effect(id)?;
    effect.on_start(target, world, env, out);
    buffs.set_mut(target).push(BuffInstance {
        id,
        remaining: duration,
        effect,
    });
    Ok(())
}

/// Cancels a buff immediately, running its end effect. No-op if the buff
/// is not active.
pub fn cancel_buff(
    world: &mut World,
    buffs: &mut BuffBook,
    env: &Env,
    target: CombatantId,
    id: BuffId,
    out: &mut Reactions,
) {
    if let Some(mut instance) = buffs.set_mut(target).take(id) {
        instance.effect.on_end(target, world, env, out);
    }
}
