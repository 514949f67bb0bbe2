//! Authoritative simulation state.
//!
//! [`GameState`] is split into three disjoint parts so that live effect
//! objects can mutate the world they act on without aliasing themselves:
//!
//! - [`World`]: positional and combat data, sinks, the RNG. Everything an
//!   effect is allowed to touch directly.
//! - [`PlayerGear`]: the item inventory and the applied item effects
//!   (event listeners).
//! - [`crate::buffs::BuffBook`]: every active buff instance.
//!
//! Effects receive `&mut World` but never the part of the state that owns
//! them; follow-up work that would alias (starting a buff from a buff
//! tick, for example) is requested as a [`crate::events::Reaction`] and
//! applied by the engine.

pub mod combatant;
pub mod entity;
pub mod inventory;
pub mod projectile;
pub mod visuals;

pub use combatant::{
    Combatant, CombatantId, MeleeProfile, Npc, NpcHandle, NpcSpec, PlayerState, StunCounter,
};
pub use entity::{Direction, Position, Rect, Size, WorldEntity};
pub use inventory::{
    ActiveItem, EquipCategory, InventoryError, InventorySlot, ItemInventory, PlayerGear,
    SlotTransition, StoredItem,
};
pub use projectile::Projectile;
pub use visuals::{Color, VisualEffect, VisualShape};

use crate::buffs::BuffBook;
use crate::clock::Millis;
use crate::env::PcgRng;
use crate::events::GameEvent;
use crate::ids::SoundId;
use crate::stats::{Bonus, StatKind, StatModifier};

/// Mutable world data handed to effects.
pub struct World {
    pub player: PlayerState,
    pub npcs: Vec<Npc>,
    pub projectiles: Vec<Projectile>,

    // Presentation sinks, drained by the excluded rendering/audio layers.
    pub visuals: Vec<VisualEffect>,
    pub sounds: Vec<SoundId>,
    /// Combat events mirrored for the host's event log.
    pub event_log: Vec<GameEvent>,

    /// Deterministic RNG; part of the state so identical seeds replay
    /// identical battles.
    pub rng: PcgRng,
    /// Total simulated time.
    pub clock: Millis,

    next_npc_id: u32,
}

impl World {
    pub fn new(player: PlayerState, seed: u64) -> Self {
        Self {
            player,
            npcs: Vec::new(),
            projectiles: Vec::new(),
            visuals: Vec::new(),
            sounds: Vec::new(),
            event_log: Vec::new(),
            rng: PcgRng::new(seed),
            clock: Millis::ZERO,
            next_npc_id: 0,
        }
    }

    pub(crate) fn allocate_npc_handle(&mut self) -> NpcHandle {
        let handle = NpcHandle(self.next_npc_id);
        self.next_npc_id += 1;
        handle
    }

    pub fn npc(&self, handle: NpcHandle) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.handle == handle)
    }

    pub fn npc_mut(&mut self, handle: NpcHandle) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|npc| npc.handle == handle)
    }

    /// Live NPC handles in spawn order.
    pub fn npc_handles(&self) -> Vec<NpcHandle> {
        self.npcs
            .iter()
            .filter(|npc| npc.alive)
            .map(|npc| npc.handle)
            .collect()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        match id {
            CombatantId::Player => Some(&self.player.combatant),
            CombatantId::Npc(handle) => self.npc(handle).map(|npc| &npc.combatant),
        }
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        match id {
            CombatantId::Player => Some(&mut self.player.combatant),
            CombatantId::Npc(handle) => self.npc_mut(handle).map(|npc| &mut npc.combatant),
        }
    }

    pub fn entity_of(&self, id: CombatantId) -> Option<&WorldEntity> {
        match id {
            CombatantId::Player => Some(&self.player.entity),
            CombatantId::Npc(handle) => self.npc(handle).map(|npc| &npc.entity),
        }
    }

    pub fn entity_of_mut(&mut self, id: CombatantId) -> Option<&mut WorldEntity> {
        match id {
            CombatantId::Player => Some(&mut self.player.entity),
            CombatantId::Npc(handle) => self.npc_mut(handle).map(|npc| &mut npc.entity),
        }
    }

    /// Applies (or with `invert`, removes) a set of stat modifiers on a
    /// combatant.
    ///
    /// Sheet stats go through the bonus stack; the resource-flavored kinds
    /// mutate the combatant's meters directly so the clamping invariant is
    /// enforced in one place. Max adjustments must be flat.
    pub fn apply_stat_modifiers(
        &mut self,
        target: CombatantId,
        modifiers: &[StatModifier],
        invert: bool,
    ) {
        let Some(combatant) = self.combatant_mut(target) else {
            return;
        };
        for modifier in modifiers {
            let signed_flat = |bonus: Bonus| -> i32 {
                match bonus {
                    Bonus::Flat(v) => {
                        if invert {
                            -v
                        } else {
                            v
                        }
                    }
                    Bonus::Increased(_) => {
                        debug_assert!(false, "resource stats take flat modifiers only");
                        0
                    }
                }
            };
            match modifier.stat {
                StatKind::MaxHealth => {
                    let delta = signed_flat(modifier.bonus);
                    if delta >= 0 {
                        combatant.health.gain_max(delta as u32);
                    } else {
                        combatant.health.lose_max((-delta) as u32);
                    }
                }
                StatKind::MaxMana => {
                    if let Some(mana) = combatant.mana.as_mut() {
                        let delta = signed_flat(modifier.bonus);
                        if delta >= 0 {
                            mana.gain_max(delta as u32);
                        } else {
                            mana.lose_max((-delta) as u32);
                        }
                    }
                }
                StatKind::HealthRegen => {
                    combatant.health.regen_bonus += signed_flat(modifier.bonus);
                }
                StatKind::ManaRegen => {
                    if let Some(mana) = combatant.mana.as_mut() {
                        mana.regen_bonus += signed_flat(modifier.bonus);
                    }
                }
                _ => {
                    if invert {
                        let removed = combatant.sheet.remove(*modifier);
                        debug_assert!(removed, "unbalanced stat modifier removal");
                    } else {
                        combatant.sheet.add(*modifier);
                    }
                }
            }
        }
    }

    pub fn push_visual(&mut self, effect: VisualEffect) {
        self.visuals.push(effect);
    }

    pub fn push_sound(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }
}

/// The complete simulation state.
pub struct GameState {
    pub world: World,
    pub gear: PlayerGear,
    pub buffs: BuffBook,
}

impl GameState {
    pub fn new(seed: u64, player: PlayerState, inventory: ItemInventory) -> Self {
        Self {
            world: World::new(player, seed),
            gear: PlayerGear::new(inventory),
            buffs: BuffBook::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ResourceMeter, StatBaseline};

    fn test_state() -> GameState {
        let entity = WorldEntity::new(
            Position::ORIGIN,
            Size::new(30, 30),
            Direction::Down,
            100,
        );
        let combatant = Combatant::new(
            ResourceMeter::new(100, 0),
            Some(ResourceMeter::new(50, 0)),
            StatBaseline::none(),
        );
        GameState::new(7, PlayerState::new(entity, combatant), ItemInventory::standard())
    }

    #[test]
    fn max_health_modifier_roundtrips_through_the_meter() {
        let mut state = test_state();
        let modifiers = [StatModifier::flat(StatKind::MaxHealth, 15)];
        state
            .world
            .apply_stat_modifiers(CombatantId::Player, &modifiers, false);
        assert_eq!(state.world.player.combatant.health.max(), 115);
        // The bonus never heals; current value is untouched.
        assert_eq!(state.world.player.combatant.health.value(), 100);

        state
            .world
            .apply_stat_modifiers(CombatantId::Player, &modifiers, true);
        assert_eq!(state.world.player.combatant.health.max(), 100);
        assert_eq!(state.world.player.combatant.health.value(), 100);
    }

    #[test]
    fn regen_modifier_targets_the_meter_bonus() {
        let mut state = test_state();
        let modifiers = [StatModifier::flat(StatKind::ManaRegen, 2)];
        state
            .world
            .apply_stat_modifiers(CombatantId::Player, &modifiers, false);
        assert_eq!(
            state
                .world
                .player
                .combatant
                .mana
                .as_ref()
                .unwrap()
                .regen_bonus,
            2
        );
    }
}
