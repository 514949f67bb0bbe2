//! Combatant state: resources, stun status, stat sheet, and the concrete
//! player/NPC structures.

use arrayvec::ArrayVec;

use crate::clock::PeriodicTimer;
use crate::config::GameConfig;
use crate::ids::{ConsumableId, MindId};
use crate::stats::{ResourceMeter, StatBaseline, StatSheet};

use super::entity::WorldEntity;

/// Stable identifier of an NPC, never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcHandle(pub u32);

impl core::fmt::Display for NpcHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "npc#{}", self.0)
    }
}

/// Either side of a combat interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantId {
    Player,
    Npc(NpcHandle),
}

/// Counting stun status.
///
/// Stuns from independent sources stack as a counter rather than a flag, so
/// two overlapping stuns don't cancel each other when the first one ends.
/// A combatant cannot move or act while the counter is above zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StunCounter(u32);

impl StunCounter {
    pub fn add_one(&mut self) {
        self.0 += 1;
    }

    pub fn remove_one(&mut self) {
        debug_assert!(self.0 > 0, "unbalanced stun release");
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_stunned(&self) -> bool {
        self.0 > 0
    }
}

/// The combat-relevant state shared by players and NPCs.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub health: ResourceMeter,
    /// Only players spend mana; NPCs carry `None`.
    pub mana: Option<ResourceMeter>,
    pub stun: StunCounter,
    pub sheet: StatSheet,
}

impl Combatant {
    pub fn new(health: ResourceMeter, mana: Option<ResourceMeter>, baseline: StatBaseline) -> Self {
        Self {
            health,
            mana,
            stun: StunCounter::default(),
            sheet: StatSheet::new(baseline),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_at_or_below_zero()
    }
}

/// The player character.
pub struct PlayerState {
    pub entity: WorldEntity,
    pub combatant: Combatant,
    /// Set and cleared by buffs; NPC minds degrade to wandering while set.
    pub invisible: bool,
    /// Consumable belt; `None` marks an empty slot.
    pub consumables: ArrayVec<Option<ConsumableId>, { GameConfig::MAX_CONSUMABLE_SLOTS }>,
    pub alive: bool,
}

impl PlayerState {
    pub fn new(entity: WorldEntity, combatant: Combatant) -> Self {
        let mut consumables = ArrayVec::new();
        for _ in 0..GameConfig::MAX_CONSUMABLE_SLOTS {
            consumables.push(None);
        }
        Self {
            entity,
            combatant,
            invisible: false,
            consumables,
            alive: true,
        }
    }

    /// Index of the first empty consumable slot, if any.
    pub fn first_empty_consumable_slot(&self) -> Option<usize> {
        self.consumables.iter().position(|slot| slot.is_none())
    }
}

/// Melee attack carried by contact NPCs.
#[derive(Clone, Debug)]
pub struct MeleeProfile {
    pub damage: u32,
    pub timer: PeriodicTimer,
}

/// Blueprint for spawning an NPC.
#[derive(Clone, Debug)]
pub struct NpcSpec {
    pub behavior: MindId,
    pub max_health: u32,
    /// Pixels per second.
    pub speed: u32,
    pub size: super::entity::Size,
    /// Contact damage and its attack period, if this NPC fights in melee.
    pub melee: Option<(u32, crate::clock::Millis)>,
}

/// A non-player character.
///
/// The mind slot is `None` only transiently while the engine has checked
/// the mind out to let it mutate the rest of the world.
pub struct Npc {
    pub handle: NpcHandle,
    pub behavior: MindId,
    pub entity: WorldEntity,
    pub combatant: Combatant,
    pub melee: Option<MeleeProfile>,
    pub mind: Option<Box<dyn crate::effects::NpcMind>>,
    /// Cleared when health reaches zero; the corpse is removed at the next
    /// tick boundary, never mid-tick.
    pub alive: bool,
}

impl Npc {
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
