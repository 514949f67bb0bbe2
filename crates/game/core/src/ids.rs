//! Enumerated identities for every kind of registered content.
//!
//! All dynamic behavior in the simulation (abilities, buffs, items,
//! consumables, projectiles, NPC minds) is keyed by one of these enums and
//! resolved through the [`crate::registry::ContentRegistry`] built at
//! startup. Nothing is ever looked up by string.

/// Abilities the player can activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityId {
    /// Single-target fire projectile.
    Firebolt,
    /// Short-range dash through an enemy.
    Surge,
    /// Channeled area stun and scatter damage.
    WarStomp,
    /// Drifting area projectile with periodic damage.
    Cyclone,
    /// Piercing bolt that passes through enemies.
    ArcaneLance,
    /// Healing over a short duration.
    Mend,
}

/// Timed effects that can be active on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffId {
    /// Fire damage over time.
    Burning,
    /// Poison damage over time.
    Venom,
    /// Physical damage over time from a serrated weapon.
    Bleeding,
    /// Caster is rooted while winding up the war stomp.
    ChannelingStomp,
    /// Stunned by the war stomp shockwave.
    StunnedByStomp,
    /// Stunned after striking a reactive shield.
    StunnedByAegis,
    /// Protective stance after a surge connects.
    SurgeGuard,
    /// Bonus damage after taking a hit.
    Empowered,
    /// Healing over time.
    Mending,
    /// Increased movement speed.
    Swiftness,
    /// Invisibility.
    Veil,
}

/// Equippable items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemId {
    WardensHelm,
    HuntersCowl,
    AshenWand,
    JaggedAxe,
    OathkeepersAegis,
    IronwoodShield,
    LifewardOrb,
    VeinAmulet,
    PendantOfAnguish,
    SigilRing,
}

/// Consumables usable from the player's consumable slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableId {
    HealthPotion,
    ManaPotion,
    VeilPotion,
    SwiftnessPotion,
}

/// Projectile kinds, each with its own controller behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileId {
    /// One-shot fire bolt that burns on impact.
    Firebolt,
    /// Slow area projectile dealing periodic damage while it drifts.
    Cyclone,
    /// Piercing bolt that damages each enemy at most once.
    Piercer,
    /// Enemy bolt that poisons the player on impact.
    VenomBolt,
}

/// NPC behavior kinds; each maps to a decision mind state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MindId {
    /// Chases in melee, flees once below half health.
    Brute,
    /// Kites the player and fires venom bolts on a jittered cooldown.
    Skirmisher,
    /// Stationary caster with an area burst and an ally-heal pulse.
    Warlock,
    /// Neutral stroller; never attacks.
    Wanderer,
}

/// Sound identifiers emitted to the audio sink. Playback is external.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundId {
    AbilityFirebolt,
    AbilitySurge,
    AbilityWarStomp,
    AbilityCyclone,
    AbilityArcaneLance,
    AbilityMend,
    PotionConsumed,
    AttackBlocked,
    AttackDodged,
    PlayerPain,
    PlayerDied,
    EnemyDied,
}
