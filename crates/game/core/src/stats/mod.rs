//! Combat stat bookkeeping: bonus stacks and the per-combatant stat sheet.
//!
//! Items and buffs never write final stat values; they contribute
//! [`Bonus`] entries to the owning combatant's [`StatSheet`], and readers
//! take a [`CombatSnapshot`] when they need effective numbers. Adding and
//! removing a modifier are exactly symmetric, so an effect that ends always
//! returns the sheet to its prior state.
//!
//! All math is integer (percentages as whole percent) for determinism.

pub mod resource;

pub use resource::ResourceMeter;

use strum::EnumCount;

/// Stats that items and buffs can modify.
///
/// The four resource-flavored kinds (`MaxHealth`, `MaxMana`, `HealthRegen`,
/// `ManaRegen`) are routed to the combatant's [`ResourceMeter`]s rather than
/// the sheet; see [`crate::state::World::apply_stat_modifiers`].
///
/// Percent-valued kinds (chances, life steal, damage bonuses) hold the
/// percent itself as their value, so contributions to them are `Flat`
/// percentage points; `Increased` is for multiplying quantity-valued kinds
/// such as `MoveSpeed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    MaxHealth,
    HealthRegen,
    MaxMana,
    ManaRegen,
    /// Flat physical mitigation.
    Armor,
    /// Movement speed as a percent of normal (base 100).
    MoveSpeed,
    /// Percent of dealt damage returned as healing.
    LifeSteal,
    /// Flat damage removed by a successful block.
    BlockAmount,
    /// Percent chance to block.
    BlockChance,
    /// Percent chance to dodge.
    DodgeChance,
    /// Percent bonus to all outgoing damage.
    Damage,
    /// Percent bonus to outgoing physical damage.
    PhysicalDamage,
    /// Percent bonus to outgoing magic damage.
    MagicDamage,
}

impl StatKind {
    fn index(self) -> usize {
        self as usize
    }

    /// Clamping bounds applied after the bonus stack.
    fn bounds(self) -> (i32, i32) {
        match self {
            // Chances are meaningful only in [0, 100].
            Self::BlockChance | Self::DodgeChance => (0, 100),
            // Everything else is a non-negative quantity with headroom.
            _ => (0, 99_999),
        }
    }
}

/// A single bonus contributed to a stat.
///
/// - **Flat**: additive, applied first (e.g., +3 armor)
/// - **Increased**: percentage, summed then multiplied (e.g., +20% damage)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    /// Stored as integer percentage (20 = +20%).
    Increased(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    /// Percentage increase bonus (20 = +20%).
    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }
}

/// A collection of bonuses applied in a fixed order.
///
/// Application order: flat bonuses are summed, percentage increases are
/// summed and then multiplied, and the result is clamped to the stat's
/// bounds.
///
/// # Example
/// ```
/// # use ashfall_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5));
/// stack.add(Bonus::increased(20));
/// stack.add(Bonus::increased(10));
/// // (10 + 5) × 1.30 = 19 (integer math)
/// assert_eq!(stack.apply(10, 0, 100), 19);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Removes one entry equal to `bonus`. Returns false if none matched.
    ///
    /// Effects remove exactly the bonuses they added, so a missing match
    /// indicates an unbalanced add/remove pair.
    pub fn remove(&mut self, bonus: Bonus) -> bool {
        if let Some(pos) = self.bonuses.iter().position(|b| *b == bonus) {
            self.bonuses.remove(pos);
            return true;
        }
        false
    }

    /// Applies all bonuses to a base value with clamping.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let flat_sum: i32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: i32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let after_flat = base + flat_sum;
        let after_inc = if inc_sum == 0 {
            after_flat
        } else {
            (after_flat * (100 + inc_sum)) / 100
        };

        after_inc.clamp(min, max)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}

/// One stat modification contributed by an item or buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub bonus: Bonus,
}

impl StatModifier {
    pub fn new(stat: StatKind, bonus: Bonus) -> Self {
        Self { stat, bonus }
    }

    pub fn flat(stat: StatKind, value: i32) -> Self {
        Self::new(stat, Bonus::flat(value))
    }

    pub fn increased(stat: StatKind, percent: i32) -> Self {
        Self::new(stat, Bonus::increased(percent))
    }
}

/// Baseline stat values a combatant starts with, before any bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBaseline {
    pub armor: i32,
    /// Percent; 100 is normal speed.
    pub move_speed: i32,
    pub life_steal: i32,
    pub block_amount: i32,
    pub block_chance: i32,
    pub dodge_chance: i32,
}

impl StatBaseline {
    /// All-zero baseline with normal movement speed; the default for NPCs.
    pub const fn none() -> Self {
        Self {
            armor: 0,
            move_speed: 100,
            life_steal: 0,
            block_amount: 0,
            block_chance: 0,
            dodge_chance: 0,
        }
    }
}

impl Default for StatBaseline {
    fn default() -> Self {
        Self::none()
    }
}

/// Per-combatant aggregation of stat bonuses over a baseline.
///
/// The sheet is mutated only through modifier application (items activating
/// and deactivating, stat-modifying buffs starting and ending); combat code
/// reads it through [`StatSheet::snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatSheet {
    base: [i32; StatKind::COUNT],
    stacks: [BonusStack; StatKind::COUNT],
}

impl StatSheet {
    pub fn new(baseline: StatBaseline) -> Self {
        let mut base = [0i32; StatKind::COUNT];
        base[StatKind::Armor.index()] = baseline.armor;
        base[StatKind::MoveSpeed.index()] = baseline.move_speed;
        base[StatKind::LifeSteal.index()] = baseline.life_steal;
        base[StatKind::BlockAmount.index()] = baseline.block_amount;
        base[StatKind::BlockChance.index()] = baseline.block_chance;
        base[StatKind::DodgeChance.index()] = baseline.dodge_chance;
        Self {
            base,
            stacks: core::array::from_fn(|_| BonusStack::new()),
        }
    }

    /// Effective value of a stat with all bonuses applied and clamped.
    pub fn value(&self, stat: StatKind) -> i32 {
        let (min, max) = stat.bounds();
        self.stacks[stat.index()].apply(self.base[stat.index()], min, max)
    }

    pub fn add(&mut self, modifier: StatModifier) {
        self.stacks[modifier.stat.index()].add(modifier.bonus);
    }

    pub fn remove(&mut self, modifier: StatModifier) -> bool {
        self.stacks[modifier.stat.index()].remove(modifier.bonus)
    }

    /// Effective combat numbers, taken at the point of use.
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            armor: self.value(StatKind::Armor),
            move_speed: self.value(StatKind::MoveSpeed) as u32,
            life_steal: self.value(StatKind::LifeSteal) as u32,
            block_amount: self.value(StatKind::BlockAmount) as u32,
            block_chance: self.value(StatKind::BlockChance) as u32,
            dodge_chance: self.value(StatKind::DodgeChance) as u32,
            damage: self.value(StatKind::Damage),
            physical_damage: self.value(StatKind::PhysicalDamage),
            magic_damage: self.value(StatKind::MagicDamage),
        }
    }
}

impl Default for StatSheet {
    fn default() -> Self {
        Self::new(StatBaseline::none())
    }
}

/// Effective combat stats at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatSnapshot {
    pub armor: i32,
    pub move_speed: u32,
    pub life_steal: u32,
    pub block_amount: u32,
    pub block_chance: u32,
    pub dodge_chance: u32,
    pub damage: i32,
    pub physical_damage: i32,
    pub magic_damage: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_then_percentage_order() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::flat(10));
        stack.add(Bonus::increased(50));
        // (0 + 10) × 1.5 = 15
        assert_eq!(stack.apply(0, 0, 1000), 15);
    }

    #[test]
    fn remove_is_symmetric_with_add() {
        let mut sheet = StatSheet::new(StatBaseline::none());
        let modifier = StatModifier::flat(StatKind::Armor, 3);
        sheet.add(modifier);
        assert_eq!(sheet.value(StatKind::Armor), 3);
        assert!(sheet.remove(modifier));
        assert_eq!(sheet.value(StatKind::Armor), 0);
        // A second removal finds nothing to undo.
        assert!(!sheet.remove(modifier));
        assert_eq!(sheet.value(StatKind::Armor), 0);
    }

    #[test]
    fn chance_stats_clamp_to_percent_range() {
        let mut sheet = StatSheet::new(StatBaseline::none());
        sheet.add(StatModifier::flat(StatKind::DodgeChance, 250));
        assert_eq!(sheet.value(StatKind::DodgeChance), 100);
        sheet.add(StatModifier::flat(StatKind::BlockChance, -40));
        assert_eq!(sheet.value(StatKind::BlockChance), 0);
    }

    #[test]
    fn snapshot_reflects_baseline_and_bonuses() {
        let mut sheet = StatSheet::new(StatBaseline {
            armor: 2,
            dodge_chance: 5,
            ..StatBaseline::none()
        });
        sheet.add(StatModifier::flat(StatKind::Damage, 20));
        sheet.add(StatModifier::flat(StatKind::Armor, 3));

        let snap = sheet.snapshot();
        assert_eq!(snap.armor, 5);
        assert_eq!(snap.dodge_chance, 5);
        assert_eq!(snap.damage, 20);
        assert_eq!(sheet.value(StatKind::MoveSpeed), 100);
    }

    #[test]
    fn increased_multiplies_move_speed() {
        let mut sheet = StatSheet::new(StatBaseline::none());
        sheet.add(StatModifier::increased(StatKind::MoveSpeed, 40));
        assert_eq!(sheet.value(StatKind::MoveSpeed), 140);
    }
}
