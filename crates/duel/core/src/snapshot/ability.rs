//! Passive and ultimate ability configuration.
//!
//! Ability configs are immutable snapshot data. Chance values are integer
//! percents; fate scaling is `base + fate * per_point`, clamped to the
//! configured maximum at roll time.

use strum::{Display, EnumString};

use super::stats::ResistKind;
use super::weapon::DamageFlavor;
use crate::status::StatusKey;

/// Passive trigger condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriggerKind {
    OnBasicHit,
    OnRangedHit,
    OnSpellCast,
    OnHitOrBeingHit,
}

impl TriggerKind {
    /// Whether a passive with this trigger fires for an attacker whose
    /// landed strike produced `strike_trigger`.
    pub fn matches_attack(self, strike_trigger: TriggerKind) -> bool {
        self == strike_trigger || self == Self::OnHitOrBeingHit
    }
}

/// Fate-scaled activation chance constants shared by passives and
/// ultimates (with independent values for each).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateScaling {
    pub base_chance: u32,
    pub chance_per_fate: u32,
    pub max_chance: u32,
}

impl FateScaling {
    pub const fn new(base_chance: u32, chance_per_fate: u32, max_chance: u32) -> Self {
        Self {
            base_chance,
            chance_per_fate,
            max_chance,
        }
    }
}

/// Passive ability configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSpec {
    pub name: String,
    pub trigger: TriggerKind,
    pub chance: FateScaling,
    /// Buff length once the passive procs.
    pub duration_turns: u32,
    /// Consecutive failed rolls after which the next attempt is forced.
    /// 0 disables the pity guarantee.
    pub pity_threshold: u32,
    /// Flat damage added to strikes whose flavor matches `damage_flavor`.
    pub damage_bonus: u32,
    pub damage_flavor: DamageFlavor,
    /// Flat damage-reduction percent granted while the buff is active.
    pub bonus_flat_dr: u32,
}

/// Debuff payload an ultimate may apply on cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffApplication {
    pub status: StatusKey,
    /// Base application chance before the target's resistance roll.
    pub chance: u32,
    pub duration_turns: u32,
    pub stacks: u32,
}

/// Ultimate ability configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UltimateSpec {
    pub name: String,
    pub enabled: bool,
    pub chance: FateScaling,
    pub cooldown_turns: u32,
    /// When false the cooldown gate is skipped entirely.
    pub respect_cooldown: bool,
    pub pity_threshold: u32,
    /// Percent multiplier applied to the caster's primary offensive stat.
    pub power_multiplier_pct: u32,
    pub damage_flavor: DamageFlavor,
    /// Elemental channel the target resists the blast with.
    pub element: ResistKind,
    pub debuff: Option<DebuffApplication>,
}
