//! Weapon descriptors and damage flavor.

use strum::{Display, EnumString};

use super::stats::ResistKind;

/// Broad damage flavor, selecting which power stat and which defense stat a
/// strike is resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageFlavor {
    Physical,
    Magical,
}

/// Equipment slot category.
///
/// Off-hand contribution scales by category: weapons add a fraction of
/// their roll, foci a smaller fraction, shields add nothing (they carry
/// block chance instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponCategory {
    Weapon,
    Shield,
    Focus,
}

/// Immutable description of an equipped item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDescriptor {
    /// Stable item identifier, e.g. `"iron_sword"`. Matched against the
    /// class primary-weapon lists by prefix-free slug comparison.
    pub slug: String,
    pub min_damage: u32,
    pub max_damage: u32,
    /// Elemental channel the defender resists this weapon with.
    pub damage_type: ResistKind,
    pub flavor: DamageFlavor,
    pub category: WeaponCategory,
    pub hands: u8,
    /// Ranged weapons fire the `on_ranged_hit` passive trigger instead of
    /// `on_basic_hit`.
    pub ranged: bool,
}

impl WeaponDescriptor {
    /// Average damage roll, truncated. Used by ultimate damage resolution.
    pub fn average_roll(&self) -> u32 {
        (self.min_damage + self.max_damage) / 2
    }
}
