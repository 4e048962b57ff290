//! Serde models of the stored combatant documents.
//!
//! The legacy service stored these as camelCase JSON with float-typed
//! numbers throughout. Every field that history has shown to go missing
//! is defaulted here; the normalizer decides what the absence means.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub dexterity: f64,
    #[serde(default)]
    pub intelligence: f64,
    #[serde(default)]
    pub constitution: f64,
    #[serde(default)]
    pub endurance: f64,
    #[serde(default)]
    pub luck: f64,
    #[serde(default)]
    pub fate: f64,
    #[serde(default)]
    pub physical_defense: f64,
    #[serde(default)]
    pub magical_defense: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombatStats {
    #[serde(default)]
    pub attack_power: f64,
    #[serde(default)]
    pub magic_power: f64,
    /// Percent-or-fraction: 0.25 and 25 both mean 25%.
    #[serde(default)]
    pub evasion: f64,
    #[serde(default)]
    pub block_chance: f64,
    #[serde(default)]
    pub damage_reduction: f64,
    #[serde(default)]
    pub critical_chance: f64,
    #[serde(default)]
    pub critical_damage_bonus: f64,
    #[serde(default)]
    pub max_hp: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeapon {
    pub slug: String,
    #[serde(default)]
    pub min_damage: f64,
    #[serde(default)]
    pub max_damage: f64,
    /// Elemental channel name, e.g. `"fire"`.
    #[serde(default)]
    pub damage_type: Option<String>,
    /// `"physical"` or `"magical"`.
    #[serde(default)]
    pub flavor: Option<String>,
    /// `"weapon"`, `"shield"` or `"focus"`.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub hands: Option<f64>,
    #[serde(default)]
    pub ranged: bool,
}

/// Stored passive ability config.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAbility {
    pub name: String,
    pub trigger: String,
    #[serde(default)]
    pub base_chance: f64,
    #[serde(default)]
    pub chance_per_fate: f64,
    #[serde(default)]
    pub max_chance: f64,
    #[serde(default)]
    pub duration_turns: f64,
    #[serde(default)]
    pub pity_threshold: f64,
    #[serde(default)]
    pub damage_bonus: f64,
    #[serde(default)]
    pub damage_flavor: Option<String>,
    #[serde(default)]
    pub bonus_flat_dr: f64,
}

/// Stored ultimate ability config.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUltimate {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub base_chance: f64,
    #[serde(default)]
    pub chance_per_fate: f64,
    #[serde(default)]
    pub max_chance: f64,
    #[serde(default)]
    pub cooldown_turns: f64,
    #[serde(default = "default_true")]
    pub respect_cooldown: bool,
    #[serde(default)]
    pub pity_threshold: f64,
    #[serde(default)]
    pub power_multiplier: f64,
    #[serde(default)]
    pub damage_flavor: Option<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub debuff: Option<RawDebuff>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDebuff {
    pub status: String,
    #[serde(default)]
    pub chance: f64,
    #[serde(default)]
    pub duration_turns: f64,
    #[serde(default)]
    pub stacks: f64,
}

/// One stored combatant document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombatant {
    pub name: String,
    #[serde(default)]
    pub level: f64,
    pub class: String,
    #[serde(default)]
    pub stats: RawStats,
    /// Resistance channel name -> value (fraction or percent).
    #[serde(default)]
    pub resistances: BTreeMap<String, f64>,
    #[serde(default)]
    pub combat: RawCombatStats,
    pub main_hand: RawWeapon,
    #[serde(default)]
    pub off_hand: Option<RawWeapon>,
    #[serde(default)]
    pub passive: Option<RawAbility>,
    #[serde(default)]
    pub ultimate: Option<RawUltimate>,
}

fn default_true() -> bool {
    true
}
