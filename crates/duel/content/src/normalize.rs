//! Document-to-snapshot normalization.
//!
//! Numeric coercion rules (defensive, never failing):
//!
//! - percent-or-fraction fields: values in (0, 1] are fractions and scale
//!   by 100; anything else is already a percent. NaN, infinities and
//!   negatives coerce to 0. Results round and clamp to 0–100.
//! - plain magnitudes (attack power, weapon damage, HP): NaN and
//!   negatives coerce to 0, fractions truncate.
//! - `max_hp` of 0 after coercion falls back to 100 so the match can run.
//! - inverted weapon ranges swap; hand counts clamp to 1 or 2.
//! - ultimate power multipliers in (0, 10] are plain multipliers and
//!   scale by 100 (1.8 -> 180%); larger values are already percent.
//!
//! Structural problems are typed errors: the engine never receives an
//! unknown class, trigger, damage type, category, status or resistance
//! channel.

use duel_core::{
    BaseStats, ClassKind, CombatStats, CombatantSnapshot, DamageFlavor, DebuffApplication,
    FateScaling, PassiveSpec, ResistKind, ResistanceMap, SnapshotError, StatusKey, TriggerKind,
    UltimateSpec, WeaponCategory, WeaponDescriptor,
};

use crate::model::{RawAbility, RawCombatant, RawUltimate, RawWeapon};

/// Fallback HP for documents whose `maxHp` is missing or malformed.
pub const DEFAULT_MAX_HP: u32 = 100;

/// Structural rejection at the normalization boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("unknown class `{0}`")]
    UnknownClass(String),

    #[error("unknown ability trigger `{0}`")]
    UnknownTrigger(String),

    #[error("unknown damage flavor `{0}` (expected physical|magical)")]
    UnknownFlavor(String),

    #[error("unknown damage type `{0}`")]
    UnknownDamageType(String),

    #[error("unknown weapon category `{0}` (expected weapon|shield|focus)")]
    UnknownCategory(String),

    #[error("unknown status `{0}`")]
    UnknownStatus(String),

    #[error("unknown resistance channel `{0}`")]
    UnknownResistance(String),

    #[error("normalized snapshot failed validation: {0}")]
    Invalid(#[from] SnapshotError),
}

/// Percent-or-fraction collapse into the canonical 0–100 integer domain.
fn percent(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let scaled = if value <= 1.0 { value * 100.0 } else { value };
    scaled.round().min(100.0) as u32
}

/// Plain magnitude coercion: NaN/negative -> 0, fraction -> truncated.
fn magnitude(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.min(f64::from(u32::MAX)) as u32
}

/// Ultimate power multiplier: plain multipliers up to 10 scale by 100.
fn multiplier_pct(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let scaled = if value <= 10.0 { value * 100.0 } else { value };
    scaled.min(f64::from(u32::MAX)) as u32
}

fn parse_flavor(value: Option<&str>) -> Result<DamageFlavor, NormalizeError> {
    match value {
        None => Ok(DamageFlavor::Physical),
        Some(text) => text
            .parse()
            .map_err(|_| NormalizeError::UnknownFlavor(text.to_string())),
    }
}

fn parse_element(value: Option<&str>) -> Result<ResistKind, NormalizeError> {
    match value {
        None => Ok(ResistKind::Physical),
        Some(text) => text
            .parse()
            .map_err(|_| NormalizeError::UnknownDamageType(text.to_string())),
    }
}

fn normalize_weapon(raw: &RawWeapon) -> Result<WeaponDescriptor, NormalizeError> {
    let category = match raw.category.as_deref() {
        None => WeaponCategory::Weapon,
        Some(text) => text
            .parse()
            .map_err(|_| NormalizeError::UnknownCategory(text.to_string()))?,
    };

    let (mut min, mut max) = (magnitude(raw.min_damage), magnitude(raw.max_damage));
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let hands = raw
        .hands
        .map(magnitude)
        .unwrap_or(1)
        .clamp(1, 2) as u8;

    Ok(WeaponDescriptor {
        slug: raw.slug.clone(),
        min_damage: min,
        max_damage: max,
        damage_type: parse_element(raw.damage_type.as_deref())?,
        flavor: parse_flavor(raw.flavor.as_deref())?,
        category,
        hands,
        ranged: raw.ranged,
    })
}

fn normalize_passive(raw: &RawAbility) -> Result<PassiveSpec, NormalizeError> {
    let trigger: TriggerKind = raw
        .trigger
        .parse()
        .map_err(|_| NormalizeError::UnknownTrigger(raw.trigger.clone()))?;
    Ok(PassiveSpec {
        name: raw.name.clone(),
        trigger,
        chance: FateScaling::new(
            percent(raw.base_chance),
            percent(raw.chance_per_fate),
            percent(raw.max_chance),
        ),
        duration_turns: magnitude(raw.duration_turns),
        pity_threshold: magnitude(raw.pity_threshold),
        damage_bonus: magnitude(raw.damage_bonus),
        damage_flavor: parse_flavor(raw.damage_flavor.as_deref())?,
        bonus_flat_dr: percent(raw.bonus_flat_dr),
    })
}

fn normalize_ultimate(raw: &RawUltimate) -> Result<UltimateSpec, NormalizeError> {
    let debuff = raw
        .debuff
        .as_ref()
        .map(|raw_debuff| {
            let status: StatusKey = raw_debuff
                .status
                .parse()
                .map_err(|_| NormalizeError::UnknownStatus(raw_debuff.status.clone()))?;
            Ok::<_, NormalizeError>(DebuffApplication {
                status,
                chance: percent(raw_debuff.chance),
                duration_turns: magnitude(raw_debuff.duration_turns),
                stacks: magnitude(raw_debuff.stacks).max(1),
            })
        })
        .transpose()?;

    Ok(UltimateSpec {
        name: raw.name.clone(),
        enabled: raw.enabled,
        chance: FateScaling::new(
            percent(raw.base_chance),
            percent(raw.chance_per_fate),
            percent(raw.max_chance),
        ),
        cooldown_turns: magnitude(raw.cooldown_turns),
        respect_cooldown: raw.respect_cooldown,
        pity_threshold: magnitude(raw.pity_threshold),
        power_multiplier_pct: multiplier_pct(raw.power_multiplier),
        damage_flavor: parse_flavor(raw.damage_flavor.as_deref())?,
        element: parse_element(raw.element.as_deref())?,
        debuff,
    })
}

/// Convert one stored document into a canonical engine snapshot.
pub fn normalize_combatant(raw: &RawCombatant) -> Result<CombatantSnapshot, NormalizeError> {
    let class: ClassKind = raw
        .class
        .parse()
        .map_err(|_| NormalizeError::UnknownClass(raw.class.clone()))?;

    let mut resistances = ResistanceMap::new();
    for (key, value) in &raw.resistances {
        let kind: ResistKind = key
            .parse()
            .map_err(|_| NormalizeError::UnknownResistance(key.clone()))?;
        resistances.set(kind, percent(*value));
    }

    let max_hp = match magnitude(raw.combat.max_hp) {
        0 => DEFAULT_MAX_HP,
        hp => hp,
    };

    let snapshot = CombatantSnapshot {
        name: raw.name.clone(),
        level: magnitude(raw.level).max(1),
        class,
        base: BaseStats {
            strength: magnitude(raw.stats.strength),
            dexterity: magnitude(raw.stats.dexterity),
            intelligence: magnitude(raw.stats.intelligence),
            constitution: magnitude(raw.stats.constitution),
            endurance: magnitude(raw.stats.endurance),
            luck: magnitude(raw.stats.luck),
            fate: magnitude(raw.stats.fate),
            physical_defense: magnitude(raw.stats.physical_defense),
            magical_defense: magnitude(raw.stats.magical_defense),
        },
        resistances,
        combat: CombatStats {
            attack_power: magnitude(raw.combat.attack_power),
            magic_power: magnitude(raw.combat.magic_power),
            evasion: percent(raw.combat.evasion),
            block_chance: percent(raw.combat.block_chance),
            damage_reduction: percent(raw.combat.damage_reduction),
            critical_chance: percent(raw.combat.critical_chance),
            critical_damage_bonus: percent(raw.combat.critical_damage_bonus),
            max_hp,
        },
        main_hand: normalize_weapon(&raw.main_hand)?,
        off_hand: raw.off_hand.as_ref().map(normalize_weapon).transpose()?,
        passive: raw.passive.as_ref().map(normalize_passive).transpose()?,
        ultimate: raw.ultimate.as_ref().map(normalize_ultimate).transpose()?,
    };

    snapshot.validate()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCombatStats;

    fn raw_weapon(slug: &str) -> RawWeapon {
        RawWeapon {
            slug: slug.into(),
            min_damage: 5.0,
            max_damage: 10.0,
            damage_type: None,
            flavor: None,
            category: None,
            hands: None,
            ranged: false,
        }
    }

    fn raw_combatant() -> RawCombatant {
        RawCombatant {
            name: "stored".into(),
            level: 4.0,
            class: "warrior".into(),
            stats: Default::default(),
            resistances: Default::default(),
            combat: RawCombatStats::default(),
            main_hand: raw_weapon("iron_sword"),
            off_hand: None,
            passive: None,
            ultimate: None,
        }
    }

    #[test]
    fn fraction_and_percent_both_land_at_canonical() {
        assert_eq!(percent(0.35), 35);
        assert_eq!(percent(35.0), 35);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(100.0), 100);
        assert_eq!(percent(250.0), 100);
    }

    #[test]
    fn malformed_numbers_coerce_to_defaults() {
        assert_eq!(percent(f64::NAN), 0);
        assert_eq!(percent(-3.0), 0);
        assert_eq!(magnitude(f64::INFINITY), 0);
        assert_eq!(magnitude(f64::NEG_INFINITY), 0);
        assert_eq!(magnitude(f64::NAN), 0);

        let mut raw = raw_combatant();
        raw.combat.max_hp = f64::NAN;
        let snapshot = normalize_combatant(&raw).unwrap();
        assert_eq!(snapshot.combat.max_hp, DEFAULT_MAX_HP);
    }

    #[test]
    fn multiplier_and_percent_forms_agree() {
        assert_eq!(multiplier_pct(1.8), 180);
        assert_eq!(multiplier_pct(2.2), 220);
        assert_eq!(multiplier_pct(220.0), 220);
        assert_eq!(multiplier_pct(f64::NAN), 0);
    }

    #[test]
    fn inverted_weapon_range_swaps() {
        let mut raw = raw_combatant();
        raw.main_hand.min_damage = 12.0;
        raw.main_hand.max_damage = 4.0;
        let snapshot = normalize_combatant(&raw).unwrap();
        assert_eq!(snapshot.main_hand.min_damage, 4);
        assert_eq!(snapshot.main_hand.max_damage, 12);
    }

    #[test]
    fn unknown_class_is_rejected() {
        let mut raw = raw_combatant();
        raw.class = "battlemage".into();
        assert_eq!(
            normalize_combatant(&raw),
            Err(NormalizeError::UnknownClass("battlemage".into()))
        );
    }

    #[test]
    fn unknown_trigger_is_rejected() {
        let mut raw = raw_combatant();
        raw.passive = Some(RawAbility {
            name: "p".into(),
            trigger: "onCrit".into(),
            base_chance: 10.0,
            chance_per_fate: 1.0,
            max_chance: 30.0,
            duration_turns: 2.0,
            pity_threshold: 0.0,
            damage_bonus: 5.0,
            damage_flavor: None,
            bonus_flat_dr: 0.0,
        });
        assert_eq!(
            normalize_combatant(&raw),
            Err(NormalizeError::UnknownTrigger("onCrit".into()))
        );
    }

    #[test]
    fn unknown_resistance_channel_is_rejected() {
        let mut raw = raw_combatant();
        raw.resistances.insert("chaos".into(), 0.5);
        assert_eq!(
            normalize_combatant(&raw),
            Err(NormalizeError::UnknownResistance("chaos".into()))
        );
    }

    #[test]
    fn resistances_collapse_like_percents() {
        let mut raw = raw_combatant();
        raw.resistances.insert("fire".into(), 0.4);
        raw.resistances.insert("poison".into(), 40.0);
        let snapshot = normalize_combatant(&raw).unwrap();
        assert_eq!(snapshot.resistances.get(ResistKind::Fire), 40);
        assert_eq!(snapshot.resistances.get(ResistKind::Poison), 40);
    }

    #[test]
    fn hands_clamp_to_physical_reality() {
        let mut raw = raw_combatant();
        raw.main_hand.hands = Some(7.0);
        let snapshot = normalize_combatant(&raw).unwrap();
        assert_eq!(snapshot.main_hand.hands, 2);

        raw.main_hand.hands = Some(0.0);
        let snapshot = normalize_combatant(&raw).unwrap();
        assert_eq!(snapshot.main_hand.hands, 1);
    }
}
