//! Immutable per-match combatant description.
//!
//! A [`CombatantSnapshot`] is read-only for the lifetime of a match. It is
//! produced by the external stat normalizer (`duel-content`), which owns
//! the only percent-or-fraction conversion boundary; the engine requires
//! every percentage field to already be a canonical 0–100 integer.

pub mod ability;
pub mod class;
pub mod stats;
pub mod weapon;

pub use ability::{DebuffApplication, FateScaling, PassiveSpec, TriggerKind, UltimateSpec};
pub use class::ClassKind;
pub use stats::{BaseStats, CombatStats, ResistKind, ResistanceMap};
pub use weapon::{DamageFlavor, WeaponCategory, WeaponDescriptor};

/// Structural problems a snapshot can carry.
///
/// The engine itself never raises these mid-match; it clamps instead. The
/// normalizer calls [`CombatantSnapshot::validate`] after coercion so that
/// malformed documents are rejected before a match ever starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("{field} must be a canonical 0-100 percent, got {value}")]
    PercentOutOfRange { field: &'static str, value: u32 },

    #[error("weapon `{slug}` has min damage {min} greater than max damage {max}")]
    WeaponDamageRange { slug: String, min: u32, max: u32 },

    #[error("weapon `{slug}` has hand count {hands}, expected 1 or 2")]
    BadHandCount { slug: String, hands: u8 },

    #[error("max_hp must be greater than 0")]
    ZeroMaxHp,
}

/// Immutable combatant description handed to the match runner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub name: String,
    pub level: u32,
    pub class: ClassKind,
    pub base: BaseStats,
    pub resistances: ResistanceMap,
    pub combat: CombatStats,
    pub main_hand: WeaponDescriptor,
    pub off_hand: Option<WeaponDescriptor>,
    pub passive: Option<PassiveSpec>,
    pub ultimate: Option<UltimateSpec>,
}

impl CombatantSnapshot {
    /// Check the canonical-domain preconditions.
    ///
    /// Intended for the normalization boundary; the engine does not call
    /// this on its own.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let percents: [(&'static str, u32); 5] = [
            ("evasion", self.combat.evasion),
            ("block_chance", self.combat.block_chance),
            ("damage_reduction", self.combat.damage_reduction),
            ("critical_chance", self.combat.critical_chance),
            ("critical_damage_bonus", self.combat.critical_damage_bonus),
        ];
        for (field, value) in percents {
            if value > 100 {
                return Err(SnapshotError::PercentOutOfRange { field, value });
            }
        }
        if self.combat.max_hp == 0 {
            return Err(SnapshotError::ZeroMaxHp);
        }
        for weapon in core::iter::once(&self.main_hand).chain(self.off_hand.as_ref()) {
            if weapon.min_damage > weapon.max_damage {
                return Err(SnapshotError::WeaponDamageRange {
                    slug: weapon.slug.clone(),
                    min: weapon.min_damage,
                    max: weapon.max_damage,
                });
            }
            if !(1..=2).contains(&weapon.hands) {
                return Err(SnapshotError::BadHandCount {
                    slug: weapon.slug.clone(),
                    hands: weapon.hands,
                });
            }
        }
        Ok(())
    }

    /// Attack trigger produced by the main-hand weapon.
    pub fn attack_trigger(&self) -> TriggerKind {
        if self.main_hand.category == WeaponCategory::Focus {
            TriggerKind::OnSpellCast
        } else if self.main_hand.ranged {
            TriggerKind::OnRangedHit
        } else {
            TriggerKind::OnBasicHit
        }
    }

    /// Offensive stat for the given flavor.
    pub fn power(&self, flavor: DamageFlavor) -> u32 {
        match flavor {
            DamageFlavor::Physical => self.combat.attack_power,
            DamageFlavor::Magical => self.combat.magic_power,
        }
    }

    /// Defense stat for the given flavor.
    pub fn defense(&self, flavor: DamageFlavor) -> u32 {
        match flavor {
            DamageFlavor::Physical => self.base.physical_defense,
            DamageFlavor::Magical => self.base.magical_defense,
        }
    }
}
