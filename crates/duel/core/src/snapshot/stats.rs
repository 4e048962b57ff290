//! Base and combat stat blocks plus the 16-channel resistance map.
//!
//! Every percentage-valued field in this module is canonical: an integer in
//! the 0–100 domain, produced once by the external normalizer. The engine
//! never re-derives or re-scales these values.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Base attributes of a combatant.
///
/// `fate` scales passive/ultimate proc chances; the defense pair feeds the
/// softcap reduction formula. The remaining attributes are carried for the
/// external consumers (level-up, loot, UI) and for ability configs that
/// reference them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub constitution: u32,
    pub endurance: u32,
    pub luck: u32,
    pub fate: u32,
    pub physical_defense: u32,
    pub magical_defense: u32,
}

/// Derived combat stats.
///
/// `evasion`, `block_chance`, `damage_reduction`, `critical_chance` and
/// `critical_damage_bonus` are canonical 0–100 integer percents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack_power: u32,
    pub magic_power: u32,
    pub evasion: u32,
    pub block_chance: u32,
    pub damage_reduction: u32,
    pub critical_chance: u32,
    pub critical_damage_bonus: u32,
    pub max_hp: u32,
}

/// Resistance channel.
///
/// One channel per elemental damage type plus the control effects that can
/// be shrugged off. Weapon and ultimate elements index into the same map as
/// status resistance rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResistKind {
    Physical,
    Fire,
    Ice,
    Lightning,
    Water,
    Earth,
    Wind,
    Light,
    Shadow,
    Arcane,
    Poison,
    Bleed,
    Stun,
    Sleep,
    Silence,
    Confusion,
}

impl ResistKind {
    pub const COUNT: usize = 16;

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size resistance map, one integer 0–100 per [`ResistKind`].
///
/// Missing channels default to 0 (no resistance). Writes clamp to the
/// canonical domain rather than failing, matching the engine-wide rule that
/// a started match always completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceMap {
    values: [u32; ResistKind::COUNT],
}

impl ResistanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResistKind) -> u32 {
        self.values[kind.index()]
    }

    pub fn set(&mut self, kind: ResistKind, value: u32) {
        self.values[kind.index()] = value.min(100);
    }

    pub fn with(mut self, kind: ResistKind, value: u32) -> Self {
        self.set(kind, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResistKind, u32)> + '_ {
        ResistKind::iter().map(|kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistance_defaults_to_zero() {
        let map = ResistanceMap::new();
        for (_, value) in map.iter() {
            assert_eq!(value, 0);
        }
    }

    #[test]
    fn resistance_clamps_to_canonical_domain() {
        let map = ResistanceMap::new().with(ResistKind::Fire, 250);
        assert_eq!(map.get(ResistKind::Fire), 100);
        assert_eq!(map.get(ResistKind::Ice), 0);
    }

    #[test]
    fn sixteen_channels() {
        assert_eq!(ResistKind::iter().count(), ResistKind::COUNT);
    }

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(ResistKind::Lightning.to_string(), "lightning");
        assert_eq!("confusion".parse::<ResistKind>(), Ok(ResistKind::Confusion));
    }
}
