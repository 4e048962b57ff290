//! Class identity and the primary-weapon bonus lists.

use strum::{Display, EnumIter, EnumString};

use super::weapon::DamageFlavor;

/// Combatant class.
///
/// The class contributes two things to combat resolution: the
/// primary-weapon list (main-hand rolls with a listed weapon get the
/// primary bonus multiplier) and the primary offensive flavor used by
/// ultimate damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassKind {
    Warrior,
    Ranger,
    Rogue,
    Mage,
    Cleric,
}

impl ClassKind {
    /// Weapon slugs this class is trained in.
    ///
    /// A main-hand weapon whose slug contains one of these fragments
    /// receives the primary-weapon bonus multiplier on its damage roll.
    pub fn primary_weapons(self) -> &'static [&'static str] {
        match self {
            Self::Warrior => &["sword", "axe", "mace", "greatsword"],
            Self::Ranger => &["bow", "crossbow", "spear"],
            Self::Rogue => &["dagger", "claw", "shortsword"],
            Self::Mage => &["staff", "wand", "orb"],
            Self::Cleric => &["mace", "scepter", "staff"],
        }
    }

    /// Flavor of the stat an ultimate scales from.
    pub fn primary_flavor(self) -> DamageFlavor {
        match self {
            Self::Warrior | Self::Ranger | Self::Rogue => DamageFlavor::Physical,
            Self::Mage | Self::Cleric => DamageFlavor::Magical,
        }
    }

    /// Whether `slug` names a weapon on this class's primary list.
    pub fn is_primary_weapon(self, slug: &str) -> bool {
        self.primary_weapons()
            .iter()
            .any(|fragment| slug.contains(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_weapon_matches_by_fragment() {
        assert!(ClassKind::Warrior.is_primary_weapon("iron_sword"));
        assert!(ClassKind::Warrior.is_primary_weapon("greatsword"));
        assert!(!ClassKind::Warrior.is_primary_weapon("oak_staff"));
        assert!(ClassKind::Mage.is_primary_weapon("oak_staff"));
    }

    #[test]
    fn primary_flavor_split() {
        assert_eq!(ClassKind::Rogue.primary_flavor(), DamageFlavor::Physical);
        assert_eq!(ClassKind::Cleric.primary_flavor(), DamageFlavor::Magical);
    }
}
