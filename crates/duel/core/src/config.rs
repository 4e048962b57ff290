//! Balance tables and engine constants.
//!
//! All tunable numbers live here so that tests and external balancing
//! tools can override them per match. Defaults are the shipped balance.

/// Mitigation stage parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MitigationParams {
    /// Softcap constant for physical defense. Higher = flatter scaling.
    pub physical_softcap: u32,
    /// Softcap constant for magical defense.
    pub magical_softcap: u32,
    /// Fixed percent removed from a blocked strike.
    pub block_reduction_pct: u32,
}

impl Default for MitigationParams {
    fn default() -> Self {
        Self {
            physical_softcap: 40,
            magical_softcap: 40,
            block_reduction_pct: 50,
        }
    }
}

/// Strike composition parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeParams {
    /// Main-roll multiplier (percent) when the weapon is on the class's
    /// primary list. 100 = no bonus.
    pub primary_weapon_bonus_pct: u32,
    /// Off-hand roll contribution when the off-hand category is `weapon`.
    pub offhand_weapon_pct: u32,
    /// Off-hand roll contribution when the off-hand category is `focus`.
    pub offhand_focus_pct: u32,
}

impl Default for StrikeParams {
    fn default() -> Self {
        Self {
            primary_weapon_bonus_pct: 120,
            offhand_weapon_pct: 35,
            offhand_focus_pct: 15,
        }
    }
}

/// Match-loop parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerParams {
    /// Hard stop after this many turns; the sole safety valve against
    /// non-terminating configurations.
    pub turn_cap: u32,
    /// Near-tie window as a percent of combined remaining HP.
    pub near_tie_pct: u32,
}

impl Default for RunnerParams {
    fn default() -> Self {
        Self {
            turn_cap: BalanceTables::DEFAULT_TURN_CAP,
            near_tie_pct: 1,
        }
    }
}

/// Complete balance table set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceTables {
    pub mitigation: MitigationParams,
    pub strike: StrikeParams,
    pub runner: RunnerParams,
}

impl BalanceTables {
    /// Default turn cap.
    pub const DEFAULT_TURN_CAP: u32 = 30;
    /// Cap used by the legacy resolver; kept for replaying old matches.
    pub const LEGACY_TURN_CAP: u32 = 200;
    /// Maximum free-form tags per timeline entry.
    pub const MAX_TIMELINE_TAGS: usize = 8;

    /// Softcap constant for the given flavor.
    pub fn softcap(&self, flavor: crate::snapshot::DamageFlavor) -> u32 {
        match flavor {
            crate::snapshot::DamageFlavor::Physical => self.mitigation.physical_softcap,
            crate::snapshot::DamageFlavor::Magical => self.mitigation.magical_softcap,
        }
    }
}
