//! Status kinds and their per-key parameters.
//!
//! The catalog is const data on the key itself: stack caps, damage-over-time
//! strength, the resistance channel a fresh application is rolled against,
//! and which in-engine hooks the key participates in. Keys with no hooks
//! still flow through the event stream for the animation layer.

use strum::{Display, EnumIter, EnumString};

use crate::snapshot::ResistKind;

/// Buff or debuff classification, used for event tagging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusPolarity {
    Buff,
    Debuff,
}

/// The 18 status kinds the engine understands.
///
/// Wire names are snake_case and appear verbatim in log lines
/// (`attacker:apply:burn`) and timeline tags.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKey {
    Burn,
    Poison,
    Bleed,
    Shock,
    Freeze,
    Chill,
    Stun,
    Sleep,
    Silence,
    Confusion,
    Blind,
    Weaken,
    Sunder,
    Vulnerable,
    Slow,
    ShieldWall,
    StoneSkin,
    BattleFocus,
}

/// Per-key constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusParams {
    pub polarity: StatusPolarity,
    pub max_stacks: u32,
    /// Flat damage dealt per stack at each round start. 0 for non-DoT keys.
    pub dot_per_stack: u32,
    /// Resistance channel consulted when the status is applied.
    pub resist: ResistKind,
}

impl StatusKey {
    pub fn params(self) -> StatusParams {
        use StatusPolarity::{Buff, Debuff};
        let (polarity, max_stacks, dot_per_stack, resist) = match self {
            Self::Burn => (Debuff, 5, 4, ResistKind::Fire),
            Self::Poison => (Debuff, 5, 3, ResistKind::Poison),
            Self::Bleed => (Debuff, 5, 5, ResistKind::Bleed),
            Self::Shock => (Debuff, 3, 2, ResistKind::Lightning),
            Self::Freeze => (Debuff, 1, 0, ResistKind::Ice),
            Self::Chill => (Debuff, 3, 0, ResistKind::Ice),
            Self::Stun => (Debuff, 1, 0, ResistKind::Stun),
            Self::Sleep => (Debuff, 1, 0, ResistKind::Sleep),
            Self::Silence => (Debuff, 1, 0, ResistKind::Silence),
            Self::Confusion => (Debuff, 1, 0, ResistKind::Confusion),
            Self::Blind => (Debuff, 2, 0, ResistKind::Shadow),
            Self::Weaken => (Debuff, 1, 0, ResistKind::Arcane),
            Self::Sunder => (Debuff, 4, 0, ResistKind::Physical),
            Self::Vulnerable => (Debuff, 1, 0, ResistKind::Arcane),
            Self::Slow => (Debuff, 2, 0, ResistKind::Ice),
            Self::ShieldWall => (Buff, 2, 0, ResistKind::Physical),
            Self::StoneSkin => (Buff, 3, 0, ResistKind::Earth),
            Self::BattleFocus => (Buff, 1, 0, ResistKind::Light),
        };
        StatusParams {
            polarity,
            max_stacks,
            dot_per_stack,
            resist,
        }
    }

    /// The afflicted side cannot land strikes while this is active.
    pub fn forces_miss(self) -> bool {
        matches!(self, Self::Confusion | Self::Sleep)
    }

    /// The afflicted side cannot cast its ultimate while this is active.
    pub fn blocks_ultimate(self) -> bool {
        matches!(self, Self::Silence | Self::Stun)
    }

    /// Multiplier (percent) applied per stack to the afflicted side's
    /// physical defense before the softcap. 100 = no effect.
    pub fn defense_multiplier_pct(self) -> u32 {
        match self {
            Self::Weaken => 50,
            Self::Sunder => 75,
            _ => 100,
        }
    }

    /// Signed flat damage-reduction contribution per stack.
    pub fn flat_dr_per_stack(self) -> i32 {
        match self {
            Self::ShieldWall => 15,
            Self::StoneSkin => 10,
            Self::Vulnerable => -15,
            _ => 0,
        }
    }

    /// Cleared the moment the afflicted side takes damage greater than 0.
    pub fn wakes_on_damage(self) -> bool {
        matches!(self, Self::Sleep)
    }
}
