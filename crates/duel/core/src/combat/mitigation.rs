//! Multi-stage percentage mitigation.
//!
//! The stage order is load-bearing for balance and must not be rearranged:
//! crit applies after the defense and element reductions but before block
//! and flat damage reduction. Each stage truncates toward zero via integer
//! division and never re-expands a prior truncation.

use crate::snapshot::DamageFlavor;

/// Inputs to one mitigation pass.
///
/// All reduction percents are clamped to [0, 100] on entry; the crit bonus
/// is only floored at 0 (a +150% crit config is legal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MitigationInput {
    pub flavor: DamageFlavor,
    pub raw: u32,
    /// Defense-derived reduction percent, already through the softcap.
    pub defense_reduction_pct: u32,
    /// Elemental resistance percent for the strike's damage type.
    pub resistance_pct: u32,
    /// 0 unless the strike crit.
    pub crit_bonus_pct: u32,
    /// 0 unless the strike was blocked.
    pub block_reduction_pct: u32,
    /// Base damage reduction plus shield/status contributions.
    pub flat_reduction_pct: u32,
}

/// Full numeric audit trail of one mitigation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MitigationBreakdown {
    pub flavor: DamageFlavor,
    pub raw: u32,
    pub after_defense: u32,
    pub after_resistance: u32,
    pub after_crit: u32,
    pub pre_block: u32,
    pub after_block: u32,
    pub blocked_amount: u32,
    pub final_damage: u32,
}

/// Convert a flat defense stat into a percent reduction.
///
/// `defense * 100 / (defense + softcap)`: diminishing returns that
/// approach but never reach 100%.
pub fn defense_reduction_pct(defense: u32, softcap: u32) -> u32 {
    if defense == 0 {
        return 0;
    }
    let defense = u64::from(defense);
    let softcap = u64::from(softcap);
    (defense * 100 / (defense + softcap)) as u32
}

fn reduce(value: u64, pct: u64) -> u64 {
    value * (100 - pct) / 100
}

/// Run the fixed mitigation stage order.
pub fn mitigate(input: MitigationInput) -> MitigationBreakdown {
    let defense = u64::from(input.defense_reduction_pct.min(100));
    let resistance = u64::from(input.resistance_pct.min(100));
    let block = u64::from(input.block_reduction_pct.min(100));
    let flat = u64::from(input.flat_reduction_pct.min(100));
    let crit = u64::from(input.crit_bonus_pct);

    let raw = u64::from(input.raw);
    let after_defense = reduce(raw, defense);
    let after_resistance = reduce(after_defense, resistance);
    let after_crit = after_resistance * (100 + crit) / 100;
    let pre_block = after_crit;
    let after_block = reduce(pre_block, block);
    let blocked_amount = pre_block - after_block;
    let final_damage = reduce(after_block, flat);

    MitigationBreakdown {
        flavor: input.flavor,
        raw: input.raw,
        after_defense: after_defense as u32,
        after_resistance: after_resistance as u32,
        after_crit: after_crit as u32,
        pre_block: pre_block as u32,
        after_block: after_block as u32,
        blocked_amount: blocked_amount as u32,
        final_damage: final_damage as u32,
    }
}
