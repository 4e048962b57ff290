//! Passive and ultimate activation: fate-scaled chance, pity escalation,
//! cooldown gating.
//!
//! Draw discipline: the activation roll is always drawn before the pity
//! check is applied, so the stream consumes the same number of draws
//! whether an attempt succeeds, fails, or is forced.

use crate::rng::SeededRng;
use crate::runtime::{PassiveRuntime, UltimateRuntime};
use crate::snapshot::{CombatantSnapshot, FateScaling, PassiveSpec, UltimateSpec};

/// Activation chance for a fate stat, clamped to the configured maximum.
pub fn scaled_chance(scaling: &FateScaling, fate: u32) -> u32 {
    scaling
        .base_chance
        .saturating_add(fate.saturating_mul(scaling.chance_per_fate))
        .min(scaling.max_chance)
}

/// Result of one activation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcAttempt {
    Activated { forced_by_pity: bool },
    Failed,
}

/// One activation roll with pity bookkeeping.
///
/// Success (rolled or forced) resets the streak to 0. Reaching
/// `pity_threshold` consecutive failures forces the next attempt;
/// a threshold of 0 disables pity.
pub fn attempt(
    chance: u32,
    pity_threshold: u32,
    fail_streak: &mut u32,
    rng: &mut SeededRng,
) -> ProcAttempt {
    let roll = rng.percent();
    let pity_due = pity_threshold > 0 && *fail_streak >= pity_threshold;
    if roll <= chance || pity_due {
        let forced = pity_due && roll > chance;
        *fail_streak = 0;
        ProcAttempt::Activated {
            forced_by_pity: forced,
        }
    } else {
        *fail_streak += 1;
        ProcAttempt::Failed
    }
}

/// Attempt a passive proc, refreshing the buff runtime on success.
///
/// Returns `Some(forced_by_pity)` on activation. The buff duration
/// refreshes to the larger of current and configured; bonus values are
/// copied verbatim from the config.
pub fn try_activate_passive(
    spec: &PassiveSpec,
    fate: u32,
    runtime: &mut PassiveRuntime,
    rng: &mut SeededRng,
) -> Option<bool> {
    let chance = scaled_chance(&spec.chance, fate);
    match attempt(chance, spec.pity_threshold, &mut runtime.fail_streak, rng) {
        ProcAttempt::Activated { forced_by_pity } => {
            runtime.remaining_turns = runtime.remaining_turns.max(spec.duration_turns);
            runtime.bonus_damage = spec.damage_bonus;
            runtime.bonus_flat_dr = spec.bonus_flat_dr;
            Some(forced_by_pity)
        }
        ProcAttempt::Failed => None,
    }
}

/// Attempt an ultimate cast.
///
/// Gates run before any draw: a disabled, silenced or cooling-down
/// ultimate consumes nothing. On a successful roll the cooldown resets to
/// its configured value. Returns `Some(forced_by_pity)` when the cast
/// goes off.
pub fn try_roll_ultimate(
    spec: &UltimateSpec,
    fate: u32,
    runtime: &mut UltimateRuntime,
    silenced: bool,
    rng: &mut SeededRng,
) -> Option<bool> {
    if !spec.enabled || silenced {
        return None;
    }
    if spec.respect_cooldown && runtime.cooldown > 0 {
        return None;
    }
    let chance = scaled_chance(&spec.chance, fate);
    match attempt(chance, spec.pity_threshold, &mut runtime.fail_streak, rng) {
        ProcAttempt::Activated { forced_by_pity } => {
            runtime.cooldown = spec.cooldown_turns;
            Some(forced_by_pity)
        }
        ProcAttempt::Failed => None,
    }
}

/// Raw (pre-mitigation) ultimate damage: a fixed multiplier on the
/// caster's primary offensive stat plus half the main weapon's average
/// roll. Never crits.
pub fn ultimate_raw_damage(spec: &UltimateSpec, caster: &CombatantSnapshot) -> u32 {
    let stat = caster.power(caster.class.primary_flavor());
    stat * spec.power_multiplier_pct / 100 + caster.main_hand.average_roll() / 2
}
