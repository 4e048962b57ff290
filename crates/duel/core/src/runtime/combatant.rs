//! Per-side mutable combat state.

use crate::snapshot::CombatantSnapshot;

/// Runtime state of a combatant's passive buff.
///
/// The buff is active while `remaining_turns > 0`. Bonus values are copied
/// verbatim from the passive config on each proc and cleared when the buff
/// runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassiveRuntime {
    pub remaining_turns: u32,
    pub bonus_damage: u32,
    pub bonus_flat_dr: u32,
    /// Consecutive failed proc rolls, for the pity guarantee.
    pub fail_streak: u32,
}

impl PassiveRuntime {
    pub fn is_active(&self) -> bool {
        self.remaining_turns > 0
    }

    /// End-of-turn decay. Clears the bonus payload when the buff expires.
    pub fn tick(&mut self) {
        if self.remaining_turns > 0 {
            self.remaining_turns -= 1;
            if self.remaining_turns == 0 {
                self.bonus_damage = 0;
                self.bonus_flat_dr = 0;
            }
        }
    }
}

/// Runtime state of a combatant's ultimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UltimateRuntime {
    pub cooldown: u32,
    pub fail_streak: u32,
}

impl UltimateRuntime {
    /// Round-cadence cooldown decay, floored at 0.
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// All mutable state for one side of one match.
///
/// Status instances live in the match's `StatusEngine`, which keeps both
/// sides' stores together so cross-side queries stay in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatantRuntime {
    pub current_hp: u32,
    pub passive: PassiveRuntime,
    pub ultimate: UltimateRuntime,
}

impl CombatantRuntime {
    /// Fresh runtime from snapshot defaults.
    ///
    /// A zero `max_hp` is coerced to 1 so a malformed snapshot still
    /// produces a match that runs to completion.
    pub fn from_snapshot(snapshot: &CombatantSnapshot) -> Self {
        Self {
            current_hp: snapshot.combat.max_hp.max(1),
            passive: PassiveRuntime::default(),
            ultimate: UltimateRuntime::default(),
        }
    }

    /// Apply damage, flooring HP at 0. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    pub fn is_down(&self) -> bool {
        self.current_hp == 0
    }
}
