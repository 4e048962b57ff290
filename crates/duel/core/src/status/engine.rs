//! Per-side status stores: application rolls, stacking, decay, and the
//! query hooks the turn resolver consumes.

use std::collections::BTreeMap;

use super::key::StatusKey;
use crate::event::{CombatEvent, Recorder};
use crate::rng::SeededRng;
use crate::runtime::{PerSide, Side};

/// One active status on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub key: StatusKey,
    pub stacks: u32,
    pub turns_left: u32,
    /// Side that applied the status.
    pub source: Side,
}

/// Store of active statuses for both sides of one match.
///
/// BTreeMap keeps per-side iteration in `StatusKey` order, so the event
/// stream is byte-stable across runs and platforms.
#[derive(Clone, Debug, Default)]
pub struct StatusEngine {
    stores: PerSide<BTreeMap<StatusKey, StatusInstance>>,
}

impl StatusEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side, key: StatusKey) -> Option<&StatusInstance> {
        self.stores[side].get(&key)
    }

    pub fn is_active(&self, side: Side, key: StatusKey) -> bool {
        self.stores[side].contains_key(&key)
    }

    pub fn active_count(&self, side: Side) -> usize {
        self.stores[side].len()
    }

    /// Round-start decay: decrement `turns_left` on every active instance
    /// on both sides, removing and reporting instances that reach 0.
    /// Attacker side first; key order within a side. Consumes no draws.
    pub fn on_round_start(&mut self, turn: u32, recorder: &mut Recorder<'_>) {
        for side in [Side::Attacker, Side::Defender] {
            let store = &mut self.stores[side];
            let mut expired = Vec::new();
            for instance in store.values_mut() {
                instance.turns_left = instance.turns_left.saturating_sub(1);
                if instance.turns_left == 0 {
                    expired.push(instance.key);
                }
            }
            for key in expired {
                store.remove(&key);
                recorder.record(CombatEvent::StatusExpired { turn, side, key });
            }
        }
    }

    /// Attempt to apply `key` to `side`.
    ///
    /// Effective chance is `clamp(base * (1 - resist/100), 0, 100)`; one
    /// uniform draw in [0, 100) decides. On success an existing instance
    /// refreshes its duration to the larger value and gains stacks up to
    /// the catalog cap; otherwise a fresh instance is inserted. Exactly one
    /// draw is consumed on every call.
    #[allow(clippy::too_many_arguments)]
    pub fn try_apply(
        &mut self,
        turn: u32,
        side: Side,
        key: StatusKey,
        base_chance: u32,
        duration_turns: u32,
        stacks: u32,
        source: Side,
        resist_pct: u32,
        rng: &mut SeededRng,
        recorder: &mut Recorder<'_>,
    ) -> bool {
        let resist = resist_pct.min(100);
        let effective = (base_chance * (100 - resist) / 100).min(100);

        if !rng.roll_under_pct(effective) {
            recorder.record(CombatEvent::StatusResisted { turn, side, key });
            return false;
        }

        let max_stacks = key.params().max_stacks;
        let added = stacks.max(1);
        let stacks_now = match self.stores[side].get_mut(&key) {
            Some(existing) => {
                existing.turns_left = existing.turns_left.max(duration_turns);
                existing.stacks = (existing.stacks + added).min(max_stacks);
                existing.source = source;
                existing.stacks
            }
            None => {
                let instance = StatusInstance {
                    key,
                    stacks: added.min(max_stacks),
                    turns_left: duration_turns,
                    source,
                };
                self.stores[side].insert(key, instance);
                instance.stacks
            }
        };

        recorder.record(CombatEvent::StatusApplied {
            turn,
            side,
            key,
            stacks: stacks_now,
            source,
        });
        true
    }

    // ------------------------------------------------------------------
    // Query hooks consumed by the turn resolver
    // ------------------------------------------------------------------

    /// Whether a status forces this side's strikes to miss.
    pub fn forces_miss(&self, side: Side) -> bool {
        self.stores[side].keys().any(|key| key.forces_miss())
    }

    /// Whether a status blocks this side's ultimate.
    pub fn blocks_ultimate(&self, side: Side) -> bool {
        self.stores[side].keys().any(|key| key.blocks_ultimate())
    }

    /// Multiplier (percent) on this side's physical defense. Each stack of
    /// a defense-shredding status applies its multiplier once.
    pub fn defense_multiplier_pct(&self, side: Side) -> u32 {
        let mut multiplier: u64 = 100;
        for instance in self.stores[side].values() {
            let per_stack = u64::from(instance.key.defense_multiplier_pct());
            if per_stack == 100 {
                continue;
            }
            for _ in 0..instance.stacks {
                multiplier = multiplier * per_stack / 100;
            }
        }
        multiplier as u32
    }

    /// Net flat damage-reduction contribution from statuses. May be
    /// negative (vulnerability); the caller clamps the combined DR.
    pub fn bonus_flat_dr(&self, side: Side) -> i32 {
        self.stores[side]
            .values()
            .map(|instance| instance.key.flat_dr_per_stack() * instance.stacks as i32)
            .sum()
    }

    /// Damage-over-time amounts due this round, in key order.
    pub fn dot_ticks(&self, side: Side) -> Vec<(StatusKey, u32)> {
        self.stores[side]
            .values()
            .filter_map(|instance| {
                let per_stack = instance.key.params().dot_per_stack;
                (per_stack > 0).then(|| (instance.key, per_stack * instance.stacks))
            })
            .collect()
    }

    /// Wake-on-damage hook: clears sleep-like statuses once the side takes
    /// damage greater than 0.
    pub fn notify_damage_taken(
        &mut self,
        turn: u32,
        side: Side,
        amount: u32,
        recorder: &mut Recorder<'_>,
    ) {
        if amount == 0 {
            return;
        }
        let woken: Vec<StatusKey> = self.stores[side]
            .keys()
            .copied()
            .filter(|key| key.wakes_on_damage())
            .collect();
        for key in woken {
            self.stores[side].remove(&key);
            recorder.record(CombatEvent::StatusExpired { turn, side, key });
        }
    }
}
