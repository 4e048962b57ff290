//! Match driver: alternating turns, timeline assembly, outcome.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::combat::{resolve_strike, resolve_ultimate};
use crate::config::BalanceTables;
use crate::event::{
    AbilityKind, AbilityMeta, CombatEvent, EventKind, EventSink, NoopSink, Recorder, TimelineEntry,
};
use crate::rng::{Seed, SeededRng};
use crate::runtime::{CombatantRuntime, PerSide, Side};
use crate::snapshot::CombatantSnapshot;
use crate::status::StatusEngine;

/// Final outcome of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchOutcome {
    Attacker,
    Defender,
    Draw,
}

/// Outcome from one side's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SideOutcome {
    Win,
    Lose,
    Draw,
}

impl MatchOutcome {
    /// Adapter view: win/lose/draw as seen from `side`.
    pub fn for_side(self, side: Side) -> SideOutcome {
        match (self, side) {
            (Self::Draw, _) => SideOutcome::Draw,
            (Self::Attacker, Side::Attacker) | (Self::Defender, Side::Defender) => SideOutcome::Win,
            _ => SideOutcome::Lose,
        }
    }
}

/// HP state after each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSnapshot {
    pub turn: u32,
    pub actor: Side,
    pub attacker_hp: u32,
    pub defender_hp: u32,
}

/// Complete, replayable result of one match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub turn_count: u32,
    pub timeline: Vec<TimelineEntry>,
    pub log: Vec<String>,
    pub per_turn: Vec<TurnSnapshot>,
}

/// Per-match knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MatchOptions {
    /// Override of [`BalanceTables::DEFAULT_TURN_CAP`]. A cap of 0 is
    /// corrected to 1 so the match still resolves.
    pub turn_cap: Option<u32>,
    pub tables: BalanceTables,
}

/// Run a match with the default no-op event sink.
pub fn run_match(
    attacker: &CombatantSnapshot,
    defender: &CombatantSnapshot,
    seed: impl Into<Seed>,
    options: MatchOptions,
) -> MatchResult {
    let mut sink = NoopSink;
    run_match_with_sink(attacker, defender, seed, options, &mut sink)
}

/// Run a match, forwarding every structured event to `sink`.
///
/// The sink is a one-way consumer: nothing it does can feed back into the
/// combat numbers.
pub fn run_match_with_sink(
    attacker: &CombatantSnapshot,
    defender: &CombatantSnapshot,
    seed: impl Into<Seed>,
    options: MatchOptions,
    sink: &mut dyn EventSink,
) -> MatchResult {
    let seed = seed.into();
    let tables = options.tables;
    let cap = options.turn_cap.unwrap_or(tables.runner.turn_cap).max(1);

    let snapshots = PerSide::new(attacker, defender);
    let mut arena = PerSide::new(
        CombatantRuntime::from_snapshot(attacker),
        CombatantRuntime::from_snapshot(defender),
    );
    let mut statuses = StatusEngine::new();
    let mut rng = SeededRng::new(seed);
    let mut recorder = Recorder::new(sink);
    let mut timeline: Vec<TimelineEntry> = Vec::new();
    let mut per_turn: Vec<TurnSnapshot> = Vec::new();

    debug!(seed = seed.0, cap, attacker = %attacker.name, defender = %defender.name, "match start");

    let mut outcome = None;
    let mut turn = 0;
    while turn < cap && outcome.is_none() {
        turn += 1;
        let actor = if turn % 2 == 1 {
            Side::Attacker
        } else {
            Side::Defender
        };
        trace!(turn, %actor, "turn start");

        // A round is two turns; decay and DoT run once per round, at the
        // odd turn, attacker side first.
        if turn % 2 == 1 {
            statuses.on_round_start(turn, &mut recorder);
            for side in [Side::Attacker, Side::Defender] {
                for (key, amount) in statuses.dot_ticks(side) {
                    let lost = arena[side].take_damage(amount);
                    recorder.record(CombatEvent::DotTick {
                        turn,
                        side,
                        key,
                        damage: lost,
                    });
                    statuses.notify_damage_taken(turn, side, lost, &mut recorder);

                    let mut entry = entry_for(turn, side, EventKind::DotTick, lost, &arena);
                    entry.push_tag(format!("dot:{key}"));
                    timeline.push(entry);
                }
            }
        }

        let both_standing =
            !arena[Side::Attacker].is_down() && !arena[Side::Defender].is_down();
        if both_standing {
            // Ultimate attempt, turn-start trigger only.
            if let Some(spec) = snapshots[actor].ultimate.as_ref() {
                if let Some(cast) = resolve_ultimate(
                    turn,
                    actor,
                    &snapshots,
                    &mut arena,
                    &mut statuses,
                    &tables,
                    &mut rng,
                    &mut recorder,
                ) {
                    let mut entry =
                        entry_for(turn, actor, EventKind::UltimateCast, cast.damage, &arena);
                    entry.ability = Some(AbilityMeta {
                        kind: AbilityKind::Ultimate,
                        name: spec.name.clone(),
                        duration: spec.cooldown_turns,
                    });
                    if cast.forced_by_pity {
                        entry.push_tag("pity");
                    }
                    if cast.debuff_applied {
                        if let Some(debuff) = &spec.debuff {
                            entry.push_tag(format!("debuff:{}", debuff.status));
                        }
                    }
                    timeline.push(entry);
                }
            }

            // Basic strike, unless the ultimate already ended the fight.
            if !arena[actor.other()].is_down() {
                let strike = resolve_strike(
                    turn,
                    actor,
                    &snapshots,
                    &mut arena,
                    &mut statuses,
                    &tables,
                    &mut rng,
                    &mut recorder,
                );

                let mut entry = entry_for(turn, actor, strike.kind, strike.damage, &arena);
                if strike.forced_miss {
                    entry.push_tag("forced");
                }
                if strike.blocked && strike.crit {
                    entry.push_tag("blocked");
                }
                timeline.push(entry);

                for (side, note) in [
                    (actor, strike.attacker_proc),
                    (actor.other(), strike.defender_proc),
                ] {
                    let (Some(note), Some(spec)) = (note, snapshots[side].passive.as_ref()) else {
                        continue;
                    };
                    let mut entry = entry_for(turn, side, EventKind::PassiveProc, 0, &arena);
                    entry.ability = Some(AbilityMeta {
                        kind: AbilityKind::Passive,
                        name: spec.name.clone(),
                        duration: note.duration,
                    });
                    if note.forced_by_pity {
                        entry.push_tag("pity");
                    }
                    timeline.push(entry);
                }
            }

            // Actor's passive buff decays at the end of its own turn; the
            // opposing side's ultimate cooldown ticks once per full round.
            arena[actor].passive.tick();
            arena[actor.other()].ultimate.tick_cooldown();
        }

        per_turn.push(TurnSnapshot {
            turn,
            actor,
            attacker_hp: arena[Side::Attacker].current_hp,
            defender_hp: arena[Side::Defender].current_hp,
        });

        let attacker_down = arena[Side::Attacker].is_down();
        let defender_down = arena[Side::Defender].is_down();
        if attacker_down && defender_down {
            outcome = Some(decide_by_hp(0, 0, tables.runner.near_tie_pct));
        } else if defender_down {
            outcome = Some(MatchOutcome::Attacker);
        } else if attacker_down {
            outcome = Some(MatchOutcome::Defender);
        }
    }

    let outcome = outcome.unwrap_or_else(|| {
        decide_by_hp(
            arena[Side::Attacker].current_hp,
            arena[Side::Defender].current_hp,
            tables.runner.near_tie_pct,
        )
    });

    debug!(?outcome, turn_count = turn, "match over");

    MatchResult {
        outcome,
        turn_count: turn,
        timeline,
        log: recorder.into_log(),
        per_turn,
    }
}

fn entry_for(
    turn: u32,
    actor: Side,
    kind: EventKind,
    damage: u32,
    arena: &PerSide<CombatantRuntime>,
) -> TimelineEntry {
    TimelineEntry {
        turn,
        actor,
        kind,
        damage,
        attacker_hp: arena[Side::Attacker].current_hp,
        defender_hp: arena[Side::Defender].current_hp,
        ability: None,
        tags: ArrayVec::new(),
    }
}

/// Cap/simultaneous-KO decision with the near-tie draw window.
///
/// Draw when the HP gap is within `max(1, round(pct% of combined HP + 1))`;
/// otherwise the higher side wins. The 1%-of-combined-HP window has no
/// documented rationale; it is preserved as observed.
fn decide_by_hp(attacker_hp: u32, defender_hp: u32, near_tie_pct: u32) -> MatchOutcome {
    let diff = i64::from(attacker_hp).abs_diff(i64::from(defender_hp));
    let combined = u64::from(attacker_hp) + u64::from(defender_hp) + 1;
    // Integer rounding half-up of `pct% * combined`.
    let threshold = (combined * u64::from(near_tie_pct) + 50) / 100;
    if diff <= threshold.max(1) {
        MatchOutcome::Draw
    } else if attacker_hp > defender_hp {
        MatchOutcome::Attacker
    } else {
        MatchOutcome::Defender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_tie_window() {
        // Combined 200 HP -> threshold round(2.01) = 2.
        assert_eq!(decide_by_hp(101, 99, 1), MatchOutcome::Draw);
        assert_eq!(decide_by_hp(102, 99, 1), MatchOutcome::Attacker);
        assert_eq!(decide_by_hp(99, 102, 1), MatchOutcome::Defender);
        // Both at zero is always a draw.
        assert_eq!(decide_by_hp(0, 0, 1), MatchOutcome::Draw);
        // Tiny pools still get the minimum window of 1.
        assert_eq!(decide_by_hp(1, 0, 1), MatchOutcome::Draw);
        assert_eq!(decide_by_hp(3, 1, 1), MatchOutcome::Attacker);
    }

    #[test]
    fn outcome_adapter() {
        assert_eq!(MatchOutcome::Attacker.for_side(Side::Attacker), SideOutcome::Win);
        assert_eq!(MatchOutcome::Attacker.for_side(Side::Defender), SideOutcome::Lose);
        assert_eq!(MatchOutcome::Draw.for_side(Side::Defender), SideOutcome::Draw);
    }
}
