//! Combat events, the match timeline, and the observer seam.
//!
//! The engine pushes structured events; subscribers (animation schedulers,
//! class cosmetic packs, debug tooling) are one-way consumers and never
//! feed back into combat numbers.

use arrayvec::ArrayVec;
use strum::Display;

use crate::combat::MitigationBreakdown;
use crate::config::BalanceTables;
use crate::runtime::Side;
use crate::status::StatusKey;

/// Timeline entry kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Hit,
    Crit,
    Block,
    Miss,
    PassiveProc,
    UltimateCast,
    DotTick,
}

/// Append-only audit event.
///
/// Damage-carrying variants embed the full [`MitigationBreakdown`] so every
/// number in the timeline can be re-derived by hand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CombatEvent {
    Miss {
        turn: u32,
        actor: Side,
        /// True when a status forced the miss without an evasion roll.
        forced: bool,
    },
    Hit {
        turn: u32,
        actor: Side,
        breakdown: MitigationBreakdown,
    },
    Crit {
        turn: u32,
        actor: Side,
        breakdown: MitigationBreakdown,
    },
    Block {
        turn: u32,
        actor: Side,
        breakdown: MitigationBreakdown,
    },
    UltimateCast {
        turn: u32,
        actor: Side,
        name: String,
        breakdown: MitigationBreakdown,
    },
    PassiveProc {
        turn: u32,
        actor: Side,
        name: String,
        forced_by_pity: bool,
    },
    DotTick {
        turn: u32,
        side: Side,
        key: StatusKey,
        damage: u32,
    },
    StatusApplied {
        turn: u32,
        side: Side,
        key: StatusKey,
        stacks: u32,
        source: Side,
    },
    StatusResisted {
        turn: u32,
        side: Side,
        key: StatusKey,
    },
    StatusExpired {
        turn: u32,
        side: Side,
        key: StatusKey,
    },
}

impl CombatEvent {
    /// Log line for this event, if it produces one.
    ///
    /// Status lines use the fixed `<side>:<verb>:<key>` wire format that
    /// external tooling greps for; the rest are human-readable.
    pub fn log_line(&self) -> String {
        match self {
            Self::Miss { turn, actor, forced } => {
                if *forced {
                    format!("turn {turn}: {actor} strike forced to miss")
                } else {
                    format!("turn {turn}: {actor} misses")
                }
            }
            Self::Hit { turn, actor, breakdown } => {
                format!("turn {turn}: {actor} hits for {}", breakdown.final_damage)
            }
            Self::Crit { turn, actor, breakdown } => {
                format!("turn {turn}: {actor} crits for {}", breakdown.final_damage)
            }
            Self::Block { turn, actor, breakdown } => format!(
                "turn {turn}: {actor} hits for {} ({} blocked)",
                breakdown.final_damage, breakdown.blocked_amount
            ),
            Self::UltimateCast { turn, actor, name, breakdown } => format!(
                "turn {turn}: {actor} casts {name} for {}",
                breakdown.final_damage
            ),
            Self::PassiveProc { turn, actor, name, forced_by_pity } => {
                if *forced_by_pity {
                    format!("turn {turn}: {actor} passive {name} procs (pity)")
                } else {
                    format!("turn {turn}: {actor} passive {name} procs")
                }
            }
            Self::DotTick { turn, side, key, damage } => {
                format!("turn {turn}: {side} takes {damage} from {key}")
            }
            Self::StatusApplied { side, key, .. } => format!("{side}:apply:{key}"),
            Self::StatusResisted { side, key, .. } => format!("{side}:resist:{key}"),
            Self::StatusExpired { side, key, .. } => format!("{side}:expire:{key}"),
        }
    }
}

/// Ability metadata attached to proc/cast timeline entries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityMeta {
    pub kind: AbilityKind,
    pub name: String,
    pub duration: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityKind {
    Passive,
    Ultimate,
}

/// One entry of the match timeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEntry {
    pub turn: u32,
    pub actor: Side,
    pub kind: EventKind,
    pub damage: u32,
    /// Both sides' HP after this entry resolved.
    pub attacker_hp: u32,
    pub defender_hp: u32,
    pub ability: Option<AbilityMeta>,
    /// Free-form cosmetic/animation hooks, capped at
    /// [`BalanceTables::MAX_TIMELINE_TAGS`].
    pub tags: ArrayVec<String, { BalanceTables::MAX_TIMELINE_TAGS }>,
}

impl TimelineEntry {
    /// Append a tag, silently dropping it once the cap is reached.
    pub fn push_tag(&mut self, tag: impl Into<String>) {
        let _ = self.tags.try_push(tag.into());
    }
}

/// Observer seam for structured events.
///
/// The default sink does nothing; cosmetic subscribers implement this to
/// receive the same events the timeline is built from.
pub trait EventSink {
    fn on_event(&mut self, event: &CombatEvent);
}

/// Default no-op sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn on_event(&mut self, _event: &CombatEvent) {}
}

/// Collects log lines and forwards events to the injected sink.
///
/// Single emission path: every event goes through [`Recorder::record`]
/// exactly once, so the log, the sink and the timeline can never drift
/// apart.
pub struct Recorder<'a> {
    log: Vec<String>,
    sink: &'a mut dyn EventSink,
}

impl<'a> Recorder<'a> {
    pub fn new(sink: &'a mut dyn EventSink) -> Self {
        Self {
            log: Vec::new(),
            sink,
        }
    }

    pub fn record(&mut self, event: CombatEvent) {
        self.log.push(event.log_line());
        self.sink.on_event(&event);
    }

    pub fn into_log(self) -> Vec<String> {
        self.log
    }
}
