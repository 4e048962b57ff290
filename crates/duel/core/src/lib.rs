//! Deterministic turn-based combat resolution for two-party PvP duels.
//!
//! `duel-core` takes two immutable [`CombatantSnapshot`] records and a
//! seed, and produces a fully reproducible sequence of turns (damage,
//! misses, blocks, crits, status effects, ability procs) ending in a
//! winner or draw. The same `(snapshot, seed)` pair yields a byte-for-byte
//! identical [`MatchResult`] on any machine.
//!
//! The crate is a pure library: single-threaded, fully synchronous, no
//! I/O, no timers, no global state. Independent matches may run
//! concurrently on separate threads with zero shared mutable state.
//! Entry point: [`run_match`] (or [`run_match_with_sink`] to observe
//! structured events as they happen).
//!
//! Inputs must be canonical: every percentage an integer in 0–100,
//! normalized once by the external boundary (`duel-content`). The engine
//! defends invariants by clamping, never by raising: a started match
//! always runs to completion.

pub mod combat;
pub mod config;
pub mod event;
pub mod rng;
pub mod runner;
pub mod runtime;
pub mod snapshot;
pub mod status;

pub use combat::{
    ComposedDamage, MitigationBreakdown, MitigationInput, ProcAttempt, ProcNote, StrikeOutcome,
    StrikeRolls, UltimateOutcome, defense_reduction_pct, mitigate, resolve_strike,
    resolve_ultimate,
};
pub use config::{BalanceTables, MitigationParams, RunnerParams, StrikeParams};
pub use event::{
    AbilityKind, AbilityMeta, CombatEvent, EventKind, EventSink, NoopSink, TimelineEntry,
};
pub use rng::{Seed, SeededRng};
pub use runner::{
    MatchOptions, MatchOutcome, MatchResult, SideOutcome, TurnSnapshot, run_match,
    run_match_with_sink,
};
pub use runtime::{CombatantRuntime, PassiveRuntime, PerSide, Side, UltimateRuntime};
pub use snapshot::{
    BaseStats, ClassKind, CombatStats, CombatantSnapshot, DamageFlavor, DebuffApplication,
    FateScaling, PassiveSpec, ResistKind, ResistanceMap, SnapshotError, TriggerKind, UltimateSpec,
    WeaponCategory, WeaponDescriptor,
};
pub use status::{StatusEngine, StatusInstance, StatusKey, StatusParams, StatusPolarity};
