//! Combat resolution pipeline.
//!
//! Pure, deterministic functions layered the same way the match runner
//! calls them:
//!
//! - `mitigation`: raw damage + percentage factors -> final damage with a
//!   full breakdown
//! - `damage`: strike roll drawing and raw damage composition
//! - `proc`: fate-scaled passive/ultimate activation with pity and
//!   cooldowns
//! - `turn`: one attack from miss check through proc hooks

pub mod damage;
pub mod mitigation;
pub mod proc;
pub mod turn;

pub use damage::{ComposedDamage, StrikeRolls, compose_raw_damage, draw_strike_rolls};
pub use mitigation::{MitigationBreakdown, MitigationInput, defense_reduction_pct, mitigate};
pub use proc::{ProcAttempt, scaled_chance, try_activate_passive, try_roll_ultimate};
pub use turn::{ProcNote, StrikeOutcome, UltimateOutcome, resolve_strike, resolve_ultimate};
