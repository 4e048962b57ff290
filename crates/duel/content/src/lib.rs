//! Normalization boundary between stored combatant documents and the
//! engine's canonical snapshot types.
//!
//! Stored documents are heterogeneous: some percentage fields are 0..1
//! fractions, others 0..100 integers, and ability configs are
//! stringly-typed. This crate collapses all of that exactly once:
//!
//! - numeric fields are defensively coerced (NaN, negatives and fractions
//!   all land in the canonical 0–100 integer domain or a documented
//!   default) so a match can always run;
//! - structural problems (unknown class, trigger, damage type, status)
//!   are rejected with a typed [`NormalizeError`]; the engine never sees
//!   them.
//!
//! The engine (`duel-core`) requires canonical inputs and never
//! re-normalizes.

mod loader;
mod model;
mod normalize;

pub use loader::{combatant_from_json, load_combatant};
pub use model::{
    RawAbility, RawCombatStats, RawCombatant, RawDebuff, RawStats, RawUltimate, RawWeapon,
};
pub use normalize::{NormalizeError, normalize_combatant};
