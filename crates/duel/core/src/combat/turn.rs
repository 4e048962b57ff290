//! Single-attack resolution.
//!
//! States per strike, strictly ordered and short-circuiting on miss:
//! MissCheck -> BlockCheck -> CritCheck -> DamageCompute -> Mitigate ->
//! Apply -> ProcHooks. All strike draws are consumed before any branch is
//! taken (see [`super::damage::draw_strike_rolls`]), so two replays of the
//! same seed walk the same stream regardless of outcome.

use tracing::trace;

use super::damage::{compose_raw_damage, draw_strike_rolls};
use super::mitigation::{MitigationBreakdown, MitigationInput, defense_reduction_pct, mitigate};
use super::proc;
use crate::config::BalanceTables;
use crate::event::{CombatEvent, EventKind, Recorder};
use crate::rng::SeededRng;
use crate::runtime::{CombatantRuntime, PerSide, Side};
use crate::snapshot::{CombatantSnapshot, DamageFlavor, TriggerKind};
use crate::status::StatusEngine;

/// What one strike did, for the runner's timeline entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrikeOutcome {
    pub kind: EventKind,
    pub damage: u32,
    pub breakdown: Option<MitigationBreakdown>,
    pub forced_miss: bool,
    pub blocked: bool,
    pub crit: bool,
    /// Passive procs this strike triggered, by side.
    pub attacker_proc: Option<ProcNote>,
    pub defender_proc: Option<ProcNote>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcNote {
    pub forced_by_pity: bool,
    pub duration: u32,
}

/// What an ultimate cast did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UltimateOutcome {
    pub damage: u32,
    pub breakdown: MitigationBreakdown,
    pub forced_by_pity: bool,
    pub debuff_applied: bool,
}

/// Combined flat damage reduction for `side`: base stat + status
/// contributions + active passive bonus, clamped to the canonical domain.
fn combined_flat_dr(
    snapshot: &CombatantSnapshot,
    runtime: &CombatantRuntime,
    statuses: &StatusEngine,
    side: Side,
) -> u32 {
    let mut flat = snapshot.combat.damage_reduction as i64;
    flat += i64::from(statuses.bonus_flat_dr(side));
    if runtime.passive.is_active() {
        flat += i64::from(runtime.passive.bonus_flat_dr);
    }
    flat.clamp(0, 100) as u32
}

/// Defender's defense stat for a flavor, with the status defense
/// multiplier applied to physical defense.
fn effective_defense(
    snapshot: &CombatantSnapshot,
    statuses: &StatusEngine,
    side: Side,
    flavor: DamageFlavor,
) -> u32 {
    let defense = snapshot.defense(flavor);
    match flavor {
        DamageFlavor::Physical => {
            (u64::from(defense) * u64::from(statuses.defense_multiplier_pct(side)) / 100) as u32
        }
        DamageFlavor::Magical => defense,
    }
}

/// Resolve one basic strike by `actor` against the opposing side.
#[allow(clippy::too_many_arguments)]
pub fn resolve_strike(
    turn: u32,
    actor: Side,
    snapshots: &PerSide<&CombatantSnapshot>,
    arena: &mut PerSide<CombatantRuntime>,
    statuses: &mut StatusEngine,
    tables: &BalanceTables,
    rng: &mut SeededRng,
    recorder: &mut Recorder<'_>,
) -> StrikeOutcome {
    let defender = actor.other();
    let attacker_snap = snapshots[actor];
    let defender_snap = snapshots[defender];

    // (1) Forced-miss lookup consumes no draw; (2..6) are always drawn.
    let forced_miss = statuses.forces_miss(actor);
    let rolls = draw_strike_rolls(attacker_snap, rng);

    let missed = forced_miss || rolls.evasion_roll <= defender_snap.combat.evasion;
    if missed {
        trace!(turn, %actor, forced = forced_miss, "strike missed");
        recorder.record(CombatEvent::Miss {
            turn,
            actor,
            forced: forced_miss,
        });
        return StrikeOutcome {
            kind: EventKind::Miss,
            damage: 0,
            breakdown: None,
            forced_miss,
            blocked: false,
            crit: false,
            attacker_proc: None,
            defender_proc: None,
        };
    }

    let blocked = rolls.block_roll <= defender_snap.combat.block_chance;
    let crit = rolls.crit_roll <= attacker_snap.combat.critical_chance;

    let composed = compose_raw_damage(attacker_snap, &arena[actor].passive, &rolls, tables);
    let flavor = composed.flavor;

    let defense = effective_defense(defender_snap, statuses, defender, flavor);
    let breakdown = mitigate(MitigationInput {
        flavor,
        raw: composed.raw(),
        defense_reduction_pct: defense_reduction_pct(defense, tables.softcap(flavor)),
        resistance_pct: defender_snap
            .resistances
            .get(attacker_snap.main_hand.damage_type),
        crit_bonus_pct: if crit {
            attacker_snap.combat.critical_damage_bonus
        } else {
            0
        },
        block_reduction_pct: if blocked {
            tables.mitigation.block_reduction_pct
        } else {
            0
        },
        flat_reduction_pct: combined_flat_dr(defender_snap, &arena[defender], statuses, defender),
    });

    let lost = arena[defender].take_damage(breakdown.final_damage);
    statuses.notify_damage_taken(turn, defender, lost, recorder);

    let kind = if crit {
        EventKind::Crit
    } else if blocked {
        EventKind::Block
    } else {
        EventKind::Hit
    };
    trace!(turn, %actor, ?kind, damage = breakdown.final_damage, "strike landed");
    recorder.record(match kind {
        EventKind::Crit => CombatEvent::Crit {
            turn,
            actor,
            breakdown,
        },
        EventKind::Block => CombatEvent::Block {
            turn,
            actor,
            breakdown,
        },
        _ => CombatEvent::Hit {
            turn,
            actor,
            breakdown,
        },
    });

    // Proc hooks fire only once a strike has landed: attacker's
    // matching-trigger passive first, then the defender's
    // on_hit_or_being_hit passive.
    let strike_trigger = attacker_snap.attack_trigger();
    let attacker_proc =
        attempt_passive(turn, actor, attacker_snap, arena, strike_trigger, rng, recorder);
    let defender_proc = attempt_defender_passive(turn, defender, defender_snap, arena, rng, recorder);

    StrikeOutcome {
        kind,
        damage: breakdown.final_damage,
        breakdown: Some(breakdown),
        forced_miss: false,
        blocked,
        crit,
        attacker_proc,
        defender_proc,
    }
}

fn attempt_passive(
    turn: u32,
    side: Side,
    snapshot: &CombatantSnapshot,
    arena: &mut PerSide<CombatantRuntime>,
    strike_trigger: TriggerKind,
    rng: &mut SeededRng,
    recorder: &mut Recorder<'_>,
) -> Option<ProcNote> {
    let spec = snapshot.passive.as_ref()?;
    if !spec.trigger.matches_attack(strike_trigger) {
        return None;
    }
    let forced = proc::try_activate_passive(spec, snapshot.base.fate, &mut arena[side].passive, rng)?;
    recorder.record(CombatEvent::PassiveProc {
        turn,
        actor: side,
        name: spec.name.clone(),
        forced_by_pity: forced,
    });
    Some(ProcNote {
        forced_by_pity: forced,
        duration: spec.duration_turns,
    })
}

fn attempt_defender_passive(
    turn: u32,
    defender: Side,
    snapshot: &CombatantSnapshot,
    arena: &mut PerSide<CombatantRuntime>,
    rng: &mut SeededRng,
    recorder: &mut Recorder<'_>,
) -> Option<ProcNote> {
    let spec = snapshot.passive.as_ref()?;
    if spec.trigger != TriggerKind::OnHitOrBeingHit {
        return None;
    }
    let forced =
        proc::try_activate_passive(spec, snapshot.base.fate, &mut arena[defender].passive, rng)?;
    recorder.record(CombatEvent::PassiveProc {
        turn,
        actor: defender,
        name: spec.name.clone(),
        forced_by_pity: forced,
    });
    Some(ProcNote {
        forced_by_pity: forced,
        duration: spec.duration_turns,
    })
}

/// Attempt and resolve the actor's ultimate at turn start.
///
/// Returns `None` when the ultimate is absent, gated out, or the roll
/// fails. A cast resolves damage through the mitigation pipeline with no
/// crit and no block, then applies its configured debuff, if any.
#[allow(clippy::too_many_arguments)]
pub fn resolve_ultimate(
    turn: u32,
    actor: Side,
    snapshots: &PerSide<&CombatantSnapshot>,
    arena: &mut PerSide<CombatantRuntime>,
    statuses: &mut StatusEngine,
    tables: &BalanceTables,
    rng: &mut SeededRng,
    recorder: &mut Recorder<'_>,
) -> Option<UltimateOutcome> {
    let caster_snap = snapshots[actor];
    let spec = caster_snap.ultimate.as_ref()?;
    let silenced = statuses.blocks_ultimate(actor);

    let forced = proc::try_roll_ultimate(
        spec,
        caster_snap.base.fate,
        &mut arena[actor].ultimate,
        silenced,
        rng,
    )?;

    let defender = actor.other();
    let defender_snap = snapshots[defender];
    let flavor = spec.damage_flavor;
    let defense = effective_defense(defender_snap, statuses, defender, flavor);

    let breakdown = mitigate(MitigationInput {
        flavor,
        raw: proc::ultimate_raw_damage(spec, caster_snap),
        defense_reduction_pct: defense_reduction_pct(defense, tables.softcap(flavor)),
        resistance_pct: defender_snap.resistances.get(spec.element),
        crit_bonus_pct: 0,
        block_reduction_pct: 0,
        flat_reduction_pct: combined_flat_dr(defender_snap, &arena[defender], statuses, defender),
    });

    let lost = arena[defender].take_damage(breakdown.final_damage);
    statuses.notify_damage_taken(turn, defender, lost, recorder);

    trace!(turn, %actor, name = %spec.name, damage = breakdown.final_damage, "ultimate cast");
    recorder.record(CombatEvent::UltimateCast {
        turn,
        actor,
        name: spec.name.clone(),
        breakdown,
    });

    let mut debuff_applied = false;
    if let Some(debuff) = &spec.debuff {
        let resist = defender_snap.resistances.get(debuff.status.params().resist);
        debuff_applied = statuses.try_apply(
            turn,
            defender,
            debuff.status,
            debuff.chance,
            debuff.duration_turns,
            debuff.stacks,
            actor,
            resist,
            rng,
            recorder,
        );
    }

    Some(UltimateOutcome {
        damage: breakdown.final_damage,
        breakdown,
        forced_by_pity: forced,
        debuff_applied,
    })
}
