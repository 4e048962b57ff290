//! Replay determinism: the same `(snapshot, seed)` pair must produce a
//! byte-identical result, no matter how often or where it runs.

use duel_core::{
    BaseStats, ClassKind, CombatStats, CombatantSnapshot, DamageFlavor, DebuffApplication,
    FateScaling, MatchOptions, PassiveSpec, ResistKind, ResistanceMap, Seed, StatusKey,
    TriggerKind, UltimateSpec, WeaponCategory, WeaponDescriptor, run_match,
};
use proptest::prelude::*;

fn weapon(slug: &str, min: u32, max: u32) -> WeaponDescriptor {
    WeaponDescriptor {
        slug: slug.into(),
        min_damage: min,
        max_damage: max,
        damage_type: ResistKind::Physical,
        flavor: DamageFlavor::Physical,
        category: WeaponCategory::Weapon,
        hands: 1,
        ranged: false,
    }
}

/// A fully loaded matchup: off-hands, resistances, passives, ultimates.
fn loaded_pair() -> (CombatantSnapshot, CombatantSnapshot) {
    let attacker = CombatantSnapshot {
        name: "kael".into(),
        level: 12,
        class: ClassKind::Warrior,
        base: BaseStats {
            strength: 18,
            fate: 6,
            physical_defense: 25,
            magical_defense: 10,
            ..BaseStats::default()
        },
        resistances: ResistanceMap::new()
            .with(ResistKind::Fire, 30)
            .with(ResistKind::Confusion, 20),
        combat: CombatStats {
            attack_power: 14,
            evasion: 10,
            block_chance: 15,
            damage_reduction: 5,
            critical_chance: 20,
            critical_damage_bonus: 50,
            max_hp: 180,
            ..CombatStats::default()
        },
        main_hand: weapon("iron_sword", 6, 12),
        off_hand: Some(WeaponDescriptor {
            category: WeaponCategory::Shield,
            ..weapon("oak_shield", 0, 0)
        }),
        passive: Some(PassiveSpec {
            name: "battle_trance".into(),
            trigger: TriggerKind::OnBasicHit,
            chance: FateScaling::new(10, 2, 35),
            duration_turns: 3,
            pity_threshold: 4,
            damage_bonus: 7,
            damage_flavor: DamageFlavor::Physical,
            bonus_flat_dr: 5,
        }),
        ultimate: Some(UltimateSpec {
            name: "skullsplitter".into(),
            enabled: true,
            chance: FateScaling::new(8, 2, 30),
            cooldown_turns: 4,
            respect_cooldown: true,
            pity_threshold: 5,
            power_multiplier_pct: 180,
            damage_flavor: DamageFlavor::Physical,
            element: ResistKind::Physical,
            debuff: Some(DebuffApplication {
                status: StatusKey::Bleed,
                chance: 60,
                duration_turns: 3,
                stacks: 2,
            }),
        }),
    };

    let defender = CombatantSnapshot {
        name: "mirelle".into(),
        level: 12,
        class: ClassKind::Mage,
        base: BaseStats {
            intelligence: 20,
            fate: 9,
            physical_defense: 8,
            magical_defense: 30,
            ..BaseStats::default()
        },
        resistances: ResistanceMap::new()
            .with(ResistKind::Physical, 15)
            .with(ResistKind::Bleed, 25),
        combat: CombatStats {
            magic_power: 16,
            evasion: 18,
            block_chance: 0,
            damage_reduction: 8,
            critical_chance: 12,
            critical_damage_bonus: 40,
            max_hp: 150,
            ..CombatStats::default()
        },
        main_hand: WeaponDescriptor {
            slug: "ember_staff".into(),
            min_damage: 5,
            max_damage: 9,
            damage_type: ResistKind::Fire,
            flavor: DamageFlavor::Magical,
            category: WeaponCategory::Focus,
            hands: 2,
            ranged: false,
        },
        off_hand: None,
        passive: Some(PassiveSpec {
            name: "mirror_ward".into(),
            trigger: TriggerKind::OnHitOrBeingHit,
            chance: FateScaling::new(12, 1, 30),
            duration_turns: 2,
            pity_threshold: 3,
            damage_bonus: 0,
            damage_flavor: DamageFlavor::Magical,
            bonus_flat_dr: 12,
        }),
        ultimate: Some(UltimateSpec {
            name: "cinder_nova".into(),
            enabled: true,
            chance: FateScaling::new(10, 1, 25),
            cooldown_turns: 3,
            respect_cooldown: true,
            pity_threshold: 0,
            power_multiplier_pct: 220,
            damage_flavor: DamageFlavor::Magical,
            element: ResistKind::Fire,
            debuff: Some(DebuffApplication {
                status: StatusKey::Burn,
                chance: 75,
                duration_turns: 3,
                stacks: 1,
            }),
        }),
    };

    (attacker, defender)
}

#[test]
fn identical_seeds_identical_results() {
    let (attacker, defender) = loaded_pair();
    for seed in [0u32, 1, 12345, 0xFFFF_FFFF] {
        let first = run_match(&attacker, &defender, seed, MatchOptions::default());
        let second = run_match(&attacker, &defender, seed, MatchOptions::default());
        assert_eq!(first, second, "seed {seed} diverged between runs");
    }
}

#[test]
fn text_seed_is_just_a_hash() {
    let (attacker, defender) = loaded_pair();
    let by_text = run_match(&attacker, &defender, "alice-vs-bob", MatchOptions::default());
    let by_hash = run_match(
        &attacker,
        &defender,
        Seed::from("alice-vs-bob").0,
        MatchOptions::default(),
    );
    assert_eq!(by_text, by_hash);
}

#[test]
fn seeds_actually_matter() {
    let (attacker, defender) = loaded_pair();
    let baseline = run_match(&attacker, &defender, 1u32, MatchOptions::default());
    let diverged = (2u32..30).any(|seed| {
        run_match(&attacker, &defender, seed, MatchOptions::default()).timeline
            != baseline.timeline
    });
    assert!(diverged, "28 different seeds all replayed the same timeline");
}

#[test]
fn concurrent_matches_share_nothing() {
    // Independent matches on independent threads: each owns its RNG and
    // runtimes, so parallel execution cannot perturb the results.
    let (attacker, defender) = loaded_pair();
    let baseline: Vec<_> = (0u32..8)
        .map(|seed| run_match(&attacker, &defender, seed, MatchOptions::default()))
        .collect();

    let handles: Vec<_> = (0u32..8)
        .map(|seed| {
            let attacker = attacker.clone();
            let defender = defender.clone();
            std::thread::spawn(move || {
                run_match(&attacker, &defender, seed, MatchOptions::default())
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let result = handle.join().expect("match thread panicked");
        assert_eq!(result, baseline[seed], "seed {seed} diverged across threads");
    }
}

#[test]
fn hp_never_increases() {
    let (attacker, defender) = loaded_pair();
    for seed in 0u32..50 {
        let result = run_match(&attacker, &defender, seed, MatchOptions::default());
        let mut last = (attacker.combat.max_hp, defender.combat.max_hp);
        for snapshot in &result.per_turn {
            assert!(snapshot.attacker_hp <= last.0, "attacker HP rose at turn {}", snapshot.turn);
            assert!(snapshot.defender_hp <= last.1, "defender HP rose at turn {}", snapshot.turn);
            last = (snapshot.attacker_hp, snapshot.defender_hp);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn replays_are_identical_for_arbitrary_stats(
        seed in any::<u32>(),
        attack_power in 0u32..60,
        evasion in 0u32..=100,
        block in 0u32..=100,
        crit in 0u32..=100,
        weapon_min in 0u32..15,
        weapon_spread in 0u32..15,
        max_hp in 1u32..400,
    ) {
        let (mut attacker, mut defender) = loaded_pair();
        attacker.combat.attack_power = attack_power;
        attacker.combat.critical_chance = crit;
        attacker.main_hand.min_damage = weapon_min;
        attacker.main_hand.max_damage = weapon_min + weapon_spread;
        defender.combat.evasion = evasion;
        defender.combat.block_chance = block;
        defender.combat.max_hp = max_hp;

        let first = run_match(&attacker, &defender, seed, MatchOptions::default());
        let second = run_match(&attacker, &defender, seed, MatchOptions::default());
        prop_assert_eq!(&first, &second);

        // Strike damage stays within the analytic ceiling: best main roll
        // with the 120% primary-weapon bonus, attack power, the passive
        // bonus from loaded_pair(), and the crit bonus on top. Mitigation
        // can only shrink it from there.
        let max_raw =
            attacker.main_hand.max_damage * 120 / 100 + attacker.combat.attack_power + 7;
        let ceiling = max_raw * (100 + attacker.combat.critical_damage_bonus) / 100;
        for entry in first.timeline.iter().filter(|entry| {
            entry.actor == duel_core::Side::Attacker
                && matches!(
                    entry.kind,
                    duel_core::EventKind::Hit
                        | duel_core::EventKind::Crit
                        | duel_core::EventKind::Block
                )
        }) {
            prop_assert!(
                entry.damage <= ceiling,
                "strike for {} exceeded ceiling {}",
                entry.damage,
                ceiling
            );
        }
    }
}
