//! Strike roll drawing and raw damage composition.

use crate::config::BalanceTables;
use crate::rng::SeededRng;
use crate::runtime::PassiveRuntime;
use crate::snapshot::{CombatantSnapshot, DamageFlavor, WeaponCategory};

/// All random draws of one strike, consumed up front in fixed order.
///
/// The order is part of the replay contract: evasion, block, crit, main
/// weapon, then off-hand if equipped, even when a later branch discards
/// some of the results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeRolls {
    pub evasion_roll: u32,
    pub block_roll: u32,
    pub crit_roll: u32,
    pub main_roll: u32,
    pub offhand_roll: Option<u32>,
}

pub fn draw_strike_rolls(attacker: &CombatantSnapshot, rng: &mut SeededRng) -> StrikeRolls {
    let evasion_roll = rng.percent();
    let block_roll = rng.percent();
    let crit_roll = rng.percent();
    let main_roll = rng.int_between(attacker.main_hand.min_damage, attacker.main_hand.max_damage);
    let offhand_roll = attacker
        .off_hand
        .as_ref()
        .map(|weapon| rng.int_between(weapon.min_damage, weapon.max_damage));
    StrikeRolls {
        evasion_roll,
        block_roll,
        crit_roll,
        main_roll,
        offhand_roll,
    }
}

/// Raw damage of a strike, before mitigation, with its audit parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposedDamage {
    pub flavor: DamageFlavor,
    pub main_component: u32,
    pub offhand_component: u32,
    pub stat_component: u32,
    pub passive_component: u32,
    pub primary_weapon_bonus: bool,
}

impl ComposedDamage {
    pub fn raw(&self) -> u32 {
        self.main_component + self.offhand_component + self.stat_component + self.passive_component
    }
}

/// Compose raw strike damage.
///
/// `main_roll (+ primary-weapon bonus) + off-hand contribution + power stat
/// + active passive bonus (flavor-matched)`.
pub fn compose_raw_damage(
    attacker: &CombatantSnapshot,
    passive: &PassiveRuntime,
    rolls: &StrikeRolls,
    tables: &BalanceTables,
) -> ComposedDamage {
    let flavor = attacker.main_hand.flavor;

    let primary = attacker.class.is_primary_weapon(&attacker.main_hand.slug);
    let main_component = if primary {
        rolls.main_roll * tables.strike.primary_weapon_bonus_pct / 100
    } else {
        rolls.main_roll
    };

    let offhand_component = match (&attacker.off_hand, rolls.offhand_roll) {
        (Some(weapon), Some(roll)) => match weapon.category {
            WeaponCategory::Weapon => roll * tables.strike.offhand_weapon_pct / 100,
            WeaponCategory::Focus => roll * tables.strike.offhand_focus_pct / 100,
            WeaponCategory::Shield => 0,
        },
        _ => 0,
    };

    let stat_component = attacker.power(flavor);

    let passive_component = match &attacker.passive {
        Some(spec) if passive.is_active() && spec.damage_flavor == flavor => passive.bonus_damage,
        _ => 0,
    };

    ComposedDamage {
        flavor,
        main_component,
        offhand_component,
        stat_component,
        passive_component,
        primary_weapon_bonus: primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        BaseStats, ClassKind, CombatStats, ResistKind, ResistanceMap, WeaponDescriptor,
    };

    fn weapon(slug: &str, min: u32, max: u32, category: WeaponCategory) -> WeaponDescriptor {
        WeaponDescriptor {
            slug: slug.into(),
            min_damage: min,
            max_damage: max,
            damage_type: ResistKind::Physical,
            flavor: DamageFlavor::Physical,
            category,
            hands: 1,
            ranged: false,
        }
    }

    fn warrior() -> CombatantSnapshot {
        CombatantSnapshot {
            name: "warrior".into(),
            level: 5,
            class: ClassKind::Warrior,
            base: BaseStats::default(),
            resistances: ResistanceMap::new(),
            combat: CombatStats {
                attack_power: 10,
                max_hp: 100,
                ..CombatStats::default()
            },
            main_hand: weapon("iron_sword", 5, 10, WeaponCategory::Weapon),
            off_hand: None,
            passive: None,
            ultimate: None,
        }
    }

    #[test]
    fn draw_order_skips_offhand_when_unequipped() {
        let snapshot = warrior();
        let mut rng = SeededRng::new(20);
        let mut reference = rng.clone();
        let rolls = draw_strike_rolls(&snapshot, &mut rng);
        assert!(rolls.offhand_roll.is_none());
        // evasion + block + crit + main = four draws.
        for _ in 0..4 {
            reference.next_f64();
        }
        assert_eq!(rng, reference);
    }

    #[test]
    fn primary_weapon_bonus_applies() {
        let snapshot = warrior();
        let rolls = StrikeRolls {
            evasion_roll: 50,
            block_roll: 50,
            crit_roll: 50,
            main_roll: 10,
            offhand_roll: None,
        };
        let composed = compose_raw_damage(
            &snapshot,
            &PassiveRuntime::default(),
            &rolls,
            &BalanceTables::default(),
        );
        // 10 * 120% = 12, plus attack power 10.
        assert!(composed.primary_weapon_bonus);
        assert_eq!(composed.main_component, 12);
        assert_eq!(composed.raw(), 22);
    }

    #[test]
    fn offhand_contribution_by_category() {
        let mut snapshot = warrior();
        snapshot.main_hand = weapon("club", 10, 10, WeaponCategory::Weapon);
        let rolls = StrikeRolls {
            evasion_roll: 1,
            block_roll: 1,
            crit_roll: 1,
            main_roll: 10,
            offhand_roll: Some(20),
        };
        let tables = BalanceTables::default();

        snapshot.off_hand = Some(weapon("hatchet", 20, 20, WeaponCategory::Weapon));
        let composed =
            compose_raw_damage(&snapshot, &PassiveRuntime::default(), &rolls, &tables);
        assert_eq!(composed.offhand_component, 7); // 35% of 20

        snapshot.off_hand = Some(weapon("torch_focus", 20, 20, WeaponCategory::Focus));
        let composed =
            compose_raw_damage(&snapshot, &PassiveRuntime::default(), &rolls, &tables);
        assert_eq!(composed.offhand_component, 3); // 15% of 20

        snapshot.off_hand = Some(weapon("tower_shield", 20, 20, WeaponCategory::Shield));
        let composed =
            compose_raw_damage(&snapshot, &PassiveRuntime::default(), &rolls, &tables);
        assert_eq!(composed.offhand_component, 0);
    }

    #[test]
    fn passive_bonus_requires_matching_flavor_and_active_buff() {
        use crate::snapshot::{FateScaling, PassiveSpec, TriggerKind};

        let mut snapshot = warrior();
        snapshot.main_hand = weapon("club", 10, 10, WeaponCategory::Weapon);
        snapshot.passive = Some(PassiveSpec {
            name: "frenzy".into(),
            trigger: TriggerKind::OnBasicHit,
            chance: FateScaling::new(10, 0, 10),
            duration_turns: 2,
            pity_threshold: 0,
            damage_bonus: 6,
            damage_flavor: DamageFlavor::Physical,
            bonus_flat_dr: 0,
        });
        let rolls = StrikeRolls {
            evasion_roll: 1,
            block_roll: 1,
            crit_roll: 1,
            main_roll: 10,
            offhand_roll: None,
        };
        let tables = BalanceTables::default();

        let idle = PassiveRuntime::default();
        assert_eq!(
            compose_raw_damage(&snapshot, &idle, &rolls, &tables).passive_component,
            0
        );

        let active = PassiveRuntime {
            remaining_turns: 2,
            bonus_damage: 6,
            bonus_flat_dr: 0,
            fail_streak: 0,
        };
        assert_eq!(
            compose_raw_damage(&snapshot, &active, &rolls, &tables).passive_component,
            6
        );

        // Magical passive on a physical strike contributes nothing.
        snapshot.passive.as_mut().unwrap().damage_flavor = DamageFlavor::Magical;
        assert_eq!(
            compose_raw_damage(&snapshot, &active, &rolls, &tables).passive_component,
            0
        );
    }
}
