//! Head-to-head derived-stat pipeline. Every stat is evaluated twice per
//! step, once from each side's point of view, and rounded to 2 decimals
//! before the next step reads it, so both sides always see each other's
//! already-derived values.

use serde::Serialize;

use crate::compare::stats::SideStats;
use crate::data::store::UnitBundle;

pub const BASE_HIT_CHANCE: f64 = 40.0;
pub const MIN_HIT_CHANCE: f64 = 15.0;
pub const MAX_HIT_CHANCE: f64 = 75.0;

/// Paired result: one flat stat record per side, matching field names on
/// both so renderers can diff them column against column.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    #[serde(rename = "playerUnit")]
    pub player_unit: SideStats,
    #[serde(rename = "aiUnit")]
    pub ai_unit: SideStats,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

type StatCalc = fn(&SideStats, &SideStats) -> f64;
type StatAssign = fn(&mut SideStats, f64);

/// The derivation order matters: later steps read earlier derived stats
/// from both sides (e.g. effective_defence_chance reads the enemy's
/// effective_melee_hit_chance).
///
/// range_combat_score divides by expected_melee_defence, not
/// expected_range_defence. That mirrors the game tool this calculator was
/// calibrated against; change it only together with that tool.
const PIPELINE: [(StatCalc, StatAssign); 10] = [
    (
        |own, enemy| BASE_HIT_CHANCE + own.melee_attack_chance - enemy.melee_defence_chance,
        |stats, v| stats.melee_hit_chance = v,
    ),
    (
        |own, _| own.melee_hit_chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE),
        |stats, v| stats.effective_melee_hit_chance = v,
    ),
    (
        |_, enemy| 100.0 - enemy.effective_melee_hit_chance,
        |stats, v| stats.effective_defence_chance = v,
    ),
    (
        |own, _| {
            (own.melee_weapon_damage + own.melee_weapon_ap) * own.effective_melee_hit_chance
                / 100.0
        },
        |stats, v| stats.expected_melee_damage = v,
    ),
    (
        |own, enemy| {
            (own.melee_armour_value - enemy.melee_weapon_ap) * own.effective_defence_chance / 100.0
        },
        |stats, v| stats.expected_melee_defence = v,
    ),
    (
        |own, _| own.expected_melee_damage / own.expected_melee_defence.max(1.0),
        |stats, v| stats.melee_combat_score = v,
    ),
    (
        |_, enemy| 100.0 - enemy.missile_defence_chance,
        |stats, v| stats.effective_range_hit_chance = v,
    ),
    (
        |own, _| {
            (own.range_weapon_damage + own.range_weapon_ap) * own.effective_range_hit_chance
                / 100.0
        },
        |stats, v| stats.expected_range_damage = v,
    ),
    (
        |own, enemy| {
            (own.melee_armour_value - enemy.range_weapon_ap) * own.missile_defence_chance / 100.0
        },
        |stats, v| stats.expected_range_defence = v,
    ),
    (
        |own, _| own.expected_range_damage / own.expected_melee_defence.max(1.0),
        |stats, v| stats.range_combat_score = v,
    ),
];

/// Compare two unit bundles. Symmetric: swapping the inputs swaps the
/// output sides, since every stat is derived relationally rather than from
/// the side label.
pub fn compare(player: &UnitBundle, ai: &UnitBundle) -> Comparison {
    let mut player_stats = SideStats::from_bundle(player);
    let mut ai_stats = SideStats::from_bundle(ai);

    for (calc, assign) in PIPELINE {
        let player_value = round2(calc(&player_stats, &ai_stats));
        let ai_value = round2(calc(&ai_stats, &player_stats));
        assign(&mut player_stats, player_value);
        assign(&mut ai_stats, ai_value);
    }

    Comparison {
        player_unit: player_stats,
        ai_unit: ai_stats,
    }
}
