//! Flat per-side stat record: the raw base fields pulled out of a unit
//! bundle plus every derived combat stat. Field names are the wire names the
//! paired-diff renderer keys on.

use serde::Serialize;

use crate::data::record::Record;
use crate::data::store::UnitBundle;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideStats {
    pub onscreen_name: String,

    // Base fields, coerced from the bundle with absent -> 0.
    pub melee_weapon_damage: f64,
    pub melee_weapon_ap: f64,
    pub melee_attack_chance: f64,
    pub melee_defence_chance: f64,
    pub missile_defence_chance: f64,
    pub melee_armour_value: f64,
    pub range_weapon_damage: f64,
    pub range_weapon_ap: f64,

    // Derived fields, filled by the calculator pipeline.
    pub melee_hit_chance: f64,
    pub effective_melee_hit_chance: f64,
    pub effective_defence_chance: f64,
    pub expected_melee_damage: f64,
    pub expected_melee_defence: f64,
    pub melee_combat_score: f64,
    pub effective_range_hit_chance: f64,
    pub expected_range_damage: f64,
    pub expected_range_defence: f64,
    pub range_combat_score: f64,
}

fn optional_number(record: &Option<Record>, field: &str) -> f64 {
    record.as_ref().map(|r| r.number(field)).unwrap_or(0.0)
}

impl SideStats {
    /// Extract the base fields from a bundle. Melee defence folds in the
    /// shield's defence value, armour folds in the shield's armour value,
    /// and the ranged damage pair comes from the projectile.
    pub fn from_bundle(bundle: &UnitBundle) -> Self {
        SideStats {
            onscreen_name: bundle
                .unit
                .get("onscreen_name")
                .unwrap_or_default()
                .to_string(),
            melee_weapon_damage: optional_number(&bundle.melee_weapon, "damage"),
            melee_weapon_ap: optional_number(&bundle.melee_weapon, "ap_damage"),
            melee_attack_chance: bundle.unit.number("melee_attack"),
            melee_defence_chance: bundle.unit.number("melee_defence")
                + optional_number(&bundle.shield, "shield_defence_value"),
            missile_defence_chance: optional_number(&bundle.shield, "missile_block_chance"),
            melee_armour_value: optional_number(&bundle.armour, "armour_value")
                + optional_number(&bundle.shield, "shield_armour_value"),
            range_weapon_damage: optional_number(&bundle.projectile, "damage"),
            range_weapon_ap: optional_number(&bundle.projectile, "ap_damage"),
            ..SideStats::default()
        }
    }
}
