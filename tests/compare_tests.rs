use unitscope::compare::{compare, MAX_HIT_CHANCE, MIN_HIT_CHANCE};
use unitscope::data::record::Record;
use unitscope::data::store::UnitBundle;

/// Hand-built bundle with every stat the calculator reads spelled out, so
/// the expected numbers below can be checked by hand.
fn bundle(name: &str, attack: f64, defence: f64, damage: f64, ap: f64, armour: f64) -> UnitBundle {
    UnitBundle {
        unit: Record::from_pairs([
            ("onscreen_name", name.to_string()),
            ("melee_attack", attack.to_string()),
            ("melee_defence", defence.to_string()),
        ]),
        armour: Some(Record::from_pairs([(
            "armour_value",
            armour.to_string(),
        )])),
        shield: None,
        melee_weapon: Some(Record::from_pairs([
            ("damage", damage.to_string()),
            ("ap_damage", ap.to_string()),
        ])),
        range_weapon: None,
        projectile: None,
    }
}

#[test]
fn worked_melee_example() {
    let player = bundle("Veterans", 50.0, 10.0, 20.0, 5.0, 30.0);
    let ai = bundle("Levies", 10.0, 10.0, 10.0, 0.0, 10.0);

    let result = compare(&player, &ai);
    let p = &result.player_unit;
    let a = &result.ai_unit;

    assert_eq!(p.onscreen_name, "Veterans");
    assert_eq!(a.onscreen_name, "Levies");

    // 40 + 50 - 10 = 80, clamped to 75; 40 + 10 - 10 = 40 stays.
    assert_eq!(p.melee_hit_chance, 80.0);
    assert_eq!(p.effective_melee_hit_chance, 75.0);
    assert_eq!(a.melee_hit_chance, 40.0);
    assert_eq!(a.effective_melee_hit_chance, 40.0);

    // Each side's defence is 100 minus the enemy's effective hit chance.
    assert_eq!(p.effective_defence_chance, 60.0);
    assert_eq!(a.effective_defence_chance, 25.0);

    assert_eq!(p.expected_melee_damage, 18.75);
    assert_eq!(a.expected_melee_damage, 4.0);

    // (30 - 0) * 60% = 18; (10 - 5) * 25% = 1.25.
    assert_eq!(p.expected_melee_defence, 18.0);
    assert_eq!(a.expected_melee_defence, 1.25);

    // 18.75 / 18 = 1.0416.., rounded to 1.04; 4 / 1.25 = 3.2.
    assert_eq!(p.melee_combat_score, 1.04);
    assert_eq!(a.melee_combat_score, 3.2);

    // Neither side has a projectile or missile block.
    assert_eq!(p.effective_range_hit_chance, 100.0);
    assert_eq!(p.expected_range_damage, 0.0);
    assert_eq!(p.expected_range_defence, 0.0);
    assert_eq!(p.range_combat_score, 0.0);
    assert_eq!(a.range_combat_score, 0.0);
}

#[test]
fn hit_chance_clamps_at_both_bounds() {
    let brute = bundle("Brute", 90.0, 0.0, 10.0, 0.0, 10.0);
    let turtle = bundle("Turtle", 0.0, 90.0, 10.0, 0.0, 10.0);

    let result = compare(&brute, &turtle);
    assert_eq!(result.player_unit.melee_hit_chance, -10.0);
    assert_eq!(result.player_unit.effective_melee_hit_chance, MIN_HIT_CHANCE);
    assert_eq!(result.ai_unit.melee_hit_chance, 130.0);
    assert_eq!(result.ai_unit.effective_melee_hit_chance, MAX_HIT_CHANCE);
}

#[test]
fn swapping_inputs_swaps_the_sides() {
    let left = bundle("Left", 42.0, 17.0, 28.0, 6.0, 35.0);
    let right = bundle("Right", 23.0, 31.0, 19.0, 2.0, 55.0);

    let forward = compare(&left, &right);
    let reverse = compare(&right, &left);

    assert_eq!(forward.player_unit, reverse.ai_unit);
    assert_eq!(forward.ai_unit, reverse.player_unit);
}

#[test]
fn combat_score_denominator_never_drops_below_one() {
    // Unarmoured defender: expected_melee_defence is 0, so the score is
    // divided by 1 instead.
    let player = bundle("Striker", 20.0, 20.0, 50.0, 0.0, 0.0);
    let ai = bundle("Peer", 20.0, 20.0, 50.0, 0.0, 0.0);

    let result = compare(&player, &ai);
    assert_eq!(result.player_unit.expected_melee_defence, 0.0);
    // effective hit chance is 40, expected damage 50 * 0.4 = 20.
    assert_eq!(result.player_unit.expected_melee_damage, 20.0);
    assert_eq!(result.player_unit.melee_combat_score, 20.0);
}

#[test]
fn range_score_divides_by_melee_defence() {
    let mut player = bundle("Skirmisher", 10.0, 10.0, 10.0, 0.0, 20.0);
    player.shield = Some(Record::from_pairs([
        ("shield_armour_value", "10"),
        ("shield_defence_value", "5"),
        ("missile_block_chance", "50"),
    ]));
    player.projectile = Some(Record::from_pairs([
        ("damage", "30"),
        ("ap_damage", "10"),
    ]));
    let ai = bundle("Target", 10.0, 10.0, 10.0, 0.0, 20.0);

    let result = compare(&player, &ai);
    let p = &result.player_unit;

    // Target has no shield, so every shot can connect.
    assert_eq!(p.effective_range_hit_chance, 100.0);
    assert_eq!(p.expected_range_damage, 40.0);
    // (30 - 0) * 50% from the shield's block chance.
    assert_eq!(p.expected_range_defence, 15.0);

    // The score divides by the melee defence expectation, not the range
    // one. The two differ here, so a wrong denominator would show.
    assert_ne!(p.expected_melee_defence, p.expected_range_defence);
    assert_eq!(
        p.range_combat_score,
        round2(p.expected_range_damage / p.expected_melee_defence.max(1.0))
    );
}

#[test]
fn every_derived_stat_is_rounded_to_two_decimals() {
    let player = bundle("Odd", 33.0, 11.0, 17.0, 3.0, 23.0);
    let ai = bundle("Even", 27.0, 19.0, 13.0, 7.0, 41.0);

    let result = compare(&player, &ai);
    for side in [&result.player_unit, &result.ai_unit] {
        for value in [
            side.melee_hit_chance,
            side.effective_melee_hit_chance,
            side.effective_defence_chance,
            side.expected_melee_damage,
            side.expected_melee_defence,
            side.melee_combat_score,
            side.effective_range_hit_chance,
            side.expected_range_damage,
            side.expected_range_defence,
            side.range_combat_score,
        ] {
            assert_eq!(value, round2(value), "{value} is not 2dp-rounded");
        }
    }
}

#[test]
fn comparison_serializes_with_camel_case_side_keys() {
    let player = bundle("Alpha", 30.0, 10.0, 20.0, 5.0, 25.0);
    let ai = bundle("Beta", 25.0, 15.0, 18.0, 4.0, 30.0);

    let json = serde_json::to_value(compare(&player, &ai)).expect("comparison serializes");
    assert!(json.get("playerUnit").is_some());
    assert!(json.get("aiUnit").is_some());
    assert_eq!(
        json["playerUnit"]["onscreen_name"],
        serde_json::Value::String("Alpha".to_string())
    );
    assert!(json["aiUnit"]["melee_combat_score"].is_number());
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
