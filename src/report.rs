//! Text rendering of unit sheets and head-to-head bars, plus CSV export of
//! a comparison. Consumes store bundles and comparator output; anything
//! fancier (HTML, colour) belongs to a frontend, not here.

use std::io::Write;

use crate::compare::Comparison;
use crate::data::record::Record;
use crate::data::store::UnitBundle;

const BLOCK_WIDTH: usize = 40;
const MAX_LABEL_LEN: usize = 16;
const BAR_LENGTH: usize = 13;
const LABEL_WIDTH: usize = 24;
const PLACEHOLDER: &str = "N/A";

fn cell(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn optional_cell(record: &Option<Record>, field: &str) -> String {
    record
        .as_ref()
        .map(|r| cell(r, field))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn flag(record: &Option<Record>, field: &str) -> String {
    let set = record.as_ref().map(|r| r.number(field) != 0.0).unwrap_or(false);
    if set { "True" } else { "False" }.to_string()
}

fn basic_stats_rows(bundle: &UnitBundle) -> Vec<(String, String)> {
    let unit = &bundle.unit;
    vec![
        ("Category".to_string(), cell(unit, "category")),
        ("Morale".to_string(), cell(unit, "morale")),
        ("Bonus HP".to_string(), cell(unit, "bonus_hit_points")),
        ("Melee attack".to_string(), format!("{}%", cell(unit, "melee_attack"))),
        ("Charge bonus".to_string(), cell(unit, "charge_bonus")),
        ("Cost".to_string(), cell(unit, "recruitment_cost")),
        ("Upkeep".to_string(), cell(unit, "upkeep_cost")),
    ]
}

fn defense_rows(bundle: &UnitBundle) -> Vec<(String, String)> {
    let unit = &bundle.unit;
    vec![
        ("Melee defence".to_string(), format!("{}%", cell(unit, "melee_defence"))),
        (
            "Armour value".to_string(),
            format!(
                "{} ({})",
                optional_cell(&bundle.armour, "armour_value"),
                cell(unit, "armour_id")
            ),
        ),
        ("Bonus vs Missile".to_string(), flag(&bundle.armour, "bonus_v_missiles")),
        ("Weak vs Missile".to_string(), flag(&bundle.armour, "weak_v_missiles")),
        ("Shield".to_string(), optional_cell(&bundle.shield, "shield_id")),
        ("│ Armour".to_string(), optional_cell(&bundle.shield, "shield_armour_value")),
        (
            "│ Defense".to_string(),
            format!("{}%", optional_cell(&bundle.shield, "shield_defence_value")),
        ),
        (
            "│ Missile block".to_string(),
            format!("{}%", optional_cell(&bundle.shield, "missile_block_chance")),
        ),
    ]
}

fn melee_weapon_rows(bundle: &UnitBundle) -> Vec<(String, String)> {
    let unit = &bundle.unit;
    let weapon = &bundle.melee_weapon;
    vec![
        ("Weapon".to_string(), cell(unit, "melee_weapon_id")),
        ("Type".to_string(), optional_cell(weapon, "melee_weapon_type")),
        ("Armour piercing".to_string(), optional_cell(weapon, "armour_piercing")),
        ("Armour penetrating".to_string(), optional_cell(weapon, "armour_penetrating")),
        ("Shield piercing".to_string(), optional_cell(weapon, "shield_piercing")),
        ("Base damage".to_string(), optional_cell(weapon, "damage")),
        ("AP damage".to_string(), optional_cell(weapon, "ap_damage")),
        ("Bonus vs Cavalry".to_string(), optional_cell(weapon, "bonus_v_cavalry")),
        ("Bonus vs Elephants".to_string(), optional_cell(weapon, "bonus_v_elephants")),
        ("Bonus vs Infantry".to_string(), optional_cell(weapon, "bonus_v_infantry")),
    ]
}

fn missile_weapon_rows(bundle: &UnitBundle) -> Vec<(String, String)> {
    let unit = &bundle.unit;
    let weapon = &bundle.range_weapon;
    let projectile = &bundle.projectile;
    let precursor = weapon
        .as_ref()
        .map(|w| w.number("precursor") == 1.0)
        .unwrap_or(false);
    vec![
        ("Weapon".to_string(), optional_cell(weapon, "weapon_id")),
        (
            "Precursor".to_string(),
            if precursor { "True" } else { "False" }.to_string(),
        ),
        ("Projectile".to_string(), optional_cell(weapon, "projectile_id")),
        ("Damage".to_string(), optional_cell(projectile, "damage")),
        ("AP Damage".to_string(), optional_cell(projectile, "ap_damage")),
        ("Marksmanship".to_string(), optional_cell(projectile, "marksmanship_bonus")),
        ("Effective range".to_string(), optional_cell(projectile, "effective_range")),
        ("Base reload time".to_string(), optional_cell(projectile, "base_reload_time")),
        ("Ammunition".to_string(), cell(unit, "ammo")),
        ("Accuracy".to_string(), cell(unit, "accuracy")),
        ("Reload time".to_string(), cell(unit, "reload")),
    ]
}

fn truncate(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad_end(text: &str, width: usize) -> String {
    let count = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(count)))
}

fn pad_start(text: &str, width: usize) -> String {
    let count = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(count)), text)
}

/// One boxed stat block: bordered centred title, then `├──`/`└──` rows with
/// a fixed label column and right-aligned values.
fn build_block(title: &str, rows: &[(String, String)]) -> String {
    let inner = BLOCK_WIDTH - 2;
    let max_value_len = BLOCK_WIDTH - MAX_LABEL_LEN - 6;

    let border = format!("+{}+", "─".repeat(inner));
    let title_len = title.chars().count();
    let centred = pad_end(&pad_start(title, (inner + title_len) / 2), inner);
    let title_line = format!("|{centred}|");

    let mut lines = vec![border.clone(), title_line, border];
    for (i, (label, value)) in rows.iter().enumerate() {
        let line_char = if i == rows.len() - 1 { '└' } else { '├' };
        let label_text = pad_end(&truncate(label, MAX_LABEL_LEN), MAX_LABEL_LEN);
        let value_text = pad_start(&truncate(value, max_value_len), max_value_len);
        lines.push(format!("{line_char}── {label_text}: {value_text}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Full unit sheet: basic stats, defence, melee weapon and missile weapon
/// blocks, in that order.
pub fn format_unit(bundle: &UnitBundle) -> String {
    [
        build_block("BASIC STATS", &basic_stats_rows(bundle)),
        build_block("DEFENSE", &defense_rows(bundle)),
        build_block("MELEE WEAPON", &melee_weapon_rows(bundle)),
        build_block("MISSILE WEAPON", &missile_weapon_rows(bundle)),
    ]
    .join("\n")
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One `(left) bars [label] bars (right)` line. Bars are scaled to the
/// larger of the two values (minimum divisor 1 so zeros stay safe), with
/// `+` on the winning side, `-` on the losing side and `=` on ties.
fn comparison_line(label: &str, left: f64, right: f64) -> String {
    let max = left.max(right).max(1.0);
    let (left_symbol, right_symbol) = if left > right {
        ('+', '-')
    } else if right > left {
        ('-', '+')
    } else {
        ('=', '=')
    };

    let left_bar = left_symbol
        .to_string()
        .repeat((BAR_LENGTH as f64 * left / max).round() as usize);
    let right_bar = right_symbol
        .to_string()
        .repeat((BAR_LENGTH as f64 * right / max).round() as usize);

    let label_content = format!("[{label}]");
    let total_padding = LABEL_WIDTH.saturating_sub(label_content.chars().count());
    let pad_left = total_padding / 2;
    let pad_right = total_padding - pad_left;
    let label_str = format!(
        "{}{}{}",
        " ".repeat(pad_left),
        label_content,
        " ".repeat(pad_right)
    );

    format!(
        "({}) {} {} {} ({})",
        pad_start(&format_value(left), 3),
        left_bar,
        label_str,
        right_bar,
        pad_end(&format_value(right), 3)
    )
}

fn shielded_defence(bundle: &UnitBundle) -> f64 {
    bundle.unit.number("melee_defence")
        + bundle
            .shield
            .as_ref()
            .map(|s| s.number("shield_defence_value"))
            .unwrap_or(0.0)
}

fn shielded_armour(bundle: &UnitBundle) -> f64 {
    bundle
        .armour
        .as_ref()
        .map(|a| a.number("armour_value"))
        .unwrap_or(0.0)
        + bundle
            .shield
            .as_ref()
            .map(|s| s.number("shield_armour_value"))
            .unwrap_or(0.0)
}

fn optional_number(record: &Option<Record>, field: &str) -> f64 {
    record.as_ref().map(|r| r.number(field)).unwrap_or(0.0)
}

/// Side-by-side raw stat bars for two units, one line per stat.
pub fn comparison_lines(left: &UnitBundle, right: &UnitBundle) -> Vec<String> {
    let pairs = [
        (
            "Melee Attack",
            left.unit.number("melee_attack"),
            right.unit.number("melee_attack"),
        ),
        ("Melee Defense", shielded_defence(left), shielded_defence(right)),
        ("Armour", shielded_armour(left), shielded_armour(right)),
        (
            "Melee Weapon",
            optional_number(&left.melee_weapon, "damage"),
            optional_number(&right.melee_weapon, "damage"),
        ),
        (
            "Melee Weapon AP",
            optional_number(&left.melee_weapon, "ap_damage"),
            optional_number(&right.melee_weapon, "ap_damage"),
        ),
        (
            "Missile Weapon Damage",
            optional_number(&left.projectile, "damage"),
            optional_number(&right.projectile, "damage"),
        ),
        (
            "Missile Weapon AP",
            optional_number(&left.projectile, "ap_damage"),
            optional_number(&right.projectile, "ap_damage"),
        ),
    ];
    pairs
        .into_iter()
        .map(|(label, l, r)| comparison_line(label, l, r))
        .collect()
}

/// The (stat, player value, ai value) triples of a comparison, in pipeline
/// order, shared by the CSV export and any tabular renderer.
pub fn comparison_rows(comparison: &Comparison) -> Vec<(&'static str, f64, f64)> {
    let p = &comparison.player_unit;
    let a = &comparison.ai_unit;
    vec![
        ("melee_weapon_damage", p.melee_weapon_damage, a.melee_weapon_damage),
        ("melee_weapon_ap", p.melee_weapon_ap, a.melee_weapon_ap),
        ("melee_attack_chance", p.melee_attack_chance, a.melee_attack_chance),
        ("melee_defence_chance", p.melee_defence_chance, a.melee_defence_chance),
        ("missile_defence_chance", p.missile_defence_chance, a.missile_defence_chance),
        ("melee_armour_value", p.melee_armour_value, a.melee_armour_value),
        ("range_weapon_damage", p.range_weapon_damage, a.range_weapon_damage),
        ("range_weapon_ap", p.range_weapon_ap, a.range_weapon_ap),
        ("melee_hit_chance", p.melee_hit_chance, a.melee_hit_chance),
        (
            "effective_melee_hit_chance",
            p.effective_melee_hit_chance,
            a.effective_melee_hit_chance,
        ),
        (
            "effective_defence_chance",
            p.effective_defence_chance,
            a.effective_defence_chance,
        ),
        ("expected_melee_damage", p.expected_melee_damage, a.expected_melee_damage),
        ("expected_melee_defence", p.expected_melee_defence, a.expected_melee_defence),
        ("melee_combat_score", p.melee_combat_score, a.melee_combat_score),
        (
            "effective_range_hit_chance",
            p.effective_range_hit_chance,
            a.effective_range_hit_chance,
        ),
        ("expected_range_damage", p.expected_range_damage, a.expected_range_damage),
        ("expected_range_defence", p.expected_range_defence, a.expected_range_defence),
        ("range_combat_score", p.range_combat_score, a.range_combat_score),
    ]
}

/// Write a comparison as CSV (stat,player,ai) for spreadsheet diffing.
pub fn write_comparison_csv<W: Write>(writer: W, comparison: &Comparison) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["stat", "player", "ai"])?;
    out.write_record([
        "onscreen_name",
        comparison.player_unit.onscreen_name.as_str(),
        comparison.ai_unit.onscreen_name.as_str(),
    ])?;
    for (stat, player, ai) in comparison_rows(comparison) {
        out.write_record(&[stat.to_string(), player.to_string(), ai.to_string()])?;
    }
    out.flush()?;
    Ok(())
}
