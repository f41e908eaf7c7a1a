//! Referential checks over a loaded database. The store itself tolerates
//! dangling foreign keys (misses degrade to "N/A"); this pass makes them
//! visible so a refreshed export can be fixed before it ships.

use std::fmt;

use crate::data::store::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Walk every foreign key the store chases and report dangling references.
/// Empty core tables are errors; dangling equipment ids are warnings since
/// the comparison pipeline degrades them to zeroed stats.
pub fn validate_database(db: &Database) -> ValidationReport {
    let mut report = ValidationReport::default();

    for count in db.table_counts() {
        let is_core = matches!(count.table, "campaigns" | "factions" | "all_units");
        if count.rows == 0 && is_core {
            report.push(ValidationSeverity::Error, count.table, "table has no rows");
        }
    }

    for campaign in db.campaigns() {
        let campaign_id = campaign.get("campaign_id").unwrap_or("");
        if db.factions_for_campaign(campaign_id).is_empty() {
            report.push(
                ValidationSeverity::Warning,
                format!("campaign '{campaign_id}'"),
                "no factions reference this campaign",
            );
        }
    }

    validate_factions(&mut report, db);
    validate_units(&mut report, db);

    report
}

fn validate_factions(report: &mut ValidationReport, db: &Database) {
    for campaign in db.campaigns() {
        let campaign_id = campaign.get("campaign_id").unwrap_or("");
        for faction in db.factions_for_campaign(campaign_id) {
            let faction_id = faction.get("faction_id").unwrap_or("");
            if db.units_for_faction(faction_id).is_empty() {
                report.push(
                    ValidationSeverity::Warning,
                    format!("faction '{faction_id}'"),
                    "no land units resolve through its military group",
                );
            }
        }
    }
}

fn validate_units(report: &mut ValidationReport, db: &Database) {
    let mut unit_ids: Vec<String> = Vec::new();
    for campaign in db.campaigns() {
        let campaign_id = campaign.get("campaign_id").unwrap_or("");
        for faction in db.factions_for_campaign(campaign_id) {
            let faction_id = faction.get("faction_id").unwrap_or("");
            for join_row in db.units_for_faction(faction_id) {
                if let Some(unit_id) = join_row.get("unit_id") {
                    unit_ids.push(unit_id.to_string());
                }
            }
        }
    }
    unit_ids.sort();
    unit_ids.dedup();

    for unit_id in &unit_ids {
        let Some(bundle) = db.unit_bundle(unit_id) else {
            report.push(
                ValidationSeverity::Warning,
                format!("unit '{unit_id}'"),
                "military group references a unit missing from all_units",
            );
            continue;
        };

        let equipment = [
            ("armour_id", bundle.armour.is_some(), "armour"),
            ("shield_id", bundle.shield.is_some(), "shield"),
            ("melee_weapon_id", bundle.melee_weapon.is_some(), "melee weapon"),
            ("range_weapon_id", bundle.range_weapon.is_some(), "range weapon"),
        ];
        for (field, resolved, label) in equipment {
            let id = bundle.unit.get(field).unwrap_or("");
            if !id.is_empty() && !resolved {
                report.push(
                    ValidationSeverity::Warning,
                    format!("unit '{unit_id}'"),
                    format!("{label} '{id}' does not resolve"),
                );
            }
        }

        if let Some(weapon) = &bundle.range_weapon {
            let projectile_id = weapon.get("projectile_id").unwrap_or("");
            if !projectile_id.is_empty() && bundle.projectile.is_none() {
                report.push(
                    ValidationSeverity::Warning,
                    format!("unit '{unit_id}'"),
                    format!("projectile '{projectile_id}' does not resolve"),
                );
            }
        }
    }
}
