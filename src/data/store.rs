//! CSV-backed store: loads the ten game tables once, concurrently, then
//! serves the domain lookups and joins (campaign -> faction -> unit chain,
//! unit -> equipment foreign keys). Read-only after load.

use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::data::csv::parse_csv;
use crate::data::record::Record;
use crate::data::table::Table;

pub const DEFAULT_DATA_DIR: &str = "data/csv";

/// One configured table source: file name under the data dir plus the field
/// the table is indexed by.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub file: &'static str,
    pub key_field: &'static str,
}

pub const TABLE_SPECS: [TableSpec; 10] = [
    TableSpec { name: "campaigns", file: "campaigns.csv", key_field: "campaign_id" },
    TableSpec { name: "factions", file: "factions.csv", key_field: "faction_id" },
    TableSpec { name: "all_units", file: "all_units.csv", key_field: "unit_id" },
    TableSpec { name: "land_units", file: "land_units.csv", key_field: "land_unit_id" },
    TableSpec { name: "melee_weapon", file: "melee_weapon.csv", key_field: "weapon_id" },
    TableSpec { name: "range_weapon", file: "range_weapon.csv", key_field: "weapon_id" },
    TableSpec { name: "projectile", file: "projectile.csv", key_field: "projectile_id" },
    TableSpec { name: "armour", file: "armour.csv", key_field: "armour_id" },
    TableSpec { name: "shield", file: "shield.csv", key_field: "shield_id" },
    TableSpec { name: "military_groups", file: "military_groups.csv", key_field: "military_group_id" },
];

/// A table source failed to read or parse. Any one failure leaves the store
/// unready; per-record misses are never errors (see Database lookups).
#[derive(Debug)]
pub enum LoadError {
    Read { table: &'static str, source: io::Error },
    Parse { table: &'static str, reason: String },
    Join { table: &'static str },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { table, source } => write!(f, "failed to read table '{table}': {source}"),
            Self::Parse { table, reason } => write!(f, "failed to parse table '{table}': {reason}"),
            Self::Join { table } => write!(f, "load task for table '{table}' was aborted"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Composite read-only view of one unit and its equipment. Assembled on
/// demand, never stored. Every piece except the unit itself may be absent
/// and downstream formatting renders absences as "N/A".
#[derive(Debug, Clone, Serialize)]
pub struct UnitBundle {
    pub unit: Record,
    pub armour: Option<Record>,
    pub shield: Option<Record>,
    pub melee_weapon: Option<Record>,
    pub range_weapon: Option<Record>,
    /// Resolved through the range weapon; no projectile without one.
    pub projectile: Option<Record>,
}

/// Per-table row count for the status report.
#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

/// All ten tables plus the domain queries over them. Immutable once built;
/// shared via Arc across the server handlers.
#[derive(Debug)]
pub struct Database {
    campaigns: Table,
    factions: Table,
    all_units: Table,
    land_units: Table,
    melee_weapons: Table,
    range_weapons: Table,
    projectiles: Table,
    armours: Table,
    shields: Table,
    military_groups: Table,
    loaded_at: DateTime<Utc>,
}

impl Database {
    /// All campaign rows in file order. Presentation layers sort by
    /// campaign_order; the store itself preserves the source order.
    pub fn campaigns(&self) -> &[Record] {
        self.campaigns.all()
    }

    /// Faction rows whose campaign_id matches, in file order. Empty or
    /// unknown campaign ids yield an empty list.
    pub fn factions_for_campaign(&self, campaign_id: &str) -> Vec<&Record> {
        if campaign_id.is_empty() {
            return Vec::new();
        }
        self.factions
            .all()
            .iter()
            .filter(|faction| faction.get("campaign_id") == Some(campaign_id))
            .collect()
    }

    /// Military-group join rows for a faction, filtered to land units
    /// (is_naval == "0"); naval rosters are out of scope. Unknown faction
    /// ids degrade to an empty list rather than faulting.
    pub fn units_for_faction(&self, faction_id: &str) -> Vec<&Record> {
        let Some(faction) = self.factions.first(faction_id) else {
            return Vec::new();
        };
        let Some(military_group_id) = faction.get("military_group_id") else {
            return Vec::new();
        };

        self.military_groups
            .lookup(military_group_id)
            .into_iter()
            .filter(|join_row| {
                join_row
                    .get("unit_id")
                    .and_then(|unit_id| self.unit(unit_id))
                    .is_some_and(|unit| unit.get("is_naval") == Some("0"))
            })
            .collect()
    }

    /// Composite unit record: the land-unit row overlaid with is_naval,
    /// upkeep_cost and recruitment_cost from the all-units row (all-units
    /// wins on collision). An unresolved land_unit_id degrades to the
    /// overlay fields alone; absent optional fields read as "N/A" downstream.
    pub fn unit(&self, unit_id: &str) -> Option<Record> {
        let all_units_row = self.all_units.first(unit_id)?;
        let land_unit = all_units_row
            .get("land_unit_id")
            .and_then(|land_unit_id| self.land_units.first(land_unit_id))
            .cloned()
            .unwrap_or_default();

        let overlay = Record::from_pairs(
            ["is_naval", "upkeep_cost", "recruitment_cost"]
                .into_iter()
                .filter_map(|field| all_units_row.get(field).map(|value| (field, value))),
        );
        Some(land_unit.merged(&overlay))
    }

    pub fn armour(&self, armour_id: &str) -> Option<&Record> {
        self.armours.first(armour_id)
    }

    pub fn shield(&self, shield_id: &str) -> Option<&Record> {
        self.shields.first(shield_id)
    }

    pub fn melee_weapon(&self, weapon_id: &str) -> Option<&Record> {
        self.melee_weapons.first(weapon_id)
    }

    pub fn range_weapon(&self, weapon_id: &str) -> Option<&Record> {
        self.range_weapons.first(weapon_id)
    }

    pub fn projectile(&self, projectile_id: &str) -> Option<&Record> {
        self.projectiles.first(projectile_id)
    }

    /// Assemble the composite bundle for one unit: unit record plus armour,
    /// shield, melee weapon, range weapon, and (only through a resolved
    /// range weapon) its projectile.
    pub fn unit_bundle(&self, unit_id: &str) -> Option<UnitBundle> {
        let unit = self.unit(unit_id)?;

        let armour = unit.get("armour_id").and_then(|id| self.armour(id)).cloned();
        let shield = unit.get("shield_id").and_then(|id| self.shield(id)).cloned();
        let melee_weapon = unit
            .get("melee_weapon_id")
            .and_then(|id| self.melee_weapon(id))
            .cloned();
        let range_weapon = unit
            .get("range_weapon_id")
            .and_then(|id| self.range_weapon(id))
            .cloned();
        let projectile = range_weapon
            .as_ref()
            .and_then(|weapon| weapon.get("projectile_id"))
            .and_then(|id| self.projectile(id).cloned());

        Some(UnitBundle {
            unit,
            armour,
            shield,
            melee_weapon,
            range_weapon,
            projectile,
        })
    }

    /// Row counts per table, in TABLE_SPECS order.
    pub fn table_counts(&self) -> Vec<TableCount> {
        [
            ("campaigns", &self.campaigns),
            ("factions", &self.factions),
            ("all_units", &self.all_units),
            ("land_units", &self.land_units),
            ("melee_weapon", &self.melee_weapons),
            ("range_weapon", &self.range_weapons),
            ("projectile", &self.projectiles),
            ("armour", &self.armours),
            ("shield", &self.shields),
            ("military_groups", &self.military_groups),
        ]
        .into_iter()
        .map(|(table, t)| TableCount { table, rows: t.len() })
        .collect()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// One-line load summary for startup logging.
    pub fn summary(&self) -> String {
        let counts: Vec<String> = self
            .table_counts()
            .into_iter()
            .map(|c| format!("{}={}", c.table, c.rows))
            .collect();
        format!("loaded {} tables: {}", counts.len(), counts.join(" "))
    }
}

/// Owns the data directory and the single-assignment load cell. The first
/// `load` call starts the concurrent fetch of all table sources; concurrent
/// callers await the same in-flight initialization, and later callers get
/// the same shared Database back (at-most-once load).
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    database: OnceCell<Arc<Database>>,
}

impl Store {
    /// Store over the configured data directory: UNITSCOPE_DATA_DIR when
    /// set, `data/csv` otherwise.
    pub fn new() -> Self {
        let dir = env::var("UNITSCOPE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Store::with_data_dir(dir)
    }

    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Store {
            data_dir: dir.into(),
            database: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load every table concurrently and cache the result. A failure is
    /// surfaced and leaves the cell unset, so a later call may retry; a
    /// success is permanent for the process lifetime.
    pub async fn load(&self) -> Result<Arc<Database>, LoadError> {
        self.database
            .get_or_try_init(|| async { load_database(&self.data_dir).await.map(Arc::new) })
            .await
            .cloned()
    }

    /// The loaded database, None while no load has completed successfully.
    pub fn database(&self) -> Option<Arc<Database>> {
        self.database.get().cloned()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

async fn load_table(path: PathBuf, spec: TableSpec) -> Result<Table, LoadError> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Read { table: spec.name, source })?;
    let records = parse_csv(&text).ok_or_else(|| LoadError::Parse {
        table: spec.name,
        reason: "missing header line".to_string(),
    })?;

    let mut table = Table::new(spec.key_field);
    for record in records {
        table.insert(record);
    }
    Ok(table)
}

/// Fan out one read task per table, fan in with try_join_all. Fails if any
/// source is unreachable or malformed; nothing is published until all ten
/// tables resolved, so callers never observe a half-loaded database.
async fn load_database(data_dir: &Path) -> Result<Database, LoadError> {
    let handles: Vec<_> = TABLE_SPECS
        .iter()
        .map(|&spec| {
            let path = data_dir.join(spec.file);
            tokio::spawn(async move { load_table(path, spec).await })
        })
        .collect();

    let joined = futures_util::future::try_join_all(handles)
        .await
        .map_err(|_| LoadError::Join { table: "unknown" })?;
    let tables = joined.into_iter().collect::<Result<Vec<_>, _>>()?;

    // try_join_all preserves TABLE_SPECS order.
    let tables: [Table; 10] = tables
        .try_into()
        .map_err(|_| LoadError::Join { table: "unknown" })?;
    let [campaigns, factions, all_units, land_units, melee_weapons, range_weapons, projectiles, armours, shields, military_groups] =
        tables;

    Ok(Database {
        campaigns,
        factions,
        all_units,
        land_units,
        melee_weapons,
        range_weapons,
        projectiles,
        armours,
        shields,
        military_groups,
        loaded_at: Utc::now(),
    })
}
