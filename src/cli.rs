use std::env;
use std::io;
use std::sync::Arc;

use crate::compare::compare;
use crate::data::store::{Database, Store};
use crate::data::validate::validate_database;
use crate::report;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Campaigns,
    Factions,
    Units,
    Show,
    Compare,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("campaigns") => Some(Command::Campaigns),
        Some("factions") => Some(Command::Factions),
        Some("units") => Some(Command::Units),
        Some("show") => Some(Command::Show),
        Some("compare") => Some(Command::Compare),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Campaigns) => handle_campaigns(),
        Some(Command::Factions) => handle_factions(args),
        Some(Command::Units) => handle_units(args),
        Some(Command::Show) => handle_show(args),
        Some(Command::Compare) => handle_compare(args),
        Some(Command::Validate) => handle_validate(),
        None => {
            eprintln!("usage: unitscope <serve|campaigns|factions|units|show|compare|validate>");
            2
        }
    }
}

/// One-shot load for the data-driven commands. The server keeps its own
/// long-lived copy; CLI invocations load, answer, and exit.
fn load_database() -> Result<Arc<Database>, String> {
    let store = Store::new();
    let runtime = tokio::runtime::Runtime::new().map_err(|err| err.to_string())?;
    runtime
        .block_on(store.load())
        .map_err(|err| format!("load failed ({}): {err}", store.data_dir().display()))
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("UNITSCOPE_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_campaigns() -> i32 {
    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let mut campaigns: Vec<_> = database.campaigns().iter().collect();
    campaigns.sort_by(|a, b| {
        a.number("campaign_order")
            .partial_cmp(&b.number("campaign_order"))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for campaign in campaigns {
        println!(
            "{}\t{}",
            campaign.get("campaign_id").unwrap_or(""),
            campaign.get("onscreen_name").unwrap_or("")
        );
    }
    0
}

fn handle_factions(args: &[String]) -> i32 {
    let Some(campaign_id) = args.get(2) else {
        eprintln!("usage: unitscope factions <campaign_id>");
        return 2;
    };

    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    for faction in database.factions_for_campaign(campaign_id) {
        println!(
            "{}\t{}",
            faction.get("faction_id").unwrap_or(""),
            faction.get("text").unwrap_or("")
        );
    }
    0
}

fn handle_units(args: &[String]) -> i32 {
    let Some(faction_id) = args.get(2) else {
        eprintln!("usage: unitscope units <faction_id>");
        return 2;
    };

    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    for join_row in database.units_for_faction(faction_id) {
        let Some(unit_id) = join_row.get("unit_id") else {
            continue;
        };
        let name = database
            .unit(unit_id)
            .and_then(|unit| unit.get("onscreen_name").map(str::to_string))
            .unwrap_or_default();
        println!("{unit_id}\t{name}");
    }
    0
}

fn handle_show(args: &[String]) -> i32 {
    let Some(unit_id) = args.get(2) else {
        eprintln!("usage: unitscope show <unit_id>");
        return 2;
    };

    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    match database.unit_bundle(unit_id) {
        Some(bundle) => {
            println!("{}", report::format_unit(&bundle));
            0
        }
        None => {
            eprintln!("unknown unit '{unit_id}'");
            1
        }
    }
}

fn handle_compare(args: &[String]) -> i32 {
    let (Some(player_id), Some(ai_id)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: unitscope compare <player_unit_id> <ai_unit_id> [--csv]");
        return 2;
    };
    let as_csv = args.iter().any(|arg| arg == "--csv");

    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let Some(player) = database.unit_bundle(player_id) else {
        eprintln!("unknown unit '{player_id}'");
        return 1;
    };
    let Some(ai) = database.unit_bundle(ai_id) else {
        eprintln!("unknown unit '{ai_id}'");
        return 1;
    };

    let comparison = compare(&player, &ai);
    if as_csv {
        if let Err(err) = report::write_comparison_csv(io::stdout(), &comparison) {
            eprintln!("failed to write comparison csv: {err}");
            return 1;
        }
        return 0;
    }

    for line in report::comparison_lines(&player, &ai) {
        println!("{line}");
    }
    println!();
    match serde_json::to_string_pretty(&comparison) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize comparison: {err}");
            1
        }
    }
}

fn handle_validate() -> i32 {
    let database = match load_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let validation = validate_database(&database);
    if validation.is_clean() {
        println!("validation passed: {}", database.summary());
        return 0;
    }

    for diagnostic in &validation.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if validation.has_errors() {
        eprintln!("validation failed: {} issue(s)", validation.diagnostics.len());
        1
    } else {
        println!(
            "validation passed with {} warning(s)",
            validation.diagnostics.len()
        );
        0
    }
}
