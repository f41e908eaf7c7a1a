//! JSON payload builders for the HTTP API. Each function returns the body
//! string; routes.rs maps errors onto status codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compare::compare;
use crate::data::record::Record;
use crate::report;
use crate::server::ServerContext;
use crate::session::Selection;

#[derive(Debug)]
pub enum ApiError {
    Json(serde_json::Error),
    BadRequest(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::NotFound(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Json(err)
    }
}

/// First value of a query parameter, bare `path?a=1&b=2` splitting. Ids in
/// the dataset are plain ASCII so no percent-decoding is needed.
fn query_param(path: &str, name: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

pub fn health_payload() -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "unitscope-api",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

pub fn status_payload(ctx: &ServerContext) -> Result<String, ApiError> {
    let db = &ctx.database;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "loaded_at": db.loaded_at().to_rfc3339(),
        "tables": db.table_counts(),
    }))?)
}

/// Campaigns sorted numerically by campaign_order for display; the store
/// itself keeps file order.
pub fn campaigns_payload(ctx: &ServerContext) -> Result<String, ApiError> {
    let mut campaigns: Vec<&Record> = ctx.database.campaigns().iter().collect();
    campaigns.sort_by(|a, b| {
        a.number("campaign_order")
            .partial_cmp(&b.number("campaign_order"))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "campaigns": campaigns
    }))?)
}

pub fn factions_payload(ctx: &ServerContext, path: &str) -> Result<String, ApiError> {
    let campaign_id = query_param(path, "campaign").unwrap_or_default();
    let factions = ctx.database.factions_for_campaign(&campaign_id);
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "campaign_id": campaign_id,
        "factions": factions,
    }))?)
}

#[derive(Debug, Clone, Serialize)]
struct UnitListItem {
    unit_id: String,
    onscreen_name: String,
}

pub fn units_payload(ctx: &ServerContext, path: &str) -> Result<String, ApiError> {
    let faction_id = query_param(path, "faction").unwrap_or_default();
    let units: Vec<UnitListItem> = ctx
        .database
        .units_for_faction(&faction_id)
        .into_iter()
        .filter_map(|join_row| join_row.get("unit_id"))
        .map(|unit_id| UnitListItem {
            unit_id: unit_id.to_string(),
            onscreen_name: ctx
                .database
                .unit(unit_id)
                .and_then(|unit| unit.get("onscreen_name").map(str::to_string))
                .unwrap_or_else(|| unit_id.to_string()),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "faction_id": faction_id,
        "units": units,
    }))?)
}

pub fn unit_payload(ctx: &ServerContext, unit_id: &str) -> Result<String, ApiError> {
    let bundle = ctx
        .database
        .unit_bundle(unit_id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown unit '{unit_id}'")))?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "unit_id": unit_id,
        "bundle": bundle,
        "report": report::format_unit(&bundle),
    }))?)
}

/// Plain-text unit sheet for terminal-style frontends.
pub fn report_text(ctx: &ServerContext, unit_id: &str) -> Result<String, ApiError> {
    let bundle = ctx
        .database
        .unit_bundle(unit_id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown unit '{unit_id}'")))?;
    Ok(report::format_unit(&bundle))
}

pub fn selection_get_payload(ctx: &ServerContext) -> Result<String, ApiError> {
    let selection = ctx
        .selection
        .lock()
        .map_err(|err| ApiError::BadRequest(format!("selection lock poisoned: {err}")))?;
    Ok(serde_json::to_string_pretty(&*selection)?)
}

/// Partial selection update. Unknown members are rejected so typos do not
/// silently no-op. Campaign changes clear downstream choices, faction
/// changes clear that side's unit, matching the UI flow.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SelectionUpdate {
    campaign: Option<String>,
    player_faction: Option<String>,
    ai_faction: Option<String>,
    player_unit: Option<String>,
    ai_unit: Option<String>,
}

pub fn selection_put_payload(ctx: &ServerContext, body: &str) -> Result<String, ApiError> {
    let update: SelectionUpdate = serde_json::from_str(body)
        .map_err(|err| ApiError::BadRequest(format!("invalid selection body: {err}")))?;

    let mut selection = ctx
        .selection
        .lock()
        .map_err(|err| ApiError::BadRequest(format!("selection lock poisoned: {err}")))?;

    if let Some(campaign) = update.campaign {
        selection.set_campaign(campaign);
    }
    if let Some(faction) = update.player_faction {
        selection.set_faction(crate::session::Side::Player, faction);
    }
    if let Some(faction) = update.ai_faction {
        selection.set_faction(crate::session::Side::Ai, faction);
    }
    if let Some(unit) = update.player_unit {
        selection.set_unit(crate::session::Side::Player, unit);
    }
    if let Some(unit) = update.ai_unit {
        selection.set_unit(crate::session::Side::Ai, unit);
    }

    Ok(serde_json::to_string_pretty(&*selection)?)
}

fn snapshot_selection(ctx: &ServerContext) -> Result<Selection, ApiError> {
    ctx.selection
        .lock()
        .map(|guard| guard.clone())
        .map_err(|err| ApiError::BadRequest(format!("selection lock poisoned: {err}")))
}

/// Compare two units by id: explicit `player`/`ai` query params first, the
/// stored selection as fallback. 400 when a side names no unit at all.
pub fn compare_payload(ctx: &ServerContext, path: &str) -> Result<String, ApiError> {
    let selection = snapshot_selection(ctx)?;
    let player_id =
        query_param(path, "player").unwrap_or_else(|| selection.player_unit.clone());
    let ai_id = query_param(path, "ai").unwrap_or_else(|| selection.ai_unit.clone());

    if player_id.is_empty() || ai_id.is_empty() {
        return Err(ApiError::BadRequest(
            "both 'player' and 'ai' units must be selected or passed as query params".to_string(),
        ));
    }

    let player = ctx
        .database
        .unit_bundle(&player_id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown unit '{player_id}'")))?;
    let ai = ctx
        .database
        .unit_bundle(&ai_id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown unit '{ai_id}'")))?;

    let comparison = compare(&player, &ai);
    Ok(serde_json::to_string_pretty(&comparison)?)
}
