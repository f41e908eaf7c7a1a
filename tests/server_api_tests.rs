mod common;

use std::path::PathBuf;

use unitscope::data::store::Store;
use unitscope::server::routes::route_request;
use unitscope::server::ServerContext;

async fn fixture_context(name: &str) -> (ServerContext, PathBuf) {
    let dir = common::write_fixture_dataset(name);
    let store = Store::with_data_dir(&dir);
    let database = store.load().await.expect("fixture dataset should load");
    (ServerContext::new(database), dir)
}

fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response body should be JSON")
}

#[tokio::test]
async fn health_and_status_report_ok() {
    let (ctx, dir) = fixture_context("api-health").await;

    let health = route_request(&ctx, "GET", "/api/health", "");
    assert_eq!(health.status_code, 200);
    assert_eq!(health.content_type, "application/json");
    let payload = json_body(&health.body);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["service"], "unitscope-api");

    let status = route_request(&ctx, "GET", "/api/status", "");
    assert_eq!(status.status_code, 200);
    let payload = json_body(&status.body);
    assert!(payload["loaded_at"].is_string());
    assert_eq!(payload["tables"].as_array().map(Vec::len), Some(10));

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn campaigns_are_sorted_by_campaign_order() {
    let (ctx, dir) = fixture_context("api-campaigns").await;

    let response = route_request(&ctx, "GET", "/api/campaigns", "");
    assert_eq!(response.status_code, 200);
    let payload = json_body(&response.body);
    let ids: Vec<&str> = payload["campaigns"]
        .as_array()
        .expect("campaigns array")
        .iter()
        .map(|c| c["campaign_id"].as_str().unwrap())
        .collect();
    // File order is main_rome first; campaign_order says otherwise.
    assert_eq!(ids, ["gaul_invasion", "main_rome"]);

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn faction_and_unit_listings_filter_by_query_param() {
    let (ctx, dir) = fixture_context("api-listings").await;

    let factions = route_request(&ctx, "GET", "/api/factions?campaign=main_rome", "");
    let payload = json_body(&factions.body);
    let ids: Vec<&str> = payload["factions"]
        .as_array()
        .expect("factions array")
        .iter()
        .map(|f| f["faction_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["rome", "carthage"]);

    // No campaign selected means no factions, not an error.
    let empty = route_request(&ctx, "GET", "/api/factions", "");
    assert_eq!(empty.status_code, 200);
    assert!(json_body(&empty.body)["factions"]
        .as_array()
        .expect("factions array")
        .is_empty());

    let units = route_request(&ctx, "GET", "/api/units?faction=rome", "");
    let payload = json_body(&units.body);
    let ids: Vec<&str> = payload["units"]
        .as_array()
        .expect("units array")
        .iter()
        .map(|u| u["unit_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["hastati", "velites"], "naval trireme must not be listed");

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn unit_detail_and_report_routes() {
    let (ctx, dir) = fixture_context("api-unit").await;

    let response = route_request(&ctx, "GET", "/api/unit/velites", "");
    assert_eq!(response.status_code, 200);
    let payload = json_body(&response.body);
    assert_eq!(payload["unit_id"], "velites");
    assert_eq!(payload["bundle"]["unit"]["onscreen_name"], "Velites");
    assert_eq!(payload["bundle"]["projectile"]["damage"], "20");
    assert!(payload["report"]
        .as_str()
        .expect("report text")
        .contains("MISSILE WEAPON"));

    let report = route_request(&ctx, "GET", "/api/report/hastati", "");
    assert_eq!(report.status_code, 200);
    assert_eq!(report.content_type, "text/plain; charset=utf-8");
    assert!(report.body.contains("BASIC STATS"));

    let missing = route_request(&ctx, "GET", "/api/unit/no_such_unit", "");
    assert_eq!(missing.status_code, 404);
    assert!(missing.body.contains("no_such_unit"));

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn selection_round_trips_and_clears_downstream_on_campaign_change() {
    let (ctx, dir) = fixture_context("api-selection").await;

    let put = route_request(
        &ctx,
        "PUT",
        "/api/selection",
        r#"{"campaign":"main_rome","player_faction":"rome","player_unit":"hastati"}"#,
    );
    assert_eq!(put.status_code, 200);
    let payload = json_body(&put.body);
    assert_eq!(payload["campaign"], "main_rome");
    assert_eq!(payload["player_unit"], "hastati");

    let get = route_request(&ctx, "GET", "/api/selection", "");
    assert_eq!(json_body(&get.body)["player_faction"], "rome");

    // A fresh campaign choice wipes factions and units.
    let switched = route_request(
        &ctx,
        "PUT",
        "/api/selection",
        r#"{"campaign":"gaul_invasion"}"#,
    );
    let payload = json_body(&switched.body);
    assert_eq!(payload["campaign"], "gaul_invasion");
    assert_eq!(payload["player_faction"], "");
    assert_eq!(payload["player_unit"], "");

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn selection_rejects_unknown_members() {
    let (ctx, dir) = fixture_context("api-selection-bad").await;

    let response = route_request(&ctx, "PUT", "/api/selection", r#"{"campain":"main_rome"}"#);
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("invalid selection body"));

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn compare_accepts_query_params_and_falls_back_to_selection() {
    let (ctx, dir) = fixture_context("api-compare").await;

    let explicit = route_request(
        &ctx,
        "GET",
        "/api/compare?player=hastati&ai=gallic_swordsmen",
        "",
    );
    assert_eq!(explicit.status_code, 200);
    let payload = json_body(&explicit.body);
    assert_eq!(payload["playerUnit"]["onscreen_name"], "Hastati");
    assert_eq!(payload["aiUnit"]["onscreen_name"], "Gallic Swordsmen");

    // Nothing selected and no params: the request is underspecified.
    let unselected = route_request(&ctx, "GET", "/api/compare", "");
    assert_eq!(unselected.status_code, 400);

    route_request(
        &ctx,
        "PUT",
        "/api/selection",
        r#"{"player_unit":"velites","ai_unit":"libyan_spearmen"}"#,
    );
    let fallback = route_request(&ctx, "GET", "/api/compare", "");
    assert_eq!(fallback.status_code, 200);
    let payload = json_body(&fallback.body);
    assert_eq!(payload["playerUnit"]["onscreen_name"], "Velites");
    assert_eq!(payload["aiUnit"]["onscreen_name"], "Libyan Spearmen");

    let unknown = route_request(&ctx, "GET", "/api/compare?player=hastati&ai=ghost", "");
    assert_eq!(unknown.status_code, 404);

    common::remove_fixture_dataset(&dir);
}

#[tokio::test]
async fn unknown_routes_and_methods_fall_through_to_404() {
    let (ctx, dir) = fixture_context("api-404").await;

    assert_eq!(route_request(&ctx, "GET", "/api/nope", "").status_code, 404);
    assert_eq!(route_request(&ctx, "POST", "/api/campaigns", "").status_code, 404);

    let index = route_request(&ctx, "GET", "/", "");
    assert_eq!(index.status_code, 200);
    assert!(index.body.contains("Unitscope"));

    common::remove_fixture_dataset(&dir);
}
