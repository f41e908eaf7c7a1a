use crate::server::api;
use crate::server::static_files;
use crate::server::ServerContext;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn ok_text(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "text/plain; charset=utf-8",
        body,
    }
}

fn api_result(result: Result<String, api::ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(api::ApiError::BadRequest(message)) => error_response(400, "Bad Request", &message),
        Err(api::ApiError::NotFound(message)) => error_response(404, "Not Found", &message),
        Err(api::ApiError::Json(err)) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

pub fn route_request(ctx: &ServerContext, method: &str, path: &str, body: &str) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(method, path) {
        return response;
    }

    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => api_result(api::health_payload()),
        ("GET", "/api/status") => api_result(api::status_payload(ctx)),
        ("GET", "/api/campaigns") => api_result(api::campaigns_payload(ctx)),
        ("GET", "/api/factions") => api_result(api::factions_payload(ctx, path)),
        ("GET", "/api/units") => api_result(api::units_payload(ctx, path)),
        ("GET", route) if route.starts_with("/api/unit/") => {
            let unit_id = route.trim_start_matches("/api/unit/");
            api_result(api::unit_payload(ctx, unit_id))
        }
        ("GET", route) if route.starts_with("/api/report/") => {
            let unit_id = route.trim_start_matches("/api/report/");
            match api::report_text(ctx, unit_id) {
                Ok(text) => ok_text(text),
                Err(err) => api_result(Err(err)),
            }
        }
        ("GET", "/api/selection") => api_result(api::selection_get_payload(ctx)),
        ("PUT", "/api/selection") => api_result(api::selection_put_payload(ctx, body)),
        ("GET", "/api/compare") => api_result(api::compare_payload(ctx, path)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Unitscope</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 980px; margin: 24px auto; padding: 0 12px; }
    .row { display: flex; gap: 16px; flex-wrap: wrap; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; flex: 1; min-width: 280px; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    select { width: 100%; padding: 6px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 120px; }
  </style>
</head>
<body>
  <h1>Unitscope</h1>
  <p>Pick a campaign, then a faction and unit per side.</p>

  <div class="card">
    <label for="campaign">Campaign</label>
    <select id="campaign"></select>
  </div>

  <div class="row">
    <div class="card">
      <strong>Player</strong>
      <label for="player-faction">Faction</label>
      <select id="player-faction"></select>
      <label for="player-unit">Unit</label>
      <select id="player-unit"></select>
      <pre id="player-sheet">No unit selected.</pre>
    </div>
    <div class="card">
      <strong>AI</strong>
      <label for="ai-faction">Faction</label>
      <select id="ai-faction"></select>
      <label for="ai-unit">Unit</label>
      <select id="ai-unit"></select>
      <pre id="ai-sheet">No unit selected.</pre>
    </div>
  </div>

  <div class="card">
    <strong>Comparison</strong>
    <pre id="comparison">Select a unit on both sides.</pre>
  </div>

  <script>
    const el = id => document.getElementById(id);

    function fill(select, items, value, label) {
      select.innerHTML = '<option value="">--</option>' + items.map(i =>
        '<option value="' + i[value] + '">' + (i[label] || i[value]) + '</option>').join('');
    }

    async function getJson(path) {
      const r = await fetch(path);
      if (!r.ok) throw new Error('HTTP ' + r.status);
      return r.json();
    }

    async function loadCampaigns() {
      const data = await getJson('/api/campaigns');
      fill(el('campaign'), data.campaigns, 'campaign_id', 'onscreen_name');
    }

    async function onCampaignChange() {
      const data = await getJson('/api/factions?campaign=' + encodeURIComponent(el('campaign').value));
      fill(el('player-faction'), data.factions, 'faction_id', 'text');
      fill(el('ai-faction'), data.factions, 'faction_id', 'text');
    }

    async function onFactionChange(side) {
      const faction = el(side + '-faction').value;
      const data = await getJson('/api/units?faction=' + encodeURIComponent(faction));
      fill(el(side + '-unit'), data.units, 'unit_id', 'onscreen_name');
    }

    async function onUnitChange(side) {
      const unit = el(side + '-unit').value;
      if (!unit) return;
      el(side + '-sheet').textContent = await (await fetch('/api/report/' + encodeURIComponent(unit))).text();
      const player = el('player-unit').value, ai = el('ai-unit').value;
      if (player && ai) {
        const data = await getJson('/api/compare?player=' + encodeURIComponent(player) + '&ai=' + encodeURIComponent(ai));
        el('comparison').textContent = JSON.stringify(data, null, 2);
      }
    }

    el('campaign').addEventListener('change', onCampaignChange);
    ['player', 'ai'].forEach(side => {
      el(side + '-faction').addEventListener('change', () => onFactionChange(side));
      el(side + '-unit').addEventListener('change', () => onUnitChange(side));
    });
    loadCampaigns();
  </script>
</body>
</html>
"#
    .to_string()
}
