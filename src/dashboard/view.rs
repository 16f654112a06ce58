use serde::{Deserialize, Serialize};
use crate::config::DashboardConfig;
use crate::errors::ProspectorError;
use crate::models::{parse_status_filter, Lead, LeadStatus};
use super::format::{color_for, escape_html, format_phone_link, status_icon};

/// Dashboard controls as they travel in query strings and form posts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewState {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub radius: Option<u32>,
    /// Category the next scan will search for.
    pub category: Option<String>,
    pub status: Option<String>,
    /// Category filter applied to the listed leads.
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
    /// Posted by the note editor.
    pub note: Option<String>,
    /// Posted by the status buttons.
    pub new_status: Option<String>,
}

/// Cleared number inputs arrive as empty strings; treat them as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// View state with defaults applied and filters parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub category: String,
    pub status_filter: Option<LeadStatus>,
    pub type_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("success") => Self::Success,
            Some("warning") => Self::Warning,
            Some("error") => Self::Error,
            _ => Self::Info,
        }
    }
}

/// One-shot banner shown after a redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

impl ViewState {
    pub fn resolve(&self, config: &DashboardConfig) -> Result<ResolvedView, ProspectorError> {
        let category = self.category
            .clone()
            .filter(|c| config.categories.contains(c))
            .or_else(|| config.categories.first().cloned())
            .unwrap_or_default();

        let type_filter = self.type_filter
            .clone()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"));

        Ok(ResolvedView {
            lat: self.lat.unwrap_or(config.default_latitude),
            lng: self.lng.unwrap_or(config.default_longitude),
            radius: self.radius
                .unwrap_or(config.default_radius)
                .clamp(config.min_radius, config.max_radius),
            category,
            status_filter: parse_status_filter(self.status.as_deref())?,
            type_filter,
        })
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .map(|m| Notice::new(NoticeLevel::parse(self.level.as_deref()), m.clone()))
    }
}

impl ResolvedView {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.lat.to_string()),
            ("lng", self.lng.to_string()),
            ("radius", self.radius.to_string()),
            ("category", self.category.clone()),
            ("status", self.status_filter.map(|s| s.label().to_string()).unwrap_or_else(|| "All".into())),
            ("type", self.type_filter.clone().unwrap_or_else(|| "All".into())),
        ]
    }

    /// Dashboard URL that reproduces this view, optionally carrying a notice.
    pub fn location(&self, notice: Option<&Notice>) -> String {
        let mut pairs = self.query_pairs();
        if let Some(n) = notice {
            pairs.push(("notice", n.message.clone()));
            pairs.push(("level", n.level.as_str().to_string()));
        }

        match reqwest::Url::parse("http://dashboard/") {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
                format!("/?{}", url.query().unwrap_or_default())
            }
            Err(_) => "/".to_string(),
        }
    }

    fn hidden_inputs(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!(r#"<input type="hidden" name="{}" value="{}">"#, k, escape_html(&v)))
            .collect()
    }
}

/// Everything the page needs, gathered by the handler.
pub struct DashboardPage<'a> {
    pub config: &'a DashboardConfig,
    pub view: &'a ResolvedView,
    pub leads: &'a [Lead],
    pub counts: &'a [(LeadStatus, i64)],
    pub logo_available: bool,
    pub scan_enabled: bool,
    pub notice: Option<Notice>,
}

#[derive(Serialize)]
struct Marker {
    lat: f64,
    lng: f64,
    color: &'static str,
    popup: String,
    tooltip: String,
}

#[derive(Serialize)]
struct MapData<'a> {
    center: [f64; 2],
    logo: bool,
    brand: &'a str,
    markers: Vec<Marker>,
}

pub fn render_dashboard(page: &DashboardPage<'_>) -> Result<String, ProspectorError> {
    let config = page.config;
    let title = escape_html(&config.title);
    let brand = escape_html(&config.brand_name);

    let mut body = String::new();
    body.push_str(&render_sidebar(page));
    body.push_str(r#"<main>"#);
    body.push_str(&format!("<h1>🗺️ {}</h1>", title));

    if let Some(notice) = &page.notice {
        body.push_str(&format!(
            r#"<div class="notice {}">{}</div>"#,
            notice.level.as_str(),
            escape_html(&notice.message)
        ));
    }

    if page.leads.is_empty() {
        body.push_str(r#"<div class="notice info">No leads found matching your filters.</div>"#);
    } else {
        body.push_str(r#"<div id="map"></div>"#);
        body.push_str(&render_legend(page.counts));
        body.push_str(&format!("<h2>📋 Work Queue ({} leads)</h2>", page.leads.len()));
        for lead in page.leads {
            body.push_str(&render_lead_panel(lead, page.view));
        }
    }
    body.push_str("</main>");

    let map_script = if page.leads.is_empty() {
        String::new()
    } else {
        render_map_script(page)?
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{brand} CRM</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<style>{style}</style>
</head>
<body>
{body}
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
{map_script}
</body>
</html>"#,
        brand = brand,
        style = STYLE,
        body = body,
        map_script = map_script,
    ))
}

fn render_sidebar(page: &DashboardPage<'_>) -> String {
    let config = page.config;
    let view = page.view;
    let mut html = String::from("<aside>");

    if page.logo_available {
        html.push_str(&format!(r#"<img class="logo" src="/assets/logo" alt="{}">"#, escape_html(&config.brand_name)));
    } else {
        html.push_str(r#"<div class="notice warning">Tip: set dashboard.logo_path to show your logo</div>"#);
    }
    html.push_str("<hr><h2>🚜 Lead Harvester</h2>");
    html.push_str(r#"<form method="get" action="/">"#);
    html.push_str("<h3>📍 Search Center</h3>");
    html.push_str(&format!(
        r#"<label>Latitude <input type="number" step="0.0001" name="lat" value="{:.4}"></label>
<label>Longitude <input type="number" step="0.0001" name="lng" value="{:.4}"></label>
<p class="caption">Tip: Change these to move your search area.</p>"#,
        view.lat, view.lng
    ));

    html.push_str(r#"<label>Target Category <select name="category">"#);
    for category in &config.categories {
        html.push_str(&option(category, category, *category == view.category));
    }
    html.push_str("</select></label>");

    html.push_str(&format!(
        r#"<label>Scan Radius (meters) <input type="range" name="radius" min="{min}" max="{max}" step="100" value="{value}" oninput="this.nextElementSibling.textContent=this.value"><span>{value}</span></label>"#,
        min = config.min_radius,
        max = config.max_radius,
        value = view.radius,
    ));

    if page.scan_enabled {
        html.push_str(r#"<button type="submit" class="primary" formaction="/scan" formmethod="post">Run Scan</button>"#);
    } else {
        html.push_str(r#"<button type="button" class="primary" disabled>Run Scan</button><p class="caption">No Places API key configured.</p>"#);
    }

    html.push_str("<hr><p><strong>📊 View Filters</strong></p>");
    html.push_str(r#"<label>Status: <select name="status">"#);
    html.push_str(&option("All", "All", view.status_filter.is_none()));
    for status in LeadStatus::ALL {
        html.push_str(&option(status.label(), status.label(), view.status_filter == Some(status)));
    }
    html.push_str("</select></label>");

    html.push_str(r#"<label>Category: <select name="type">"#);
    html.push_str(&option("All", "All", view.type_filter.is_none()));
    for category in &config.categories {
        html.push_str(&option(category, category, view.type_filter.as_deref() == Some(category.as_str())));
    }
    html.push_str("</select></label>");
    html.push_str(r#"<button type="submit">Apply Filters</button></form></aside>"#);
    html
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn render_legend(counts: &[(LeadStatus, i64)]) -> String {
    let items: Vec<String> = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::Ignored,
        LeadStatus::Closed,
    ]
    .iter()
    .map(|status| {
        let count = counts.iter().find(|(s, _)| s == status).map(|(_, c)| *c).unwrap_or(0);
        format!(
            r#"<span style="color:{}">{}</span> {} ({})"#,
            color_for(*status),
            status_icon(*status),
            status.label(),
            count
        )
    })
    .collect();
    format!(r#"<p class="caption legend">📍 Center | {}</p><hr>"#, items.join(" | "))
}

fn render_lead_panel(lead: &Lead, view: &ResolvedView) -> String {
    let id = escape_html(&lead.place_id);
    let icon = if lead.status == LeadStatus::New { "🟢" } else { "🔵" };
    let keyword_tag = if lead.source_keyword.is_empty() {
        String::new()
    } else {
        format!("[{}]", escape_html(&lead.source_keyword))
    };

    let phone_html = match lead.phone.as_deref().and_then(|p| format_phone_link(p).map(|link| (p, link))) {
        Some((phone, link)) => format!(r#"<p>📞 <a href="{}">{}</a></p>"#, link, escape_html(phone)),
        None => r#"<p class="caption">No phone on file</p>"#.to_string(),
    };

    let hidden = view.hidden_inputs();
    let buttons: String = LeadStatus::TRANSITIONS
        .iter()
        .map(|status| {
            format!(
                r#"<form method="post" action="/leads/{id}/status">{hidden}<input type="hidden" name="new_status" value="{value}"><button type="submit">{label}</button></form>"#,
                id = id,
                hidden = hidden,
                value = status.as_str(),
                label = status.action_label(),
            )
        })
        .collect();

    format!(
        r#"<details class="lead"><summary>{icon} {name} {keyword_tag} <span class="status" style="color:{color}">{status}</span></summary>
<div class="columns"><div>
<p><strong>Address:</strong> {address}</p>
{phone_html}
<p class="caption">Rating: {rating:.1}</p>
<form method="post" action="/leads/{id}/note">{hidden}<label>Sales Notes<textarea name="note" rows="3">{notes}</textarea></label><button type="submit">Save Note</button></form>
</div><div>
<p><strong>Update Status:</strong></p>
<div class="buttons">{buttons}</div>
</div></div></details>"#,
        icon = icon,
        name = escape_html(&lead.name),
        keyword_tag = keyword_tag,
        color = color_for(lead.status),
        status = lead.status,
        address = escape_html(&lead.address),
        phone_html = phone_html,
        rating = lead.rating,
        id = id,
        hidden = hidden,
        notes = escape_html(lead.notes.as_deref().unwrap_or("")),
        buttons = buttons,
    )
}

fn render_map_script(page: &DashboardPage<'_>) -> Result<String, ProspectorError> {
    let markers = page.leads
        .iter()
        .map(|lead| Marker {
            lat: lead.latitude,
            lng: lead.longitude,
            color: color_for(lead.status),
            popup: format!("<b>{}</b><br>{}", escape_html(&lead.name), escape_html(&lead.source_keyword)),
            tooltip: format!("{} ({})", escape_html(&lead.name), lead.status),
        })
        .collect();

    let data = MapData {
        center: [page.view.lat, page.view.lng],
        logo: page.logo_available,
        brand: &page.config.brand_name,
        markers,
    };
    // JSON inside a script element must not be able to close it.
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");

    Ok(format!("<script>const MAP_DATA = {};\n{}</script>", json, MAP_SCRIPT))
}

const MAP_SCRIPT: &str = r#"
const map = L.map('map').setView(MAP_DATA.center, 14);
L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
  attribution: '&copy; OpenStreetMap contributors &copy; CARTO', maxZoom: 20
}).addTo(map);
function defaultCenter() {
  L.marker(MAP_DATA.center).bindPopup('📍 SEARCH CENTER').addTo(map);
}
if (MAP_DATA.logo) {
  const img = new Image();
  img.onload = () => {
    const icon = L.icon({ iconUrl: '/assets/logo', iconSize: [50, 50], iconAnchor: [25, 50], popupAnchor: [0, -50] });
    L.marker(MAP_DATA.center, { icon })
      .bindPopup('📍' + document.createTextNode(MAP_DATA.brand).textContent)
      .bindTooltip('Current Search Center')
      .addTo(map);
  };
  img.onerror = defaultCenter;
  img.src = '/assets/logo';
} else {
  defaultCenter();
}
for (const m of MAP_DATA.markers) {
  L.circleMarker([m.lat, m.lng], { radius: 8, color: m.color, fill: true, fillColor: m.color, fillOpacity: 0.7 })
    .bindPopup(m.popup, { maxWidth: 200 })
    .bindTooltip(m.tooltip)
    .addTo(map);
}
"#;

const STYLE: &str = "
body { margin: 0; display: flex; font-family: system-ui, sans-serif; }
aside { width: 300px; min-height: 100vh; padding: 1rem; background: #262730; color: #fafafa; box-sizing: border-box; }
aside label { display: block; margin: .5rem 0; }
aside input, aside select { width: 100%; }
aside .logo { width: 100%; }
main { flex: 1; padding: 1rem 2rem; }
#map { height: 500px; width: 100%; }
.caption { color: #888; font-size: .85rem; }
.notice { padding: .6rem 1rem; border-radius: 4px; margin: .5rem 0; }
.notice.success { background: #d4edda; color: #155724; }
.notice.warning { background: #fff3cd; color: #856404; }
.notice.error { background: #f8d7da; color: #721c24; }
.notice.info { background: #d1ecf1; color: #0c5460; }
button.primary { background: #ff4b4b; color: white; border: none; padding: .5rem 1rem; border-radius: 4px; }
details.lead { border: 1px solid #ddd; border-radius: 4px; margin: .4rem 0; padding: .4rem .8rem; }
details.lead .columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
details.lead textarea { width: 100%; display: block; }
details.lead .buttons { display: grid; grid-template-columns: 1fr 1fr; gap: .4rem; }
.status { font-size: .8rem; }
";
