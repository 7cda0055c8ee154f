// Web server: Axum-based word cloud dashboard.
//
// Every page load fetches both worksheets fresh, counts phrases and lays
// out the clouds; nothing is cached between requests. The page reloads
// itself on a timer, so a browser left open tracks the sheet live.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cloud::font::{font_candidates, pick_font, FONT_ROUTE};
use crate::cloud::layout::CloudOptions;
use crate::cloud::WordCloud;
use crate::config::{Config, Layout, SHEET_A, SHEET_B, TARGET_COL};
use crate::sheets::client::SheetsClient;
use crate::sheets::traits::RowSource;

pub mod handlers;
pub mod page;
pub mod view;

/// Per-process page settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub layout: Layout,
    pub refresh_ms: u64,
    pub css_path: PathBuf,
    pub sheet_a: String,
    pub sheet_b: String,
    pub target_col: String,
}

impl PageSettings {
    pub fn from_config(config: &Config, layout: Layout) -> Self {
        Self {
            layout,
            refresh_ms: config.refresh_ms,
            css_path: config.css_path.clone(),
            sheet_a: SHEET_A.to_string(),
            sheet_b: SHEET_B.to_string(),
            target_col: TARGET_COL.to_string(),
        }
    }
}

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no credentials were available; every panel is empty
    pub source: Option<Arc<dyn RowSource>>,
    pub cloud: Arc<WordCloud>,
    pub settings: Arc<PageSettings>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, layout: Layout, port: u16, bind: &str) -> Result<()> {
    let source = source_for_layout(&config, layout)?;

    let font = pick_font(&font_candidates(&config.font_dir));
    let state = AppState {
        source,
        cloud: Arc::new(WordCloud::new(CloudOptions::default(), font)),
        settings: Arc::new(PageSettings::from_config(&config, layout)),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!(layout = ?layout, "ChocoCloud dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Open the spreadsheet for `layout`.
///
/// The full layout refuses to start without credentials. Presentation and
/// kiosk screens start anyway with `None` and show "no data" panels, so a
/// wall display never sits on a crashed process.
pub fn source_for_layout(config: &Config, layout: Layout) -> Result<Option<Arc<dyn RowSource>>> {
    match open_source(config) {
        Ok(source) => Ok(Some(source)),
        Err(e) if layout != Layout::Full => {
            warn!(error = %e, "Spreadsheet unavailable, panels will show no data");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load credentials and build the Sheets client.
pub fn open_source(config: &Config) -> Result<Arc<dyn RowSource>> {
    let key = config.require_credentials()?.load()?;
    let client = SheetsClient::new(&config.sheets_api_url, &config.spreadsheet_id, key)?;
    Ok(Arc::new(client))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::dashboard))
        .route(FONT_ROUTE, get(handlers::font::serve_font))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}
