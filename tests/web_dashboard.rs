// Router tests for the dashboard.
//
// Drives the real Axum router with an in-memory RowSource, so views,
// debug output and the empty-data fallback are checked end to end
// without touching Google.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use chococloud::cloud::WordCloud;
use chococloud::config::{Config, Layout, SHEET_A, SHEET_B, TARGET_COL};
use chococloud::sheets::records::Worksheet;
use chococloud::sheets::traits::RowSource;
use chococloud::web::{build_router, source_for_layout, AppState, PageSettings};
use tempfile::tempdir;

/// Worksheets keyed by name; unknown names fail like a missing tab would.
struct FakeSource {
    sheets: HashMap<String, Vec<Vec<String>>>,
}

#[async_trait]
impl RowSource for FakeSource {
    async fn fetch_worksheet(&self, worksheet: &str) -> Result<Worksheet> {
        match self.sheets.get(worksheet) {
            Some(grid) => Ok(Worksheet::from_grid(grid.clone())),
            None => anyhow::bail!("worksheet not found: {worksheet}"),
        }
    }
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn fake_source() -> FakeSource {
    let mut sheets = HashMap::new();
    sheets.insert(
        SHEET_A.to_string(),
        grid(&[
            &["타임스탬프", "\u{FEFF}의미 정리 함수 "],
            &["1", "소통, 협력"],
            &["2", "소통; 신뢰"],
            &["3", "소통\n배려"],
        ]),
    );
    // answerB has no keyword column
    sheets.insert(
        SHEET_B.to_string(),
        grid(&[&["타임스탬프", "의견"], &["1", "좋아요"]]),
    );
    FakeSource { sheets }
}

fn settings(layout: Layout, css_path: PathBuf) -> PageSettings {
    PageSettings {
        layout,
        refresh_ms: 10_000,
        css_path,
        sheet_a: SHEET_A.to_string(),
        sheet_b: SHEET_B.to_string(),
        target_col: TARGET_COL.to_string(),
    }
}

fn state(source: Option<Arc<dyn RowSource>>, layout: Layout) -> AppState {
    state_with_css(source, layout, PathBuf::from("/nonexistent/styles.css"))
}

fn state_with_css(source: Option<Arc<dyn RowSource>>, layout: Layout, css_path: PathBuf) -> AppState {
    AppState {
        source,
        cloud: Arc::new(WordCloud::default()),
        settings: Arc::new(settings(layout, css_path)),
    }
}

fn config_without_credentials() -> Config {
    Config {
        spreadsheet_id: "sheet-id".to_string(),
        sheets_api_url: "http://127.0.0.1:9".to_string(),
        credentials: None,
        credentials_path: PathBuf::from("/nonexistent/service_account.json"),
        refresh_ms: 10_000,
        css_path: PathBuf::from("/nonexistent/styles.css"),
        font_dir: PathBuf::from("/nonexistent/fonts"),
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn empty_message(title: &str) -> String {
    format!("[{title}] 유효 토큰이 없습니다. 시트의 &#39;{TARGET_COL}&#39; 컬럼을 확인하세요.")
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = get(state(None, Layout::Full), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn single_view_renders_one_cloud() {
    let source: Arc<dyn RowSource> = Arc::new(fake_source());
    let (status, body) = get(state(Some(source), Layout::Full), "/?view=answerA").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("answerA 워드클라우드"));
    assert!(body.contains("answerA — 실시간 워드클라우드"));
    assert_eq!(body.matches("viewBox=\"0 0 1200 700\"").count(), 1);
    assert!(body.contains(">소통</text>"));
    assert!(!body.contains("answerB 워드클라우드"));
}

#[tokio::test]
async fn home_renders_both_panels_and_degrades_missing_column() {
    let source: Arc<dyn RowSource> = Arc::new(fake_source());
    let (_, body) = get(state(Some(source), Layout::Full), "/").await;
    assert!(body.contains("ChocoCloud — 워드클라우드 대시보드"));
    assert!(body.contains("class=\"panels split\""));
    // answerA has phrases, answerB lacks the column
    assert_eq!(body.matches("viewBox=\"0 0 1200 700\"").count(), 1);
    assert!(body.contains(&empty_message("answerB")));
}

#[tokio::test]
async fn unknown_view_falls_back_to_home() {
    let source: Arc<dyn RowSource> = Arc::new(fake_source());
    let (_, body) = get(state(Some(source), Layout::Full), "/?view=nonsense").await;
    assert!(body.contains("ChocoCloud — 워드클라우드 대시보드"));
}

#[tokio::test]
async fn debug_lists_columns_and_top_phrases() {
    let source: Arc<dyn RowSource> = Arc::new(fake_source());
    let (_, body) = get(state(Some(source), Layout::Full), "/?view=BOTH&debug=1").await;
    assert!(body.contains("Columns(answerA):"));
    assert!(body.contains("[타임스탬프, 의미 정리 함수]"));
    assert!(body.contains("<li>소통 — 3</li>"));
    assert!(body.contains("Columns(answerB):"));
}

#[tokio::test]
async fn missing_source_renders_empty_panels() {
    let (status, body) = get(state(None, Layout::Presentation), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&empty_message("answerA")));
    assert!(body.contains(&empty_message("answerB")));
    assert!(body.contains("프레젠테이션 모드"));
}

#[tokio::test]
async fn fetch_failure_renders_empty_panel() {
    let source: Arc<dyn RowSource> = Arc::new(FakeSource {
        sheets: HashMap::new(),
    });
    let (status, body) = get(state(Some(source), Layout::Full), "/?view=answerb").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&empty_message("answerB 워드클라우드")));
}

#[tokio::test]
async fn kiosk_has_no_chrome() {
    let source: Arc<dyn RowSource> = Arc::new(fake_source());
    let (_, body) = get(state(Some(source), Layout::Kiosk), "/?view=answerA").await;
    assert!(body.contains("layout-kiosk"));
    assert!(!body.contains("<nav"));
    assert!(!body.contains("<h1"));
    assert!(!body.contains("class=\"sidebar\""));
    assert!(body.contains("viewBox=\"0 0 1200 700\""));
}

#[tokio::test]
async fn page_reloads_on_interval() {
    let (_, body) = get(state(None, Layout::Full), "/").await;
    assert!(body.contains("location.reload();},10000)"));
}

#[tokio::test]
async fn font_route_404_without_font() {
    let (status, _) = get(state(None, Layout::Full), "/font").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_css_is_inlined() {
    let dir = tempdir().expect("Failed to create temp dir");
    let css_path = dir.path().join("styles.css");
    std::fs::write(&css_path, ".panel h2{color:#FFA442}").unwrap();

    let (_, body) = get(state_with_css(None, Layout::Full, css_path), "/").await;
    assert!(body.contains("<style>.panel h2{color:#FFA442}</style>"));
}

#[tokio::test]
async fn user_css_is_cut_at_closing_style_tag() {
    let dir = tempdir().expect("Failed to create temp dir");
    let css_path = dir.path().join("styles.css");
    std::fs::write(&css_path, "h1{color:red}</style><script>alert(1)</script>").unwrap();

    let (_, body) = get(state_with_css(None, Layout::Full, css_path), "/").await;
    assert!(body.contains("<style>h1{color:red}</style>"));
    assert!(!body.contains("alert(1)"));
}

#[test]
fn full_layout_requires_credentials() {
    let Err(e) = source_for_layout(&config_without_credentials(), Layout::Full) else {
        panic!("full layout should refuse to start without credentials");
    };
    assert!(format!("{e:#}").contains("GCP_SERVICE_ACCOUNT"));
}

#[test]
fn display_layouts_run_without_credentials() {
    let config = config_without_credentials();
    for layout in [Layout::Presentation, Layout::Kiosk] {
        let source = source_for_layout(&config, layout).unwrap();
        assert!(source.is_none(), "{layout:?} should start with no source");
    }
}
