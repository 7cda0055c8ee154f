// GET /: the dashboard page.
//
// Query parameters:
//   ?view=home|answerA|answerB|both  (case-insensitive, default home)
//   ?debug=1                         column list and top phrases per panel
//
// A worksheet that can't be fetched is logged and rendered like an empty
// one; the page itself always renders.

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::error;

use crate::phrases::counts::FrequencyTable;
use crate::pipeline::phrase_counts::{get_phrase_counts, PhraseCounts};
use crate::web::page::{panel_title, render_page, PageContext, Panel, DEBUG_TOP_N};
use crate::web::view::View;
use crate::web::AppState;

#[derive(Deserialize, Default)]
pub struct DashboardQuery {
    pub view: Option<String>,
    pub debug: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Html<String> {
    let view = View::parse(params.view.as_deref());
    let debug = params.debug.as_deref().is_some_and(is_truthy);
    let settings = &state.settings;

    let sheets: Vec<&str> = match view {
        View::AnswerA => vec![settings.sheet_a.as_str()],
        View::AnswerB => vec![settings.sheet_b.as_str()],
        View::Home | View::Both => vec![settings.sheet_a.as_str(), settings.sheet_b.as_str()],
    };

    let mut panels = Vec::with_capacity(sheets.len());
    for worksheet in sheets {
        let counts = fetch_counts(&state, worksheet).await;
        panels.push(build_panel(&state, view, worksheet, counts));
    }

    let css = tokio::fs::read_to_string(&settings.css_path).await.ok();
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let ctx = PageContext {
        layout: settings.layout,
        view,
        debug,
        refresh_ms: settings.refresh_ms,
        css: css.as_deref(),
        generated_at: &generated_at,
        target_col: &settings.target_col,
    };

    Html(render_page(&ctx, &panels))
}

async fn fetch_counts(state: &AppState, worksheet: &str) -> PhraseCounts {
    let Some(ref source) = state.source else {
        return PhraseCounts::default();
    };
    match get_phrase_counts(source.as_ref(), worksheet, &state.settings.target_col).await {
        Ok(counts) => counts,
        Err(e) => {
            error!(worksheet = worksheet, error = %e, "Failed to fetch worksheet");
            PhraseCounts::default()
        }
    }
}

fn build_panel(state: &AppState, view: View, worksheet: &str, counts: PhraseCounts) -> Panel {
    let svg = render_cloud(state, &counts.counts);
    Panel {
        worksheet: worksheet.to_string(),
        title: panel_title(view, worksheet),
        svg,
        columns: counts.columns,
        top: counts.counts.most_common(DEBUG_TOP_N),
    }
}

fn render_cloud(state: &AppState, table: &FrequencyTable) -> Option<String> {
    let mut rng = rand::rng();
    state.cloud.generate_from_frequencies(table, &mut rng)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
