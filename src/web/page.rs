// HTML page composition.
//
// One template serves all three layouts. Full shows the sidebar, the
// navigation links, the title and a caption. Presentation adds a control
// bar that can hide that chrome and toggle browser fullscreen; its toggles
// are kept in localStorage so they survive the periodic reload. Kiosk
// drops all chrome and lets the clouds fill the viewport.

use std::fmt::Write;

use crate::cloud::svg::escape_xml;
use crate::config::Layout;
use crate::phrases::counts::PhraseCount;

use super::view::View;

/// Rows shown in the debug top-phrases table.
pub const DEBUG_TOP_N: usize = 20;

/// Everything about the request that shapes the page around the panels.
pub struct PageContext<'a> {
    pub layout: Layout,
    pub view: View,
    pub debug: bool,
    pub refresh_ms: u64,
    /// Contents of the optional user stylesheet
    pub css: Option<&'a str>,
    pub generated_at: &'a str,
    pub target_col: &'a str,
}

/// One worksheet's rendered cloud (or the reason there isn't one).
pub struct Panel {
    pub worksheet: String,
    pub title: String,
    /// `None` when the worksheet produced no phrases
    pub svg: Option<String>,
    pub columns: Vec<String>,
    pub top: Vec<PhraseCount>,
}

/// Page heading for a view. Single-sheet views are named after the sheet.
pub fn page_title(view: View, worksheet: &str) -> String {
    if view.is_split() {
        "🍫 ChocoCloud — 워드클라우드 대시보드".to_string()
    } else {
        format!("📄 {worksheet} — 실시간 워드클라우드")
    }
}

/// Panel heading: the bare sheet name on split views.
pub fn panel_title(view: View, worksheet: &str) -> String {
    if view.is_split() {
        worksheet.to_string()
    } else {
        format!("{worksheet} 워드클라우드")
    }
}

/// Inline error shown instead of an empty cloud.
pub fn empty_panel_message(title: &str, target_col: &str) -> String {
    format!("[{title}] 유효 토큰이 없습니다. 시트의 '{target_col}' 컬럼을 확인하세요.")
}

/// Render a complete HTML document.
pub fn render_page(ctx: &PageContext<'_>, panels: &[Panel]) -> String {
    let mut html = String::with_capacity(
        8 * 1024 + panels.iter().map(|p| p.svg.as_ref().map_or(0, String::len)).sum::<usize>(),
    );
    let chrome = ctx.layout != Layout::Kiosk;

    // Writing to a String never fails; results are ignored throughout.
    html.push_str(
        "<!DOCTYPE html><html lang=\"ko\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>ChocoCloud</title>\
         <link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🍫</text></svg>\">",
    );
    let _ = write!(html, "<style>{BASE_CSS}</style>");
    if let Some(css) = ctx.css {
        // A stylesheet can't legitimately contain "</style", so cut it there.
        let css = css.split("</style").next().unwrap_or("");
        let _ = write!(html, "<style>{css}</style>");
    }
    let _ = write!(
        html,
        "<script>setTimeout(function(){{location.reload();}},{});</script></head>",
        ctx.refresh_ms
    );

    let layout_class = match ctx.layout {
        Layout::Full => "layout-full",
        Layout::Presentation => "layout-presentation",
        Layout::Kiosk => "layout-kiosk",
    };
    let _ = write!(html, "<body class=\"{layout_class}\">");

    if ctx.layout == Layout::Presentation {
        html.push_str(PRESENTATION_CONTROLS);
    }

    html.push_str("<div class=\"app\">");
    if chrome {
        render_sidebar(&mut html, ctx);
    }
    html.push_str("<main class=\"block-container\">");

    if chrome {
        html.push_str(NAV_LINKS);
        let heading_sheet = panels.first().map(|p| p.worksheet.as_str()).unwrap_or("");
        let _ = write!(
            html,
            "<h1 class=\"chrome\">{}</h1>",
            escape_xml(&page_title(ctx.view, heading_sheet))
        );
        if ctx.view.is_split() {
            html.push_str(
                "<p class=\"caption chrome\">위 버튼에서 각 워드클라우드를 새 탭으로 열 수 있어요. 아래는 미리보기입니다.</p>",
            );
        }
    }

    let grid_class = if panels.len() > 1 { "panels split" } else { "panels single" };
    let _ = write!(html, "<div class=\"{grid_class}\">");
    for panel in panels {
        render_panel(&mut html, ctx, panel, chrome);
    }
    html.push_str("</div>");

    if chrome {
        let _ = write!(
            html,
            "<footer class=\"chrome\">updated {} · refresh every {}s</footer>",
            escape_xml(ctx.generated_at),
            ctx.refresh_ms as f64 / 1000.0
        );
    }
    html.push_str("</main></div>");

    if ctx.layout == Layout::Presentation {
        let _ = write!(html, "<script>{PRESENTATION_SCRIPT}</script>");
    }
    html.push_str("</body></html>");
    html
}

fn render_sidebar(html: &mut String, ctx: &PageContext<'_>) {
    let view = ctx.view.as_query();
    let (href, label) = if ctx.debug {
        (format!("?view={view}"), "☑ 디버그 모드")
    } else {
        (format!("?view={view}&debug=1"), "☐ 디버그 모드")
    };
    let _ = write!(
        html,
        "<aside class=\"sidebar\"><a class=\"toggle\" href=\"{}\">{label}</a></aside>",
        escape_xml(&href)
    );
}

fn render_panel(html: &mut String, ctx: &PageContext<'_>, panel: &Panel, chrome: bool) {
    html.push_str("<section class=\"panel\">");
    if chrome {
        let _ = write!(html, "<h2>{}</h2>", escape_xml(&panel.title));
    }

    match panel.svg {
        Some(ref svg) => {
            let _ = write!(html, "<div class=\"cloud\">{svg}</div>");
        }
        None => {
            let _ = write!(
                html,
                "<div class=\"error\" role=\"alert\">{}</div>",
                escape_xml(&empty_panel_message(&panel.title, ctx.target_col))
            );
        }
    }

    if ctx.debug {
        let columns: Vec<String> = panel.columns.iter().map(|c| escape_xml(c)).collect();
        let _ = write!(
            html,
            "<div class=\"debug\"><p><strong>Columns({}):</strong> [{}]</p>\
             <p><strong>Top{}({}):</strong></p><ol>",
            escape_xml(&panel.worksheet),
            columns.join(", "),
            DEBUG_TOP_N,
            escape_xml(&panel.worksheet),
        );
        for entry in &panel.top {
            let _ = write!(html, "<li>{} — {}</li>", escape_xml(&entry.phrase), entry.count);
        }
        html.push_str("</ol></div>");
    }
    html.push_str("</section>");
}

const NAV_LINKS: &str = "<nav class=\"chrome\">\
<a href=\"?view=answerA\" target=\"_blank\" class=\"nav dark\">🧾 answerA 새 탭</a>\
<a href=\"?view=answerB\" target=\"_blank\" class=\"nav dark\">🧾 answerB 새 탭</a>\
<a href=\"?view=both\" class=\"nav grey\">🪟 한 화면에 둘 다</a>\
</nav>";

const PRESENTATION_CONTROLS: &str = "<div class=\"controls\">\
<label title=\"헤더/푸터/여백을 숨깁니다.\"><input type=\"checkbox\" id=\"cc-minimal\"> 🎬 프레젠테이션 모드</label>\
<label title=\"체크 시 사이드바도 숨겨집니다.\"><input type=\"checkbox\" id=\"cc-hide-sidebar\"> 사이드바 숨기기</label>\
<span class=\"spacer\"></span>\
<button type=\"button\" id=\"cc-fs\">⛶ 전체화면</button>\
<button type=\"button\" id=\"cc-exit-fs\">🗗 전체화면 해제</button>\
</div>";

const PRESENTATION_SCRIPT: &str = r#"(function(){
var body=document.body,minimal=document.getElementById('cc-minimal'),hide=document.getElementById('cc-hide-sidebar');
minimal.checked=localStorage.getItem('cc-minimal')==='1';
hide.checked=localStorage.getItem('cc-hide-sidebar')==='1';
function apply(){
  body.classList.toggle('minimal',minimal.checked);
  body.classList.toggle('hide-sidebar',minimal.checked&&hide.checked);
  localStorage.setItem('cc-minimal',minimal.checked?'1':'0');
  localStorage.setItem('cc-hide-sidebar',hide.checked?'1':'0');
}
minimal.addEventListener('change',apply);hide.addEventListener('change',apply);apply();
document.getElementById('cc-fs').addEventListener('click',function(){
  var el=document.documentElement;
  (el.requestFullscreen||el.webkitRequestFullscreen||el.mozRequestFullScreen||el.msRequestFullscreen).call(el);
});
document.getElementById('cc-exit-fs').addEventListener('click',function(){
  (document.exitFullscreen||document.webkitExitFullscreen||document.mozCancelFullScreen||document.msExitFullscreen).call(document);
});
})();"#;

const BASE_CSS: &str = "\
*{box-sizing:border-box}\
body{margin:0;font-family:system-ui,-apple-system,'Noto Sans KR','Malgun Gothic',sans-serif;background:#fff;color:#222}\
.app{display:flex;min-height:100vh}\
.sidebar{width:14rem;flex:none;padding:1rem;background:#f0f2f6}\
.sidebar .toggle{color:#222;text-decoration:none}\
.block-container{flex:1;min-width:0;padding:0.5rem 1rem}\
nav{display:flex;gap:12px;flex-wrap:wrap;margin:0.5rem 0}\
.nav{text-decoration:none;padding:8px 12px;color:#fff;border-radius:8px}\
.nav.dark{background:#111}.nav.grey{background:#444}\
.caption{color:#777;font-size:0.9rem}\
.panels{display:grid;gap:2rem}\
.panels.split{grid-template-columns:1fr 1fr}\
.panels.single{grid-template-columns:1fr}\
.cloud svg{display:block;width:100%;height:auto}\
.error{padding:1rem;border-radius:0.5rem;background:#ffebee;color:#b71c1c}\
.debug{font-size:0.85rem;color:#555}\
footer{color:#999;font-size:0.75rem;margin-top:1rem}\
.controls{display:flex;gap:1rem;align-items:center;padding:0.5rem 1rem}\
.controls .spacer{flex:1}\
.controls button{padding:6px 10px;border-radius:8px;cursor:pointer}\
body.minimal .chrome{display:none!important}\
body.minimal .block-container{padding:0 0.5rem}\
body.hide-sidebar .sidebar{display:none!important}\
.layout-kiosk{background:#7F3100}\
.layout-kiosk .block-container{padding:0}\
.layout-kiosk .panels{gap:0;min-height:100vh;align-items:center}\
.layout-kiosk .cloud svg{max-height:100vh}\
@media (max-width:900px){.panels.split{grid-template-columns:1fr}.sidebar{display:none}}";
