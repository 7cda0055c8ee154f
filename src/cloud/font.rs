// Font discovery.
//
// Hangul needs a font that actually has the glyphs; browser defaults
// often don't on kiosk machines. The first existing file from a fixed
// candidate list is served at /font and referenced from the SVG. If none
// exists the cloud still renders with the default sans-serif family.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// URL the discovered font is served from.
pub const FONT_ROUTE: &str = "/font";

/// Font files bundled with the project, relative to the font directory.
const PROJECT_FONTS_PRIMARY: [&str; 1] = ["HakgyoansimByeolbichhaneul.otf"];
const PROJECT_FONTS_FALLBACK: [&str; 3] = [
    "NotoSansKR-Regular.otf",
    "NotoSansCJKkr-Regular.otf",
    "NanumGothic.ttf",
];

/// System-wide font locations (Linux containers and Windows).
const SYSTEM_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    r"C:\Windows\Fonts\malgun.ttf",
    r"C:\Windows\Fonts\NanumGothic.ttf",
];

/// A font file the page can load via @font-face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub path: PathBuf,
    pub url: String,
}

impl FontFace {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            url: FONT_ROUTE.to_string(),
        }
    }

    /// CSS `format()` hint for the file type.
    pub fn css_format(&self) -> &'static str {
        match extension(&self.path).as_str() {
            "otf" => "opentype",
            "ttc" => "collection",
            "woff" => "woff",
            "woff2" => "woff2",
            _ => "truetype",
        }
    }

    /// MIME type used when serving the file.
    pub fn mime_type(&self) -> &'static str {
        match extension(&self.path).as_str() {
            "otf" => "font/otf",
            "ttc" => "font/collection",
            "woff" => "font/woff",
            "woff2" => "font/woff2",
            _ => "font/ttf",
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Candidate font paths in priority order.
pub fn font_candidates(project_font_dir: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = PROJECT_FONTS_PRIMARY
        .iter()
        .map(|name| project_font_dir.join(name))
        .collect();
    candidates.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
    candidates.extend(
        PROJECT_FONTS_FALLBACK
            .iter()
            .map(|name| project_font_dir.join(name)),
    );
    if let Some(user_dir) = dirs::font_dir() {
        candidates.extend(
            PROJECT_FONTS_FALLBACK
                .iter()
                .map(|name| user_dir.join(name)),
        );
    }
    candidates
}

/// First candidate that exists on disk.
pub fn pick_font(candidates: &[PathBuf]) -> Option<FontFace> {
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            info!(path = %path.display(), "Using font for word clouds");
            Some(FontFace::new(path.clone()))
        }
        None => {
            warn!(
                searched = candidates.len(),
                "No Hangul font found. Add e.g. NotoSansKR-Regular.otf to fonts/. \
                 Word clouds will use the browser's default font."
            );
            None
        }
    }
}
