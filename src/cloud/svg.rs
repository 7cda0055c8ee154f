// SVG output for a laid-out cloud.
//
// Each word is drawn centred on its box with `textLength`, so the browser
// stretches or squeezes glyphs to the width the layout reserved. That keeps
// words from overlapping whatever font ends up being used.

use std::fmt::Write;

use super::font::FontFace;
use super::layout::{CloudOptions, Orientation, PlacedWord};

/// Font family name declared by @font-face.
const CLOUD_FONT_FAMILY: &str = "ChocoCloudFont";

/// Render placed words as a standalone, responsive SVG document.
pub fn render_svg(words: &[PlacedWord], opts: &CloudOptions, font: Option<&FontFace>) -> String {
    let mut svg = String::with_capacity(256 + words.len() * 160);

    // Writing to a String never fails; results are ignored throughout.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" preserveAspectRatio="xMidYMid meet" role="img">"#,
        w = opts.width,
        h = opts.height,
    );

    svg.push_str("<style>");
    match font {
        Some(face) => {
            let _ = write!(
                svg,
                "@font-face{{font-family:'{CLOUD_FONT_FAMILY}';src:url('{}') format('{}');}}\
                 text{{font-family:'{CLOUD_FONT_FAMILY}',sans-serif;}}",
                escape_xml(&face.url),
                face.css_format(),
            );
        }
        None => svg.push_str("text{font-family:sans-serif;}"),
    }
    svg.push_str("</style>");

    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape_xml(&opts.background)
    );

    for word in words {
        let (cx, cy) = word.bounds.center();
        let transform = match word.orientation {
            Orientation::Horizontal => String::new(),
            Orientation::Vertical => format!(r#" transform="rotate(-90 {cx:.1} {cy:.1})""#),
        };
        let _ = write!(
            svg,
            r#"<text x="{cx:.1}" y="{cy:.1}" font-size="{size:.0}" fill="{color}" text-anchor="middle" dominant-baseline="central" textLength="{len:.1}" lengthAdjust="spacingAndGlyphs"{transform}><title>{title} ({count})</title>{text}</text>"#,
            size = word.font_size,
            color = word.color,
            len = word.text_width,
            title = escape_xml(&word.text),
            count = word.count,
            text = escape_xml(&word.text),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
