// Word cloud rendering: frequency table in, SVG document out.
//
// Layout follows the classic wordcloud approach: biggest words first,
// sizes scaled relative to the previous word, each word placed on the
// first free spot along a spiral and shrunk until it fits.

pub mod font;
pub mod layout;
pub mod palette;
pub mod svg;

use rand::Rng;

use crate::phrases::counts::FrequencyTable;

use self::font::FontFace;
use self::layout::{layout_words, CloudOptions};

/// Word cloud generator with fixed options and an optional web font.
#[derive(Debug, Clone, Default)]
pub struct WordCloud {
    pub options: CloudOptions,
    pub font: Option<FontFace>,
}

impl WordCloud {
    pub fn new(options: CloudOptions, font: Option<FontFace>) -> Self {
        Self { options, font }
    }

    /// Lay out and render `table`. Returns `None` for an empty table,
    /// which callers show as an inline error instead of an image.
    pub fn generate_from_frequencies<R: Rng>(
        &self,
        table: &FrequencyTable,
        rng: &mut R,
    ) -> Option<String> {
        if table.is_empty() {
            return None;
        }
        let ranked = table.most_common(self.options.max_words);
        let words = layout_words(&ranked, &self.options, rng);
        Some(svg::render_svg(&words, &self.options, self.font.as_ref()))
    }
}
