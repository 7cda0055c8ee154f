// Word placement.
//
// Words are placed largest first. Each word's size is scaled relative to
// the previous word's frequency (relative_scaling 0.5 blends rank and
// frequency), then the word walks an Archimedean spiral out from a random
// start near the centre until its box lands on free canvas (a box that
// would cross an edge is pushed back inside). If no spot is free it tries
// the other orientation, then shrinks one pixel at a time. A word that can't be
// placed even at the minimum size ends the layout: nothing smaller would
// fit either.
//
// Free space is tracked on a coarse occupancy grid with a summed-area
// table, so each candidate position is an O(1) check.

use rand::Rng;

use super::palette::random_color;
use crate::phrases::counts::PhraseCount;

/// Grid resolution in pixels.
const CELL_PX: f32 = 4.0;

/// Spiral radius gained per radian, in pixels.
const SPIRAL_GROWTH: f32 = 2.0;

/// Spiral angle increment, in radians.
const SPIRAL_DT: f32 = 0.1;

/// Line height relative to the font size.
const LINE_HEIGHT: f32 = 1.15;

/// Rendering and layout options.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub max_words: usize,
    /// 0.0 = size by rank only, 1.0 = size proportional to frequency
    pub relative_scaling: f32,
    /// Probability that a word is tried horizontally first
    pub prefer_horizontal: f64,
    /// Padding around every placed word, in pixels
    pub margin: f32,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: "#7F3100".to_string(),
            min_font_size: 5.0,
            max_font_size: 200.0,
            max_words: 200,
            relative_scaling: 0.5,
            prefer_horizontal: 0.9,
            margin: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    /// Rotated 90° counter-clockwise
    Vertical,
}

impl Orientation {
    fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Axis-aligned box in canvas pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn padded(&self, margin: f32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }
}

/// A word with its final size, color and position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u32,
    pub font_size: f32,
    pub orientation: Orientation,
    pub color: &'static str,
    /// Box actually occupied on the canvas (already rotated)
    pub bounds: Rect,
    /// Horizontal advance of the text before rotation
    pub text_width: f32,
}

/// Estimated (width, height) of `text` set horizontally at `font_size`.
///
/// The SVG pins each word to this width with `textLength`, so the
/// estimate only has to look right, not match the font exactly.
pub fn text_extent(text: &str, font_size: f32) -> (f32, f32) {
    let em: f32 = text.chars().map(char_advance).sum();
    (em * font_size, font_size * LINE_HEIGHT)
}

fn char_advance(c: char) -> f32 {
    match c {
        // Hangul syllables and jamo, CJK ideographs, full-width forms
        '\u{AC00}'..='\u{D7A3}'
        | '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{FF00}'..='\u{FFEF}' => 1.0,
        ' ' => 0.3,
        'i' | 'l' | 'j' | 'I' | '.' | ',' | '\'' | '!' => 0.3,
        'm' | 'w' | 'M' | 'W' => 0.85,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.65,
        c if c.is_ascii_lowercase() => 0.55,
        _ => 0.6,
    }
}

/// Place `ranked` words (highest count first) on the canvas.
pub fn layout_words<R: Rng>(
    ranked: &[PhraseCount],
    opts: &CloudOptions,
    rng: &mut R,
) -> Vec<PlacedWord> {
    let Some(top) = ranked.first() else {
        return Vec::new();
    };
    let max_count = top.count.max(1) as f32;

    let mut grid = OccupancyGrid::new(opts.width as f32, opts.height as f32);
    let mut placed = Vec::with_capacity(ranked.len().min(opts.max_words));

    let mut font_size = opts.max_font_size;
    let mut last_freq = 1.0f32;

    for word in ranked.iter().take(opts.max_words) {
        let freq = word.count as f32 / max_count;
        if freq <= 0.0 {
            continue;
        }

        let rs = opts.relative_scaling;
        if rs != 0.0 {
            font_size = ((rs * (freq / last_freq) + (1.0 - rs)) * font_size).round();
        }

        let mut orientation = if rng.random_bool(opts.prefer_horizontal.clamp(0.0, 1.0)) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let mut tried_other = false;

        let position = loop {
            if font_size < opts.min_font_size {
                break None;
            }
            let (text_w, text_h) = text_extent(&word.phrase, font_size);
            let (box_w, box_h) = match orientation {
                Orientation::Horizontal => (text_w, text_h),
                Orientation::Vertical => (text_h, text_w),
            };
            if let Some(rect) = find_position(&grid, opts, box_w, box_h, rng) {
                break Some((rect, text_w));
            }
            if !tried_other && opts.prefer_horizontal < 1.0 {
                orientation = orientation.flipped();
                tried_other = true;
            } else {
                font_size -= 1.0;
                orientation = Orientation::Horizontal;
            }
        };

        let Some((bounds, text_width)) = position else {
            // Canvas is full at the minimum size.
            break;
        };

        grid.occupy(&bounds.padded(opts.margin));
        placed.push(PlacedWord {
            text: word.phrase.clone(),
            count: word.count,
            font_size,
            orientation,
            color: random_color(rng),
            bounds,
            text_width,
        });
        last_freq = freq;
    }

    placed
}

/// Walk a spiral from a random start until a `width`×`height` box fits.
fn find_position<R: Rng>(
    grid: &OccupancyGrid,
    opts: &CloudOptions,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Option<Rect> {
    let canvas_w = opts.width as f32;
    let canvas_h = opts.height as f32;
    if width > canvas_w || height > canvas_h {
        return None;
    }

    let start_x = canvas_w * rng.random_range(0.35f32..0.65f32);
    let start_y = canvas_h * rng.random_range(0.35f32..0.65f32);
    let aspect = canvas_w / canvas_h;
    let max_radius = (canvas_w * canvas_w + canvas_h * canvas_h).sqrt();

    let mut t = 0.0f32;
    loop {
        let radius = SPIRAL_GROWTH * t;
        if radius > max_radius {
            return None;
        }
        let cx = start_x + aspect * radius * t.cos();
        let cy = start_y + radius * t.sin();
        // Push boxes that would cross an edge back onto the canvas.
        let rect = Rect {
            x: (cx - width / 2.0).clamp(0.0, canvas_w - width),
            y: (cy - height / 2.0).clamp(0.0, canvas_h - height),
            width,
            height,
        };
        if grid.is_free(&rect) {
            return Some(rect);
        }
        t += SPIRAL_DT;
    }
}

/// Coarse occupancy bitmap with a summed-area table for O(1) box queries.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    /// (cols + 1) × (rows + 1), integral[r][c] = occupied cells above-left
    integral: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: f32, height: f32) -> Self {
        let cols = (width / CELL_PX).ceil() as usize;
        let rows = (height / CELL_PX).ceil() as usize;
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            integral: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    /// Cell span [c0, c1) × [r0, r1) touched by `rect`, clamped to the grid.
    fn span(&self, rect: &Rect) -> (usize, usize, usize, usize) {
        let clamp = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        let c0 = clamp((rect.x / CELL_PX).floor(), self.cols);
        let c1 = clamp(((rect.x + rect.width) / CELL_PX).ceil(), self.cols);
        let r0 = clamp((rect.y / CELL_PX).floor(), self.rows);
        let r1 = clamp(((rect.y + rect.height) / CELL_PX).ceil(), self.rows);
        (c0, c1, r0, r1)
    }

    fn is_free(&self, rect: &Rect) -> bool {
        let (c0, c1, r0, r1) = self.span(rect);
        let w = self.cols + 1;
        let at = |r: usize, c: usize| self.integral[r * w + c] as i64;
        at(r1, c1) - at(r0, c1) - at(r1, c0) + at(r0, c0) == 0
    }

    fn occupy(&mut self, rect: &Rect) {
        let (c0, c1, r0, r1) = self.span(rect);
        for r in r0..r1 {
            for c in c0..c1 {
                self.cells[r * self.cols + c] = true;
            }
        }
        self.rebuild_integral();
    }

    fn rebuild_integral(&mut self) {
        let w = self.cols + 1;
        for r in 0..self.rows {
            let mut row_sum = 0u32;
            for c in 0..self.cols {
                row_sum += self.cells[r * self.cols + c] as u32;
                self.integral[(r + 1) * w + (c + 1)] = self.integral[r * w + (c + 1)] + row_sum;
            }
        }
    }
}
