// Cell tokenization.
//
// Survey answers are typed by hand, so the separators vary: ASCII comma,
// full-width comma (common with Korean/CJK IMEs), semicolon, or one
// phrase per line. All of them are folded into ASCII commas before
// splitting. A cell without any separator is one phrase.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Any separator that splits a cell into phrases.
const SEPARATORS: [char; 4] = [',', '，', ';', '\n'];

/// Separators other than the ASCII comma, folded into it before splitting.
static ALT_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[，;\n]").expect("static separator pattern is valid"));

/// Shortest phrase kept, in characters.
pub const MIN_PHRASE_CHARS: usize = 2;

/// Split one cell into phrases, dropping fragments that are too short
/// or made only of symbols.
pub fn extract_phrases(cell: &str) -> Vec<String> {
    let normalized;
    let pieces: Vec<&str> = if cell.contains(SEPARATORS) {
        normalized = ALT_SEPARATORS.replace_all(cell, ",");
        normalized.split(',').collect()
    } else {
        vec![cell]
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| is_phrase(piece))
        .map(str::to_string)
        .collect()
}

/// A trimmed piece counts as a phrase when it is at least two characters
/// long and has at least one Hangul syllable, ASCII letter or digit.
pub fn is_phrase(piece: &str) -> bool {
    piece.chars().count() >= MIN_PHRASE_CHARS && piece.chars().any(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('가'..='힣').contains(&c)
}
