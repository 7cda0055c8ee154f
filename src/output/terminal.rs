// Colored terminal output for phrase counts.

use std::borrow::Cow;

use colored::Colorize;

use crate::pipeline::phrase_counts::PhraseCounts;

/// Longest phrase shown before truncation.
const MAX_PHRASE_CHARS: usize = 40;

/// Display a worksheet's columns and its most frequent phrases.
pub fn display_phrase_counts(worksheet: &str, target_col: &str, counts: &PhraseCounts, top: usize) {
    println!(
        "\n{}",
        format!("=== {worksheet} ({} distinct phrases) ===", counts.counts.len()).bold()
    );
    println!("  {} {:?}", "Columns:".dimmed(), counts.columns);

    match counts.matched_column {
        Some(ref column) => println!("  {} {}", "Keyword column:".dimmed(), column),
        None => {
            println!(
                "  {} column '{}' not found — no phrases counted",
                "!".yellow(),
                target_col
            );
            return;
        }
    }

    if counts.counts.is_empty() {
        println!("  {} no valid phrases in '{}'", "!".yellow(), target_col);
        return;
    }

    println!();
    println!("  {:>4}  {:<42} {:>6}", "Rank".dimmed(), "Phrase".dimmed(), "Count".dimmed());
    println!("  {}", "-".repeat(56).dimmed());
    for (i, entry) in counts.counts.most_common(top).iter().enumerate() {
        println!(
            "  {:>4}. {:<42} {:>6}",
            i + 1,
            fit_phrase(&entry.phrase),
            entry.count.to_string().green()
        );
    }
    println!();
    println!(
        "  {} phrase occurrences in total",
        counts.counts.total().to_string().bold()
    );
}

/// Clip a phrase to the table column, marking the cut with "…".
fn fit_phrase(phrase: &str) -> Cow<'_, str> {
    match phrase.char_indices().nth(MAX_PHRASE_CHARS - 1) {
        Some((cut, _)) if phrase[cut..].chars().nth(1).is_some() => {
            Cow::Owned(format!("{}…", &phrase[..cut]))
        }
        _ => Cow::Borrowed(phrase),
    }
}
