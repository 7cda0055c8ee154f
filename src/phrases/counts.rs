// Frequency table: phrase → count, accumulated across all rows of a tab.

use std::collections::HashMap;

use super::tokenize::extract_phrases;

/// Phrase occurrence counts for one worksheet.
///
/// Equality compares counts only, so two tables built from the same rows
/// in a different order are equal. `most_common` breaks ties by the order
/// phrases were first seen.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
    first_seen: Vec<String>,
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for FrequencyTable {}

/// One phrase with its count, as returned by `most_common`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: u32,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `phrase`.
    pub fn add(&mut self, phrase: String) {
        match self.counts.get_mut(&phrase) {
            Some(count) => *count += 1,
            None => {
                self.first_seen.push(phrase.clone());
                self.counts.insert(phrase, 1);
            }
        }
    }

    /// Tokenize a cell and count every phrase in it.
    pub fn add_cell(&mut self, cell: &str) {
        for phrase in extract_phrases(cell) {
            self.add(phrase);
        }
    }

    /// Build a table from an iterator of cells.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for cell in cells {
            table.add_cell(cell.as_ref());
        }
        table
    }

    pub fn get(&self, phrase: &str) -> u32 {
        self.counts.get(phrase).copied().unwrap_or(0)
    }

    /// Number of distinct phrases.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// The `n` most frequent phrases, highest count first.
    pub fn most_common(&self, n: usize) -> Vec<PhraseCount> {
        let mut ranked: Vec<PhraseCount> = self
            .first_seen
            .iter()
            .map(|phrase| PhraseCount {
                phrase: phrase.clone(),
                count: self.counts[phrase],
            })
            .collect();
        // Stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// All phrases ranked by count.
    pub fn ranked(&self) -> Vec<PhraseCount> {
        self.most_common(self.len())
    }
}
