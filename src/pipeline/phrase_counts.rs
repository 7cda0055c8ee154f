// Worksheet → phrase frequency table.
//
// Runs once per rendered panel: fetch the sheet, clean its headers,
// resolve the keyword column, tokenize every cell, count. A sheet
// without the column yields an empty table rather than an error.

use anyhow::Result;
use tracing::{debug, warn};

use crate::phrases::columns::{clean_header, find_target_column};
use crate::phrases::counts::FrequencyTable;
use crate::sheets::records::Worksheet;
use crate::sheets::traits::RowSource;

/// Phrase counts for one worksheet, plus its cleaned header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCounts {
    pub counts: FrequencyTable,
    pub columns: Vec<String>,
    /// The header the target resolved to, if any
    pub matched_column: Option<String>,
}

/// Fetch `worksheet` from `source` and count the phrases in `target_col`.
///
/// Fetch errors propagate; a missing column does not.
pub async fn get_phrase_counts(
    source: &dyn RowSource,
    worksheet: &str,
    target_col: &str,
) -> Result<PhraseCounts> {
    let sheet = source.fetch_worksheet(worksheet).await?;
    let counts = count_worksheet(sheet, target_col);

    debug!(
        worksheet = worksheet,
        column = ?counts.matched_column,
        distinct = counts.counts.len(),
        "Counted phrases"
    );

    Ok(counts)
}

/// Count phrases in an already fetched worksheet.
pub fn count_worksheet(sheet: Worksheet, target_col: &str) -> PhraseCounts {
    let sheet = sheet.map_headers(clean_header);
    let columns = sheet.headers.clone();

    let Some(column) = find_target_column(&columns, target_col).map(str::to_string) else {
        warn!(
            target = target_col,
            columns = ?columns,
            "Target column not found, treating worksheet as empty"
        );
        return PhraseCounts {
            counts: FrequencyTable::new(),
            columns,
            matched_column: None,
        };
    };

    let counts = FrequencyTable::from_cells(sheet.column_values(&column));

    PhraseCounts {
        counts,
        columns,
        matched_column: Some(column),
    }
}
