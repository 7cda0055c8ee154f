// Worksheet records.
//
// The Sheets API returns a ragged grid: the first row is the header and
// trailing empty cells are omitted from each row. `Worksheet::from_grid`
// pads every row to the header width so each record has a value for
// every column, the way gspread's `get_all_records` does.

use serde::Deserialize;

/// One spreadsheet record: column name → cell text, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }
}

/// A worksheet's header row and its records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Worksheet {
    /// Build records from a raw value grid (header row first).
    ///
    /// Rows whose cells are all empty are skipped. Cells beyond the header
    /// width have no column name and are dropped.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut grid = grid.into_iter();
        let headers = match grid.next() {
            Some(h) => h,
            None => return Self::default(),
        };

        let rows = grid
            .filter(|cells| cells.iter().any(|c| !c.is_empty()))
            .map(|cells| {
                let mut cells = cells.into_iter();
                Row::new(
                    headers
                        .iter()
                        .map(|h| (h.clone(), cells.next().unwrap_or_default()))
                        .collect(),
                )
            })
            .collect();

        Self { headers, rows }
    }

    /// Rename headers (and the matching keys in every row) with `f`.
    pub fn map_headers(mut self, f: impl Fn(&str) -> String) -> Self {
        self.headers = self.headers.iter().map(|h| f(h)).collect();
        for row in &mut self.rows {
            for (name, _) in &mut row.cells {
                *name = f(name);
            }
        }
        self
    }

    /// Every value in `column`, in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueRange {
    /// Omitted entirely by the API when the sheet is empty
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Convert API cells to strings. Numbers and booleans keep their
    /// JSON text form; nulls become empty.
    pub fn into_grid(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
