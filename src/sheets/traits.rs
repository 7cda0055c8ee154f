// Row source trait: the seam between the dashboard and the spreadsheet.
//
// The live implementation is `SheetsClient`; tests use an in-memory
// source so the pipeline and the web handlers run without network access.

use anyhow::Result;
use async_trait::async_trait;

use super::records::Worksheet;

/// Anything that can hand back the full contents of a named worksheet.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch the header row and every record of `worksheet`.
    async fn fetch_worksheet(&self, worksheet: &str) -> Result<Worksheet>;
}
