use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::sheets::credentials::{self, CredentialSource};

/// Spreadsheet holding the survey responses.
pub const DEFAULT_SPREADSHEET_ID: &str = "1ysnVySqyDXNxpYc-vULP887GUDVPHXMFdRoZoZW4DTU";

/// The two worksheet tabs rendered by the dashboard.
pub const SHEET_A: &str = "answerA";
pub const SHEET_B: &str = "answerB";

/// Column holding comma-delimited keyword phrases.
pub const TARGET_COL: &str = "의미 정리 함수";

/// Page reload interval. 10–30 seconds is reasonable for a live session.
pub const DEFAULT_REFRESH_MS: u64 = 10_000;

/// Page chrome variant. All three render the same clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
    /// Title, caption and navigation links
    Full,
    /// Full layout plus presentation-mode and fullscreen controls
    Presentation,
    /// No chrome at all, clouds fill the viewport
    Kiosk,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so
/// `GCP_SERVICE_ACCOUNT` can live there instead of in the process env.
pub struct Config {
    pub spreadsheet_id: String,
    /// Sheets API base URL (overridable for testing)
    pub sheets_api_url: String,
    /// Where the service-account key was found, if anywhere
    pub credentials: Option<CredentialSource>,
    /// Local service-account file checked when the env var is unset
    pub credentials_path: PathBuf,
    pub refresh_ms: u64,
    /// Optional stylesheet inlined into every page
    pub css_path: PathBuf,
    /// Project-local font directory searched first
    pub font_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing here is fatal: missing credentials are recorded as `None`
    /// and it's up to the caller (see `require_credentials`) to decide.
    pub fn load() -> Result<Self> {
        let credentials_path = env::var("CHOCOCLOUD_CREDENTIALS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(credentials::DEFAULT_CREDENTIALS_FILE));

        let refresh_ms = match env::var("CHOCOCLOUD_REFRESH_MS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("CHOCOCLOUD_REFRESH_MS must be a number of milliseconds, got {raw:?}")
            })?,
            Err(_) => DEFAULT_REFRESH_MS,
        };

        Ok(Self {
            spreadsheet_id: env::var("CHOCOCLOUD_SPREADSHEET_ID")
                .unwrap_or_else(|_| DEFAULT_SPREADSHEET_ID.to_string()),
            sheets_api_url: env::var("SHEETS_API_URL")
                .unwrap_or_else(|_| crate::sheets::client::DEFAULT_SHEETS_API_URL.to_string()),
            credentials: credentials::locate(&credentials_path),
            credentials_path,
            refresh_ms,
            css_path: env::var("CHOCOCLOUD_CSS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./styles/styles.css")),
            font_dir: env::var("CHOCOCLOUD_FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("fonts")),
        })
    }

    /// Check that service-account credentials are available.
    /// Call this before any operation that must talk to the spreadsheet.
    pub fn require_credentials(&self) -> Result<&CredentialSource> {
        match self.credentials {
            Some(ref source) => Ok(source),
            None => anyhow::bail!(
                "Google service-account credentials not found.\n\
                 - Local: put service_account.json in the project root (or set CHOCOCLOUD_CREDENTIALS).\n\
                 - Deployed: set GCP_SERVICE_ACCOUNT to the service-account JSON (a .env file works too)."
            ),
        }
    }
}
