// HTTP client for the Google Sheets v4 REST API.
//
// Auth is the service-account JWT bearer flow: sign a short-lived RS256
// assertion with the key's private key, exchange it at the token endpoint
// for an access token, and send that as a bearer token. The access token
// is kept until a minute before it expires; sheet data itself is fetched
// fresh on every call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::credentials::ServiceAccountKey;
use super::records::{ValueRange, Worksheet};
use super::traits::RowSource;

/// Default Sheets API endpoint.
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// OAuth scopes requested for the access token.
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

/// Lifetime requested for each signed assertion (Google's maximum).
const ASSERTION_TTL_SECS: i64 = 3600;

/// Refresh the access token this long before it actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Sheets client bound to one spreadsheet.
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    token: Mutex<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    /// Unix seconds
    expires_at: i64,
}

impl SheetsClient {
    /// Create a client for `spreadsheet_id`. Fails if the private key
    /// can't be parsed as an RSA PEM.
    pub fn new(base_url: &str, spreadsheet_id: &str, key: ServiceAccountKey) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("chococloud/0.1 (survey word cloud)")
            .build()
            .context("Failed to build HTTP client")?;

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("Service-account private_key is not a valid RSA PEM")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            key,
            encoding_key,
            token: Mutex::new(None),
        })
    }

    /// Fetch every value of `worksheet` as a raw grid.
    pub async fn get_values(&self, worksheet: &str) -> Result<ValueRange> {
        let token = self.access_token().await?;
        let url = values_url(&self.base_url, &self.spreadsheet_id, worksheet);

        debug!(worksheet = worksheet, "Sheets values GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Sheets API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API returned {} for '{}': {}", status, worksheet, body);
        }

        response
            .json::<ValueRange>()
            .await
            .context("Failed to parse Sheets API response")
    }

    /// Current access token, exchanging a fresh assertion when the cached
    /// one is missing or about to expire.
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(ref token) = *cached {
            if token.expires_at - EXPIRY_MARGIN_SECS > now {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.sign_assertion(now)?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("OAuth token request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OAuth token endpoint returned {}: {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse OAuth token response")?;

        debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained access token"
        );

        let value = token.access_token;
        *cached = Some(AccessToken {
            value: value.clone(),
            expires_at: now + token.expires_in,
        });
        Ok(value)
    }

    fn sign_assertion(&self, now: i64) -> Result<String> {
        let claims = JwtClaims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .context("Failed to sign service-account assertion")
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    async fn fetch_worksheet(&self, worksheet: &str) -> Result<Worksheet> {
        let values = self.get_values(worksheet).await?;
        Ok(Worksheet::from_grid(values.into_grid()))
    }
}

/// Build the values URL for a whole worksheet. The sheet name is quoted
/// in A1 notation so names with spaces or punctuation resolve.
pub fn values_url(base_url: &str, spreadsheet_id: &str, worksheet: &str) -> String {
    let range = format!("'{}'", worksheet.replace('\'', "''"));
    format!(
        "{}/v4/spreadsheets/{}/values/{}",
        base_url.trim_end_matches('/'),
        spreadsheet_id,
        utf8_percent_encode(&range, NON_ALPHANUMERIC)
    )
}

// --- OAuth wire types ---

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url_quotes_and_encodes() {
        let url = values_url("https://sheets.example/", "abc", "answerA");
        assert_eq!(url, "https://sheets.example/v4/spreadsheets/abc/values/%27answerA%27");
    }

    #[test]
    fn test_values_url_escapes_single_quote() {
        let url = values_url("http://h", "id", "it's");
        assert_eq!(url, "http://h/v4/spreadsheets/id/values/%27it%27%27s%27");
    }

    #[test]
    fn test_token_response_default_expiry() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"t"}"#).unwrap();
        assert_eq!(token.expires_in, ASSERTION_TTL_SECS);
    }
}
