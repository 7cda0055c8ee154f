// Service-account credentials.
//
// Two sources, checked in order:
// 1. GCP_SERVICE_ACCOUNT env var holding the key JSON (deployments, or .env)
// 2. a local service_account.json file
//
// Secret stores often mangle the PEM's newlines into literal "\n"
// sequences, so the private key is repaired after parsing.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Env var holding the service-account JSON.
pub const CREDENTIALS_ENV_VAR: &str = "GCP_SERVICE_ACCOUNT";

/// File checked when the env var is unset.
pub const DEFAULT_CREDENTIALS_FILE: &str = "service_account.json";

/// Default OAuth token endpoint (used when the key omits `token_uri`).
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Where a service-account key was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Raw JSON from the environment
    Env(String),
    /// Path to a key file on disk
    File(PathBuf),
}

/// The fields of a Google service-account key file we actually use.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Find credentials without reading or validating them.
pub fn locate(file: &Path) -> Option<CredentialSource> {
    if let Ok(json) = env::var(CREDENTIALS_ENV_VAR) {
        if !json.trim().is_empty() {
            return Some(CredentialSource::Env(json));
        }
    }
    if file.exists() {
        return Some(CredentialSource::File(file.to_path_buf()));
    }
    None
}

impl CredentialSource {
    /// Read and parse the key.
    pub fn load(&self) -> Result<ServiceAccountKey> {
        match self {
            CredentialSource::Env(json) => parse_key(json)
                .with_context(|| format!("Invalid service-account JSON in {CREDENTIALS_ENV_VAR}")),
            CredentialSource::File(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_key(&json)
                    .with_context(|| format!("Invalid service-account JSON in {}", path.display()))
            }
        }
    }
}

/// Parse a service-account key, repairing escaped newlines in the PEM.
pub fn parse_key(json: &str) -> Result<ServiceAccountKey> {
    let mut key: ServiceAccountKey =
        serde_json::from_str(json).context("Failed to parse service-account key")?;
    key.private_key = repair_private_key(&key.private_key);
    if !key.private_key.starts_with("-----BEGIN") {
        anyhow::bail!("private_key is not a PEM block");
    }
    Ok(key)
}

/// Turn literal `\n` sequences back into newlines and trim.
pub fn repair_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n").trim().to_string()
}
