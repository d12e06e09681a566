//! OAuth token storage and refresh.
//!
//! The client secrets file is the JSON downloaded from the Google Cloud
//! console (`installed` or `web` section). The token file holds the last
//! access token plus the refresh token used to renew it, written 0600 on Unix.
//!
//! There is no consent flow here: a token file must already exist.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SheetsError;

/// Seconds before expiry at which a token is treated as expired.
const EXPIRY_SKEW_SECS: u64 = 60;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Deserialize)]
struct SecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Load from a client secrets JSON file.
    pub fn load(path: &Path) -> Result<Self, SheetsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::NotAuthenticated(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        let file: SecretsFile = serde_json::from_str(json)
            .map_err(|e| SheetsError::NotAuthenticated(format!("invalid client secrets: {}", e)))?;
        file.installed.or(file.web).ok_or_else(|| {
            SheetsError::NotAuthenticated("client secrets have no 'installed' or 'web' section".into())
        })
    }
}

/// Token persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry as Unix seconds. Absent means "does not expire".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

impl StoredToken {
    pub fn is_expired(&self, now: u64) -> bool {
        match self.expires_at {
            Some(at) => now + EXPIRY_SKEW_SECS >= at,
            None => false,
        }
    }
}

/// Load a stored token. Returns None if the file does not exist.
pub fn load_token(path: &Path) -> Result<Option<StoredToken>, SheetsError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SheetsError::Io(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| SheetsError::Parse(format!("{}: {}", path.display(), e)))
}

/// Save a token to disk.
/// Creates the parent directory if it doesn't exist.
/// Sets 0600 permissions on Unix.
pub fn save_token(path: &Path, token: &StoredToken) -> Result<(), SheetsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SheetsError::Io(format!("Failed to create token directory: {}", e)))?;
        }
    }

    let contents = serde_json::to_string_pretty(token)
        .map_err(|e| SheetsError::Parse(format!("Failed to serialize token: {}", e)))?;

    std::fs::write(path, &contents)
        .map_err(|e| SheetsError::Io(format!("Failed to write token file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| SheetsError::Io(format!("Failed to set file permissions: {}", e)))?;
    }

    Ok(())
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Exchange a refresh token for a new access token.
pub fn refresh_access_token(
    http: &reqwest::blocking::Client,
    secrets: &ClientSecrets,
    refresh_token: &str,
    now: u64,
) -> Result<StoredToken, SheetsError> {
    let response = http
        .post(&secrets.token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
        ])
        .send()
        .map_err(|e| SheetsError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().unwrap_or_default();
        if status == 400 || status == 401 {
            return Err(SheetsError::NotAuthenticated(format!("token refresh rejected: {}", body)));
        }
        return Err(SheetsError::Http(status, body));
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| SheetsError::Parse(e.to_string()))?;

    Ok(StoredToken {
        access_token: token.access_token,
        // Google normally omits the refresh token on refresh; keep the old one.
        refresh_token: token.refresh_token.or_else(|| Some(refresh_token.to_string())),
        expires_at: token.expires_in.map(|secs| now + secs),
    })
}

/// Return a usable access token, refreshing and re-saving it when expired.
pub fn resolve_access_token(
    http: &reqwest::blocking::Client,
    credentials_path: &Path,
    token_path: &Path,
) -> Result<String, SheetsError> {
    let token = load_token(token_path)?.ok_or_else(|| {
        SheetsError::NotAuthenticated(format!("no token at {}", token_path.display()))
    })?;

    let now = unix_now();
    if !token.is_expired(now) {
        return Ok(token.access_token);
    }

    let refresh = token.refresh_token.as_deref().ok_or_else(|| {
        SheetsError::NotAuthenticated("token expired and has no refresh token".into())
    })?;

    log::info!("access token expired, refreshing");
    let secrets = ClientSecrets::load(credentials_path)?;
    let refreshed = refresh_access_token(http, &secrets, refresh, now)?;
    save_token(token_path, &refreshed)?;
    Ok(refreshed.access_token)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
