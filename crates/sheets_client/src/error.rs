/// Error type for spreadsheet service operations.
#[derive(Debug)]
pub enum SheetsError {
    /// No usable OAuth token (missing, expired without refresh token, bad secrets)
    NotAuthenticated(String),
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// File I/O error
    Io(String),
    /// Service refused to duplicate the sheet (bad source id, name taken)
    Duplication(String),
    /// A read returned no values
    EmptyData(String),
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::NotAuthenticated(msg) => write!(f, "Not authenticated: {}", msg),
            SheetsError::Network(msg) => write!(f, "Network error: {}", msg),
            SheetsError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            SheetsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SheetsError::Io(msg) => write!(f, "I/O error: {}", msg),
            SheetsError::Duplication(msg) => write!(f, "Could not duplicate sheet: {}", msg),
            SheetsError::EmptyData(range) => write!(f, "No data found in {}", range),
        }
    }
}

impl std::error::Error for SheetsError {}

/// Pull the human-readable message out of a Google API error body,
/// falling back to the raw body.
pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}
