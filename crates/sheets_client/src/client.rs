//! Google Sheets v4 HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers the four calls a grid run needs: duplicate a sheet, read a range,
//! read a range as a header + rows table, write a range.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{api_error_message, SheetsError};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// The spreadsheet operations a grid run depends on.
pub trait SpreadsheetService {
    /// Copy `source_sheet_id` into a new sheet named `new_sheet_name`,
    /// inserted as the first tab.
    fn duplicate_sheet(
        &self,
        spreadsheet_id: &str,
        source_sheet_id: i64,
        new_sheet_name: &str,
    ) -> Result<(), SheetsError>;

    /// Read a range as rows of strings. An empty range is an error.
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, SheetsError>;

    /// Read a range and split off its first row as the header.
    fn read_range_as_table(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<(Vec<String>, Vec<Vec<String>>), SheetsError> {
        let mut rows = self.read_range(spreadsheet_id, range)?.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| SheetsError::EmptyData(range.to_string()))?;
        Ok((header, rows.collect()))
    }

    /// Overwrite a range with `values`, row-major.
    fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError>;
}

/// Sheets API client (blocking).
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

impl SheetsClient {
    /// Build the underlying HTTP client. Also used for token refresh, so one
    /// client serves the whole run.
    pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, SheetsError> {
        reqwest::blocking::Client::builder()
            .user_agent(format!("bingo/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SheetsError::Network(format!("Failed to create HTTP client: {}", e)))
    }

    /// Create a client with an explicit bearer token.
    pub fn new(http: reqwest::blocking::Client, api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// `{api_base}/v4/spreadsheets/{id}/...`, each segment percent-encoded.
    fn url(&self, spreadsheet_id: &str, tail: &[&str]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| SheetsError::Parse(format!("invalid api_base {}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Parse(format!("api_base cannot be a base URL: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id])
            .extend(tail);
        Ok(url)
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, SheetsError> {
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 401 || status == 403 {
                return Err(SheetsError::NotAuthenticated(api_error_message(&body)));
            }
            return Err(SheetsError::Http(status, api_error_message(&body)));
        }
        Ok(response)
    }
}

impl SpreadsheetService for SheetsClient {
    /// POST /v4/spreadsheets/:id:batchUpdate
    fn duplicate_sheet(
        &self,
        spreadsheet_id: &str,
        source_sheet_id: i64,
        new_sheet_name: &str,
    ) -> Result<(), SheetsError> {
        let mut url = self.url(spreadsheet_id, &[])?;
        // The RPC suffix lives on the id segment: /spreadsheets/{id}:batchUpdate
        let path = format!("{}:batchUpdate", url.path());
        url.set_path(&path);

        let body = serde_json::json!({
            "requests": [{
                "duplicateSheet": {
                    "sourceSheetId": source_sheet_id,
                    "newSheetName": new_sheet_name,
                    "insertSheetIndex": 0,
                }
            }]
        });

        let response = self.http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        match Self::check(response) {
            Ok(_) => Ok(()),
            Err(SheetsError::Http(400 | 404, msg)) => Err(SheetsError::Duplication(msg)),
            Err(e) => Err(e),
        }
    }

    /// GET /v4/spreadsheets/:id/values/:range
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.url(spreadsheet_id, &["values", range])?;

        let response = self.http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        let parsed: ValueRange = Self::check(response)?
            .json()
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        if parsed.values.is_empty() {
            return Err(SheetsError::EmptyData(range.to_string()));
        }

        Ok(parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// PUT /v4/spreadsheets/:id/values/:range?valueInputOption=RAW
    fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<(), SheetsError> {
        let mut url = self.url(spreadsheet_id, &["values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRangeBody { range, major_dimension: "ROWS", values };

        let response = self.http
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        Self::check(response)?;
        Ok(())
    }
}

/// Formatted values arrive as strings; anything else is rendered as JSON text.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
