//! Google Sheets client — the spreadsheet side of a grid run.
//!
//! Owns the wire contract with the Sheets v4 API and the OAuth token file.
//! No engine concepts. No retries. No consent flow.

mod auth;
mod client;
mod error;
mod range;

pub use auth::{
    load_token, refresh_access_token, resolve_access_token, save_token, ClientSecrets, StoredToken,
};
pub use client::{SheetsClient, SpreadsheetService, DEFAULT_API_BASE};
pub use error::SheetsError;
pub use range::{sheet_range, DEFAULT_CELLS};
