//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3       | Universal        | Config file missing or invalid           |
//! | 10-19   | engine           | Pool building / grid filling             |
//! | 20-29   | sheets           | Spreadsheet service and auth             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the mapping functions below

use bingo_config::ConfigError;
use bingo_engine::EngineError;
use bingo_sheets_client::SheetsError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - grid written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// Reported for every clap parse error.
pub const EXIT_USAGE: u8 = 2;

/// Config file not found, unreadable, or invalid.
pub const EXIT_CONFIG: u8 = 3;

// =============================================================================
// Engine (10-19)
// =============================================================================

/// A category needs more items than the repository has.
pub const EXIT_INSUFFICIENT_ITEMS: u8 = 10;

/// Mask references a category the repository does not have.
pub const EXIT_CATEGORY_NOT_FOUND: u8 = 11;

/// Pool ran dry or had leftovers while filling (internal consistency).
pub const EXIT_POOL_CONSISTENCY: u8 = 12;

// =============================================================================
// Sheets (20-29)
// =============================================================================

/// No usable OAuth token, or the API rejected it (401/403).
pub const EXIT_SHEETS_NOT_AUTH: u8 = 20;

/// Network failure talking to the API.
pub const EXIT_SHEETS_NETWORK: u8 = 21;

/// API returned an error status.
pub const EXIT_SHEETS_HTTP: u8 = 22;

/// Sheet duplication rejected (bad mask id, name already taken).
pub const EXIT_SHEETS_DUPLICATION: u8 = 23;

/// A read returned no data.
pub const EXIT_SHEETS_EMPTY: u8 = 24;

/// Response could not be parsed.
pub const EXIT_SHEETS_PARSE: u8 = 25;

// =============================================================================
// Mapping
// =============================================================================

pub fn engine_exit_code(err: &EngineError) -> u8 {
    match err {
        EngineError::InsufficientItems { .. } => EXIT_INSUFFICIENT_ITEMS,
        EngineError::CategoryNotFound(_) => EXIT_CATEGORY_NOT_FOUND,
        EngineError::PoolExhausted(_) | EngineError::LeftoverItems { .. } => EXIT_POOL_CONSISTENCY,
    }
}

pub fn sheets_exit_code(err: &SheetsError) -> u8 {
    match err {
        SheetsError::NotAuthenticated(_) => EXIT_SHEETS_NOT_AUTH,
        SheetsError::Network(_) => EXIT_SHEETS_NETWORK,
        SheetsError::Http(..) => EXIT_SHEETS_HTTP,
        SheetsError::Duplication(_) => EXIT_SHEETS_DUPLICATION,
        SheetsError::EmptyData(_) => EXIT_SHEETS_EMPTY,
        SheetsError::Parse(_) => EXIT_SHEETS_PARSE,
        SheetsError::Io(_) => EXIT_ERROR,
    }
}

pub fn config_exit_code(_err: &ConfigError) -> u8 {
    EXIT_CONFIG
}
