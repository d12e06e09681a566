//! A1-notation helpers.

/// Cell window used for every read and write unless configured otherwise.
pub const DEFAULT_CELLS: &str = "A1:AA1000";

/// Build `'<sheet>'!<cells>`. Quotes inside the sheet name are doubled, so
/// names with spaces or punctuation are safe.
pub fn sheet_range(sheet: &str, cells: &str) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), cells)
}
