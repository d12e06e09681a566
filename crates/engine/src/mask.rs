//! Grid masks and category occurrence counting.
//!
//! A mask is the template sheet: every cell holds a category label, not
//! content. Rows keep the length the source returned them with. The Sheets
//! API trims trailing blank cells, so rows may be ragged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How blank mask cells (`""` or whitespace only) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankCells {
    /// Blank is a category like any other and must have candidates.
    #[default]
    Category,
    /// Blank cells stay blank in the grid and draw nothing.
    Skip,
}

impl BlankCells {
    /// Whether a cell with this label takes part in counting and filling.
    pub fn includes(&self, label: &str) -> bool {
        match self {
            BlankCells::Category => true,
            BlankCells::Skip => !is_blank(label),
        }
    }
}

/// Number of times each category label appears in a mask.
///
/// Ordered by label so that pools built from a seeded RNG are reproducible.
pub type OccurrenceCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask {
    rows: Vec<Vec<String>>,
}

impl Mask {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Iterate labels in row-major order as `(row, col, label)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, label)| (i, j, label.as_str()))
        })
    }
}

impl From<Vec<Vec<String>>> for Mask {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// Count how many cells carry each category label.
pub fn count_occurrences(mask: &Mask, blanks: BlankCells) -> OccurrenceCounts {
    let mut counts = OccurrenceCounts::new();
    for (_, _, label) in mask.cells() {
        if blanks.includes(label) {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&[&str]]) -> Mask {
        Mask::new(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_count_occurrences() {
        let m = mask(&[&["A", "A"], &["B", "A"]]);
        let counts = count_occurrences(&m, BlankCells::Category);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["A"], 3);
        assert_eq!(counts["B"], 1);
    }

    #[test]
    fn test_blank_is_a_category_by_default() {
        let m = mask(&[&["A", ""], &["", "A"]]);
        let counts = count_occurrences(&m, BlankCells::Category);
        assert_eq!(counts[""], 2);
        assert_eq!(counts["A"], 2);
    }

    #[test]
    fn test_skip_blank_cells() {
        let m = mask(&[&["A", ""], &["  ", "A"]]);
        let counts = count_occurrences(&m, BlankCells::Skip);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["A"], 2);
    }

    #[test]
    fn test_ragged_rows() {
        let m = mask(&[&["A", "B", "C"], &["A"], &[]]);
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.col_count(), 3);
        assert_eq!(m.cell_count(), 4);
        assert!(!m.is_empty());

        let cells: Vec<_> = m.cells().collect();
        assert_eq!(cells[3], (1, 0, "A"));
    }

    #[test]
    fn test_empty_mask() {
        let m = Mask::default();
        assert!(m.is_empty());
        assert_eq!(m.col_count(), 0);
        assert!(count_occurrences(&m, BlankCells::Category).is_empty());
    }

    #[test]
    fn test_blank_cells_serde() {
        let skip: BlankCells = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(skip, BlankCells::Skip);
        assert_eq!(serde_json::to_string(&BlankCells::Category).unwrap(), "\"category\"");
    }
}
