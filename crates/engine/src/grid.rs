//! Grid filling: replace each mask label with an item from its pool.

use crate::error::EngineError;
use crate::mask::{BlankCells, Mask};
use crate::pool::Pool;

/// Filled bingo grid. Same row lengths as the mask it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// True when the grid has exactly the mask's row lengths.
    pub fn matches_shape(&self, mask: &Mask) -> bool {
        self.rows.len() == mask.row_count()
            && self.rows.iter().zip(mask.rows()).all(|(g, m)| g.len() == m.len())
    }
}

/// Fill `mask` in row-major order, taking one item per cell from the pool.
///
/// Consumes the pool. Every pool must end empty: the pool has to be built
/// from occurrence counts of this same mask.
pub fn fill_grid(mask: &Mask, mut pool: Pool, blanks: BlankCells) -> Result<Grid, EngineError> {
    let mut rows = Vec::with_capacity(mask.row_count());

    for mask_row in mask.rows() {
        let mut row = Vec::with_capacity(mask_row.len());
        for label in mask_row {
            if !blanks.includes(label) {
                row.push(label.clone());
                continue;
            }
            let category = pool
                .get_mut(label)
                .ok_or_else(|| EngineError::CategoryNotFound(label.clone()))?;
            let item = category
                .remove_one()
                .ok_or_else(|| EngineError::PoolExhausted(label.clone()))?;
            row.push(item);
        }
        rows.push(row);
    }

    if let Some((category, left)) = pool.iter().find(|(_, p)| !p.is_empty()) {
        return Err(EngineError::LeftoverItems {
            category: category.to_string(),
            remaining: left.len(),
        });
    }

    Ok(Grid { rows })
}
