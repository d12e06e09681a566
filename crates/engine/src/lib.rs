//! `bingo-engine` — bingo grid generation.
//!
//! Pure crate: receives a mask and an item repository already read into
//! memory, returns a filled grid. No network or file IO.
//!
//! Pipeline: mask → occurrence counts → pool (random draw per category) →
//! grid (one pool item per mask cell).

pub mod error;
pub mod grid;
pub mod items;
pub mod mask;
pub mod pool;

use rand::Rng;

pub use error::EngineError;
pub use grid::{fill_grid, Grid};
pub use items::ItemTable;
pub use mask::{count_occurrences, BlankCells, Mask, OccurrenceCounts};
pub use pool::{build_pool, CategoryPool, Pool};

/// Count, draw, and fill in one call.
pub fn generate_grid<R: Rng + ?Sized>(
    mask: &Mask,
    table: &ItemTable,
    blanks: BlankCells,
    rng: &mut R,
) -> Result<Grid, EngineError> {
    let occurrences = count_occurrences(mask, blanks);
    log::info!(
        "mask has {} cell(s) across {} categor{}",
        mask.cell_count(),
        occurrences.len(),
        if occurrences.len() == 1 { "y" } else { "ies" }
    );
    let pool = build_pool(&occurrences, table, rng)?;
    fill_grid(mask, pool, blanks)
}
