//! `bingo` run: duplicate the mask sheet, read mask and items, fill, write.
//!
//! The spreadsheet side is any [`SpreadsheetService`], so the whole run can be
//! driven against an in-memory service in tests.
//!
//! A failure after the duplicate step leaves the new sheet in place, still
//! holding the mask labels. Nothing is rolled back.

use std::fmt;

use rand::Rng;

use bingo_engine::{count_occurrences, build_pool, fill_grid, BlankCells, EngineError, ItemTable, Mask};
use bingo_sheets_client::{sheet_range, SheetsError, SpreadsheetService};

/// What to generate: the three command-line inputs.
#[derive(Debug, Clone)]
pub struct GridRequest {
    /// Sheet (tab) name of the item repository.
    pub repo_sheet: String,
    /// Sheet id (gid) of the mask to copy.
    pub mask_sheet_id: i64,
    /// Name of the new sheet that receives the grid.
    pub grid_sheet: String,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// A1 cell window for reads and writes, e.g. `A1:AA1000`.
    pub cells: String,
    pub blank_cells: BlankCells,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSummary {
    pub range: String,
    pub rows: usize,
    pub cells: usize,
    pub categories: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Duplicate,
    ReadMask,
    ReadItems,
    Fill,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "duplicate mask"),
            Self::ReadMask => write!(f, "read mask"),
            Self::ReadItems => write!(f, "read items"),
            Self::Fill => write!(f, "fill grid"),
            Self::Write => write!(f, "write grid"),
        }
    }
}

#[derive(Debug)]
pub enum RunErrorKind {
    Sheets(SheetsError),
    Engine(EngineError),
}

#[derive(Debug)]
pub struct RunError {
    pub stage: Stage,
    pub kind: RunErrorKind,
}

impl RunError {
    fn sheets(stage: Stage) -> impl FnOnce(SheetsError) -> Self {
        move |e| Self { stage, kind: RunErrorKind::Sheets(e) }
    }

    fn engine(e: EngineError) -> Self {
        Self { stage: Stage::Fill, kind: RunErrorKind::Engine(e) }
    }

    /// True when the new sheet exists but was never filled.
    pub fn left_unfilled_sheet(&self) -> bool {
        self.stage != Stage::Duplicate
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RunErrorKind::Sheets(e) => write!(f, "{}: {}", self.stage, e),
            RunErrorKind::Engine(e) => write!(f, "{}: {}", self.stage, e),
        }
    }
}

impl std::error::Error for RunError {}

/// Generate one bingo grid into a new sheet.
pub fn generate_bingo<S, R>(
    service: &S,
    spreadsheet_id: &str,
    request: &GridRequest,
    options: &RunOptions,
    rng: &mut R,
) -> Result<GridSummary, RunError>
where
    S: SpreadsheetService + ?Sized,
    R: Rng + ?Sized,
{
    log::info!(
        "duplicating mask sheet {} into '{}'",
        request.mask_sheet_id,
        request.grid_sheet
    );
    service
        .duplicate_sheet(spreadsheet_id, request.mask_sheet_id, &request.grid_sheet)
        .map_err(RunError::sheets(Stage::Duplicate))?;

    let grid_range = sheet_range(&request.grid_sheet, &options.cells);
    let mask = Mask::new(
        service
            .read_range(spreadsheet_id, &grid_range)
            .map_err(RunError::sheets(Stage::ReadMask))?,
    );
    log::info!("read mask {}: {} row(s), {} cell(s)", grid_range, mask.row_count(), mask.cell_count());

    let items_range = sheet_range(&request.repo_sheet, &options.cells);
    let (header, rows) = service
        .read_range_as_table(spreadsheet_id, &items_range)
        .map_err(RunError::sheets(Stage::ReadItems))?;
    let table = ItemTable::from_table(&header, &rows);
    log::info!("read items {}: {} categor{}", items_range, table.len(), if table.len() == 1 { "y" } else { "ies" });

    // Pool is drawn once, up front, so no category repeats an item.
    let occurrences = count_occurrences(&mask, options.blank_cells);
    for (category, count) in &occurrences {
        log::debug!("category '{}' appears {} time(s)", category, count);
    }
    let pool = build_pool(&occurrences, &table, rng).map_err(RunError::engine)?;
    let grid = fill_grid(&mask, pool, options.blank_cells).map_err(RunError::engine)?;

    let summary = GridSummary {
        range: grid_range,
        rows: grid.row_count(),
        cells: mask.cell_count(),
        categories: occurrences.len(),
    };

    service
        .write_range(spreadsheet_id, &summary.range, grid.rows())
        .map_err(RunError::sheets(Stage::Write))?;
    log::info!("Sheet successfully updated: {}", summary.range);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory spreadsheet: sheets by name, plus gid → name for duplication.
    #[derive(Default)]
    struct MemorySheets {
        sheets: RefCell<HashMap<String, Vec<Vec<String>>>>,
        gids: HashMap<i64, String>,
        calls: RefCell<Vec<String>>,
    }

    impl MemorySheets {
        fn with_sheet(mut self, gid: i64, name: &str, rows: &[&[&str]]) -> Self {
            let rows = rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect();
            self.sheets.borrow_mut().insert(name.to_string(), rows);
            self.gids.insert(gid, name.to_string());
            self
        }

        fn sheet(&self, name: &str) -> Option<Vec<Vec<String>>> {
            self.sheets.borrow().get(name).cloned()
        }

        /// `'Name'!A1:AA1000` → `Name`
        fn sheet_name(range: &str) -> String {
            let name = range.rsplit_once('!').map(|(n, _)| n).unwrap_or(range);
            name.trim_matches('\'').replace("''", "'")
        }
    }

    impl SpreadsheetService for MemorySheets {
        fn duplicate_sheet(&self, _: &str, source: i64, new_name: &str) -> Result<(), SheetsError> {
            self.calls.borrow_mut().push(format!("duplicate {source} {new_name}"));
            let source_name = self
                .gids
                .get(&source)
                .ok_or_else(|| SheetsError::Duplication(format!("No grid with id: {source}")))?;
            let mut sheets = self.sheets.borrow_mut();
            if sheets.contains_key(new_name) {
                return Err(SheetsError::Duplication(format!("'{new_name}' already exists")));
            }
            let copy = sheets[source_name].clone();
            sheets.insert(new_name.to_string(), copy);
            Ok(())
        }

        fn read_range(&self, _: &str, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
            self.calls.borrow_mut().push(format!("read {range}"));
            match self.sheets.borrow().get(&Self::sheet_name(range)) {
                Some(rows) if !rows.is_empty() => Ok(rows.clone()),
                _ => Err(SheetsError::EmptyData(range.to_string())),
            }
        }

        fn write_range(&self, _: &str, range: &str, values: &[Vec<String>]) -> Result<(), SheetsError> {
            self.calls.borrow_mut().push(format!("write {range}"));
            self.sheets.borrow_mut().insert(Self::sheet_name(range), values.to_vec());
            Ok(())
        }
    }

    fn request(grid: &str) -> GridRequest {
        GridRequest { repo_sheet: "Items".into(), mask_sheet_id: 7, grid_sheet: grid.into() }
    }

    fn options() -> RunOptions {
        RunOptions { cells: "A1:AA1000".into(), blank_cells: BlankCells::Category }
    }

    fn service() -> MemorySheets {
        MemorySheets::default()
            .with_sheet(7, "Mask", &[&["A", "A"], &["B", "A"]])
            .with_sheet(9, "Items", &[&["A", "B"], &["a1", "b1"], &["a2"], &["a3", ""]])
    }

    #[test]
    fn test_full_run() {
        let sheets = service();
        let mut rng = StdRng::seed_from_u64(11);
        let summary = generate_bingo(&sheets, "sid", &request("Week 1"), &options(), &mut rng).unwrap();

        assert_eq!(summary.range, "'Week 1'!A1:AA1000");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.cells, 4);
        assert_eq!(summary.categories, 2);

        let grid = sheets.sheet("Week 1").unwrap();
        assert_eq!(grid[1][0], "b1");
        let mut a = vec![grid[0][0].clone(), grid[0][1].clone(), grid[1][1].clone()];
        a.sort();
        assert_eq!(a, vec!["a1", "a2", "a3"]);

        // Mask itself is untouched.
        assert_eq!(sheets.sheet("Mask").unwrap()[0][0], "A");

        let calls = sheets.calls.borrow();
        assert_eq!(calls[0], "duplicate 7 Week 1");
        assert_eq!(calls[1], "read 'Week 1'!A1:AA1000");
        assert_eq!(calls[2], "read 'Items'!A1:AA1000");
        assert_eq!(calls[3], "write 'Week 1'!A1:AA1000");
    }

    #[test]
    fn test_duplicate_failure_leaves_nothing() {
        let sheets = service();
        let mut req = request("Week 1");
        req.mask_sheet_id = 404;

        let err = generate_bingo(&sheets, "sid", &req, &options(), &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.stage, Stage::Duplicate);
        assert!(!err.left_unfilled_sheet());
        assert!(matches!(err.kind, RunErrorKind::Sheets(SheetsError::Duplication(_))));
        assert!(sheets.sheet("Week 1").is_none());
    }

    #[test]
    fn test_insufficient_items_leaves_unfilled_sheet() {
        let sheets = MemorySheets::default()
            .with_sheet(7, "Mask", &[&["A", "A", "A", "A"]])
            .with_sheet(9, "Items", &[&["A"], &["a1"], &["a2"]]);

        let err = generate_bingo(&sheets, "sid", &request("G"), &options(), &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err.stage, Stage::Fill);
        assert!(err.left_unfilled_sheet());
        assert!(matches!(
            err.kind,
            RunErrorKind::Engine(EngineError::InsufficientItems { required: 4, available: 2, .. })
        ));
        // Duplicated sheet still shows the mask labels.
        assert_eq!(sheets.sheet("G").unwrap()[0][0], "A");
        assert!(err.to_string().starts_with("fill grid: "));
    }

    #[test]
    fn test_empty_items_sheet() {
        let sheets = MemorySheets::default()
            .with_sheet(7, "Mask", &[&["A"]])
            .with_sheet(9, "Items", &[]);

        let err = generate_bingo(&sheets, "sid", &request("G"), &options(), &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err.stage, Stage::ReadItems);
        assert!(matches!(err.kind, RunErrorKind::Sheets(SheetsError::EmptyData(_))));
    }

    #[test]
    fn test_skip_blank_mask_cells() {
        let sheets = MemorySheets::default()
            .with_sheet(7, "Mask", &[&["A", ""], &["", "A"]])
            .with_sheet(9, "Items", &[&["A"], &["a1"], &["a2"]]);
        let opts = RunOptions { blank_cells: BlankCells::Skip, ..options() };

        generate_bingo(&sheets, "sid", &request("G"), &opts, &mut StdRng::seed_from_u64(5)).unwrap();
        let grid = sheets.sheet("G").unwrap();
        assert_eq!(grid[0][1], "");
        assert_eq!(grid[1][0], "");
    }
}
