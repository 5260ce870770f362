use std::path::Path;

use tracing::{debug, error};

use crate::common::FileKind;
use crate::engine::TabularEngine;

/// Sheets available for a selected file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetListing {
    /// The file has no sheets to choose from, e.g. a CSV file
    NotApplicable,

    /// Sheet names in workbook order. Empty when the workbook could not be read.
    Sheets(Vec<String>),
}

/// Look up the sheets of `path` through `engine`.
///
/// Failures to open the workbook are logged and reported as an empty listing; the read that
/// follows will surface the underlying error.
pub fn resolve_sheets<E: TabularEngine + ?Sized>(engine: &E, path: &Path) -> SheetListing {
    if FileKind::from_path(path) != FileKind::Spreadsheet {
        return SheetListing::NotApplicable;
    }
    match engine.sheet_names(path) {
        Ok(sheets) => {
            debug!("{} has {} sheets", path.display(), sheets.len());
            SheetListing::Sheets(sheets)
        }
        Err(e) => {
            error!("Error retrieving sheet names from {}: {}", path.display(), e);
            SheetListing::Sheets(vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ArrowEngine;
    use crate::logging::capture_logs;

    #[test]
    fn test_lists_sheets_in_order() {
        let listing = resolve_sheets(&ArrowEngine, Path::new("tests/data/sales.xlsx"));
        assert_eq!(
            listing,
            SheetListing::Sheets(vec!["Q1".to_owned(), "Q2".to_owned()])
        );
    }

    #[test]
    fn test_delimited_is_not_applicable() {
        let listing = resolve_sheets(&ArrowEngine, Path::new("tests/data/simple.csv"));
        assert_eq!(listing, SheetListing::NotApplicable);
    }

    #[test]
    fn test_missing_workbook_is_empty_and_logged() {
        let (listing, logs) = capture_logs(|| {
            resolve_sheets(&ArrowEngine, Path::new("tests/data/missing.xlsx"))
        });
        assert_eq!(listing, SheetListing::Sheets(vec![]));
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("File not found"));
    }

    #[test]
    fn test_corrupt_workbook_is_empty() {
        let (listing, _) = capture_logs(|| {
            resolve_sheets(&ArrowEngine, Path::new("tests/data/not_a_workbook.xlsx"))
        });
        assert_eq!(listing, SheetListing::Sheets(vec![]));
    }
}
