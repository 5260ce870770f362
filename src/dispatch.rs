use std::path::Path;

use tracing::{debug, info};

use crate::common::FileKind;
use crate::engine::{ReadOptions, TabularEngine};
use crate::errors::{CrossbowError, CrossbowResult};
use crate::table::Table;

/// Load `path` with the reader matching its extension.
///
/// Spreadsheets need a sheet name. When none is given the workbook is checked: if it has any
/// sheets the call fails with [`CrossbowError::MissingSheetName`] instead of picking one.
pub fn load_table<E: TabularEngine + ?Sized>(
    engine: &E,
    path: &Path,
    sheet: Option<&str>,
    options: &ReadOptions,
) -> CrossbowResult<Table> {
    let kind = FileKind::from_path(path);
    debug!("{} is read as {}", path.display(), kind);
    match kind {
        FileKind::Spreadsheet => {
            let sheet = match sheet.filter(|s| !s.is_empty()) {
                Some(sheet) => sheet,
                None => {
                    let sheets = engine.sheet_names(path)?;
                    if sheets.is_empty() {
                        return Err(CrossbowError::NoSheets(path.display().to_string()));
                    }
                    return Err(CrossbowError::MissingSheetName {
                        path: path.display().to_string(),
                        sheets,
                    });
                }
            };
            info!("Reading spreadsheet {} (sheet: {})", path.display(), sheet);
            engine.read_spreadsheet(path, sheet, options)
        }
        FileKind::Delimited => {
            info!("Reading delimited file {}", path.display());
            engine.read_delimited(path, options)
        }
    }
}
