use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use calamine::{Reader, Sheets, open_workbook_auto};
use tracing::debug;

use crate::delimiter::Delimiter;
use crate::errors::{CrossbowError, CrossbowResult};
use crate::table::Table;

/// Options that shape how a file is turned into a table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: Delimiter,
    pub has_headers: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: Delimiter::Default,
            has_headers: true,
        }
    }
}

/// The parsing backend that turns files into tables
pub trait TabularEngine {
    /// Sheet names of a workbook, in workbook order
    fn sheet_names(&self, path: &Path) -> CrossbowResult<Vec<String>>;

    fn read_spreadsheet(
        &self,
        path: &Path,
        sheet: &str,
        options: &ReadOptions,
    ) -> CrossbowResult<Table>;

    fn read_delimited(&self, path: &Path, options: &ReadOptions) -> CrossbowResult<Table>;
}

/// Engine backed by calamine for workbooks and the arrow CSV reader for delimited text
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrowEngine;

impl ArrowEngine {
    fn open_workbook(path: &Path) -> CrossbowResult<Sheets<BufReader<File>>> {
        if !path.exists() {
            return Err(CrossbowError::FileNotFound(path.display().to_string()));
        }
        open_workbook_auto(path).map_err(|e| CrossbowError::Workbook {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn open_file(path: &Path) -> CrossbowResult<File> {
        File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CrossbowError::FileNotFound(path.display().to_string()),
            _ => e.into(),
        })
    }
}

impl TabularEngine for ArrowEngine {
    fn sheet_names(&self, path: &Path) -> CrossbowResult<Vec<String>> {
        let workbook = Self::open_workbook(path)?;
        Ok(workbook.sheet_names())
    }

    fn read_spreadsheet(
        &self,
        path: &Path,
        sheet: &str,
        options: &ReadOptions,
    ) -> CrossbowResult<Table> {
        let mut workbook = Self::open_workbook(path)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(CrossbowError::SheetNotFound {
                path: path.display().to_string(),
                sheet: sheet.to_owned(),
            });
        }
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| CrossbowError::Workbook {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(
            "Sheet {} spans {} rows x {} columns",
            sheet,
            range.height(),
            range.width()
        );
        Table::from_cells(&range, options.has_headers)
    }

    fn read_delimited(&self, path: &Path, options: &ReadOptions) -> CrossbowResult<Table> {
        let mut file = Self::open_file(path)?;
        let delimiter = options.delimiter.byte_for(&path.to_string_lossy());

        let format = Format::default()
            .with_header(options.has_headers)
            .with_delimiter(delimiter);
        // Every record is read below, so sample all of them to avoid a narrower guess
        let (schema, records_read) = format.infer_schema(&mut file, None)?;
        debug!(
            "Inferred {} columns from {} records",
            schema.fields().len(),
            records_read
        );
        file.rewind()?;

        let schema = Arc::new(schema);
        let reader = ReaderBuilder::new(schema.clone())
            .with_header(options.has_headers)
            .with_delimiter(delimiter)
            .build(file)?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        Table::from_batches(schema, &batches)
    }
}
