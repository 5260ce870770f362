use std::fmt;
use std::path::Path;

/// Spreadsheet formats read through the workbook reader
pub const SPREADSHEET_EXTENSIONS: &[&str] = &[".xlsx", ".xlsm", ".xlsb", ".xls", ".ods"];

/// Delimited text formats read through the CSV reader
pub const DELIMITED_EXTENSIONS: &[&str] = &[".csv", ".tsv", ".txt"];

#[derive(Clone, PartialEq, Eq, Hash, Copy, Debug)]
pub enum FileKind {
    Spreadsheet,
    Delimited,
}

impl FileKind {
    /// Classify by extension, case-insensitively. Anything that is not a spreadsheet is read as
    /// delimited text.
    pub fn from_path(path: impl AsRef<Path>) -> FileKind {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        if has_extension(&name, SPREADSHEET_EXTENSIONS) {
            FileKind::Spreadsheet
        } else {
            FileKind::Delimited
        }
    }

    /// Whether a file name carries any extension crossbow knows how to load
    pub fn is_recognized(name: &str) -> bool {
        let name = name.to_lowercase();
        has_extension(&name, SPREADSHEET_EXTENSIONS) || has_extension(&name, DELIMITED_EXTENSIONS)
    }
}

fn has_extension(lowercase_name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| lowercase_name.ends_with(ext))
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
