use thiserror::Error;

pub type CrossbowResult<T> = std::result::Result<T, CrossbowError>;

/// Errors crossbow can have
#[derive(Debug, Error)]
pub enum CrossbowError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open workbook {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: String, sheet: String },

    #[error("Workbook {0} has no sheets")]
    NoSheets(String),

    #[error("A sheet name is required to read {path} (available: {})", .sheets.join(", "))]
    MissingSheetName { path: String, sheets: Vec<String> },

    #[error("Delimiter should not be empty")]
    DelimiterEmpty,

    #[error("Delimiter should be within the ASCII range: {0} is too fancy")]
    DelimiterNotAscii(char),

    #[error("Delimiter should be exactly one character (or \\t), got '{0}'")]
    DelimiterMultipleCharacters(String),

    #[error(transparent)]
    DelimiterParsing(#[from] std::char::TryFromCharError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CrossbowError {
    /// Whether this error is a caller contract violation rather than a failure to read data
    pub fn is_usage_error(&self) -> bool {
        matches!(self, CrossbowError::MissingSheetName { .. })
    }
}
