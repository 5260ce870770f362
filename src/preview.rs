use std::fmt;

use arrow::util::display::{ArrayFormatter, FormatOptions};
use unicode_width::UnicodeWidthStr;

use crate::errors::CrossbowResult;
use crate::table::Table;

/// Leading rows shown when no row count is given
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// The first few rows of a table, formatted for the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl Preview {
    /// Format at most `max_rows` leading rows of `table`. Nulls render as empty cells.
    pub fn from_table(table: &Table, max_rows: usize) -> CrossbowResult<Preview> {
        let batch = table.batch();
        let num_rows = batch.num_rows().min(max_rows);
        let options = FormatOptions::default().with_null("");

        let formatters = batch
            .columns()
            .iter()
            .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = (0..num_rows)
            .map(|row| {
                formatters
                    .iter()
                    .map(|formatter| formatter.value(row).try_to_string())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Preview {
            headers: table.column_names(),
            rows,
            total_rows: batch.num_rows(),
        })
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (width, field) in widths.iter_mut().zip(row) {
                *width = (*width).max(field.width());
            }
        }
        widths
    }
}

fn pad(f: &mut fmt::Formatter, text: &str, width: usize) -> fmt::Result {
    write!(f, "{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.column_widths();
        let index_width = self.rows.len().max(1).to_string().len();

        // Header line, indented past the row numbers
        write!(f, "{}", " ".repeat(index_width))?;
        for (header, width) in self.headers.iter().zip(&widths) {
            write!(f, "  ")?;
            pad(f, header, *width)?;
        }
        writeln!(f)?;

        let rule_width = index_width + widths.iter().map(|w| w + 2).sum::<usize>();
        writeln!(f, "{}", "─".repeat(rule_width))?;

        for (i, row) in self.rows.iter().enumerate() {
            pad(f, &(i + 1).to_string(), index_width)?;
            for (field, width) in row.iter().zip(&widths) {
                write!(f, "  ")?;
                pad(f, field, *width)?;
            }
            writeln!(f)?;
        }

        write!(
            f,
            "[{} of {} rows x {} columns]",
            self.rows.len(),
            self.total_rows,
            self.headers.len()
        )
    }
}
