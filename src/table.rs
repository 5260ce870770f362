use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use calamine::{Data, Range};

use crate::errors::CrossbowResult;

static EMPTY_CELL: Data = Data::Empty;

/// Columnar table loaded from a spreadsheet or a delimited text file
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    /// Build a table from a worksheet grid. With `has_headers`, the first row names the columns.
    pub fn from_cells(range: &Range<Data>, has_headers: bool) -> CrossbowResult<Table> {
        let width = range.width();
        if width == 0 {
            return Ok(Table {
                batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
            });
        }

        let mut rows = range.rows();
        let header_row = if has_headers { rows.next() } else { None };
        let data_rows: Vec<&[Data]> = rows.collect();

        let mut fields = Vec::with_capacity(width);
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(width);
        for col in 0..width {
            let name = header_row
                .and_then(|row| row.get(col))
                .map(cell_to_string)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("column_{}", col + 1));
            let cells = data_rows
                .iter()
                .copied()
                .map(move |row| row.get(col).unwrap_or(&EMPTY_CELL));
            let data_type = infer_column_type(cells.clone());
            columns.push(build_column(&data_type, cells));
            fields.push(Field::new(name, data_type, true));
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
        Ok(Table { batch })
    }

    /// Build a table from the batches produced by a streaming reader
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> CrossbowResult<Table> {
        let batch = arrow::compute::concat_batches(&schema, batches)?;
        Ok(Table { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}

/// Narrowest type that holds every non-empty cell of a column
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a Data>) -> DataType {
    let mut inferred: Option<DataType> = None;
    for cell in cells {
        let cell_type = match cell {
            Data::Empty => continue,
            Data::Bool(_) => DataType::Boolean,
            Data::Int(_) => DataType::Int64,
            Data::Float(_) => DataType::Float64,
            _ => DataType::Utf8,
        };
        inferred = Some(match (inferred, cell_type) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(DataType::Int64), DataType::Float64) | (Some(DataType::Float64), DataType::Int64) => {
                DataType::Float64
            }
            _ => return DataType::Utf8,
        });
    }
    inferred.unwrap_or(DataType::Utf8)
}

fn build_column<'a>(data_type: &DataType, cells: impl Iterator<Item = &'a Data>) -> ArrayRef {
    match data_type {
        DataType::Boolean => Arc::new(BooleanArray::from(
            cells
                .map(|c| match c {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Int64 => Arc::new(Int64Array::from(
            cells
                .map(|c| match c {
                    Data::Int(i) => Some(*i),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            cells
                .map(|c| match c {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        _ => Arc::new(StringArray::from(
            cells
                .map(|c| match c {
                    Data::Empty => None,
                    c => Some(cell_to_string(c)),
                })
                .collect::<Vec<_>>(),
        )),
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERROR: {:?}", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
