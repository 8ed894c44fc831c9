use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::{DashboardError, Result};
use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse an in-memory delimited text table with a header row.
///
/// Fails with [`DashboardError::MalformedInput`] when the header is missing,
/// a row has the wrong number of fields, or a column name repeats.
/// Cells are typed but not required to be numeric here; that is checked by
/// the series extractor.
pub fn load_bytes(bytes: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::malformed(format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(DashboardError::malformed("no header row"));
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DashboardError::malformed(format!("row {row_no}: {e}")))?;
        if record.len() != headers.len() {
            return Err(DashboardError::malformed(format!(
                "row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
        for (col_idx, value) in record.iter().enumerate() {
            cells[col_idx].push(CellValue::guess(value));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::new(columns)
}

/// Load a glucose table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited text with a header row
/// * `.tsv`          – tab-delimited text with a header row
/// * `.json`         – `{"columns": [...], "data": [[...], ...]}`
/// * `.parquet`      – one flat scalar column per table column
pub fn load_file(path: &Path) -> anyhow::Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn load_delimited(path: &Path, delimiter: u8) -> anyhow::Result<Table> {
    let bytes = std::fs::read(path).context("reading table file")?;
    let table = load_bytes(&bytes, delimiter).context("parsing delimited table")?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Split orientation, the layout written by `df.to_json(orient='split')`:
///
/// ```json
/// {
///   "columns": ["Time", "Person_1", "Person_2"],
///   "data": [[0.0, 98.2, 101.5], [0.25, 99.0, 103.1]]
/// }
/// ```
///
/// Any `index` field is ignored.
#[derive(Debug, Deserialize)]
struct SplitFrame {
    columns: Vec<String>,
    data: Vec<Vec<JsonValue>>,
}

fn load_json(path: &Path) -> anyhow::Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let frame: SplitFrame = serde_json::from_str(&text).context("parsing JSON")?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); frame.columns.len()];
    for (row_no, row) in frame.data.iter().enumerate() {
        if row.len() != frame.columns.len() {
            bail!(
                "Row {row_no}: expected {} values, found {}",
                frame.columns.len(),
                row.len()
            );
        }
        for (col_idx, val) in row.iter().enumerate() {
            cells[col_idx].push(json_to_cell(val));
        }
    }

    let columns = frame
        .columns
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Ok(Table::new(columns)?)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Number(n) => n.as_f64().map(number_cell).unwrap_or(CellValue::Empty),
        JsonValue::String(s) => CellValue::guess(s),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn number_cell(v: f64) -> CellValue {
    if v.is_finite() {
        CellValue::Number(v)
    } else {
        CellValue::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are flat scalars (floats, ints or
/// strings).  Column order follows the file schema.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> anyhow::Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, out) in cells.iter_mut().enumerate() {
            let col = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                let cell = extract_cell(col, row)
                    .with_context(|| format!("column '{}', row {row}", names[col_idx]))?;
                out.push(cell);
            }
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Ok(Table::new(columns)?)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Empty);
    }
    let cell = match col.data_type() {
        DataType::Float64 => number_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => number_cell(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => CellValue::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Utf8 => CellValue::guess(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => CellValue::guess(col.as_string::<i64>().value(row)),
        other => bail!("Unsupported column type {other:?}"),
    };
    Ok(cell)
}
