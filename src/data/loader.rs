use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{DataError, Metric, MetricRecord, MetricTable, Round};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a depth summary table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `Depth,Round,Accuracy,Precision,Recall,F1` (as written
///   by the experiment driver; extra columns are ignored)
/// * `.json`    – `[{ "Depth": 1, "Round": 2, "Accuracy": 91.3, ... }, ...]`
/// * `.parquet` – the same columns as flat numeric fields
pub fn load_file(path: &Path) -> Result<MetricTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows ({} distinct depths) from {}",
        table.len(),
        table.depths.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<MetricTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<MetricTable> {
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<MetricRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(MetricTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<MetricTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<MetricTable> {
    let records: Vec<MetricRecord> =
        serde_json::from_str(text).context("parsing JSON records")?;
    Ok(MetricTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the summary as flat numeric columns.
///
/// `Depth` and `Round` may be any 32/64-bit integer type; metric columns may
/// be Float32/Float64 or integers.
fn load_parquet(path: &Path) -> Result<MetricTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        records.extend(batch_to_records(&batch, offset)?);
    }

    Ok(MetricTable::from_records(records))
}

/// Convert one record batch; `offset` is the absolute index of its first row.
fn batch_to_records(batch: &RecordBatch, offset: usize) -> Result<Vec<MetricRecord>> {
    let depth_col = column(batch, "Depth")?;
    let round_col = column(batch, "Round")?;
    let metric_cols = Metric::ALL
        .iter()
        .map(|m| column(batch, m.column()))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let abs_row = offset + row;
        let depth = extract_i64(depth_col, "Depth", abs_row, row)?;
        let depth = u32::try_from(depth)
            .with_context(|| format!("Row {abs_row}: Depth {depth} out of range"))?;
        let round = Round::try_from(extract_i64(round_col, "Round", abs_row, row)?)?;

        let mut values = [0.0; 4];
        for ((slot, col), metric) in values.iter_mut().zip(&metric_cols).zip(Metric::ALL) {
            *slot = extract_f64(col, metric.column(), abs_row, row)?;
        }
        let [accuracy, precision, recall, f1] = values;

        records.push(MetricRecord {
            depth,
            round,
            accuracy,
            precision,
            recall,
            f1,
        });
    }
    Ok(records)
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn unsupported(col: &Arc<dyn Array>, name: &str) -> DataError {
    DataError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
}

/// Read an integer cell from any 32/64-bit integer column.
fn extract_i64(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<i64> {
    if col.is_null(row) {
        return Err(DataError::NullValue {
            row: abs_row,
            column: name.to_string(),
        }
        .into());
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as i64),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .and_then(|a| i64::try_from(a.value(row)).ok()),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, name).into())
}

/// Read a numeric cell as `f64`; integer columns are widened.
fn extract_f64(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Err(DataError::NullValue {
            row: abs_row,
            column: name.to_string(),
        }
        .into());
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => {
            return extract_i64(col, name, abs_row, row).map(|v| v as f64);
        }
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, name).into())
}
