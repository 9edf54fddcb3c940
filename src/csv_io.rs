//! Column-wise conversion of CSV tables.
//!
//! Reads a headered table, respells one column into another and writes the
//! table back with every original column and the row order preserved. The
//! whole output is built in memory first, so a failure never leaves a
//! half-written file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::respell::convert_value;
use crate::settings::settings;

/// Cell values read as missing, the same set pandas treats as NA by default.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell)
}

/// Which column to read and which column to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub input: String,
    pub output: String,
}

impl ColumnSpec {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Column names from the global settings.
    pub fn from_settings() -> Self {
        let table = &settings().table;
        Self::new(table.input_column.as_str(), table.output_column.as_str())
    }
}

/// Counts reported after a successful conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvertSummary {
    pub rows: usize,
    pub converted: usize,
    /// Rows whose input cell was empty or an NA marker.
    pub missing: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No '{column}' column found in the CSV (columns: {available})")]
    MissingColumn { column: String, available: String },
    #[error("row {row}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Convert `columns.input` of the CSV at `input` and write the result to `output`.
pub fn convert_csv(
    input: &Path,
    output: &Path,
    columns: &ColumnSpec,
) -> Result<ConvertSummary, CsvError> {
    let file = fs::File::open(input).map_err(|source| CsvError::File {
        path: input.to_path_buf(),
        source,
    })?;

    let mut buf = Vec::new();
    let summary = convert_records(io::BufReader::new(file), &mut buf, columns)?;

    fs::write(output, &buf).map_err(|source| CsvError::File {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        input = %input.display(),
        output = %output.display(),
        rows = summary.rows,
        "table converted"
    );
    Ok(summary)
}

/// Stream form of [`convert_csv`]. Nothing is written to `writer` unless the
/// whole table converted.
///
/// Short rows are padded with empty fields. An empty input cell or an NA
/// marker such as `NaN` counts as a missing value and yields an empty output
/// cell; the input cell itself is written back untouched. If the output column
/// already exists its values are replaced in place; otherwise it is appended.
pub fn convert_records<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
    columns: &ColumnSpec,
) -> Result<ConvertSummary, CsvError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let input_idx = headers
        .iter()
        .position(|h| h == columns.input)
        .ok_or_else(|| CsvError::MissingColumn {
            column: columns.input.clone(),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })?;
    let output_idx = headers.iter().position(|h| h == columns.output);
    let width = headers.len();

    let mut out_headers = headers.clone();
    if output_idx.is_none() {
        out_headers.push_field(&columns.output);
    }

    let mut summary = ConvertSummary::default();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() > width {
            return Err(CsvError::TooManyFields {
                row: i + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(width, String::new());

        let cell = fields[input_idx].as_str();
        let converted = convert_value((!is_missing(cell)).then_some(cell));
        summary.rows += 1;
        match &converted {
            Some(_) => summary.converted += 1,
            None => summary.missing += 1,
        }

        let value = converted.unwrap_or_default();
        match output_idx {
            Some(idx) => fields[idx] = value,
            None => fields.push(value),
        }
        rows.push(fields);
    }
    debug!(rows = summary.rows, missing = summary.missing, "records converted");

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&out_headers)?;
    for row in &rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(summary)
}
