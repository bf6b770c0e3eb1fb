use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;

use super::model::{ResultRow, ResultSet};
use crate::error::{PlotError, Result};

/// Header names the loader looks up; everything else is ignored.
pub const INPUT_COLUMN: &str = "Input";
pub const EXPECTED_COLUMN: &str = "Expected";
pub const ACTUAL_COLUMN: &str = "Actual";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a results file into a [`ResultSet`].
///
/// The delimiter is taken from `delimiter` when given, otherwise guessed from
/// the extension:
/// * `.tsv` / `.tab` – tab separated
/// * anything else   – comma separated
pub fn load_results(path: &Path, delimiter: Option<u8>) -> Result<ResultSet> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PlotError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PlotError::io(path, e),
    })?;

    let delimiter = delimiter.unwrap_or_else(|| delimiter_for(path));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .clone();
    let columns = ColumnIndex::locate(&headers).map_err(|msg| PlotError::parse(path, msg))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let row = columns
            .parse_row(&record, row_no + 1)
            .map_err(|msg| PlotError::parse(path, msg))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PlotError::parse(path, "file contains no data rows"));
    }

    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(ResultSet::from_rows(rows).with_source(path))
}

/// Write a [`ResultSet`] as `Input,Expected,Actual` CSV.
pub fn write_results(path: &Path, results: &ResultSet) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record([INPUT_COLUMN, EXPECTED_COLUMN, ACTUAL_COLUMN])
        .map_err(|e| csv_error(path, e))?;
    for row in results.rows() {
        writer
            .write_record([
                row.input.to_string(),
                row.expected.to_string(),
                row.actual.to_string(),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| PlotError::io(path, e))?;
    Ok(())
}

/// Delimiter implied by the file extension.
pub fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

// ---------------------------------------------------------------------------
// Header lookup / row parsing
// ---------------------------------------------------------------------------

struct ColumnIndex {
    input: usize,
    expected: usize,
    actual: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> std::result::Result<Self, String> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| format!("missing '{name}' column"))
        };
        Ok(ColumnIndex {
            input: find(INPUT_COLUMN)?,
            expected: find(EXPECTED_COLUMN)?,
            actual: find(ACTUAL_COLUMN)?,
        })
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> std::result::Result<ResultRow, String> {
        Ok(ResultRow {
            input: parse_cell(record, self.input, row, INPUT_COLUMN)?,
            expected: parse_cell(record, self.expected, row, EXPECTED_COLUMN)?,
            actual: parse_cell(record, self.actual, row, ACTUAL_COLUMN)?,
        })
    }
}

fn parse_cell(
    record: &StringRecord,
    idx: usize,
    row: usize,
    col: &str,
) -> std::result::Result<f64, String> {
    let raw = record.get(idx).unwrap_or("");
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("row {row}, {col}: '{raw}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("row {row}, {col}: '{raw}' is not a finite number"));
    }
    Ok(value)
}

fn csv_error(path: &Path, err: csv::Error) -> PlotError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => PlotError::io(path, e),
        _ => PlotError::parse(path, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_and_tab_use_tab_delimiter() {
        assert_eq!(delimiter_for(Path::new("out/results.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("results.TAB")), b'\t');
        assert_eq!(delimiter_for(Path::new("plot_data.csv")), b',');
        assert_eq!(delimiter_for(Path::new("no_extension")), b',');
    }

    #[test]
    fn headers_may_come_in_any_order() {
        let headers = StringRecord::from(vec!["Actual", "Note", "Input", "Expected"]);
        let idx = ColumnIndex::locate(&headers).unwrap();
        assert_eq!((idx.input, idx.expected, idx.actual), (2, 3, 0));
    }

    #[test]
    fn missing_header_is_named() {
        let headers = StringRecord::from(vec!["Input", "Actual"]);
        let err = ColumnIndex::locate(&headers).err().unwrap();
        assert!(err.contains("'Expected'"));
    }

    #[test]
    fn non_numeric_cell_reports_row_and_column() {
        let headers = StringRecord::from(vec!["Input", "Expected", "Actual"]);
        let idx = ColumnIndex::locate(&headers).unwrap();
        let record = StringRecord::from(vec!["1.0", "abc", "0.5"]);
        let err = idx.parse_row(&record, 4).unwrap_err();
        assert_eq!(err, "row 4, Expected: 'abc' is not a number");
    }

    #[test]
    fn nan_is_rejected() {
        let headers = StringRecord::from(vec!["Input", "Expected", "Actual"]);
        let idx = ColumnIndex::locate(&headers).unwrap();
        let record = StringRecord::from(vec!["1.0", "0.5", "NaN"]);
        assert!(idx.parse_row(&record, 1).is_err());
    }
}
