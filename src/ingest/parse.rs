//! Comma-delimited parsing of the decoded payload into a `Table`.

use csv::ReaderBuilder;
use tracing::warn;

use super::Table;
use crate::error::PipelineError;

/// How much slack the parser gives malformed rows and inconsistent column
/// types. The source dataset mixes types freely within columns, so
/// `Lenient` is the default for real runs; `Strict` exists so tests and
/// cleaner feeds can demand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserMode {
    Strict,
    Lenient,
}

/// Rows sampled per column when inferring a type for strict checking.
const TYPE_SAMPLE_ROWS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Text,
}

/// Parse decoded text as comma-delimited rows under a header line.
///
/// In `Lenient` mode, rows shorter than the header are padded with null
/// cells and longer rows are truncated. In `Strict` mode any width
/// mismatch, or a cell that contradicts the column type inferred from the
/// leading sample, fails the run with the offending row number.
pub fn parse_table(text: &str, mode: ParserMode) -> Result<Table, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| PipelineError::Parse {
            row: 0,
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(PipelineError::Parse {
            row: 0,
            reason: "header row missing".to_string(),
        });
    }
    let width = headers.len();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row_no = idx + 1;
        let record = result.map_err(|e| PipelineError::Parse {
            row: row_no,
            reason: e.to_string(),
        })?;

        let mut row: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();
        if row.len() != width {
            match mode {
                ParserMode::Strict => {
                    return Err(PipelineError::Parse {
                        row: row_no,
                        reason: format!("expected {} fields, found {}", width, row.len()),
                    });
                }
                ParserMode::Lenient => {
                    if row.len() > width {
                        warn!(row = row_no, extra = row.len() - width, "truncating overlong row");
                        row.truncate(width);
                    } else {
                        row.resize(width, String::new());
                    }
                }
            }
        }
        rows.push(row);
    }

    if mode == ParserMode::Strict {
        check_column_types(&headers, &rows)?;
    }

    Ok(Table { headers, rows })
}

/// Infer each column's type from the leading sample and reject later cells
/// that contradict it. Null cells never contradict anything.
fn check_column_types(headers: &[String], rows: &[Vec<String>]) -> Result<(), PipelineError> {
    for (col, name) in headers.iter().enumerate() {
        let inferred = infer_column_type(rows.iter().take(TYPE_SAMPLE_ROWS).map(|r| r[col].as_str()));
        if inferred == ColumnType::Text {
            continue;
        }
        for (idx, row) in rows.iter().enumerate().skip(TYPE_SAMPLE_ROWS) {
            let cell = row[col].as_str();
            if !cell.is_empty() && !cell_matches(inferred, cell) {
                return Err(PipelineError::Parse {
                    row: idx + 1,
                    reason: format!(
                        "column `{}` inferred as {:?} but holds `{}`",
                        name, inferred, cell
                    ),
                });
            }
        }
    }
    Ok(())
}

fn infer_column_type<'a>(sample: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut ty = ColumnType::Int;
    for cell in sample.filter(|c| !c.is_empty()) {
        if ty == ColumnType::Int && cell.parse::<i64>().is_err() {
            ty = ColumnType::Float;
        }
        if ty == ColumnType::Float && cell.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
    }
    ty
}

fn cell_matches(ty: ColumnType, cell: &str) -> bool {
    match ty {
        ColumnType::Int => cell.parse::<i64>().is_ok(),
        ColumnType::Float => cell.parse::<f64>().is_ok(),
        ColumnType::Text => true,
    }
}
