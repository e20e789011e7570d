//! Locates and parses the results table embedded in a benchmark report.
//!
//! The benchmark harness prints a free-text report and, at the very end, a
//! CSV-like table meant for charting:
//!
//! ```text
//! Number of elements: 1000
//!
//! Threads, HarrisMichaelLinkedListHE, HarrisLinkedListHE, ...
//! 1, 812345, 790112, ...
//! 2, 1603311, 1588001, ...
//! ```
//!
//! The table is found by content (the two anchor lines), not by offset, and
//! ends at the first blank line after the header.

use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const ELEMENTS_ANCHOR: &str = "Number of elements:";
pub const HEADER_ANCHOR: &str = "Threads";

/// What to do with a row whose cells do not parse as integers.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum Strictness {
    /// Drop the offending row and keep going
    #[default]
    Tolerant,
    /// Fail the whole file
    Strict,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Tolerant => write!(f, "tolerant"),
            Strictness::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("error reading results file (path={}, error={source})", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not locate results table (path={})", path.display())]
    TableNotFound { path: PathBuf },
    #[error("malformed row in results table (path={}, line={line}, reason={reason})", path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Minimum number of fields a row needs, `Threads` included. Shorter rows
    /// are dropped.
    pub columns: usize,
    pub strictness: Strictness,
}

/// A parsed results table. Rows hold at most one value per header column, the
/// first of which is the thread count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkTable {
    header: Vec<String>,
    rows: Vec<Vec<u64>>,
}

impl BenchmarkTable {
    pub fn threads(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row[0]).collect()
    }

    /// Raw column name and values of column `idx`, if the header has it and
    /// every row reaches it.
    pub fn column(&self, idx: usize) -> Option<(&str, Vec<u64>)> {
        let name = self.header.get(idx)?;
        let values = self
            .rows
            .iter()
            .map(|row| row.get(idx).copied())
            .collect::<Option<Vec<u64>>>()?;

        Some((name.as_str(), values))
    }
}

pub fn extract_table(path: &Path, opts: &ExtractOptions) -> Result<BenchmarkTable, ExtractError> {
    let contents = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_table(path, &contents, opts)
}

/// Index of the header row: the first line starting with `Threads` after the
/// first line starting with `Number of elements:`.
fn locate_header(lines: &[&str]) -> Option<usize> {
    let anchor = lines
        .iter()
        .position(|line| line.trim().starts_with(ELEMENTS_ANCHOR))?;

    lines[anchor + 1..]
        .iter()
        .position(|line| line.trim().starts_with(HEADER_ANCHOR))
        .map(|offset| anchor + 1 + offset)
}

fn record_fields(record: &StringRecord) -> Vec<String> {
    let mut fields: Vec<String> = record.iter().map(str::to_string).collect();

    // Rows are printed as `1, 2, 3, ` so the last field is usually empty
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    fields
}

pub fn parse_table(
    path: &Path,
    contents: &str,
    opts: &ExtractOptions,
) -> Result<BenchmarkTable, ExtractError> {
    let lines: Vec<&str> = contents.lines().collect();
    let start = locate_header(&lines).ok_or_else(|| ExtractError::TableNotFound {
        path: path.to_path_buf(),
    })?;

    let block = lines[start..]
        .iter()
        .take_while(|line| !line.trim().is_empty())
        .map(|line| line.trim())
        .collect::<Vec<&str>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(block.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // `start` is 0-based, csv positions are 1-based
        let line = start
            + match &result {
                Ok(record) => record
                    .position()
                    .map(|pos| pos.line() as usize)
                    .unwrap_or(idx + 1),
                Err(_) => idx + 1,
            };

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let reason = format!("{e}");
                match opts.strictness {
                    Strictness::Strict => {
                        return Err(ExtractError::MalformedRow {
                            path: path.to_path_buf(),
                            line,
                            reason,
                        });
                    }
                    Strictness::Tolerant => {
                        warn!(
                            "dropping unreadable row (path={}, line={line}, reason={reason})",
                            path.display()
                        );
                        continue;
                    }
                }
            }
        };

        let fields = record_fields(&record);
        let width = match &header {
            Some(header) => header.len(),
            None => {
                header = Some(fields);
                continue;
            }
        };

        if fields.is_empty() || fields.len() < opts.columns {
            debug!(
                "dropping short row (path={}, line={line}, fields={}, expected={})",
                path.display(),
                fields.len(),
                opts.columns
            );
            continue;
        }

        let parsed: Result<Vec<u64>, String> = fields[..fields.len().min(width)]
            .iter()
            .map(|field| {
                field
                    .parse::<u64>()
                    .map_err(|e| format!("invalid integer '{field}': {e}"))
            })
            .collect();

        match parsed {
            Ok(values) => rows.push(values),
            Err(reason) => match opts.strictness {
                Strictness::Strict => {
                    return Err(ExtractError::MalformedRow {
                        path: path.to_path_buf(),
                        line,
                        reason,
                    });
                }
                Strictness::Tolerant => {
                    warn!(
                        "dropping malformed row (path={}, line={line}, reason={reason})",
                        path.display()
                    );
                }
            },
        }
    }

    Ok(BenchmarkTable {
        header: header.unwrap_or_default(),
        rows,
    })
}
