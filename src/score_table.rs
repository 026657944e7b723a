//! Tables of region-wise scores.
//!
//! A score table has one row per brain region, identified by the region name in the
//! `label` column, and one or more score columns. Cells are kept as read and are only
//! converted to numbers when a column is used, so a single malformed cell is reported
//! with its column and row.

use csv::ReaderBuilder;
use log::warn;

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use crate::error::{NeuropaintError, Result};
use crate::util::duplicate_names;

pub const LABEL_COLUMN: &str = "label";


/// A single score cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreCell {
    Number(f64),
    /// Text that still needs to be parsed, e.g. read from a CSV file.
    Text(String),
    /// An empty cell. Treated as an unknown score (NaN).
    Missing,
}

impl ScoreCell {
    /// Convert the cell to a number. Missing cells become NaN. Text is parsed after trimming whitespace, `nan` and `inf` are accepted in any case.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            ScoreCell::Number(v) => Some(*v),
            ScoreCell::Missing => Some(f64::NAN),
            ScoreCell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(f64::NAN)
                } else {
                    s.parse::<f64>().ok()
                }
            }
        }
    }
}

impl From<f64> for ScoreCell {
    fn from(v: f64) -> ScoreCell {
        ScoreCell::Number(v)
    }
}

impl From<&str> for ScoreCell {
    fn from(s: &str) -> ScoreCell {
        ScoreCell::Text(s.to_string())
    }
}


/// A named column of score cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreColumn {
    pub name: String,
    pub cells: Vec<ScoreCell>,
}

impl ScoreColumn {
    /// Convert all cells to numbers.
    ///
    /// # Errors
    ///
    /// [`NeuropaintError::TypeConversion`] for the first cell that cannot be interpreted as a number.
    pub fn to_f64(&self) -> Result<Vec<f64>> {
        self.cells.iter()
            .enumerate()
            .map(|(row, cell)| cell.to_f64().ok_or_else(|| {
                let value = match cell {
                    ScoreCell::Text(s) => s.clone(),
                    other => format!("{:?}", other),
                };
                NeuropaintError::TypeConversion(self.name.clone(), row, value)
            }))
            .collect()
    }
}


/// Region scores: a `label` column with region names, plus score columns in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreTable {
    labels: Vec<String>,
    columns: Vec<ScoreColumn>,
}

impl ScoreTable {
    /// Create a table without score columns. Each label defines one row.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(labels: I) -> ScoreTable {
        ScoreTable {
            labels: labels.into_iter().map(Into::into).collect(),
            columns: Vec::new(),
        }
    }

    /// Add a score column.
    ///
    /// # Errors
    ///
    /// If the column name is `label` or already used, or the number of cells does not match the number of rows.
    pub fn add_column(&mut self, name: &str, cells: Vec<ScoreCell>) -> Result<()> {
        if name == LABEL_COLUMN || self.column(name).is_some() {
            return Err(NeuropaintError::DuplicateColumn(name.to_string()));
        }
        if cells.len() != self.labels.len() {
            return Err(NeuropaintError::ColumnLengthMismatch(name.to_string(), self.labels.len(), cells.len()));
        }
        self.columns.push(ScoreColumn { name: name.to_string(), cells });
        Ok(())
    }

    /// Add a score column of numbers.
    pub fn add_numeric_column(&mut self, name: &str, values: &[f64]) -> Result<()> {
        self.add_column(name, values.iter().map(|v| ScoreCell::Number(*v)).collect())
    }

    /// Read a score table from a CSV file with a header row. One of the columns must be named `label`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let table = neuropaint::ScoreTable::from_csv_file("/path/to/effect_sizes.csv").unwrap();
    /// println!("Read {} regions with score columns {:?}.", table.num_rows(), table.score_columns());
    /// ```
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<ScoreTable> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .comment(Some(b'#'))
            .from_path(path)?;
        ScoreTable::from_csv(rdr)
    }

    /// Read a comma separated score table with a header row from a reader.
    pub fn from_csv_reader<R: Read>(input: R) -> Result<ScoreTable> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .comment(Some(b'#'))
            .from_reader(input);
        ScoreTable::from_csv(rdr)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<ScoreTable> {
        // Spreadsheet exports may start with a byte order mark.
        let headers: Vec<String> = rdr.headers()?.iter()
            .enumerate()
            .map(|(idx, h)| (if idx == 0 { h.trim_start_matches('\u{feff}') } else { h }).to_string())
            .collect();
        let label_idx = headers.iter()
            .position(|h| h.as_str() == LABEL_COLUMN)
            .ok_or(NeuropaintError::MissingLabelColumn)?;

        let mut seen: HashSet<&str> = HashSet::new();
        for h in headers.iter() {
            if !seen.insert(h.as_str()) {
                return Err(NeuropaintError::DuplicateColumn(h.clone()));
            }
        }

        let mut labels: Vec<String> = Vec::new();
        let mut cells: Vec<Vec<ScoreCell>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            let record = result?;
            for (col_idx, field) in record.iter().enumerate() {
                if col_idx == label_idx {
                    labels.push(field.to_string());
                } else if field.trim().is_empty() {
                    cells[col_idx].push(ScoreCell::Missing);
                } else {
                    cells[col_idx].push(ScoreCell::Text(field.to_string()));
                }
            }
        }

        let columns = headers.iter()
            .zip(cells)
            .enumerate()
            .filter(|(col_idx, _)| *col_idx != label_idx)
            .map(|(_, (name, cells))| ScoreColumn { name: name.clone(), cells })
            .collect();

        Ok(ScoreTable { labels, columns })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_rows(&self) -> usize {
        self.labels.len()
    }

    /// The names of all score columns, i.e., all columns except `label`, in table order.
    pub fn score_columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// All score columns in table order.
    pub fn columns(&self) -> &[ScoreColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ScoreColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Labels that occur in more than one row, in order of their first repetition.
    pub fn duplicate_labels(&self) -> Vec<&str> {
        duplicate_names(&self.labels)
    }

    /// Map region labels to the scores of a column. If a label occurs in several rows, the last row wins.
    ///
    /// Returns `Ok(None)` if there is no such column.
    ///
    /// # Errors
    ///
    /// [`NeuropaintError::TypeConversion`] if a cell of the column is not a number.
    pub fn score_by_name(&self, column: &str) -> Result<Option<HashMap<String, f64>>> {
        let column = match self.column(column) {
            Some(c) => c,
            None => return Ok(None),
        };
        let values = column.to_f64()?;
        Ok(Some(self.score_map(&values)))
    }

    /// Zip labels with already converted values of one column, last row wins.
    pub(crate) fn score_map(&self, values: &[f64]) -> HashMap<String, f64> {
        let dups = self.duplicate_labels();
        if !dups.is_empty() {
            warn!("Score table has duplicate labels {:?}, using the last row for each.", dups);
        }
        self.labels.iter().cloned().zip(values.iter().copied()).collect()
    }
}
