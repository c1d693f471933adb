//! In-memory table of named, equal-length columns
//!
//! A `Table` is built once per upload. Column names are canonical strings,
//! fixed at load time, so name-based logic never has to inspect the
//! original header cell type.

use std::fmt::{self, Display};

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    /// Create a column from any cell-convertible values
    pub fn new<S, V>(name: S, values: Vec<V>) -> Self
    where
        S: Into<String>,
        V: Into<CellValue>,
    {
        Column {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&CellValue> {
        self.values.get(pos)
    }

    /// Number of missing cells
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Whether every cell is either a number or missing
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| matches!(v, CellValue::Number(_) | CellValue::Missing))
    }

    /// Values already stored as numbers, in row order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_number).collect()
    }

    /// Every cell coerced to a number, `None` where coercion fails
    pub fn coerced(&self) -> Vec<Option<f64>> {
        self.values.iter().map(|v| v.coerce().as_number()).collect()
    }

    /// Replace all cells with their numeric coercion
    pub(crate) fn coerce_in_place(&mut self) {
        for value in self.values.iter_mut() {
            *value = value.coerce();
        }
    }
}

/// An ordered collection of equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Table::default()
    }

    /// Build a table from columns, checking unique names and equal lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Table::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Append a column
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::DuplicateColumnName(column.name().to_string()));
        }
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replace the column of the same name in place, or append it
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let pos = match self.columns.iter().position(|c| c.name() == column.name()) {
            Some(pos) => pos,
            None => return self.add_column(column),
        };
        if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.columns[pos] = column;
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    /// Look up a column, failing with `ColumnNotFound`
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Cells of one row, in column order
    pub fn row(&self, pos: usize) -> Option<Vec<&CellValue>> {
        if pos >= self.row_count {
            return None;
        }
        Some(self.columns.iter().filter_map(|c| c.get(pos)).collect())
    }

    /// First `n` rows as a new table
    pub fn head(&self, n: usize) -> Table {
        let take = n.min(self.row_count);
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[..take].to_vec(),
                })
                .collect(),
            row_count: take,
        }
    }

    /// First `n` rows rendered as display strings, one `Vec` per row
    pub fn preview_rows(&self, n: usize) -> Vec<Vec<String>> {
        (0..n.min(self.row_count))
            .map(|row| self.columns.iter().map(|c| c.values[row].to_string()).collect())
            .collect()
    }

    /// Subset of columns by name, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|n| self.require_column(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Table::from_columns(columns)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Empty table");
        }

        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                c.values
                    .iter()
                    .map(|v| v.to_string().chars().count())
                    .chain(std::iter::once(c.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "{:>width$}  ", column.name, width = width)?;
        }
        writeln!(f)?;

        for row in 0..self.row_count {
            for (column, width) in self.columns.iter().zip(&widths) {
                write!(f, "{:>width$}  ", column.values[row].to_string(), width = width)?;
            }
            writeln!(f)?;
        }

        write!(f, "[{} rows x {} columns]", self.row_count, self.columns.len())
    }
}
