//! Column classification
//!
//! Decides which columns are numeric-coercible and partitions analysed columns
//! into X, Y and Other groups by their name prefix.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::config::NUMERIC_THRESHOLD;
use crate::error::Result;
use crate::table::{Column, Table};

lazy_static! {
    static ref DEFAULT_MATCHER: GroupMatcher = GroupMatcher {
        x: Regex::new(r"(?i)^\s*x").unwrap(),
        y: Regex::new(r"(?i)^\s*y").unwrap(),
    };
}

/// Share of a column's cells that coerce to a number
///
/// The denominator is the total cell count (at least 1), so empty cells
/// count against the column.
pub fn numeric_ratio(column: &Column) -> f64 {
    let parsed = column
        .values()
        .iter()
        .filter(|v| v.coerce().is_number())
        .count();
    parsed as f64 / column.len().max(1) as f64
}

/// Whether a column already holds only numbers and missing cells, with at
/// least one number
///
/// Such columns are numeric however sparse they are; the ratio rule only
/// applies to columns carrying text.
pub fn is_native_numeric(column: &Column) -> bool {
    column.is_numeric() && column.values().iter().any(|v| v.is_number())
}

/// Detect numeric-coercible columns using the default threshold
///
/// A column qualifies when it is natively numeric or when its numeric ratio
/// reaches the threshold. Qualifying columns are coerced in place; the others
/// keep their content.
pub fn classify_numeric(table: &mut Table) -> Vec<String> {
    classify_numeric_with(table, NUMERIC_THRESHOLD)
}

/// Detect numeric-coercible columns with a custom inclusive threshold
pub fn classify_numeric_with(table: &mut Table, threshold: f64) -> Vec<String> {
    let qualifying: Vec<String> = table
        .columns()
        .iter()
        .filter(|column| {
            if is_native_numeric(column) {
                debug!("column '{}' is natively numeric", column.name());
                return true;
            }
            let ratio = numeric_ratio(column);
            debug!(
                "column '{}' numeric ratio {:.3} (threshold {})",
                column.name(),
                ratio,
                threshold
            );
            ratio >= threshold
        })
        .map(|column| column.name().to_string())
        .collect();

    for name in &qualifying {
        if let Some(column) = table.column_mut(name) {
            column.coerce_in_place();
        }
    }

    qualifying
}

/// Cohort of a column, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    X,
    Y,
    Other,
    /// Derived total columns
    Totals,
}

impl GroupKind {
    pub fn label(&self) -> &'static str {
        match self {
            GroupKind::X => "X Group",
            GroupKind::Y => "Y Group",
            GroupKind::Other => "Other",
            GroupKind::Totals => "Total Scores",
        }
    }
}

/// The X / Y / Other partition of a column selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnGroups {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub other: Vec<String>,
}

impl ColumnGroups {
    pub fn get(&self, kind: GroupKind) -> &[String] {
        match kind {
            GroupKind::X => &self.x,
            GroupKind::Y => &self.y,
            GroupKind::Other => &self.other,
            GroupKind::Totals => &[],
        }
    }

    /// Total number of columns across the three groups
    pub fn len(&self) -> usize {
        self.x.len() + self.y.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Case-insensitive prefix matcher for X and Y columns
///
/// Leading whitespace in a name is ignored. The X prefix is tested first, so a
/// name lands in exactly one group.
#[derive(Debug, Clone)]
pub struct GroupMatcher {
    x: Regex,
    y: Regex,
}

impl GroupMatcher {
    pub fn new(x_prefix: &str, y_prefix: &str) -> Result<Self> {
        Ok(GroupMatcher {
            x: prefix_regex(x_prefix)?,
            y: prefix_regex(y_prefix)?,
        })
    }

    pub fn kind_of(&self, name: &str) -> GroupKind {
        if self.x.is_match(name) {
            GroupKind::X
        } else if self.y.is_match(name) {
            GroupKind::Y
        } else {
            GroupKind::Other
        }
    }

    pub fn partition<S: AsRef<str>>(&self, selected: &[S]) -> ColumnGroups {
        let mut groups = ColumnGroups::default();
        for name in selected {
            let name = name.as_ref();
            match self.kind_of(name) {
                GroupKind::X => groups.x.push(name.to_string()),
                GroupKind::Y => groups.y.push(name.to_string()),
                _ => groups.other.push(name.to_string()),
            }
        }
        groups
    }
}

impl Default for GroupMatcher {
    fn default() -> Self {
        DEFAULT_MATCHER.clone()
    }
}

fn prefix_regex(prefix: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"(?i)^\s*{}", regex::escape(prefix.trim())))?)
}

/// Partition selected column names into X, Y and Other by the default prefixes
pub fn partition_groups<S: AsRef<str>>(selected: &[S]) -> ColumnGroups {
    DEFAULT_MATCHER.partition(selected)
}

/// Columns pre-selected for descriptive analysis: the first `limit` when
/// more are available, otherwise all of them
pub fn default_selection(numeric_columns: &[String], limit: usize) -> Vec<String> {
    numeric_columns.iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_ratio_counts_empty_cells() {
        let column = Column::new("a", vec![CellValue::Number(1.0), CellValue::Missing]);
        assert_eq!(numeric_ratio(&column), 0.5);
        let empty = Column::new("b", Vec::<f64>::new());
        assert_eq!(numeric_ratio(&empty), 0.0);
    }

    #[test]
    fn test_sparse_numeric_column_qualifies() {
        let mut table = Table::from_columns(vec![
            Column::new(
                "x3",
                vec![
                    CellValue::Number(2.0),
                    CellValue::Missing,
                    CellValue::Missing,
                    CellValue::Number(4.0),
                ]
                .into_iter()
                .chain(std::iter::repeat(CellValue::Missing).take(4))
                .collect::<Vec<_>>(),
            ),
            Column::new("blank", vec![CellValue::Missing; 8]),
        ])
        .unwrap();

        assert_eq!(numeric_ratio(table.column("x3").unwrap()), 0.25);
        assert!(is_native_numeric(table.column("x3").unwrap()));
        assert!(!is_native_numeric(table.column("blank").unwrap()));
        assert_eq!(classify_numeric(&mut table), vec!["x3"]);
    }

    #[test]
    fn test_leading_whitespace_and_case() {
        let matcher = GroupMatcher::default();
        assert_eq!(matcher.kind_of("  X1"), GroupKind::X);
        assert_eq!(matcher.kind_of("x"), GroupKind::X);
        assert_eq!(matcher.kind_of("yes_no"), GroupKind::Y);
        assert_eq!(matcher.kind_of(""), GroupKind::Other);
        assert_eq!(matcher.kind_of("12"), GroupKind::Other);
    }

    #[test]
    fn test_custom_prefixes_are_literal() {
        let matcher = GroupMatcher::new("q.", "r").unwrap();
        assert_eq!(matcher.kind_of("Q.1"), GroupKind::X);
        assert_eq!(matcher.kind_of("qa"), GroupKind::Other);
        assert_eq!(matcher.kind_of("R2"), GroupKind::Y);
    }

    #[test]
    fn test_default_selection_limit() {
        let names: Vec<String> = (0..12).map(|i| format!("c{}", i)).collect();
        assert_eq!(default_selection(&names, 10).len(), 10);
        assert_eq!(default_selection(&names[..4], 10).len(), 4);
    }
}
