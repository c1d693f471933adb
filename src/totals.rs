//! Composite group totals
//!
//! A total is the row-wise sum of a group's columns. Rows where every group
//! column is missing keep a missing total; otherwise present values are summed.

use log::{info, warn};
use serde::Serialize;

use crate::cell::CellValue;
use crate::classify::ColumnGroups;
use crate::config::{X_TOTAL, Y_TOTAL};
use crate::error::{Error, Result};
use crate::table::{Column, Table};

/// What happened to one derived total column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TotalsOutcome {
    /// The total was computed from `source_columns` columns and appended
    Created { name: String, source_columns: usize },
    /// The group was empty, no column was created
    Skipped { name: String },
    /// Summation failed; analysis continues without this total
    Failed { name: String, warning: String },
}

impl TotalsOutcome {
    pub fn name(&self) -> &str {
        match self {
            TotalsOutcome::Created { name, .. }
            | TotalsOutcome::Skipped { name }
            | TotalsOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, TotalsOutcome::Created { .. })
    }

    /// User-facing status line
    pub fn message(&self) -> String {
        match self {
            TotalsOutcome::Created {
                name,
                source_columns,
            } => format!("{} created from {} columns", name, source_columns),
            TotalsOutcome::Skipped { name } => format!("{} skipped: no columns in group", name),
            TotalsOutcome::Failed { name, warning } => {
                format!("Could not create {}: {}", name, warning)
            }
        }
    }
}

/// Row-wise sum of `group` columns as a new column named `total_name`
///
/// Returns `Ok(None)` for an empty group. Fails when a group column is
/// absent or holds non-numeric cells.
pub fn compute_total<S: AsRef<str>>(
    table: &Table,
    total_name: &str,
    group: &[S],
) -> Result<Option<Column>> {
    if group.is_empty() {
        return Ok(None);
    }

    let columns = group
        .iter()
        .map(|name| {
            let column = table.require_column(name.as_ref())?;
            if !column.is_numeric() {
                return Err(Error::NonNumericColumn(column.name().to_string()));
            }
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;

    let totals: Vec<CellValue> = (0..table.row_count())
        .map(|row| {
            let present: Vec<f64> = columns
                .iter()
                .filter_map(|c| c.get(row).and_then(CellValue::as_number))
                .collect();
            if present.is_empty() {
                CellValue::Missing
            } else {
                CellValue::number(present.iter().sum())
            }
        })
        .collect();

    Ok(Some(Column::new(total_name, totals)))
}

/// Compute the X and Y totals of `groups` and append them to `table`
///
/// A column already named like a total is overwritten.
pub fn append_totals(table: &mut Table, groups: &ColumnGroups) -> Vec<TotalsOutcome> {
    append_totals_named(table, groups, X_TOTAL, Y_TOTAL)
}

/// Same as [`append_totals`] with custom total column names
pub fn append_totals_named(
    table: &mut Table,
    groups: &ColumnGroups,
    x_total_name: &str,
    y_total_name: &str,
) -> Vec<TotalsOutcome> {
    [(x_total_name, &groups.x), (y_total_name, &groups.y)]
        .into_iter()
        .map(|(name, group)| {
            let result = compute_total(table, name, group)
                .and_then(|total| total.map(|column| table.set_column(column)).transpose());

            match result {
                Ok(Some(())) => {
                    info!("{} created from {} columns", name, group.len());
                    TotalsOutcome::Created {
                        name: name.to_string(),
                        source_columns: group.len(),
                    }
                }
                Ok(None) => TotalsOutcome::Skipped {
                    name: name.to_string(),
                },
                Err(e) => {
                    warn!("could not create {}: {}", name, e);
                    TotalsOutcome::Failed {
                        name: name.to_string(),
                        warning: e.to_string(),
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::new(
                "X1",
                vec![CellValue::Number(1.0), CellValue::Missing, CellValue::Missing],
            ),
            Column::new(
                "X2",
                vec![CellValue::Number(2.0), CellValue::Number(3.0), CellValue::Missing],
            ),
            Column::new("label", vec!["a", "b", "c"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_missing_row_stays_missing() {
        let total = compute_total(&table(), "X_TOTAL", &["X1", "X2"])
            .unwrap()
            .unwrap();
        assert_eq!(
            total.values(),
            &[
                CellValue::Number(3.0),
                CellValue::Number(3.0),
                CellValue::Missing
            ]
        );
    }

    #[test]
    fn test_empty_group_creates_nothing() {
        let empty: [&str; 0] = [];
        assert!(compute_total(&table(), "X_TOTAL", &empty).unwrap().is_none());
    }

    #[test]
    fn test_text_column_fails() {
        let result = compute_total(&table(), "X_TOTAL", &["X1", "label"]);
        assert!(matches!(result, Err(Error::NonNumericColumn(_))));
    }

    #[test]
    fn test_existing_total_column_is_overwritten() {
        let mut t = table();
        t.add_column(Column::new("X_TOTAL", vec!["stale", "stale", "stale"]))
            .unwrap();
        let groups = ColumnGroups {
            x: vec!["X1".into(), "X2".into()],
            y: vec![],
            other: vec![],
        };

        let outcomes = append_totals(&mut t, &groups);
        assert!(outcomes[0].is_created());
        assert_eq!(t.column_count(), 4);
        assert_eq!(
            t.column("X_TOTAL").unwrap().values(),
            &[
                CellValue::Number(3.0),
                CellValue::Number(3.0),
                CellValue::Missing
            ]
        );
    }

    #[test]
    fn test_append_reports_each_group() {
        let mut t = table();
        let groups = ColumnGroups {
            x: vec!["X1".into(), "X2".into()],
            y: vec!["label".into()],
            other: vec![],
        };
        let outcomes = append_totals(&mut t, &groups);
        assert!(outcomes[0].is_created());
        assert!(matches!(outcomes[1], TotalsOutcome::Failed { .. }));
        assert!(t.has_column("X_TOTAL"));
        assert!(!t.has_column("Y_TOTAL"));
        assert_eq!(outcomes[0].message(), "X_TOTAL created from 2 columns");
    }
}
