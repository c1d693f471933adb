//! Statistics module
//!
//! Descriptive summaries of survey columns and the two correlation tests
//! (Pearson product-moment and Spearman rank) used by the association analysis.

pub mod descriptive;
pub mod inference;

use std::fmt::{self, Display};

use serde::Serialize;

use crate::error::Result;
use crate::table::Table;

/// Row labels of a summary table, in display order
pub const STAT_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Compute descriptive statistics over a slice of values
///
/// Non-finite values are kept as given; callers pass only present numbers.
/// An empty slice yields a count of zero and `NaN` for every other statistic.
///
/// # Example
/// ```rust
/// use surveyrs::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let stats = stats::describe(&data);
/// assert_eq!(stats.mean, 3.0);
/// assert!((stats.std - 1.5811).abs() < 1e-4);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> DescriptiveStats {
    descriptive::describe_impl(data.as_ref())
}

/// Descriptive statistics of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of non-missing values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator)
    pub std: f64,
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Statistics of a column without any values
    pub fn undefined() -> Self {
        DescriptiveStats {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Look up a statistic by its row label
    pub fn get(&self, stat: &str) -> Option<f64> {
        match stat {
            "count" => Some(self.count as f64),
            "mean" => Some(self.mean),
            "std" => Some(self.std),
            "min" => Some(self.min),
            "25%" => Some(self.q1),
            "50%" => Some(self.median),
            "75%" => Some(self.q3),
            "max" => Some(self.max),
            _ => None,
        }
    }
}

/// Per-column descriptive statistics, one column per summarized input column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    columns: Vec<String>,
    stats: Vec<DescriptiveStats>,
}

impl SummaryTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn stats(&self, column: &str) -> Option<&DescriptiveStats> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.stats[i])
    }

    /// Value of `stat` (one of `STAT_ROWS`) for `column`
    pub fn get(&self, stat: &str, column: &str) -> Option<f64> {
        self.stats(column).and_then(|s| s.get(stat))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = 6;
        let widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count().max(10)).collect();

        write!(f, "{:<label_width$}", "", label_width = label_width)?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for stat in STAT_ROWS {
            write!(f, "{:<label_width$}", stat, label_width = label_width)?;
            for (s, width) in self.stats.iter().zip(&widths) {
                let value = s.get(stat).unwrap_or(f64::NAN);
                write!(f, "  {:>width$.6}", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Summarize the named columns of a table
///
/// Only cells holding numbers contribute; missing and text cells are skipped.
///
/// # Example
/// ```rust
/// use surveyrs::{stats, Column, Table};
///
/// let column = Column::new("x1", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// let table = Table::from_columns(vec![column]).unwrap();
/// let summary = stats::summarize(&table, &["x1"]).unwrap();
/// assert_eq!(summary.get("50%", "x1"), Some(3.0));
/// ```
pub fn summarize<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<SummaryTable> {
    descriptive::summarize_impl(table, columns)
}

/// Result of a correlation significance test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationTest {
    /// Correlation coefficient in [-1, 1]
    pub coefficient: f64,
    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
}

/// Pearson correlation coefficient with its two-sided p-value
///
/// # Example
/// ```rust
/// use surveyrs::stats;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// let test = stats::pearson(&x, &y).unwrap();
/// assert!((test.coefficient - 1.0).abs() < 1e-12);
/// assert!(test.p_value < 1e-6);
/// ```
pub fn pearson<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<CorrelationTest> {
    inference::pearson_impl(x.as_ref(), y.as_ref())
}

/// Spearman rank correlation coefficient with its two-sided p-value
pub fn spearman<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<CorrelationTest> {
    inference::spearman_impl(x.as_ref(), y.as_ref())
}

/// Average ranks (1-based), ties share the mean of their positions
pub fn rank_average<T: AsRef<[f64]>>(data: T) -> Vec<f64> {
    inference::rank_average_impl(data.as_ref())
}

/// Sample standard deviation, `NaN` for fewer than two values
pub fn sample_std<T: AsRef<[f64]>>(data: T) -> f64 {
    descriptive::sample_std_impl(data.as_ref())
}
