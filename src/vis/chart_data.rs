//! Chart data preparation
//!
//! Turns table columns into the inputs a chart renderer consumes. Preparation
//! never fails past this boundary: each chart yields either its data or a
//! [`RenderReason`] the presentation layer shows in place of the chart.

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::cell::CellValue;
use crate::classify::GroupKind;
use crate::config::{MAX_BAR_CATEGORIES, MAX_HISTOGRAM_BINS, MIN_HISTOGRAM_BINS};
use crate::table::{Column, Table};

/// Why a chart cannot be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderReason {
    /// The column has no rows
    NoData,
    /// No value of the column is numeric
    NoNumericData,
    /// Any other preparation failure
    Error(String),
}

impl RenderReason {
    /// Placeholder text shown instead of the chart
    pub fn marker(&self) -> String {
        match self {
            RenderReason::NoData => "No data".to_string(),
            RenderReason::NoNumericData => "No numeric data".to_string(),
            RenderReason::Error(msg) => {
                let short: String = msg.chars().take(30).collect();
                format!("Error: {}", short)
            }
        }
    }
}

impl Display for RenderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Frequency counts of distinct values, sorted by category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    categories: Vec<(CellValue, usize)>,
}

impl BarData {
    pub fn categories(&self) -> &[(CellValue, usize)] {
        &self.categories
    }

    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|(c, _)| c.to_string()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.categories.iter().map(|(_, n)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Equal-width bins over the numeric values of a column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramData {
    /// `bins + 1` edges, ascending
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl HistogramData {
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of values binned
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Prepared data of either chart kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    Bar(BarData),
    Histogram(HistogramData),
}

/// Paired numeric sequences and title for a scatter plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CategoryKey<'a> {
    Number(u64),
    Text(&'a str),
    Missing,
}

fn category_key(value: &CellValue) -> CategoryKey<'_> {
    match value {
        // -0.0 and 0.0 are the same category
        CellValue::Number(v) if *v == 0.0 => CategoryKey::Number(0.0f64.to_bits()),
        CellValue::Number(v) => CategoryKey::Number(v.to_bits()),
        CellValue::Text(s) => CategoryKey::Text(s),
        CellValue::Missing => CategoryKey::Missing,
    }
}

/// Categorical bar data with the default category cap
pub fn bar_data(column: &Column) -> Result<BarData, RenderReason> {
    bar_data_with(column, MAX_BAR_CATEGORIES)
}

/// Categorical bar data, missing values counted as their own category
///
/// When there are more than `max_categories` distinct values only the most
/// frequent ones are kept (ties favour the value seen first) and the rest are
/// dropped. The kept categories are sorted by label.
pub fn bar_data_with(column: &Column, max_categories: usize) -> Result<BarData, RenderReason> {
    if column.is_empty() {
        return Err(RenderReason::NoData);
    }

    let mut index: HashMap<CategoryKey<'_>, usize> = HashMap::new();
    let mut categories: Vec<(CellValue, usize)> = Vec::new();
    for value in column.values() {
        let slot = *index.entry(category_key(value)).or_insert_with(|| {
            categories.push((value.clone(), 0));
            categories.len() - 1
        });
        categories[slot].1 += 1;
    }

    if categories.len() > max_categories {
        categories.sort_by(|a, b| b.1.cmp(&a.1));
        categories.truncate(max_categories);
    }
    categories.sort_by(|a, b| a.0.category_cmp(&b.0));

    Ok(BarData { categories })
}

/// Histogram bin count for `n` values: `floor(sqrt(n))` clamped to `[min_bins, max_bins]`
pub fn histogram_bins(n: usize, min_bins: usize, max_bins: usize) -> usize {
    let bins = (n as f64).sqrt().floor() as usize;
    bins.clamp(min_bins, max_bins)
}

/// Histogram data with the default bin bounds
pub fn histogram_data(column: &Column) -> Result<HistogramData, RenderReason> {
    histogram_data_with(column, MIN_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS)
}

/// Histogram data over the values of `column` that coerce to numbers
pub fn histogram_data_with(
    column: &Column,
    min_bins: usize,
    max_bins: usize,
) -> Result<HistogramData, RenderReason> {
    let data: Vec<f64> = column.coerced().into_iter().flatten().collect();
    if data.is_empty() {
        return Err(RenderReason::NoNumericData);
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(RenderReason::NoNumericData);
    }
    if min_bins == 0 || min_bins > max_bins {
        return Err(RenderReason::Error(format!(
            "invalid bin bounds {}..{}",
            min_bins, max_bins
        )));
    }

    let bins = histogram_bins(data.len(), min_bins, max_bins);
    Ok(compute_bins(&data, bins))
}

fn compute_bins(data: &[f64], bins: usize) -> HistogramData {
    let mut min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // A single distinct value is centred in a unit-wide range
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let bin_width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + i as f64 * bin_width })
        .collect();
    let mut counts = vec![0; bins];

    for &value in data {
        let bin_idx = ((value - min) / bin_width).floor() as usize;
        counts[bin_idx.min(bins - 1)] += 1;
    }

    HistogramData { edges, counts }
}

/// Bar and histogram data of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCharts {
    pub name: String,
    pub bar: Result<BarData, RenderReason>,
    pub histogram: Result<HistogramData, RenderReason>,
}

/// Chart data for every column of a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCharts {
    pub kind: GroupKind,
    pub charts: Vec<ColumnCharts>,
}

impl GroupCharts {
    pub fn title(&self) -> &'static str {
        self.kind.label()
    }
}

/// Prepare charts for the named columns; one bad column never affects the others
pub fn prepare_group_charts<S: AsRef<str>>(
    table: &Table,
    kind: GroupKind,
    names: &[S],
    max_categories: usize,
    min_bins: usize,
    max_bins: usize,
) -> GroupCharts {
    let charts = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            match table.column(name) {
                Some(column) => ColumnCharts {
                    name: name.to_string(),
                    bar: bar_data_with(column, max_categories),
                    histogram: histogram_data_with(column, min_bins, max_bins),
                },
                None => {
                    let reason = RenderReason::Error(format!("column not found: {}", name));
                    log::warn!("chart preparation for '{}' failed: {}", name, reason);
                    ColumnCharts {
                        name: name.to_string(),
                        bar: Err(reason.clone()),
                        histogram: Err(reason),
                    }
                }
            }
        })
        .collect();

    GroupCharts { kind, charts }
}
