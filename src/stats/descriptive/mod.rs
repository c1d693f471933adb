// Descriptive statistics

use crate::error::Result;
use crate::stats::{DescriptiveStats, SummaryTable};
use crate::table::Table;

pub(crate) fn describe_impl(data: &[f64]) -> DescriptiveStats {
    if data.is_empty() {
        return DescriptiveStats::undefined();
    }

    let count = data.len();
    let mean = data.iter().sum::<f64>() / count as f64;
    let std = sample_std_impl(data);

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    DescriptiveStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

pub(crate) fn sample_std_impl(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = data.iter().sum::<f64>() / n as f64;
    let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
    (sum_squared_diff / (n - 1) as f64).sqrt()
}

/// Linearly interpolated percentile of sorted data
fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

pub(crate) fn summarize_impl<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<SummaryTable> {
    let mut names = Vec::with_capacity(columns.len());
    let mut stats = Vec::with_capacity(columns.len());

    for name in columns {
        let column = table.require_column(name.as_ref())?;
        names.push(column.name().to_string());
        stats.push(describe_impl(&column.numeric_values()));
    }

    Ok(SummaryTable {
        columns: names,
        stats,
    })
}
