// Correlation significance tests

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Error, Result};
use crate::stats::CorrelationTest;

fn check_paired(x: &[f64], y: &[f64]) -> Result<usize> {
    if x.len() != y.len() {
        return Err(Error::InvalidInput(format!(
            "paired samples differ in length: x={}, y={}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::InsufficientData(
            "correlation needs at least two paired observations".into(),
        ));
    }
    Ok(x.len())
}

/// Product-moment correlation coefficient
fn coefficient(x: &[f64], y: &[f64]) -> Result<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    let sum_squared_diff_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let sum_squared_diff_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    let denominator = (sum_squared_diff_x * sum_squared_diff_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(Error::ComputationError(
            "variance is zero or not finite".into(),
        ));
    }

    let r = numerator / denominator;
    if r.is_nan() {
        return Err(Error::ComputationError("correlation is undefined".into()));
    }
    Ok(r.clamp(-1.0, 1.0))
}

/// Two-sided p-value of a correlation coefficient under a t distribution
/// with `n - 2` degrees of freedom
fn t_test_p_value(r: f64, n: usize) -> Result<f64> {
    let df = (n - 2) as f64;
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return Ok(0.0);
    }

    let t = r * (df / one_minus_r2).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| Error::ComputationError(format!("t distribution: {}", e)))?;
    let p = 2.0 * dist.sf(t.abs());

    if p.is_nan() {
        return Err(Error::ComputationError("p-value is undefined".into()));
    }
    Ok(p.clamp(0.0, 1.0))
}

pub(crate) fn pearson_impl(x: &[f64], y: &[f64]) -> Result<CorrelationTest> {
    let n = check_paired(x, y)?;
    let r = coefficient(x, y)?;

    // Two points always lie on a line
    let p_value = if n == 2 { 1.0 } else { t_test_p_value(r, n)? };

    Ok(CorrelationTest {
        coefficient: r,
        p_value,
    })
}

pub(crate) fn spearman_impl(x: &[f64], y: &[f64]) -> Result<CorrelationTest> {
    let n = check_paired(x, y)?;
    if n == 2 {
        return Err(Error::ComputationError(
            "rank correlation p-value is undefined for two observations".into(),
        ));
    }

    let rank_x = rank_average_impl(x);
    let rank_y = rank_average_impl(y);
    let rho = coefficient(&rank_x, &rank_y)?;
    let p_value = t_test_p_value(rho, n)?;

    Ok(CorrelationTest {
        coefficient: rho,
        p_value,
    })
}

pub(crate) fn rank_average_impl(data: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0.0; data.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && data[order[end + 1]] == data[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}
