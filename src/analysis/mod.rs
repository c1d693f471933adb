//! Two-variable association analysis
//!
//! `analyze` runs a fixed sequence of gates over two columns: numeric
//! coercion, pairwise complete-case deletion, a minimum sample size, a
//! constant-value check, then the coefficient and its p-value. Each gate
//! either passes or ends the attempt with a [`CorrelationRefusal`].

use std::fmt::{self, Display};
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats;
use crate::table::Table;
use crate::vis::ScatterData;

/// Correlation coefficient to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
}

impl CorrelationMethod {
    pub const ALL: [CorrelationMethod; 2] =
        [CorrelationMethod::Pearson, CorrelationMethod::Spearman];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
        }
    }
}

impl Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            other => Err(Error::InvalidInput(format!(
                "unknown correlation method '{}'",
                other
            ))),
        }
    }
}

/// Why a correlation attempt produced no result
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum CorrelationRefusal {
    #[error("Not enough paired data after dropping NA")]
    InsufficientData { paired: usize },

    #[error("One or both variables have constant values")]
    ConstantValues,

    #[error("Error computing correlation: {0}")]
    Computation(String),
}

impl CorrelationRefusal {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            CorrelationRefusal::InsufficientData { .. } => "insufficient paired data",
            CorrelationRefusal::ConstantValues => "constant value(s)",
            CorrelationRefusal::Computation(_) => "computation error",
        }
    }
}

fn refusal_from(err: Error) -> CorrelationRefusal {
    match err {
        Error::ComputationError(msg) | Error::InsufficientData(msg) | Error::InvalidInput(msg) => {
            CorrelationRefusal::Computation(msg)
        }
        other => CorrelationRefusal::Computation(other.to_string()),
    }
}

/// Two columns after numeric coercion and joint removal of missing rows
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PairedSample {
    /// Coerce both columns unconditionally and keep rows where both are present
    pub fn from_table(table: &Table, x: &str, y: &str) -> Result<Self> {
        let xs = table.require_column(x)?.coerced();
        let ys = table.require_column(y)?.coerced();

        let (x, y) = xs
            .into_iter()
            .zip(ys)
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .unzip();

        Ok(PairedSample { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Coefficient, p-value and sample size of a successful correlation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub p_value: f64,
    pub sample_size: usize,
    pub method: CorrelationMethod,
}

impl CorrelationResult {
    /// Coefficient with four decimal places
    pub fn coefficient_label(&self) -> String {
        format!("{:.4}", self.coefficient)
    }

    /// p-value with four significant digits
    pub fn p_value_label(&self) -> String {
        format_significant(self.p_value, 4)
    }
}

/// A correlation result together with its scatter plot input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub x_name: String,
    pub y_name: String,
    pub result: CorrelationResult,
    pub scatter: ScatterData,
}

impl Correlation {
    /// Headline, e.g. `Correlation (pearson) between a and b: 0.9000`
    pub fn summary(&self) -> String {
        format!(
            "Correlation ({}) between {} and {}: {}",
            self.result.method,
            self.x_name,
            self.y_name,
            self.result.coefficient_label()
        )
    }

    /// Significance line, e.g. `p-value: 0.03739 | Sample size: 5`
    pub fn detail(&self) -> String {
        format!(
            "p-value: {} | Sample size: {}",
            self.result.p_value_label(),
            self.result.sample_size
        )
    }
}

/// Result of one correlation attempt
pub type CorrelationOutcome = std::result::Result<Correlation, CorrelationRefusal>;

/// Scatter plot title carrying variable names, coefficient and p-value
pub fn scatter_title(x: &str, y: &str, result: &CorrelationResult) -> String {
    format!(
        "Scatter Plot: {} vs {}\n(r = {}, p = {})",
        x,
        y,
        result.coefficient_label(),
        result.p_value_label()
    )
}

fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first) || stats::sample_std(values) == 0.0,
        None => true,
    }
}

/// Correlate two columns of `table`
///
/// Pure and deterministic: the same table, columns and method always give the
/// same outcome.
pub fn analyze(
    table: &Table,
    x: &str,
    y: &str,
    method: CorrelationMethod,
) -> CorrelationOutcome {
    let outcome = analyze_inner(table, x, y, method);
    match &outcome {
        Ok(c) => info!("{} ({})", c.summary(), c.detail()),
        Err(refusal) => warn!("correlation between '{}' and '{}' refused: {}", x, y, refusal),
    }
    outcome
}

fn analyze_inner(
    table: &Table,
    x: &str,
    y: &str,
    method: CorrelationMethod,
) -> CorrelationOutcome {
    let sample = PairedSample::from_table(table, x, y).map_err(refusal_from)?;

    if sample.len() < 2 {
        return Err(CorrelationRefusal::InsufficientData {
            paired: sample.len(),
        });
    }

    if is_constant(&sample.x) || is_constant(&sample.y) {
        return Err(CorrelationRefusal::ConstantValues);
    }

    let test = match method {
        CorrelationMethod::Pearson => stats::pearson(&sample.x, &sample.y),
        CorrelationMethod::Spearman => stats::spearman(&sample.x, &sample.y),
    }
    .map_err(refusal_from)?;

    let result = CorrelationResult {
        coefficient: test.coefficient,
        p_value: test.p_value,
        sample_size: sample.len(),
        method,
    };

    let scatter = ScatterData {
        title: scatter_title(x, y, &result),
        x_label: x.to_string(),
        y_label: y.to_string(),
        x: sample.x,
        y: sample.y,
    };

    Ok(Correlation {
        x_name: x.to_string(),
        y_name: y.to_string(),
        result,
        scatter,
    })
}

/// Format with `digits` significant digits, `%g` style
///
/// Trailing zeros are dropped and scientific notation is used for exponents
/// below -4 or at least `digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(&mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
