use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::Serialize;

/// A single spreadsheet cell
///
/// Cells are dynamically typed in the source spreadsheet. Every cell is one of
/// a finite number, a piece of text, or missing. `NaN` never appears inside
/// `Number`; it is normalized to `Missing` on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Empty or not available
    Missing,
}

impl CellValue {
    /// Build a numeric cell, mapping `NaN` to `Missing`
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            CellValue::Missing
        } else {
            CellValue::Number(value)
        }
    }

    /// Build a text cell, mapping empty or whitespace-only text to `Missing`
    pub fn text<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// Numeric payload, if the cell already holds a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric coercion: numbers stay, text is parsed, everything else is missing
    pub fn coerce(&self) -> CellValue {
        match self {
            CellValue::Number(v) => CellValue::number(*v),
            CellValue::Text(s) => try_parse_number(s),
            CellValue::Missing => CellValue::Missing,
        }
    }

    /// Ordering used for category labels: numbers ascending, then text, then missing
    pub fn category_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Number(_), _) => Ordering::Less,
            (_, CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Text(_), CellValue::Missing) => Ordering::Less,
            (CellValue::Missing, CellValue::Text(_)) => Ordering::Greater,
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Missing => write!(f, "NA"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Missing,
        }
    }
}

/// Parse raw text into a number, or `Missing` when it does not parse
///
/// Surrounding whitespace is ignored and `.` is the only decimal separator.
/// Exponent notation and `inf` are accepted; `nan` parses to `Missing`.
pub fn try_parse_number(raw: &str) -> CellValue {
    match raw.trim().parse::<f64>() {
        Ok(v) => CellValue::number(v),
        Err(_) => CellValue::Missing,
    }
}
