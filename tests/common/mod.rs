//! Common test utilities module
//!
//! Provides shared helpers for the integration tests:
//! - Temporary survey files with automatic cleanup
//! - Survey fixtures as CSV text and xlsx workbooks

#![allow(dead_code)]

pub mod fixtures;
pub mod test_utils;

pub use fixtures::{survey_csv, survey_rows, SURVEY_HEADERS};
#[cfg(feature = "excel")]
pub use fixtures::write_survey_xlsx;
pub use test_utils::{write_temp_file, TempSurveyDir};
