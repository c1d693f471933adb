//! # surveyrs
//!
//! Survey spreadsheet analysis: load a workbook of responses, detect numeric
//! columns, summarize them, derive X/Y group totals, prepare chart data and
//! test pairwise correlation.
//!
//! ```rust
//! use surveyrs::{CorrelationMethod, Session};
//!
//! let mut session = Session::default();
//! session
//!     .upload(b"x1,y1\n1,2\n2,4\n3,5\n4,4\n5,6\n")
//!     .unwrap();
//!
//! let correlation = session
//!     .correlate("x1", "y1", CorrelationMethod::Spearman)
//!     .unwrap()
//!     .unwrap();
//! println!("{}", correlation.summary());
//! ```

pub mod analysis;
pub mod cell;
pub mod classify;
pub mod config;
pub mod error;
pub mod io;
pub mod session;
pub mod stats;
pub mod table;
pub mod totals;
pub mod vis;

// Re-export commonly used types
pub use analysis::{
    analyze, Correlation, CorrelationMethod, CorrelationOutcome, CorrelationRefusal,
    CorrelationResult,
};
pub use cell::CellValue;
pub use classify::{classify_numeric, partition_groups, ColumnGroups, GroupKind};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use io::{load, read_table, SourceFormat};
pub use session::{DescriptiveReport, Session};
pub use stats::{DescriptiveStats, SummaryTable};
pub use table::{Column, Table};
pub use totals::{compute_total, TotalsOutcome};
pub use vis::{AsciiRenderer, ChartRenderer};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
