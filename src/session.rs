//! Session-scoped analysis context
//!
//! A [`Session`] owns at most one active table. Every upload replaces it
//! wholesale; analysis operations only read it.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::analysis::{self, CorrelationMethod, CorrelationOutcome};
use crate::classify::{self, ColumnGroups, GroupKind, GroupMatcher};
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::io::{self, SourceFormat};
use crate::stats::{self, SummaryTable};
use crate::table::Table;
use crate::totals::{self, TotalsOutcome};
use crate::vis::{prepare_group_charts, GroupCharts};

#[derive(Debug, Clone)]
struct ActiveTable {
    table: Table,
    numeric_columns: Vec<String>,
}

/// Everything the descriptive step produces for one column selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveReport {
    /// Selected columns, in selection order
    pub selected: Vec<String>,
    /// Summary of the selected columns
    pub summary: SummaryTable,
    /// X / Y / Other partition of the selection
    pub groups: ColumnGroups,
    /// Status of the X and Y totals
    pub totals: Vec<TotalsOutcome>,
    /// Summary of the created total columns, if any
    pub totals_summary: Option<SummaryTable>,
    /// Chart data per non-empty group, totals last
    pub group_charts: Vec<GroupCharts>,
    #[serde(skip)]
    pub table: Table,
}

impl DescriptiveReport {
    /// Names of the total columns that were created
    pub fn total_columns(&self) -> Vec<&str> {
        self.totals
            .iter()
            .filter(|t| t.is_created())
            .map(|t| t.name())
            .collect()
    }

    pub fn group(&self, kind: GroupKind) -> Option<&GroupCharts> {
        self.group_charts.iter().find(|g| g.kind == kind)
    }
}

/// Single-user analysis session
///
/// # Example
///
/// ```rust
/// use surveyrs::{CorrelationMethod, Session};
///
/// let mut session = Session::default();
/// session.upload(b"x1,x2,y1\n1,2,3\n2,3,5\n3,5,4\n4,4,8\n").unwrap();
///
/// let report = session.analyze_descriptive(&session.default_selection()).unwrap();
/// assert_eq!(report.total_columns(), vec!["X_TOTAL", "Y_TOTAL"]);
///
/// let outcome = session.correlate("x1", "y1", CorrelationMethod::Pearson).unwrap();
/// assert!(outcome.is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: AnalyzerConfig,
    matcher: GroupMatcher,
    active: Option<ActiveTable>,
}

impl Session {
    /// Create a session with validated settings
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let matcher = GroupMatcher::new(&config.x_prefix, &config.y_prefix)?;
        Ok(Session {
            config,
            matcher,
            active: None,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Load uploaded bytes as the new active table
    ///
    /// On failure the previous table is discarded as well, so the session is
    /// left ready for another upload.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<&Table> {
        let loaded = io::load(bytes);
        self.activate(loaded)
    }

    pub fn upload_with_format(&mut self, bytes: &[u8], format: SourceFormat) -> Result<&Table> {
        let loaded = io::load_with_format(bytes, format);
        self.activate(loaded)
    }

    pub fn upload_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&Table> {
        let loaded = io::read_table(path);
        self.activate(loaded)
    }

    fn activate(&mut self, loaded: Result<Table>) -> Result<&Table> {
        self.active = None;
        let mut table = loaded.map_err(|e| {
            warn!("upload rejected: {}", e);
            e
        })?;

        let numeric_columns =
            classify::classify_numeric_with(&mut table, self.config.numeric_threshold);
        info!(
            "upload accepted: {} rows x {} columns, {} numeric",
            table.row_count(),
            table.column_count(),
            numeric_columns.len()
        );

        let active = self.active.insert(ActiveTable {
            table,
            numeric_columns,
        });
        Ok(&active.table)
    }

    /// Drop the active table
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn has_table(&self) -> bool {
        self.active.is_some()
    }

    /// The active table after numeric classification
    pub fn table(&self) -> Option<&Table> {
        self.active.as_ref().map(|a| &a.table)
    }

    fn require_active(&self) -> Result<&ActiveTable> {
        self.active.as_ref().ok_or(Error::NoActiveTable)
    }

    /// First `n` rows of the active table
    pub fn preview(&self, n: usize) -> Result<Table> {
        Ok(self.require_active()?.table.head(n))
    }

    /// Numeric-coercible columns of the active table, in table order
    pub fn numeric_columns(&self) -> &[String] {
        self.active
            .as_ref()
            .map(|a| a.numeric_columns.as_slice())
            .unwrap_or(&[])
    }

    pub fn default_selection(&self) -> Vec<String> {
        classify::default_selection(self.numeric_columns(), self.config.default_selection_limit)
    }

    /// Summaries, totals and chart data for the selected numeric columns
    ///
    /// The active table is left untouched; totals are appended to a working
    /// copy returned in the report.
    pub fn analyze_descriptive<S: AsRef<str>>(&self, selection: &[S]) -> Result<DescriptiveReport> {
        let active = self.require_active()?;
        if selection.is_empty() {
            return Err(Error::InvalidInput("no columns selected".to_string()));
        }

        let selected: Vec<String> = selection.iter().map(|s| s.as_ref().to_string()).collect();
        for name in &selected {
            active.table.require_column(name)?;
            if !active.numeric_columns.contains(name) {
                return Err(Error::NonNumericColumn(name.clone()));
            }
        }

        let summary = stats::summarize(&active.table, &selected)?;
        let groups = self.matcher.partition(&selected);

        let mut table = active.table.clone();
        let totals = totals::append_totals_named(
            &mut table,
            &groups,
            &self.config.x_total_name,
            &self.config.y_total_name,
        );
        let created: Vec<String> = totals
            .iter()
            .filter(|t| t.is_created())
            .map(|t| t.name().to_string())
            .collect();

        let mut group_charts: Vec<GroupCharts> = [GroupKind::X, GroupKind::Y, GroupKind::Other]
            .into_iter()
            .filter(|kind| !groups.get(*kind).is_empty())
            .map(|kind| self.charts_for(&table, kind, groups.get(kind)))
            .collect();

        let totals_summary = if created.is_empty() {
            info!("no X or Y columns selected, no totals computed");
            None
        } else {
            group_charts.push(self.charts_for(&table, GroupKind::Totals, &created));
            Some(stats::summarize(&table, &created)?)
        };

        Ok(DescriptiveReport {
            selected,
            summary,
            groups,
            totals,
            totals_summary,
            group_charts,
            table,
        })
    }

    fn charts_for(&self, table: &Table, kind: GroupKind, names: &[String]) -> GroupCharts {
        prepare_group_charts(
            table,
            kind,
            names,
            self.config.max_bar_categories,
            self.config.min_histogram_bins,
            self.config.max_histogram_bins,
        )
    }

    /// Correlation needs at least two numeric columns
    pub fn can_correlate(&self) -> bool {
        self.numeric_columns().len() >= 2
    }

    /// Numeric columns eligible as the second variable once `x` is chosen
    pub fn correlation_candidates(&self, x: &str) -> Vec<String> {
        self.numeric_columns()
            .iter()
            .filter(|c| c.as_str() != x)
            .cloned()
            .collect()
    }

    /// Correlate two columns of the active table
    ///
    /// The outer `Result` fails only when no table is active; refusals are
    /// reported through the inner outcome.
    pub fn correlate(
        &self,
        x: &str,
        y: &str,
        method: CorrelationMethod,
    ) -> Result<CorrelationOutcome> {
        let active = self.require_active()?;
        Ok(analysis::analyze(&active.table, x, y, method))
    }
}
