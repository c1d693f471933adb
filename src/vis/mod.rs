//! Module providing chart data preparation and rendering
//!
//! The analysis core only decides *what* data feeds a chart: category counts
//! for bar charts, bins for histograms and paired values for scatter plots.
//! Drawing is delegated to a [`ChartRenderer`]; the `ascii` submodule provides
//! a text renderer for terminal environments.

pub mod ascii;
pub mod chart_data;

pub use self::ascii::{AsciiRenderer, ChartStyle};
pub use self::chart_data::{
    bar_data, bar_data_with, histogram_bins, histogram_data, histogram_data_with,
    prepare_group_charts, BarData, ChartData, ColumnCharts, GroupCharts, HistogramData,
    RenderReason, ScatterData,
};

/// Capability that draws prepared chart data
///
/// Implementors decide the output format. Preparation failures reach the
/// renderer as a [`RenderReason`] and are drawn as placeholders, so a single
/// bad column never prevents other charts from rendering.
pub trait ChartRenderer {
    type Output;

    fn bar(&self, title: &str, data: &BarData) -> Self::Output;

    fn histogram(&self, title: &str, data: &HistogramData) -> Self::Output;

    fn scatter(&self, data: &ScatterData) -> Self::Output;

    fn placeholder(&self, title: &str, reason: &RenderReason) -> Self::Output;

    fn render_bar(&self, title: &str, data: &Result<BarData, RenderReason>) -> Self::Output {
        match data {
            Ok(data) => self.bar(title, data),
            Err(reason) => self.placeholder(title, reason),
        }
    }

    fn render_histogram(
        &self,
        title: &str,
        data: &Result<HistogramData, RenderReason>,
    ) -> Self::Output {
        match data {
            Ok(data) => self.histogram(title, data),
            Err(reason) => self.placeholder(title, reason),
        }
    }

    fn render_chart(&self, title: &str, data: &Result<ChartData, RenderReason>) -> Self::Output {
        match data {
            Ok(ChartData::Bar(data)) => self.bar(title, data),
            Ok(ChartData::Histogram(data)) => self.histogram(title, data),
            Err(reason) => self.placeholder(title, reason),
        }
    }

    /// Render every chart of a group, bar charts first, then histograms
    fn render_group(&self, group: &GroupCharts) -> Vec<Self::Output> {
        let bars = group
            .charts
            .iter()
            .map(|c| self.render_bar(&c.name, &c.bar));
        let histograms = group
            .charts
            .iter()
            .map(|c| self.render_histogram(&c.name, &c.histogram));
        bars.chain(histograms).collect()
    }
}
