//! Text-based chart rendering
//!
//! Renders prepared chart data as ASCII/Unicode text for terminal output.

mod charts;

pub use charts::{BarChart, Histogram, ScatterPlot};

use crate::vis::chart_data::{BarData, HistogramData, RenderReason, ScatterData};
use crate::vis::ChartRenderer;

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;
}

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in characters
    pub width: usize,
    /// Chart height in characters
    pub height: usize,
    /// Title for the chart
    pub title: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 15,
            title: None,
        }
    }
}

/// Chart style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    /// Simple ASCII characters
    Ascii,
    /// Unicode block characters
    #[default]
    Unicode,
}

/// [`ChartRenderer`] producing text charts
#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    pub width: usize,
    pub height: usize,
    pub style: ChartStyle,
}

impl AsciiRenderer {
    pub fn new(style: ChartStyle) -> Self {
        let config = ChartConfig::default();
        Self {
            width: config.width,
            height: config.height,
            style,
        }
    }

    fn config(&self, title: &str) -> ChartConfig {
        let defaults = ChartConfig::default();
        ChartConfig {
            width: if self.width == 0 { defaults.width } else { self.width },
            height: if self.height == 0 { defaults.height } else { self.height },
            title: Some(title.to_string()),
        }
    }
}

impl ChartRenderer for AsciiRenderer {
    type Output = String;

    fn bar(&self, title: &str, data: &BarData) -> String {
        BarChart::new(data, self.config(title), self.style).render()
    }

    fn histogram(&self, title: &str, data: &HistogramData) -> String {
        Histogram::new(data, self.config(title), self.style).render()
    }

    fn scatter(&self, data: &ScatterData) -> String {
        ScatterPlot::new(data, self.config(&data.title), self.style).render()
    }

    fn placeholder(&self, title: &str, reason: &RenderReason) -> String {
        let width = self.config(title).width;
        format!(
            "{:^width$}\n\n{:^width$}\n",
            title,
            reason.marker(),
            width = width
        )
    }
}
