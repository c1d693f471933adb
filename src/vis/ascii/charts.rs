//! Chart implementations for text-based visualization

use super::{Chart, ChartConfig, ChartStyle};
use crate::vis::chart_data::{BarData, HistogramData, ScatterData};

fn bar_char(style: ChartStyle) -> char {
    match style {
        ChartStyle::Ascii => '#',
        ChartStyle::Unicode => '█',
    }
}

fn title_line(output: &mut String, title: &Option<String>, width: usize) {
    if let Some(ref title) = title {
        for line in title.lines() {
            output.push_str(&format!("{:^width$}\n", line, width = width));
        }
        output.push('\n');
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// Histogram over prepared bins
#[derive(Debug, Clone)]
pub struct Histogram {
    bin_edges: Vec<f64>,
    counts: Vec<usize>,
    config: ChartConfig,
    style: ChartStyle,
}

impl Histogram {
    pub fn new(data: &HistogramData, config: ChartConfig, style: ChartStyle) -> Self {
        Self {
            bin_edges: data.edges().to_vec(),
            counts: data.counts().to_vec(),
            config,
            style,
        }
    }
}

impl Chart for Histogram {
    fn render(&self) -> String {
        if self.counts.is_empty() {
            return String::from("No numeric data");
        }

        let mut output = String::new();
        let max_count = *self.counts.iter().max().unwrap_or(&1);
        let bar_width = self.config.width.saturating_sub(24);
        let fill = bar_char(self.style);

        title_line(&mut output, &self.config.title, self.config.width);

        for (i, &count) in self.counts.iter().enumerate() {
            let bar_len = if max_count > 0 {
                (count as f64 / max_count as f64 * bar_width as f64).round() as usize
            } else {
                0
            };

            let bar: String = std::iter::repeat(fill).take(bar_len).collect();
            output.push_str(&format!(
                "{:>8.2}-{:<8.2} │{:<width$}│ {}\n",
                self.bin_edges[i],
                self.bin_edges[i + 1],
                bar,
                count,
                width = bar_width
            ));
        }

        output
    }
}

// ============================================================================
// Bar Chart
// ============================================================================

/// Horizontal bar chart of category counts
#[derive(Debug, Clone)]
pub struct BarChart {
    labels: Vec<String>,
    counts: Vec<usize>,
    config: ChartConfig,
    style: ChartStyle,
    label_width: usize,
}

impl BarChart {
    pub fn new(data: &BarData, config: ChartConfig, style: ChartStyle) -> Self {
        Self {
            labels: data.labels(),
            counts: data.counts(),
            config,
            style,
            label_width: 12,
        }
    }
}

impl Chart for BarChart {
    fn render(&self) -> String {
        if self.counts.is_empty() {
            return String::from("No data");
        }

        let mut output = String::new();
        let max_count = *self.counts.iter().max().unwrap_or(&1);
        let bar_width = self.config.width.saturating_sub(self.label_width + 10);
        let fill = bar_char(self.style);

        title_line(&mut output, &self.config.title, self.config.width);

        for (label, &count) in self.labels.iter().zip(self.counts.iter()) {
            let bar_len = if max_count > 0 {
                (count as f64 / max_count as f64 * bar_width as f64).round() as usize
            } else {
                0
            };

            let bar: String = std::iter::repeat(fill).take(bar_len).collect();
            let truncated_label: String = label.chars().take(self.label_width).collect();

            output.push_str(&format!(
                "{:>label_width$} │{:<bar_width$}│ {}\n",
                truncated_label,
                bar,
                count,
                label_width = self.label_width,
                bar_width = bar_width
            ));
        }

        output
    }
}

// ============================================================================
// Scatter Plot
// ============================================================================

/// Scatter plot for two-dimensional data
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    x: Vec<f64>,
    y: Vec<f64>,
    x_label: String,
    y_label: String,
    config: ChartConfig,
    point_char: char,
}

impl ScatterPlot {
    pub fn new(data: &ScatterData, config: ChartConfig, style: ChartStyle) -> Self {
        Self {
            x: data.x.clone(),
            y: data.y.clone(),
            x_label: data.x_label.clone(),
            y_label: data.y_label.clone(),
            config: ChartConfig {
                title: Some(data.title.clone()),
                ..config
            },
            point_char: match style {
                ChartStyle::Ascii => '*',
                ChartStyle::Unicode => '●',
            },
        }
    }
}

impl Chart for ScatterPlot {
    fn render(&self) -> String {
        let len = self.x.len().min(self.y.len());
        if len == 0 {
            return String::from("No data");
        }

        let height = self.config.height.max(2);
        let width = self.config.width.max(10);

        let x_min = self.x.iter().cloned().fold(f64::INFINITY, f64::min);
        let x_max = self.x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let y_min = self.y.iter().cloned().fold(f64::INFINITY, f64::min);
        let y_max = self.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let x_range = if (x_max - x_min).abs() < f64::EPSILON {
            1.0
        } else {
            x_max - x_min
        };
        let y_range = if (y_max - y_min).abs() < f64::EPSILON {
            1.0
        } else {
            y_max - y_min
        };

        let mut grid = vec![vec![' '; width]; height];
        for i in 0..len {
            let px = ((self.x[i] - x_min) / x_range * (width - 1) as f64).round() as usize;
            let py = ((self.y[i] - y_min) / y_range * (height - 1) as f64).round() as usize;
            grid[py.min(height - 1)][px.min(width - 1)] = self.point_char;
        }

        let mut output = String::new();
        title_line(&mut output, &self.config.title, width + 8);
        output.push_str(&format!("{}\n", self.y_label));

        for row in (0..height).rev() {
            let y_val = y_min + (row as f64 / (height - 1) as f64) * y_range;
            output.push_str(&format!("{:>6.1} │", y_val));
            output.extend(grid[row].iter());
            output.push('\n');
        }

        output.push_str("       └");
        output.extend(std::iter::repeat('─').take(width));
        output.push('\n');
        output.push_str(&format!(
            "        {:<w$.1}{:>8.1}\n",
            x_min,
            x_max,
            w = width - 8
        ));
        output.push_str(&format!("{:^w$}\n", self.x_label, w = width + 8));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use crate::vis::chart_data::{bar_data, histogram_data};

    #[test]
    fn test_histogram_render() {
        let column = Column::new("q", vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0]);
        let data = histogram_data(&column).unwrap();
        let output = Histogram::new(&data, ChartConfig::default(), ChartStyle::Ascii).render();
        assert_eq!(output.lines().count(), data.bins());
        assert!(output.contains('#'));
    }

    #[test]
    fn test_bar_chart_render_with_title() {
        let column = Column::new("q", vec!["A", "B", "B", "C"]);
        let data = bar_data(&column).unwrap();
        let config = ChartConfig {
            title: Some("Test Chart".to_string()),
            ..Default::default()
        };
        let output = BarChart::new(&data, config, ChartStyle::Unicode).render();
        assert!(output.contains("Test Chart"));
        assert!(output.contains("A"));
        assert!(output.contains("│ 2"));
    }

    #[test]
    fn test_scatter_plot() {
        let data = ScatterData {
            title: "Scatter Plot: a vs b".into(),
            x_label: "a".into(),
            y_label: "b".into(),
            x: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            y: vec![1.0, 4.0, 2.0, 5.0, 3.0],
        };
        let output = ScatterPlot::new(&data, ChartConfig::default(), ChartStyle::Unicode).render();
        assert!(output.contains('●'));
        assert!(output.contains("Scatter Plot: a vs b"));
    }
}
