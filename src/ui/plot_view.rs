use crate::config::{AxisScale, PlotConfig};
use crate::models::{summarize, LongRecord};
use eframe::egui;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

const BAR_WIDTH: f64 = 0.8;
// Matches a seaborn capsize of 0.2 on a 0.8-wide bar.
const CAP_HALF_WIDTH: f64 = 0.08;
const JITTER_SPREAD: f64 = 0.25;
const BAR_FILL: egui::Color32 = egui::Color32::from_rgb(173, 216, 230);

/// One bar plus its overlay data, already in display space (log-transformed
/// when the chart uses a logarithmic axis).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBar {
    pub label: String,
    pub height: f64,
    /// (low, high) whisker ends; `None` when the group has no error extent
    /// or an end fell outside the log domain.
    pub whisker: Option<(f64, f64)>,
    pub points: Vec<f64>,
}

/// Prepared chart, rebuilt on every generate action and redrawn in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub groups: Vec<GroupBar>,
    /// `Some(base)` when the y axis is logarithmic.
    pub log_base: Option<f64>,
}

impl ChartData {
    pub fn total_points(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Groups and aggregates the records per the form selections and maps
/// everything into display space. Invalid records are dropped here; on a
/// log axis, values outside the domain drop out as non-finite transforms.
pub fn build_chart(records: &[LongRecord], config: &PlotConfig) -> ChartData {
    let summaries = summarize(records, config.statistic, config.error_bar);

    let base = match config.y_scale {
        AxisScale::Logarithmic => Some(config.effective_log_base().0),
        AxisScale::Linear => None,
    };
    let tx = |v: f64| match base {
        Some(b) => v.ln() / b.ln(),
        None => v,
    };

    let groups = summaries
        .into_iter()
        .filter_map(|summary| {
            let height = tx(summary.statistic);
            if !height.is_finite() {
                return None;
            }
            let whisker = summary.error.and_then(|err| {
                let lo = tx(summary.statistic - err);
                let hi = tx(summary.statistic + err);
                (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
            });
            let points = summary
                .values
                .iter()
                .map(|v| tx(*v))
                .filter(|v| v.is_finite())
                .collect();
            Some(GroupBar {
                label: summary.label,
                height,
                whisker,
                points,
            })
        })
        .collect();

    ChartData {
        title: format!(
            "Bar Plot with Individual Data Points ({} ± {})",
            config.statistic, config.error_bar
        ),
        groups,
        log_base: base,
    }
}

/// Draws the chart into the given ui, replacing whatever occupied the plot
/// surface on the previous frame.
pub fn render(ui: &mut egui::Ui, chart: &ChartData) {
    ui.heading(&chart.title);
    ui.add_space(4.0);

    let outline = ui.visuals().strong_text_color();
    let point_color = outline.gamma_multiply(0.7);

    let labels: Vec<String> = chart.groups.iter().map(|g| g.label.clone()).collect();
    let mut plot = Plot::new("bar_plot")
        .x_axis_label("Group")
        .y_axis_label("Value")
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        });

    plot = match chart.log_base {
        Some(base) => {
            plot.y_axis_formatter(move |mark: GridMark, _range| format_log_tick(base, mark.value))
        }
        None => plot.include_y(0.0),
    };

    plot.show(ui, |plot_ui| {
        let bars: Vec<Bar> = chart
            .groups
            .iter()
            .enumerate()
            .map(|(idx, group)| {
                Bar::new(idx as f64, group.height)
                    .width(BAR_WIDTH)
                    .name(&group.label)
                    .fill(BAR_FILL)
                    .stroke(egui::Stroke::new(1.0, outline))
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(bars));

        for (idx, group) in chart.groups.iter().enumerate() {
            let x = idx as f64;
            if let Some((lo, hi)) = group.whisker {
                let stroke_width = 1.5;
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[x, lo], [x, hi]]))
                        .color(outline)
                        .width(stroke_width),
                );
                for y in [lo, hi] {
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![
                            [x - CAP_HALF_WIDTH, y],
                            [x + CAP_HALF_WIDTH, y],
                        ]))
                        .color(outline)
                        .width(stroke_width),
                    );
                }
            }
        }

        let mut scattered: Vec<[f64; 2]> = Vec::new();
        for (idx, group) in chart.groups.iter().enumerate() {
            for (point_idx, value) in group.points.iter().enumerate() {
                scattered.push([idx as f64 + jitter(idx, point_idx), *value]);
            }
        }
        plot_ui.points(
            Points::new(PlotPoints::from(scattered))
                .radius(2.5)
                .color(point_color),
        );
    });
}

/// Deterministic per-point horizontal offset so repeated redraws keep every
/// point in the same place.
fn jitter(group: usize, index: usize) -> f64 {
    let mut h = (group as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index as u64 + 1);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    ((h % 1000) as f64 / 999.0 - 0.5) * JITTER_SPREAD
}

fn format_log_tick(base: f64, v: f64) -> String {
    let value = base.powf(v);
    if !value.is_finite() {
        return String::new();
    }
    if (0.01..1000.0).contains(&value) {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{:.1e}", value)
    }
}
