//! Bar chart rendering for report panels.
//!
//! Renders one ranked or time-keyed series as a vertical bar chart with a
//! title, a y axis with "nice" ticks, dashed grid lines and value labels
//! above the bars.

use super::canvas::Canvas;
use super::text::{FontSize, draw_text_centered, draw_text_right, text_width, truncate_label};

const TITLE_H: usize = 32;
const TOP_PAD: usize = 12;
const BOTTOM_PAD: usize = 8;
const X_LABEL_H: usize = 20;
const Y_TICK_PAD: usize = 6;
const RIGHT_MARGIN: usize = 12;
const VALUE_LABEL_GAP: usize = 4;

const AXIS_THICKNESS: usize = 2;
const GRID_DASH_ON: usize = 3;
const GRID_DASH_OFF: usize = 5;
const GRID_INTENSITY: f32 = 0.35;

const BAR_FILL_INTENSITY: f32 = 0.65;
const BAR_GAP: usize = 6;
const MIN_BAR_H: usize = 3;

const X_LABEL_MAX_CHARS: usize = 12;

/// One chart of the recap report.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    pub title: String,
    /// One label per value; drawn below the axis, thinned when they overlap.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

struct Layout {
    data_left: usize,
    data_right: usize,
    data_top: usize,
    data_bottom: usize,
}

impl Layout {
    fn data_width(&self) -> usize {
        self.data_right.saturating_sub(self.data_left)
    }

    fn data_height(&self) -> usize {
        self.data_bottom.saturating_sub(self.data_top)
    }
}

/// Render the chart into a fresh panel canvas of the given size.
pub fn render(chart: &BarChart, width: usize, height: usize) -> Canvas {
    let mut canvas = Canvas::new(width, height);

    draw_text_centered(&mut canvas, &chart.title, width / 2, 4, 1.0, FontSize::Large);

    if chart.values.is_empty() {
        draw_text_centered(&mut canvas, "no data", width / 2, height / 2, 0.6, FontSize::Medium);
        return canvas;
    }

    // Bars always grow from zero; ticks cover 0..=max.
    let v_max = chart.values.iter().cloned().fold(0.0f64, f64::max);
    let ticks = compute_nice_ticks(0.0, v_max, 4);
    let y_max = ticks.last().copied().unwrap_or(v_max).max(1.0);

    let y_labels: Vec<String> = ticks.iter().map(|&v| format_tick(v)).collect();
    let y_label_max_chars = y_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let layout = Layout {
        data_left: y_label_max_chars * FontSize::Medium.char_width() + Y_TICK_PAD,
        data_right: width.saturating_sub(RIGHT_MARGIN),
        data_top: TITLE_H + TOP_PAD,
        data_bottom: height.saturating_sub(X_LABEL_H + BOTTOM_PAD),
    };

    // Grid lines and y tick labels.
    for (tick, label) in ticks.iter().zip(y_labels.iter()) {
        let normalized = tick / y_max;
        let py = layout.data_bottom as f64 - normalized * layout.data_height() as f64;
        let py = py.round() as usize;

        canvas.hline_dashed(
            layout.data_left,
            layout.data_right,
            py,
            GRID_DASH_ON,
            GRID_DASH_OFF,
            GRID_INTENSITY,
        );
        draw_text_right(
            &mut canvas,
            label,
            layout.data_left.saturating_sub(Y_TICK_PAD / 2),
            py.saturating_sub(FontSize::Medium.char_height() / 2),
            1.0,
            FontSize::Medium,
        );
    }

    // Axes.
    canvas.vline(layout.data_left, layout.data_top, layout.data_bottom, AXIS_THICKNESS, 1.0);
    canvas.hline(layout.data_left, layout.data_right, layout.data_bottom, AXIS_THICKNESS, 1.0);

    draw_bars(&mut canvas, chart, y_max, &layout);
    draw_x_labels(&mut canvas, chart, &layout);

    canvas
}

fn draw_bars(canvas: &mut Canvas, chart: &BarChart, y_max: f64, layout: &Layout) {
    let n = chart.values.len();
    let data_w = layout.data_width();
    let total_gaps = if n > 1 { (n - 1) * BAR_GAP } else { 0 };
    let bar_width = if data_w > total_gaps {
        ((data_w - total_gaps) / n).max(1)
    } else {
        1
    };

    for (i, &v) in chart.values.iter().enumerate() {
        let bar_left = layout.data_left + i * (bar_width + BAR_GAP);
        let bar_right = bar_left + bar_width;

        let normalized = (v / y_max).clamp(0.0, 1.0);
        let raw_top =
            (layout.data_bottom as f64 - normalized * layout.data_height() as f64).round() as usize;
        let bar_top = raw_top.min(layout.data_bottom.saturating_sub(MIN_BAR_H));

        canvas.fill_rect(bar_left, bar_top, bar_right, layout.data_bottom, BAR_FILL_INTENSITY);

        // Black outline.
        canvas.vline(bar_left, bar_top, layout.data_bottom, 1, 1.0);
        canvas.vline(bar_right.saturating_sub(1), bar_top, layout.data_bottom, 1, 1.0);
        canvas.hline(bar_left, bar_right.saturating_sub(1), bar_top, 1, 1.0);

        // Value above the bar.
        let value_label = format_tick(v);
        if text_width(&value_label, FontSize::Small) <= bar_width + BAR_GAP {
            let label_y = bar_top.saturating_sub(FontSize::Small.char_height() + VALUE_LABEL_GAP);
            draw_text_centered(
                canvas,
                &value_label,
                bar_left + bar_width / 2,
                label_y,
                1.0,
                FontSize::Small,
            );
        }
    }
}

fn draw_x_labels(canvas: &mut Canvas, chart: &BarChart, layout: &Layout) {
    let n = chart.values.len();
    let label_count = chart.labels.len().min(n);
    if label_count == 0 {
        return;
    }

    let labels: Vec<String> = chart.labels[..label_count]
        .iter()
        .map(|l| truncate_label(l, X_LABEL_MAX_CHARS))
        .collect();

    let label_y = layout.data_bottom + 6;
    let char_w = FontSize::Small.char_width();
    let max_label_chars = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let label_pixel_width = (max_label_chars + 1) * char_w;
    let max_labels = if label_pixel_width > 0 {
        (layout.data_width() / label_pixel_width).max(1)
    } else {
        label_count
    };
    let step = label_count.div_ceil(max_labels).max(1);

    let data_w = layout.data_width();
    let total_gaps = if n > 1 { (n - 1) * BAR_GAP } else { 0 };
    let bar_width = if data_w > total_gaps {
        ((data_w - total_gaps) / n).max(1)
    } else {
        1
    };

    for i in (0..label_count).step_by(step) {
        let center = layout.data_left + i * (bar_width + BAR_GAP) + bar_width / 2;
        // Clamp so label text doesn't overflow the panel edges.
        let half_w = text_width(&labels[i], FontSize::Small) / 2;
        let center = center
            .max(half_w)
            .min(canvas.width().saturating_sub(half_w));
        draw_text_centered(canvas, &labels[i], center, label_y, 1.0, FontSize::Small);
    }
}

fn nice_step(rough: f64) -> f64 {
    let exponent = rough.abs().log10().floor();
    let fraction = rough / 10.0f64.powf(exponent);
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10.0f64.powf(exponent)
}

fn compute_nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    if (max - min).abs() < 1e-10 {
        return vec![min];
    }

    let range = max - min;
    let rough_step = range / target_count as f64;
    let step = nice_step(rough_step);

    let tick_min = (min / step).floor() * step;
    let tick_max = (max / step).ceil() * step;

    let mut ticks = Vec::new();
    let mut v = tick_min;
    while v <= tick_max + step * 0.01 {
        ticks.push(v);
        v += step;
    }

    if ticks.is_empty() {
        ticks.push(min);
        ticks.push(max);
    }

    ticks
}

/// Tick and value labels: whole numbers without a fraction, otherwise one decimal.
fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        let whole = v.round() as i64;
        if whole.unsigned_abs() >= 1000 {
            return group_whole(whole);
        }
        format!("{}", whole)
    } else {
        format!("{:.1}", v)
    }
}

fn group_whole(v: i64) -> String {
    let sign = if v < 0 { "-" } else { "" };
    let digits = v.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}
