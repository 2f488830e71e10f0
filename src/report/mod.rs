//! Recap report rasterization.
//!
//! Composes the aggregate statistics of one submission into a single
//! 1200x1200 grayscale image with four panels:
//!
//! | panel        | content                  |
//! |--------------|--------------------------|
//! | top left     | stat tiles               |
//! | top right    | monthly expenses chart   |
//! | bottom left  | top venues chart         |
//! | bottom right | top dishes chart         |

pub mod canvas;
pub mod chart;
pub mod instructions;
pub mod store;
pub mod text;

use image::GrayImage;

use crate::error::RecapError;
use crate::orders::{
    self,
    stats::{OrderStats, format_money},
};
use crate::wire::SubmissionPayload;

use canvas::Canvas;
use chart::BarChart;
use text::{FontSize, draw_text_centered};

/// Report edge length in pixels.
pub const REPORT_SIZE: usize = 1200;
/// Panel edge length; four panels tile the report.
pub const PANEL_SIZE: usize = REPORT_SIZE / 2;

/// Parse a submission and render its recap.
///
/// Fails when any slot is malformed or when no orders were submitted at
/// all; an in-year subset of zero delivered orders still renders (with
/// empty charts), matching a user who pasted dumps from the wrong year.
pub fn from_payload(payload: &SubmissionPayload, year: i32) -> Result<GrayImage, RecapError> {
    let orders = orders::parse_dumps(payload)?;
    if orders.is_empty() {
        return Err(RecapError::OrderDump("no order dumps submitted".to_string()));
    }
    Ok(render(&OrderStats::compute(&orders, year)))
}

/// Render the four-panel recap image.
pub fn render(stats: &OrderStats) -> GrayImage {
    let mut canvas = Canvas::new(REPORT_SIZE, REPORT_SIZE);

    draw_summary_panel(&mut canvas, stats);
    canvas.blit(&chart::render(&monthly_chart(stats), PANEL_SIZE, PANEL_SIZE), PANEL_SIZE, 0);
    canvas.blit(&chart::render(&venues_chart(stats), PANEL_SIZE, PANEL_SIZE), 0, PANEL_SIZE);
    canvas.blit(&chart::render(&dishes_chart(stats), PANEL_SIZE, PANEL_SIZE), PANEL_SIZE, PANEL_SIZE);

    canvas.to_image()
}

/// Stat tiles in the top-left panel: heading/value pairs, centered.
fn draw_summary_panel(canvas: &mut Canvas, stats: &OrderStats) {
    let center = PANEL_SIZE / 2;
    let tiles = [
        ("Order Count", stats.order_count.to_string()),
        ("Total Expenses", format_money(stats.total_cents)),
        ("Average Order", format_money(stats.average_cents().round() as i64)),
    ];

    let mut y = 60;
    for (heading, value) in tiles {
        draw_text_centered(canvas, heading, center, y, 1.0, FontSize::Heading);
        draw_text_centered(canvas, &value, center, y + 60, 1.0, FontSize::Heading);
        y += 180;
    }
}

fn monthly_chart(stats: &OrderStats) -> BarChart {
    BarChart {
        title: format!("Monthly Expenses {}", stats.year),
        labels: stats.monthly_cents.iter().map(|(ym, _)| ym.clone()).collect(),
        values: stats.monthly_cents.iter().map(|&(_, c)| c as f64 / 100.0).collect(),
    }
}

fn venues_chart(stats: &OrderStats) -> BarChart {
    BarChart {
        title: "Top 10 Restaurants".to_string(),
        labels: stats.top_venues.iter().map(|(name, _)| name.clone()).collect(),
        values: stats.top_venues.iter().map(|&(_, c)| c as f64 / 100.0).collect(),
    }
}

fn dishes_chart(stats: &OrderStats) -> BarChart {
    BarChart {
        title: "Top 10 Dishes".to_string(),
        labels: stats.top_dishes.iter().map(|(name, _)| name.clone()).collect(),
        values: stats.top_dishes.iter().map(|&(_, c)| c as f64 / 100.0).collect(),
    }
}
