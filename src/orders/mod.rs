//! Order-dump parsing.
//!
//! Each submission slot holds one page of an exported order-history
//! endpoint response: a JSON array of order objects. This module maps the
//! export format onto typed orders and flattens the eight slots into one
//! deduplicated order list.

pub mod stats;

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use crate::error::RecapError;
use crate::wire::SubmissionPayload;

/// Millisecond timestamp in the export's `{"$date": ...}` envelope.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExportTimestamp {
    #[serde(rename = "$date")]
    pub millis: i64,
}

impl ExportTimestamp {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.millis)
    }

    /// Calendar year in UTC, or `None` for an out-of-range timestamp.
    pub fn year(&self) -> Option<i32> {
        self.datetime().map(|dt| dt.year())
    }

    /// `YYYY-MM` key in UTC, or `None` for an out-of-range timestamp.
    pub fn year_month(&self) -> Option<String> {
        self.datetime().map(|dt| dt.format("%Y-%m").to_string())
    }
}

/// One line item of an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default)]
    pub count: i64,
    /// Line total in cents.
    #[serde(default)]
    pub end_amount: i64,
}

/// One order in an exported order-history page.
///
/// Unknown export fields are ignored; the ones listed here are the ones the
/// report consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub venue_name: String,
    pub status: String,
    pub delivery_time: ExportTimestamp,
    /// Order total in cents.
    pub total_price: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Venue name truncated at the first `\`, `/`, `|` or `+`.
    ///
    /// Exports suffix venue names with delivery annotations after one of
    /// these separators; the recap groups by the bare name.
    pub fn venue_label(&self) -> String {
        self.venue_name
            .split(['\\', '/', '|', '+'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    pub fn is_delivered(&self) -> bool {
        self.status == "delivered"
    }
}

/// Parse every non-empty slot of a submission into one order list.
///
/// Slots parse independently as JSON arrays of orders; any malformed
/// non-empty slot fails the whole submission. Orders seen in more than one
/// slot (re-pasted pages, combined accounts) are kept once, first
/// occurrence wins.
pub fn parse_dumps(payload: &SubmissionPayload) -> Result<Vec<Order>, RecapError> {
    let mut orders = Vec::new();
    let mut seen = HashSet::new();

    for (i, slot) in payload.slots().into_iter().enumerate() {
        if slot.is_empty() {
            continue;
        }
        let dump: Vec<Order> = serde_json::from_str(slot)
            .map_err(|e| RecapError::OrderDump(format!("orders{}: {}", i + 1, e)))?;
        for order in dump {
            if seen.insert(order.order_id.clone()) {
                orders.push(order);
            }
        }
    }

    Ok(orders)
}
