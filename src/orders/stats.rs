//! Aggregate statistics over parsed orders.
//!
//! Only delivered orders from the configured calendar year contribute.
//! All money amounts stay in cents until formatting.

use std::collections::{BTreeMap, HashMap};

use super::Order;

/// How many venues and dishes the ranked charts show.
pub const TOP_COUNT: usize = 10;

/// The numbers behind one recap report.
#[derive(Debug, Clone, Default)]
pub struct OrderStats {
    /// Calendar year the recap covers.
    pub year: i32,
    /// Delivered orders counted.
    pub order_count: usize,
    /// Total spend in cents.
    pub total_cents: i64,
    /// Spend per `YYYY-MM` key, ascending.
    pub monthly_cents: Vec<(String, i64)>,
    /// Venues by spend, descending, at most [`TOP_COUNT`].
    pub top_venues: Vec<(String, i64)>,
    /// Dishes by item spend, descending, at most [`TOP_COUNT`].
    pub top_dishes: Vec<(String, i64)>,
}

impl OrderStats {
    pub fn compute(orders: &[Order], year: i32) -> Self {
        let mut monthly: BTreeMap<String, i64> = BTreeMap::new();
        let mut venues: HashMap<String, i64> = HashMap::new();
        let mut dishes: HashMap<String, i64> = HashMap::new();
        let mut order_count = 0;
        let mut total_cents = 0;

        for order in orders {
            if !order.is_delivered() || order.delivery_time.year() != Some(year) {
                continue;
            }
            order_count += 1;
            total_cents += order.total_price;
            if let Some(ym) = order.delivery_time.year_month() {
                *monthly.entry(ym).or_default() += order.total_price;
            }
            *venues.entry(order.venue_label()).or_default() += order.total_price;
            for item in &order.items {
                *dishes.entry(item.name.clone()).or_default() += item.end_amount;
            }
        }

        Self {
            year,
            order_count,
            total_cents,
            monthly_cents: monthly.into_iter().collect(),
            top_venues: top_n(venues, TOP_COUNT),
            top_dishes: top_n(dishes, TOP_COUNT),
        }
    }

    /// Average order value in cents, 0 for an empty recap.
    pub fn average_cents(&self) -> f64 {
        if self.order_count == 0 {
            0.0
        } else {
            self.total_cents as f64 / self.order_count as f64
        }
    }
}

/// Rank a tally descending by amount (name as tie-break) and keep the top n.
fn top_n(tally: HashMap<String, i64>, n: usize) -> Vec<(String, i64)> {
    let mut entries: Vec<_> = tally.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Format cents as a money string with thousands separators, e.g. `1,234.56`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
