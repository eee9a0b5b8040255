//! The per-month statistics sent by the transactions service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sales totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatistics {
    /// The sum of the prices of the items sold.
    pub total_sale_amount: f64,
    /// The number of items sold.
    pub total_sold_items: u64,
    /// The number of items not sold.
    pub total_not_sold_items: u64,
}

/// Statistics, price ranges and categories for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Sales totals.
    pub statistics: MonthStatistics,
    /// The number of items per price range, keyed by range label, e.g., "101-200".
    pub bar_chart: BTreeMap<String, u64>,
    /// The number of items per category.
    pub pie_chart: BTreeMap<String, u64>,
}

/// The query parameters for one request to the summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
}

impl MonthSummary {
    /// The price ranges ordered by their lower bound, e.g., "0-100",
    /// "101-200", ..., "901-above".
    ///
    /// Labels without a leading number are placed last, in label order.
    pub fn price_ranges(&self) -> Vec<(&str, u64)> {
        let mut ranges = self
            .bar_chart
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect::<Vec<_>>();

        ranges.sort_by_key(|(label, _)| range_lower_bound(label));

        ranges
    }

    /// The categories with at least one item, most common first.
    pub fn categories(&self) -> Vec<(&str, u64)> {
        let mut categories = self
            .pie_chart
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(category, count)| (category.as_str(), *count))
            .collect::<Vec<_>>();

        // Stable sort keeps equal counts in name order.
        categories.sort_by(|(_, a), (_, b)| b.cmp(a));

        categories
    }
}

fn range_lower_bound(label: &str) -> u64 {
    let digits = label
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();

    digits.parse().unwrap_or(u64::MAX)
}
