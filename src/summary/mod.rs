//! Month summary
//!
//! Shows the sales statistics, price ranges and categories of the selected
//! month next to the transactions table.

mod charts;
mod models;
mod view;

pub use models::{MonthStatistics, MonthSummary, SummaryQuery};
pub use view::month_summary_view;
