//! Rendering for the month summary panel.

use maud::{Markup, html};
use time::Month;

use crate::{
    Error,
    alert::Alert,
    html::{CARD_STYLE, format_currency},
};

use super::{
    charts::{charts_view, summary_charts},
    models::{MonthStatistics, MonthSummary},
};

/// The ID of the section that holds the month summary.
const MONTH_SUMMARY_ID: &str = "month-summary";

/// Renders the summary panel for `month`.
///
/// Set `swap_oob` when the panel is sent alongside another fragment, so that
/// HTMX swaps it into the existing panel by ID.
pub fn month_summary_view(
    month: Month,
    summary: &Result<MonthSummary, Error>,
    swap_oob: bool,
) -> Markup {
    html!(
        section
            id=(MONTH_SUMMARY_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="w-full mx-auto mt-8 mb-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Summary for " (month.to_string()) }

            @match summary {
                Ok(summary) => {
                    (statistics_view(&summary.statistics))
                    (charts_view(&summary_charts(month, summary)))
                }
                Err(error) => {
                    (Alert::Error {
                        message: "Could not load the month summary".to_owned(),
                        details: error.user_message(),
                    }.into_html())
                }
            }
        }
    )
}

fn statistics_view(statistics: &MonthStatistics) -> Markup {
    html!(
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-4"
        {
            (statistic_card("total-sale-amount", "Total sale", &format_currency(statistics.total_sale_amount)))
            (statistic_card("total-sold-items", "Sold items", &statistics.total_sold_items.to_string()))
            (statistic_card("total-not-sold-items", "Not sold items", &statistics.total_not_sold_items.to_string()))
        }
    )
}

fn statistic_card(id: &str, label: &str, value: &str) -> Markup {
    html!(
        div class=(CARD_STYLE) data-statistic=(id)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-2xl font-bold" data-statistic-value { (value) }
        }
    )
}
