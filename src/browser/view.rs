//! HTML rendering for the transactions page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, loading_spinner,
    },
    pagination::PaginationControls,
    summary::month_summary_view,
};

use super::{
    models::Transaction,
    session::{LoadedView, SessionId},
    state::{BrowserState, MONTHS},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 48;

/// The ID of the element that is replaced on every load.
pub(super) const BROWSER_ID: &str = "transactions-browser";

const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// The number of columns in the transactions table.
const COLUMN_COUNT: u8 = 7;

/// Renders the full transactions page for a freshly loaded session.
pub(super) fn transactions_page_view(session_id: SessionId, view: &LoadedView) -> Markup {
    let events_url = endpoints::format_endpoint(endpoints::BROWSER_EVENTS, session_id);
    let browser_target = format!("#{BROWSER_ID}");
    let sync_strategy = format!("#{BROWSER_ID}:replace");

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div
                class="w-full"
                hx-target=(browser_target)
                hx-swap="innerHTML"
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-sync=(sync_strategy)
            {
                div class="flex justify-between flex-wrap items-end gap-4 mb-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                }

                (filter_controls(&events_url, &view.state))

                div id=(BROWSER_ID)
                {
                    (browser_contents(&events_url, view))
                }
            }

            @if let Some(summary) = &view.summary {
                (month_summary_view(view.state.month, summary, false))
            }
        }
    );

    base(
        "Transactions",
        &[HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())],
        &content,
    )
}

/// Renders the response to a UI event: the table and pagination controls,
/// plus the month summary as an out-of-band swap when it was reloaded.
pub(super) fn browser_fragment(session_id: SessionId, view: &LoadedView) -> Markup {
    let events_url = endpoints::format_endpoint(endpoints::BROWSER_EVENTS, session_id);

    html!(
        (browser_contents(&events_url, view))

        @if let Some(summary) = &view.summary {
            (month_summary_view(view.state.month, summary, true))
        }
    )
}

fn browser_contents(events_url: &str, view: &LoadedView) -> Markup {
    html!(
        div class="relative overflow-x-auto shadow-md sm:rounded-lg"
        {
            table
                id="transactions-table"
                class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for heading in ["ID", "Title", "Description", "Price", "Category", "Sold", "Image"] {
                            th scope="col" class=(TABLE_CELL_STYLE) { (heading) }
                        }
                    }
                }

                tbody
                {
                    (transaction_rows(&view.transactions))
                }
            }
        }

        (pagination_controls(events_url, &view.pagination))
    )
}

fn filter_controls(events_url: &str, state: &BrowserState) -> Markup {
    html!(
        div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-4 w-full"
        {
            div
            {
                label for="month-select" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month-select"
                    name="value"
                    hx-post=(events_url)
                    hx-trigger="change"
                    hx-vals=r#"{"event": "month"}"#
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for month in MONTHS {
                        option value=(month.to_string()) selected[month == state.month] { (month.to_string()) }
                    }
                }
            }

            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    id="search"
                    type="search"
                    name="value"
                    value=(state.search)
                    placeholder="Search transactions"
                    autocomplete="off"
                    hx-post=(events_url)
                    hx-trigger="input changed delay:300ms, search"
                    hx-vals=r#"{"event": "search"}"#
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    )
}

/// Renders one row per transaction in the order given, or a single row that
/// explains why there is nothing to show.
pub(super) fn transaction_rows(transactions: &Result<Vec<Transaction>, Error>) -> Markup {
    match transactions {
        Ok(transactions) if transactions.is_empty() => html!(
            tr
            {
                td
                    colspan=(COLUMN_COUNT)
                    data-empty-state="true"
                    class="px-6 py-4 text-center"
                {
                    "No transactions found."
                }
            }
        ),
        Ok(transactions) => html!(
            @for transaction in transactions {
                (transaction_row(transaction))
            }
        ),
        Err(error) => html!(
            tr
            {
                td
                    colspan=(COLUMN_COUNT)
                    data-error-state="true"
                    class="px-6 py-4 text-center text-red-700 dark:text-red-400"
                {
                    "Could not load transactions. " (error.user_message())
                }
            }
        ),
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class=(TABLE_CELL_STYLE) { (transaction.title) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.price)) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (if transaction.sold { "Yes" } else { "No" }) }
            td class=(TABLE_CELL_STYLE)
            {
                img src=(transaction.image) alt=(transaction.title) width="50";
            }
        }
    )
}

/// Renders the previous/next buttons and the page label.
pub(super) fn pagination_controls(events_url: &str, controls: &PaginationControls) -> Markup {
    html!(
        nav
            class="flex items-center justify-between gap-4 my-4"
            aria-label="Transactions pages"
        {
            button
                id="prev-page"
                type="button"
                hx-post=(events_url)
                hx-vals=r#"{"event": "previous"}"#
                disabled[controls.previous_disabled]
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Previous"
            }

            span id="page-number" class="text-sm font-medium" { (controls.label()) }

            button
                id="next-page"
                type="button"
                hx-post=(events_url)
                hx-vals=r#"{"event": "next"}"#
                disabled[controls.next_disabled]
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Next"
            }
        }
    )
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
