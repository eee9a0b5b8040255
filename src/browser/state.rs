//! The UI state of the transaction browser and the transitions between states.
//!
//! Everything here is pure: given the current state and a UI event,
//! [BrowserState::apply] decides whether a reload is needed and which state
//! to load. Fetching and rendering live elsewhere.

use time::Month;

use crate::{Error, pagination::FIRST_PAGE};

use super::models::TransactionQuery;

/// The months in the order they are shown in the month selector.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parse a full month name, e.g., "March", ignoring case and surrounding whitespace.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not the name of a month.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let trimmed = name.trim();

    MONTHS
        .into_iter()
        .find(|month| month.to_string().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// The minimal set of values that determines what the next fetch requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    /// The month selected in the month selector.
    pub month: Month,
    /// The 1-based page number.
    pub page: u64,
    /// The text in the search box.
    pub search: String,
}

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The page was opened.
    PageLoaded,
    /// A different month was selected.
    MonthChanged(Month),
    /// The search text changed.
    SearchChanged(String),
    /// The "previous" button was clicked.
    PreviousPage,
    /// The "next" button was clicked.
    NextPage,
}

impl UiEvent {
    /// Whether the event changes which transactions match, i.e., the month
    /// or the search text.
    pub fn changes_filter(&self) -> bool {
        matches!(self, UiEvent::MonthChanged(_) | UiEvent::SearchChanged(_))
    }

    /// Whether the event shows a month that is not displayed yet.
    pub fn shows_new_month(&self) -> bool {
        matches!(self, UiEvent::PageLoaded | UiEvent::MonthChanged(_))
    }
}

/// The result of applying a [UiEvent] to a [BrowserState].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Load this state.
    Reload(BrowserState),
    /// Nothing changes and no request is made.
    Ignore,
}

impl BrowserState {
    /// The state for a freshly opened page showing `month`.
    pub fn new(month: Month) -> Self {
        Self {
            month,
            page: FIRST_PAGE,
            search: String::new(),
        }
    }

    /// The query that loads this state.
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery {
            month: self.month.to_string(),
            page: self.page,
            search: self.search.clone(),
        }
    }

    /// Decide what to load in response to `event`.
    ///
    /// Changing the month or the search text goes back to the first page.
    /// "Previous" is ignored on the first page and "next" is ignored on the
    /// last page. `total_pages` is the page count from the latest successful
    /// load of the current month and search text, or `None` if it is not
    /// known, in which case "next" is allowed.
    pub fn apply(&self, event: &UiEvent, total_pages: Option<u64>) -> Transition {
        match event {
            UiEvent::PageLoaded => Transition::Reload(self.clone()),
            UiEvent::MonthChanged(month) => Transition::Reload(Self {
                month: *month,
                page: FIRST_PAGE,
                search: self.search.clone(),
            }),
            UiEvent::SearchChanged(search) => Transition::Reload(Self {
                month: self.month,
                page: FIRST_PAGE,
                search: search.clone(),
            }),
            UiEvent::PreviousPage if self.page > FIRST_PAGE => Transition::Reload(Self {
                page: self.page - 1,
                ..self.clone()
            }),
            UiEvent::PreviousPage => Transition::Ignore,
            UiEvent::NextPage => match total_pages {
                Some(total_pages) if self.page >= total_pages => Transition::Ignore,
                _ => Transition::Reload(Self {
                    page: self.page + 1,
                    ..self.clone()
                }),
            },
        }
    }
}
