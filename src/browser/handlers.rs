//! Route handlers for the transactions page and its UI events.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{AppState, Error, endpoints};

use super::{
    session::{BrowserConfig, LoadOutcome, SessionId, SessionStore, load_transactions},
    source::HttpTransactionSource,
    state::{UiEvent, parse_month},
    view::{browser_fragment, transactions_page_view},
};

/// The state needed by the transactions page handlers.
#[derive(Debug, Clone)]
pub struct BrowserPageState {
    /// Defaults for new sessions.
    pub config: BrowserConfig,
    /// The sessions of open pages.
    pub sessions: SessionStore,
    /// Where transactions are fetched from.
    pub source: HttpTransactionSource,
}

impl FromRef<AppState> for BrowserPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            config: state.browser_config.clone(),
            sessions: state.sessions.clone(),
            source: state.transaction_source.clone(),
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// The full name of the month to show instead of the default month.
    pub month: Option<String>,
}

/// The kinds of UI event the page sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserEventKind {
    /// The month selector changed.
    Month,
    /// The search text changed.
    Search,
    /// The "previous" button was clicked.
    Previous,
    /// The "next" button was clicked.
    Next,
}

/// The form data for one UI event.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserEventForm {
    /// What happened.
    pub event: BrowserEventKind,
    /// The new month name or search text.
    #[serde(default)]
    pub value: Option<String>,
}

impl BrowserEventForm {
    /// Convert the form data into a [UiEvent].
    ///
    /// A search event without a value clears the search.
    ///
    /// # Errors
    /// Returns [Error::MissingEventValue] for a month event without a month,
    /// or [Error::InvalidMonth] if the month is not valid.
    pub fn into_ui_event(self) -> Result<UiEvent, Error> {
        match self.event {
            BrowserEventKind::Month => {
                let name = self
                    .value
                    .filter(|value| !value.trim().is_empty())
                    .ok_or(Error::MissingEventValue("month"))?;

                parse_month(&name).map(UiEvent::MonthChanged)
            }
            BrowserEventKind::Search => Ok(UiEvent::SearchChanged(self.value.unwrap_or_default())),
            BrowserEventKind::Previous => Ok(UiEvent::PreviousPage),
            BrowserEventKind::Next => Ok(UiEvent::NextPage),
        }
    }
}

/// Open a new browser session and render the transactions page with the
/// first page of the chosen month.
pub async fn get_transactions_page(
    State(state): State<BrowserPageState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Error> {
    let month = match query.month.as_deref() {
        Some(name) => parse_month(name)?,
        None => state.config.default_month,
    };

    let (session_id, session) = state.sessions.create(month)?;
    tracing::debug!("opened browser session {session_id} for {month}");

    match load_transactions(&session, &state.source, UiEvent::PageLoaded).await? {
        LoadOutcome::Completed(view) => {
            Ok(transactions_page_view(session_id, &view).into_response())
        }
        outcome => {
            tracing::warn!("initial load for session {session_id} was not displayed: {outcome:?}");
            Ok(Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response())
        }
    }
}

/// Apply one UI event to a browser session and render the updated table.
///
/// Responds with `204 No Content` when the event changes nothing or a newer
/// event superseded it.
pub async fn post_browser_event(
    State(state): State<BrowserPageState>,
    Path(session_id): Path<SessionId>,
    Form(form): Form<BrowserEventForm>,
) -> Response {
    let event = match form.into_ui_event() {
        Ok(event) => event,
        Err(error) => return error.into_alert_response(),
    };

    let session = match state.sessions.get(session_id) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    tracing::debug!("session {session_id} received {event:?}");

    match load_transactions(&session, &state.source, event).await {
        Ok(LoadOutcome::Completed(view)) => browser_fragment(session_id, &view).into_response(),
        Ok(LoadOutcome::Ignored | LoadOutcome::Stale) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_alert_response(),
    }
}
