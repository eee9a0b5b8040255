//! Browser sessions: the UI state of one open page and the lifecycle of its
//! requests.
//!
//! Every load is tagged with a [RequestTicket] when it starts. When the
//! response arrives, it is only displayed if no newer load has started in the
//! meantime, so the page always reflects the most recent user action.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use time::Month;

use crate::{
    Error,
    pagination::PaginationControls,
    summary::MonthSummary,
};

use super::{
    models::{PageResponse, Transaction},
    source::TransactionSource,
    state::{BrowserState, Transition, UiEvent},
};

/// Identifies one open transactions page.
pub type SessionId = u64;

/// The config for browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// The month to show when a page is opened without choosing one.
    pub default_month: Month,
    /// The most sessions to keep. The oldest session is dropped to make room
    /// for a new one.
    pub max_sessions: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            default_month: Month::March,
            max_sessions: 1024,
        }
    }
}

/// Tags one load so that its response can be matched to the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// A load that has been started but not finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    /// The ticket issued when the load started.
    pub ticket: RequestTicket,
    /// The state being loaded.
    pub state: BrowserState,
    /// Whether the month summary should be loaded as well.
    pub refresh_summary: bool,
}

/// Everything needed to render the result of a finished load.
#[derive(Debug, PartialEq)]
pub struct LoadedView {
    /// The state that was loaded.
    pub state: BrowserState,
    /// The enabled state of the previous/next controls and the page label.
    pub pagination: PaginationControls,
    /// The transactions to display, or why they could not be loaded.
    pub transactions: Result<Vec<Transaction>, Error>,
    /// The month summary, if it was reloaded.
    pub summary: Option<Result<MonthSummary, Error>>,
}

/// The result of handling one UI event.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    /// The event does not change the state, so nothing was requested.
    Ignored,
    /// A newer load started while this one was in flight, so its response
    /// was discarded.
    Stale,
    /// The load finished and its result should be displayed.
    Completed(LoadedView),
}

/// The UI state of one open page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    /// The most recently requested state.
    state: BrowserState,
    /// The page count of the latest successful load for the current month
    /// and search text.
    total_pages: Option<u64>,
    /// The month of the summary panel on the page, once one has been shown.
    summary_month: Option<Month>,
    /// The ticket of the most recently started load.
    latest_ticket: RequestTicket,
}

impl BrowserSession {
    /// Create a session for a page showing `month`.
    pub fn new(month: Month) -> Self {
        Self {
            state: BrowserState::new(month),
            total_pages: None,
            summary_month: None,
            latest_ticket: RequestTicket(0),
        }
    }

    /// Apply `event` and start a load if the state changes.
    ///
    /// Returns `None` if nothing needs to be loaded.
    pub fn begin(&mut self, event: &UiEvent) -> Option<PendingLoad> {
        let next_state = match self.state.apply(event, self.total_pages) {
            Transition::Reload(next_state) => next_state,
            Transition::Ignore => return None,
        };

        if event.changes_filter() {
            // The page count belongs to the previous month and search text.
            self.total_pages = None;
        }

        // A superseded month change never delivered its summary, so the next
        // load has to bring it instead.
        let refresh_summary =
            event.shows_new_month() || self.summary_month != Some(next_state.month);

        self.state = next_state.clone();
        self.latest_ticket = RequestTicket(self.latest_ticket.0 + 1);

        Some(PendingLoad {
            ticket: self.latest_ticket,
            state: next_state,
            refresh_summary,
        })
    }

    /// Finish `pending` with the response from the transactions service.
    ///
    /// Responses for loads that have been superseded are discarded.
    pub fn finish(
        &mut self,
        pending: PendingLoad,
        response: Result<PageResponse, Error>,
        summary: Option<Result<MonthSummary, Error>>,
    ) -> LoadOutcome {
        if pending.ticket != self.latest_ticket {
            tracing::debug!(
                "discarding response for {:?}, latest is {:?}",
                pending.ticket,
                self.latest_ticket
            );
            return LoadOutcome::Stale;
        }

        let transactions = match response {
            Ok(page) => {
                self.total_pages = Some(page.total_pages);
                Ok(page.transactions)
            }
            Err(error) => {
                tracing::error!("could not load transactions for {:?}: {error}", pending.state);
                Err(error)
            }
        };

        if summary.is_some() {
            self.summary_month = Some(pending.state.month);
        }

        LoadOutcome::Completed(LoadedView {
            pagination: PaginationControls::new(pending.state.page, self.total_pages),
            state: pending.state,
            transactions,
            summary,
        })
    }
}

/// Handle `event` for `session`: update the state, fetch the matching
/// transactions from `source` and decide what to display.
///
/// The session lock is not held while waiting for `source`, so other events
/// for the same session can start newer loads in the meantime.
///
/// # Errors
/// Returns [Error::SessionLockError] if the session lock is poisoned.
/// Errors from `source` are part of the returned [LoadedView].
pub async fn load_transactions<S>(
    session: &Mutex<BrowserSession>,
    source: &S,
    event: UiEvent,
) -> Result<LoadOutcome, Error>
where
    S: TransactionSource + Sync,
{
    let pending = {
        let mut session = lock_session(session)?;

        match session.begin(&event) {
            Some(pending) => pending,
            None => return Ok(LoadOutcome::Ignored),
        }
    };

    let query = pending.state.query();
    let (response, summary) = if pending.refresh_summary {
        let (response, summary) = tokio::join!(
            source.fetch_transactions(&query),
            source.fetch_month_summary(pending.state.month)
        );
        (response, Some(summary))
    } else {
        (source.fetch_transactions(&query).await, None)
    };

    let mut session = lock_session(session)?;

    Ok(session.finish(pending, response, summary))
}

fn lock_session(
    session: &Mutex<BrowserSession>,
) -> Result<std::sync::MutexGuard<'_, BrowserSession>, Error> {
    session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)
}

/// The sessions of all open pages.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionStoreInner>>,
    capacity: usize,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: BTreeMap<SessionId, Arc<Mutex<BrowserSession>>>,
    next_id: SessionId,
}

impl SessionStore {
    /// Create a store that keeps at most `capacity` sessions.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionStoreInner {
                sessions: BTreeMap::new(),
                next_id: 1,
            })),
            capacity: capacity.max(1),
        }
    }

    /// Create a session for a page showing `month`.
    ///
    /// If the store is full, the oldest session is dropped.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the store lock is poisoned.
    pub fn create(&self, month: Month) -> Result<(SessionId, Arc<Mutex<BrowserSession>>), Error> {
        let mut inner = self.lock()?;

        while inner.sessions.len() >= self.capacity {
            if let Some((evicted_id, _)) = inner.sessions.pop_first() {
                tracing::debug!("evicted browser session {evicted_id}");
            }
        }

        let session_id = inner.next_id;
        inner.next_id += 1;

        let session = Arc::new(Mutex::new(BrowserSession::new(month)));
        inner.sessions.insert(session_id, session.clone());

        Ok((session_id, session))
    }

    /// Get the session with `session_id`.
    ///
    /// # Errors
    /// Returns [Error::SessionNotFound] if there is no such session, or
    /// [Error::SessionLockError] if the store lock is poisoned.
    pub fn get(&self, session_id: SessionId) -> Result<Arc<Mutex<BrowserSession>>, Error> {
        self.lock()?
            .sessions
            .get(&session_id)
            .cloned()
            .ok_or(Error::SessionNotFound)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, SessionStoreInner>, Error> {
        self.inner
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire session store lock: {error}"))
            .map_err(|_| Error::SessionLockError)
    }
}
