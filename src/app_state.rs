//! Implements a struct that holds the state of the server.

use std::time::Duration;

use crate::{
    Error,
    browser::{BrowserConfig, HttpTransactionSource, SessionStore},
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config for new browser sessions.
    pub browser_config: BrowserConfig,

    /// The client for the transactions service.
    pub transaction_source: HttpTransactionSource,

    /// The sessions of all open transactions pages.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new [AppState] that fetches transactions from the service at
    /// `api_url`.
    ///
    /// Requests to the service are aborted after `request_timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        api_url: &str,
        request_timeout: Duration,
        browser_config: BrowserConfig,
    ) -> Result<Self, Error> {
        let transaction_source = HttpTransactionSource::new(api_url, request_timeout)?;
        let sessions = SessionStore::new(browser_config.max_sessions);

        Ok(Self {
            browser_config,
            transaction_source,
            sessions,
        })
    }
}
