//! The transaction browser.
//!
//! This module contains everything needed to page through transactions:
//! - The UI state and the transitions triggered by UI events
//! - Per-page sessions that sequence requests and discard stale responses
//! - The client for the transactions service
//! - The page and fragment views, and the route handlers that tie them together

mod handlers;
mod models;
mod session;
mod source;
mod state;
mod view;

pub use handlers::{get_transactions_page, post_browser_event};
pub use models::{PageResponse, Transaction, TransactionQuery};
pub use session::{BrowserConfig, SessionStore};
pub use source::{HttpTransactionSource, TransactionSource};
pub use state::{BrowserState, UiEvent, parse_month};
