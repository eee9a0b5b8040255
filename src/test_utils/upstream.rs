//! An in-process stand-in for the transactions service.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::Notify, task::JoinHandle};

use crate::{
    browser::{PageResponse, Transaction, TransactionQuery},
    summary::{MonthStatistics, MonthSummary},
};

/// `count` transactions with IDs from 1, titled "Item 1", "Item 2", ....
/// Odd IDs are sold.
pub(crate) fn test_transactions(count: usize) -> Vec<Transaction> {
    (1..=count)
        .map(|i| Transaction {
            id: i as i64,
            title: format!("Item {i}"),
            description: format!("Description of item {i}"),
            price: 10.0 * i as f64 + 0.5,
            category: if i % 2 == 0 { "electronics" } else { "clothing" }.to_owned(),
            sold: i % 2 == 1,
            image: format!("https://example.com/images/{i}.jpg"),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Serve,
    Fail,
    SendMalformed,
}

#[derive(Debug, Default)]
struct RecordedQueries {
    transactions: Vec<String>,
    summaries: Vec<String>,
}

#[derive(Debug, Clone)]
struct UpstreamState {
    transactions: Arc<Vec<Transaction>>,
    per_page: usize,
    behaviour: Behaviour,
    queries: Arc<Mutex<RecordedQueries>>,
    held_search: Arc<Mutex<Option<String>>>,
    release: Arc<Notify>,
}

/// A transactions service listening on an ephemeral local port.
///
/// Records the raw query string of every request. The server stops when the
/// value is dropped.
pub(crate) struct FakeUpstream {
    pub base_url: String,
    queries: Arc<Mutex<RecordedQueries>>,
    held_search: Arc<Mutex<Option<String>>>,
    release: Arc<Notify>,
    server: JoinHandle<()>,
}

impl FakeUpstream {
    /// Serve `transactions` in pages of `per_page`, filtered by the search
    /// text against the title.
    pub(crate) async fn start(transactions: Vec<Transaction>, per_page: usize) -> Self {
        Self::start_with(transactions, per_page, Behaviour::Serve).await
    }

    /// Respond to every request with a 500.
    pub(crate) async fn start_failing() -> Self {
        Self::start_with(Vec::new(), 1, Behaviour::Fail).await
    }

    /// Respond to every request with a body that is not JSON.
    pub(crate) async fn start_malformed() -> Self {
        Self::start_with(Vec::new(), 1, Behaviour::SendMalformed).await
    }

    async fn start_with(transactions: Vec<Transaction>, per_page: usize, behaviour: Behaviour) -> Self {
        let queries = Arc::new(Mutex::new(RecordedQueries::default()));
        let held_search = Arc::new(Mutex::new(None));
        let release = Arc::new(Notify::new());
        let state = UpstreamState {
            transactions: Arc::new(transactions),
            per_page: per_page.max(1),
            behaviour,
            queries: queries.clone(),
            held_search: held_search.clone(),
            release: release.clone(),
        };

        let router = Router::new()
            .route("/api/transactions", get(get_transactions))
            .route("/combined", get(get_combined))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake upstream");
        let address = listener
            .local_addr()
            .expect("Could not get fake upstream address");

        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake upstream stopped unexpectedly");
        });

        Self {
            base_url: format!("http://{address}"),
            queries,
            held_search,
            release,
            server,
        }
    }

    /// Make record requests searching for `search` wait until
    /// [FakeUpstream::release_held] is called.
    pub(crate) fn hold_search(&self, search: &str) {
        *self.held_search.lock().unwrap() = Some(search.to_owned());
    }

    /// Let the held request respond.
    pub(crate) fn release_held(&self) {
        self.release.notify_one();
    }

    /// Wait until the records endpoint has received `count` requests.
    pub(crate) async fn wait_for_transaction_queries(&self, count: usize) {
        for _ in 0..500 {
            if self.transaction_queries().len() >= count {
                return;
            }

            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        panic!(
            "timed out waiting for {count} record requests, got {:?}",
            self.transaction_queries()
        );
    }

    /// The query strings received by the records endpoint, oldest first.
    pub(crate) fn transaction_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().transactions.clone()
    }

    /// The query strings received by the summary endpoint, oldest first.
    pub(crate) fn summary_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().summaries.clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn misbehave(behaviour: Behaviour) -> Option<Response> {
    match behaviour {
        Behaviour::Serve => None,
        Behaviour::Fail => {
            Some((StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response())
        }
        Behaviour::SendMalformed => Some(
            (
                StatusCode::OK,
                [("content-type", "application/json")],
                "{\"transactions\": [",
            )
                .into_response(),
        ),
    }
}

async fn get_transactions(
    State(state): State<UpstreamState>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let raw_query = raw_query.unwrap_or_default();
    state
        .queries
        .lock()
        .unwrap()
        .transactions
        .push(raw_query.clone());

    if let Some(response) = misbehave(state.behaviour) {
        return response;
    }

    let Ok(query) = serde_urlencoded::from_str::<TransactionQuery>(&raw_query) else {
        return (StatusCode::BAD_REQUEST, "bad query").into_response();
    };

    let is_held = state.held_search.lock().unwrap().as_deref() == Some(query.search.as_str());
    if is_held {
        state.release.notified().await;
    }

    let search = query.search.to_lowercase();
    let matching = state
        .transactions
        .iter()
        .filter(|transaction| transaction.title.to_lowercase().contains(&search))
        .cloned()
        .collect::<Vec<_>>();

    let total_pages = matching.len().div_ceil(state.per_page) as u64;
    let skip = (query.page.saturating_sub(1) as usize).saturating_mul(state.per_page);
    let transactions = matching
        .into_iter()
        .skip(skip)
        .take(state.per_page)
        .collect();

    Json(PageResponse {
        transactions,
        total_pages,
    })
    .into_response()
}

async fn get_combined(
    State(state): State<UpstreamState>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    state
        .queries
        .lock()
        .unwrap()
        .summaries
        .push(raw_query.unwrap_or_default());

    if let Some(response) = misbehave(state.behaviour) {
        return response;
    }

    Json(MonthSummary {
        statistics: MonthStatistics {
            total_sale_amount: 61.0,
            total_sold_items: 2,
            total_not_sold_items: 1,
        },
        bar_chart: BTreeMap::from([("0-100".to_owned(), 3), ("101-200".to_owned(), 0)]),
        pie_chart: BTreeMap::from([("clothing".to_owned(), 2), ("electronics".to_owned(), 1)]),
    })
    .into_response()
}
