//! Fetches transactions and month summaries from the transactions service.

use std::{future::Future, time::Duration};

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use time::Month;

use crate::{
    Error,
    summary::{MonthSummary, SummaryQuery},
};

use super::models::{PageResponse, TransactionQuery};

/// The path of the records endpoint on the transactions service.
pub const TRANSACTIONS_PATH: &str = "/api/transactions";
/// The path of the combined statistics endpoint on the transactions service.
pub const COMBINED_PATH: &str = "/combined";

/// The largest number of response body bytes to include in log messages.
const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Somewhere transactions and month summaries can be fetched from.
pub trait TransactionSource {
    /// Fetch the page of transactions described by `query`.
    ///
    /// No retries and no caching: every call issues one request.
    fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = Result<PageResponse, Error>> + Send;

    /// Fetch the statistics, price ranges and categories for `month`.
    fn fetch_month_summary(
        &self,
        month: Month,
    ) -> impl Future<Output = Result<MonthSummary, Error>> + Send;
}

/// A [TransactionSource] that talks to the transactions service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTransactionSource {
    /// Create a client for the service at `base_url`, e.g., "http://localhost:5000".
    ///
    /// Each request is aborted if it takes longer than `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<T, Error> {
        let url = format!("{}{}?{}", self.base_url, path, query);
        tracing::debug!("GET {url}");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "GET {url} failed with status {status}: {}",
                truncate(&body, LOG_BODY_LENGTH_LIMIT)
            );
            return Err(Error::UpstreamStatus(status.as_u16(), body));
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|error| {
            tracing::error!(
                "could not parse response from {url}: {error}\nbody: {}",
                truncate(&String::from_utf8_lossy(&body), LOG_BODY_LENGTH_LIMIT)
            );
            Error::InvalidResponse(error.to_string())
        })
    }
}

impl TransactionSource for HttpTransactionSource {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<PageResponse, Error> {
        let query_string = query.to_query_string().map_err(|error| {
            tracing::error!("could not encode transaction query {query:?}: {error}");
            Error::UpstreamRequest(error.to_string())
        })?;

        self.get_json(TRANSACTIONS_PATH, &query_string).await
    }

    async fn fetch_month_summary(&self, month: Month) -> Result<MonthSummary, Error> {
        let query = SummaryQuery {
            month: u8::from(month),
        };
        let query_string = serde_urlencoded::to_string(query).map_err(|error| {
            tracing::error!("could not encode summary query {query:?}: {error}");
            Error::UpstreamRequest(error.to_string())
        })?;

        self.get_json(COMBINED_PATH, &query_string).await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::Month;

    use crate::{
        Error,
        browser::models::{PageResponse, TransactionQuery},
        test_utils::{FakeUpstream, test_transactions},
    };

    use super::{HttpTransactionSource, TransactionSource, truncate};

    fn query(page: u64, search: &str) -> TransactionQuery {
        TransactionQuery {
            month: "March".to_owned(),
            page,
            search: search.to_owned(),
        }
    }

    #[tokio::test]
    async fn fetches_page_of_transactions() {
        let upstream = FakeUpstream::start(test_transactions(5), 2).await;
        let source = HttpTransactionSource::new(&upstream.base_url, Duration::from_secs(5)).unwrap();

        let page = source.fetch_transactions(&query(1, "")).await.unwrap();

        assert_eq!(
            page,
            PageResponse {
                transactions: test_transactions(5)[..2].to_vec(),
                total_pages: 3,
            }
        );
        assert_eq!(
            upstream.transaction_queries(),
            vec!["month=March&page=1&search="]
        );
    }

    #[tokio::test]
    async fn sends_search_text_url_encoded() {
        let upstream = FakeUpstream::start(test_transactions(5), 2).await;
        let source = HttpTransactionSource::new(&upstream.base_url, Duration::from_secs(5)).unwrap();

        source
            .fetch_transactions(&query(2, "item 3"))
            .await
            .unwrap();

        assert_eq!(
            upstream.transaction_queries(),
            vec!["month=March&page=2&search=item+3"]
        );
    }

    #[tokio::test]
    async fn fetches_month_summary_by_month_number() {
        let upstream = FakeUpstream::start(test_transactions(1), 10).await;
        let source = HttpTransactionSource::new(&upstream.base_url, Duration::from_secs(5)).unwrap();

        let summary = source.fetch_month_summary(Month::March).await.unwrap();

        assert_eq!(summary.statistics.total_sold_items, 2);
        assert_eq!(upstream.summary_queries(), vec!["month=3"]);
    }

    #[tokio::test]
    async fn server_error_becomes_upstream_status() {
        let upstream = FakeUpstream::start_failing().await;
        let source = HttpTransactionSource::new(&upstream.base_url, Duration::from_secs(5)).unwrap();

        let result = source.fetch_transactions(&query(1, "")).await;

        assert!(
            matches!(result, Err(Error::UpstreamStatus(500, _))),
            "want upstream status 500, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_body_becomes_invalid_response() {
        let upstream = FakeUpstream::start_malformed().await;
        let source = HttpTransactionSource::new(&upstream.base_url, Duration::from_secs(5)).unwrap();

        let result = source.fetch_transactions(&query(1, "")).await;

        assert!(
            matches!(result, Err(Error::InvalidResponse(_))),
            "want invalid response, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_service_becomes_upstream_request_error() {
        // Nothing listens on the discard port.
        let source =
            HttpTransactionSource::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();

        let result = source.fetch_transactions(&query(1, "")).await;

        assert!(
            matches!(result, Err(Error::UpstreamRequest(_))),
            "want upstream request error, got {result:?}"
        );
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé...");
        assert_eq!(truncate("hi", 5), "hi");
    }
}
