//! The records exchanged with the transactions service.

use serde::{Deserialize, Serialize};

/// A transaction record as defined by the transactions service.
///
/// The browser never modifies or caches these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the transactions service uses for the record.
    pub id: i64,
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// The product category, e.g., "electronics".
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// The URL of the product image.
    pub image: String,
}

/// One page of transactions that match a [TransactionQuery].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// The transactions on the requested page, in display order.
    pub transactions: Vec<Transaction>,
    /// The number of pages available for the query's month and search text.
    pub total_pages: u64,
}

/// The query parameters for one request to the transactions endpoint.
///
/// Fields are serialized in declaration order, e.g.,
/// `month=March&page=1&search=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// The full month name, e.g., "March".
    pub month: String,
    /// The 1-based page number.
    pub page: u64,
    /// Free text to match against transactions. Empty matches everything.
    pub search: String,
}

impl TransactionQuery {
    /// Encode the query as a URL query string.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}
