//! This modules defines the previous/next controls for paging through data.

/// Pages are numbered from one.
pub const FIRST_PAGE: u64 = 1;

/// Whether the previous/next controls are usable for the current page, and
/// the label that shows the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    /// The page currently displayed.
    pub current_page: u64,
    /// There is no page before the current one.
    pub previous_disabled: bool,
    /// The current page is the last known page.
    pub next_disabled: bool,
}

impl PaginationControls {
    /// Create the controls for `current_page`.
    ///
    /// `total_pages` is `None` when the page count is not known, e.g., when
    /// the request for the current page failed. "Next" stays enabled in that
    /// case and the transition to the next page is validated on the server.
    pub fn new(current_page: u64, total_pages: Option<u64>) -> Self {
        Self {
            current_page,
            previous_disabled: current_page <= FIRST_PAGE,
            next_disabled: total_pages.is_some_and(|total_pages| current_page >= total_pages),
        }
    }

    /// The text for the page indicator, e.g., "Page No: 2".
    pub fn label(&self) -> String {
        format!("Page No: {}", self.current_page)
    }
}
