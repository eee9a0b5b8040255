//! Alert messages shown to the user when something goes wrong.
//!
//! Alerts are swapped into the page's alert container by HTMX, or rendered
//! inline in a section of the page that failed to load.

use maud::{Markup, html};

/// An error message with optional details for display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error with a short message and a longer explanation.
    Error { message: String, details: String },
    /// An error with only a short message.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div
                role="alert"
                data-alert="error"
                class="flex items-start gap-3 p-4 mb-4 text-sm text-red-800 rounded-lg
                    bg-red-50 shadow dark:bg-gray-800 dark:text-red-400"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if let Some(details) = details {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.closest('[data-alert]').remove()"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 hover:bg-red-200
                        dark:hover:bg-gray-700"
                {
                    "✕"
                }
            }
        }
    }
}
