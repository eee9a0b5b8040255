//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert, endpoints, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the transactions service could not be sent or did not
    /// complete, e.g., the connection was refused or the request timed out.
    #[error("could not reach the transactions service: {0}")]
    UpstreamRequest(String),

    /// The transactions service responded with a non-success status code.
    ///
    /// Callers should pass in the status code and the response body.
    #[error("the transactions service responded with status {0}: {1}")]
    UpstreamStatus(u16, String),

    /// The transactions service responded with a body that could not be
    /// parsed as the expected JSON structure.
    #[error("the transactions service sent an invalid response: {0}")]
    InvalidResponse(String),

    /// The client sent a month name that is not one of January to December.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The client sent an event that needs a value without one.
    #[error("the {0} event requires a value")]
    MissingEventValue(&'static str),

    /// The browser session does not exist, or it was evicted to make room
    /// for newer sessions.
    #[error("the browser session could not be found")]
    SessionNotFound,

    /// Could not acquire a session lock.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Error::InvalidResponse(value.to_string());
        }

        if let Some(status) = value.status() {
            return Error::UpstreamStatus(status.as_u16(), value.to_string());
        }

        tracing::error!("request to the transactions service failed: {value}");
        Error::UpstreamRequest(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        &format!("\"{month}\" is not a month"),
                        "Choose a month between January and December.",
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// An explanation of the error that is safe to show to the user.
    ///
    /// Upstream response bodies and other internals are left out.
    pub fn user_message(&self) -> String {
        match self {
            Error::UpstreamRequest(_) => {
                "The transactions service could not be reached. Try again later.".to_owned()
            }
            Error::UpstreamStatus(status, _) => {
                format!("The transactions service responded with status {status}.")
            }
            Error::InvalidResponse(_) => {
                "The transactions service sent data that could not be read.".to_owned()
            }
            Error::InvalidMonth(month) => {
                format!("\"{month}\" is not a month. Choose a month between January and December.")
            }
            Error::MissingEventValue(event) => format!("The {event} selection was empty."),
            _ => "An unexpected error occurred, check the server logs for more details.".to_owned(),
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Intended for responses to HTMX requests, which swap the alert into
    /// the page's alert container.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            // The page that owned the session is stale, so reload it.
            Error::SessionNotFound => {
                return (
                    HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                    StatusCode::OK,
                )
                    .into_response();
            }
            error @ Error::InvalidMonth(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid month".to_owned(),
                    details: error.user_message(),
                },
            ),
            error @ Error::MissingEventValue(_) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.user_message(),
                },
            ),
            error @ (Error::UpstreamRequest(_)
            | Error::UpstreamStatus(_, _)
            | Error::InvalidResponse(_)) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not load transactions".to_owned(),
                    details: error.user_message(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: error.user_message(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
