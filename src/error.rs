//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A read request to the expense backend failed.
    ///
    /// This covers transport errors, non-success status codes and response
    /// bodies that could not be decoded. The string holds the underlying
    /// error and should only be logged.
    #[error("remote fetch failed: {0}")]
    RemoteFetchFailed(String),

    /// A write request to the expense backend failed.
    #[error("remote write failed: {0}")]
    RemoteWriteFailed(String),

    /// The expense form was submitted with one or more empty fields.
    #[error("all fields must be filled in before an expense can be created")]
    IncompleteExpense,

    /// The configured backend URL could not be parsed.
    #[error("invalid backend URL \"{0}\"")]
    InvalidBackendUrl(String),

    /// The HTTP client for the expense backend could not be created.
    #[error("could not build HTTP client: {0}")]
    HttpClientBuildFailed(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::RemoteFetchFailed(error) => {
                tracing::error!("Could not fetch data from the expense backend: {error}");
                InternalServerError {
                    description: "Could not reach the expense server",
                    fix: "Check that the expense server is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert that
    /// dismisses itself after `duration_ms` milliseconds.
    pub fn into_alert_response(self, duration_ms: u64) -> Response {
        let (status_code, alert) = match self {
            Error::IncompleteExpense => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Warning {
                    message: "Please fill in all fields before submitting.".to_owned(),
                    details: String::new(),
                },
            ),
            Error::RemoteWriteFailed(error) => {
                tracing::error!("Could not create expense: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Could not create expense".to_owned(),
                        details: "The expense server rejected the request or could not be \
                            reached. Try again later."
                            .to_owned(),
                    },
                )
            }
            Error::RemoteFetchFailed(error) => {
                tracing::error!("Could not fetch data from the expense backend: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Could not reach the expense server".to_owned(),
                        details: "Try again later.".to_owned(),
                    },
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more \
                            details."
                            .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html_with_duration(duration_ms)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        Error,
        alert::DEFAULT_ALERT_DURATION_MS,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn incomplete_expense_renders_warning_alert() {
        let response = Error::IncompleteExpense.into_alert_response(DEFAULT_ALERT_DURATION_MS);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("Please fill in all fields before submitting."),
            "got alert text {text:?}"
        );
    }

    #[tokio::test]
    async fn write_failure_renders_bad_gateway_alert() {
        let response = Error::RemoteWriteFailed("boom".to_owned()).into_alert_response(5000);

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("[data-auto-dismiss]").unwrap())
            .next()
            .expect("alert missing");
        assert_eq!(alert.value().attr("data-auto-dismiss"), Some("5000"));
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
