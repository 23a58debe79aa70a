//! Implements a struct that holds the state of the dashboard server.

use std::time::Duration;

use axum::extract::FromRef;

use crate::{
    Error, alert::DEFAULT_ALERT_DURATION_MS, expense::ExpenseClient, pagination::PaginationConfig,
};

/// The state of the dashboard server.
///
/// The state is immutable once the server starts, so every request works
/// with its own clone and nothing is shared between requests besides the
/// HTTP connection pool inside [ExpenseClient].
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the expense backend.
    pub client: ExpenseClient,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// How long alerts stay on screen before they dismiss themselves.
    pub alert_duration_ms: u64,
}

impl AppState {
    /// Create a new [AppState] that talks to the backend API at `backend_url`.
    ///
    /// # Errors
    /// Returns an error if `backend_url` is not a valid URL or the HTTP
    /// client cannot be created.
    pub fn new(
        backend_url: &str,
        request_timeout: Duration,
        pagination_config: PaginationConfig,
        alert_duration_ms: u64,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: ExpenseClient::new(backend_url, request_timeout)?,
            pagination_config,
            alert_duration_ms,
        })
    }

    /// Create the state for an existing client with the default page size and
    /// alert duration.
    pub fn with_client(client: ExpenseClient) -> Self {
        Self {
            client,
            pagination_config: PaginationConfig::default(),
            alert_duration_ms: DEFAULT_ALERT_DURATION_MS,
        }
    }
}

impl FromRef<AppState> for ExpenseClient {
    fn from_ref(state: &AppState) -> Self {
        state.client.clone()
    }
}
