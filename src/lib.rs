//! Expense Dashboard is a web app for tracking expenses.
//!
//! The dashboard keeps no data of its own. Expenses, categories and
//! subcategories are read from and written to a remote expense backend, and
//! this library serves the HTML pages and fragments built from them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod credentials;
mod endpoints;
mod error;
mod expense;
mod home_page;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;

#[cfg(test)]
mod test_utils;

pub use alert::DEFAULT_ALERT_DURATION_MS;
pub use app_state::AppState;
pub use error::Error;
pub use expense::{DEFAULT_BACKEND_URL, DEFAULT_REQUEST_TIMEOUT, ExpenseClient};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    // In-flight backend requests are dropped along with their connections.
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
