use std::{fs::OpenOptions, net::SocketAddr, num::NonZeroUsize, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_dashboard::{
    AppState, DEFAULT_ALERT_DURATION_MS, DEFAULT_BACKEND_URL, PaginationConfig, build_router,
    graceful_shutdown, logging_middleware,
};

/// The web server for the expense dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the expense backend API.
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// The number of expenses to show per page.
    #[arg(long, default_value_t = PaginationConfig::default().page_size)]
    page_size: NonZeroUsize,

    /// How many seconds to wait for the backend before giving up on a request.
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,

    /// How long alerts stay on screen, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_ALERT_DURATION_MS)]
    alert_duration_ms: u64,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let pagination_config = PaginationConfig {
        page_size: args.page_size,
        ..Default::default()
    };
    let state = AppState::new(
        &args.backend_url,
        Duration::from_secs(args.request_timeout_secs),
        pagination_config,
        args.alert_duration_ms,
    )?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!(
        "HTTP server listening on {addr}, using the expense backend at {}",
        args.backend_url
    );
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging(log_path: &str) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Failed backend calls are logged where they happen, so skip the
        // generic 5xx log.
        .on_failure(());

    router.layer(tracing_layer)
}
