//! Structured logging for the server.
//!
//! `RUST_LOG` selects what is printed, falling back to [`DEFAULT_FILTER`].
//! The `log` records emitted by `poker_tracker` are picked up by the same
//! subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,hyper=warn";

/// Statements slower than this are logged at `warn`
pub const SLOW_QUERY_MS: u64 = 100;

/// Install the global subscriber. Call once, before anything logs.
///
/// ```no_run
/// pt_server::logging::init();
/// tracing::info!("Server starting");
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!(filter = DEFAULT_FILTER, "Logging initialized");
}

fn is_slow(duration_ms: u64) -> bool {
    duration_ms > SLOW_QUERY_MS
}

/// Record one statement against `table`.
///
/// Debug-level normally; promoted to `warn` past [`SLOW_QUERY_MS`].
pub fn log_database_operation(query_type: &str, table: &str, duration_ms: u64) {
    if is_slow(duration_ms) {
        tracing::warn!(
            query_type,
            table,
            duration_ms,
            threshold_ms = SLOW_QUERY_MS,
            "Slow database query"
        );
    } else {
        tracing::debug!(query_type, table, duration_ms, "Database operation");
    }
}

/// Access log line for a finished request
pub fn log_api_request(
    request_id: &str,
    method: &str,
    path: &str,
    status_code: u16,
    duration_ms: u64,
) {
    tracing::info!(
        request_id,
        http_method = method,
        http_path = path,
        http_status = status_code,
        duration_ms,
        "Request completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_threshold_is_exclusive() {
        assert!(!is_slow(SLOW_QUERY_MS));
        assert!(is_slow(SLOW_QUERY_MS + 1));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_logging_without_subscriber() {
        log_database_operation("SELECT", "tournaments", 5);
        log_database_operation("INSERT", "tournaments", 250);
        log_api_request("req-1", "DELETE", "/api/tournaments/{id}", 404, 3);
    }
}
