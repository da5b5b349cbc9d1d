//! Prometheus metrics for the tournament records server.
//!
//! Nothing is exported until [`init_metrics`] installs the scrape listener.
//! Before that, the recorder functions below are no-ops, which is what the
//! test suites rely on.
//!
//! | Metric | Kind | Labels |
//! |---|---|---|
//! | `http_requests_total` | counter | method, path, status |
//! | `http_request_duration_ms` | histogram | method, path |
//! | `db_query_duration_ms` | histogram | query_type |
//! | `tournaments_created_total` | counter | |
//! | `tournaments_deleted_total` | counter | |
//! | `tournament_validation_failures_total` | counter | reason |

use metrics::{Unit, counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

const HTTP_REQUESTS: &str = "http_requests_total";
const HTTP_DURATION: &str = "http_request_duration_ms";
const DB_DURATION: &str = "db_query_duration_ms";
const CREATED: &str = "tournaments_created_total";
const DELETED: &str = "tournaments_deleted_total";
const VALIDATION_FAILURES: &str = "tournament_validation_failures_total";

/// Serve metrics at `http://<addr>/metrics`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(HTTP_REQUESTS, "HTTP requests served");
    describe_histogram!(HTTP_DURATION, Unit::Milliseconds, "HTTP request latency");
    describe_histogram!(DB_DURATION, Unit::Milliseconds, "Tournament statement latency");
    describe_counter!(CREATED, "Tournament records created");
    describe_counter!(DELETED, "Tournament records deleted");
    describe_counter!(VALIDATION_FAILURES, "Create payloads rejected by validation");

    Ok(())
}

pub fn http_requests_total(method: &str, path: &str, status: u16) {
    counter!(HTTP_REQUESTS,
        "method" => method.to_owned(),
        "path" => path.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    histogram!(HTTP_DURATION,
        "method" => method.to_owned(),
        "path" => path.to_owned()
    )
    .record(duration_ms);
}

/// `query_type` is the SQL verb: `INSERT`, `SELECT` or `DELETE`
pub fn db_query_duration_ms(query_type: &str, duration_ms: f64) {
    histogram!(DB_DURATION, "query_type" => query_type.to_owned()).record(duration_ms);
}

pub fn tournaments_created_total() {
    counter!(CREATED).increment(1);
}

pub fn tournaments_deleted_total() {
    counter!(DELETED).increment(1);
}

/// `reason` is [`poker_tracker::TournamentError::kind`]
pub fn tournament_validation_failures_total(reason: &str) {
    counter!(VALIDATION_FAILURES, "reason" => reason.to_owned()).increment(1);
}
