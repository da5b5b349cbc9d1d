//! Tournament record API handlers.
//!
//! - `POST /api/tournaments` records a tournament result
//! - `GET /api/tournaments` lists every record, most recent date first
//! - `DELETE /api/tournaments/{id}` removes one record and returns it
//!
//! # Examples
//!
//! Record a tournament:
//! ```bash
//! curl -X POST http://localhost:5000/api/tournaments \
//!   -H "Content-Type: application/json" \
//!   -d '{"name":"Sunday Million","type":"MTT","buy_in":"100","prize":"50000","itm":true,"site":"Pokerstars","date":"2024-01-07"}'
//! ```
//!
//! Delete it again:
//! ```bash
//! curl -X DELETE http://localhost:5000/api/tournaments/1
//! ```

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
};
use poker_tracker::{CreateTournamentRequest, Site, Tournament, TournamentError, TournamentId};
use serde_json::{Map, Value};
use std::time::Instant;

use super::AppState;
use super::error::ApiError;
use super::request_id::RequestId;
use crate::{logging, metrics};

/// Record a tournament result.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Sunday Million",
///   "type": "MTT",
///   "buy_in": "100",
///   "prize": 50000,
///   "itm": true,
///   "site": "Pokerstars",
///   "date": "2024-01-07"
/// }
/// ```
///
/// `buy_in` and `prize` may be numbers or numeric strings. `itm` may be
/// omitted or `null`.
///
/// A body sent without a JSON content type is read as `{}`, and so fails
/// the site check. The site is checked on the raw JSON before any other
/// field is typed, so an unknown site wins over malformed fields.
///
/// # Response
///
/// Returns `201 Created` with the stored record, including its generated `id`.
///
/// # Errors
///
/// - `400 Bad Request`: `Invalid poker site` (checked first), `Missing required fields`,
///   `Invalid number for buy_in|prize`, `Invalid date`, or `Invalid request body`
/// - `500 Internal Server Error`: `Database error`
pub async fn create_tournament(
    State(state): State<AppState>,
    request_id: RequestId,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    let request = body
        .map_err(ApiError::from)
        .and_then(|body| read_payload(&headers, &body))
        .and_then(decode_request)
        .map_err(|e| reject(&request_id, e))?;

    let started = Instant::now();
    let result = state.tournament_manager.create_tournament(request).await;
    observe_statement("INSERT", started, &result);

    let tournament = result.map_err(|e| reject(&request_id, e.into()))?;
    metrics::tournaments_created_total();

    Ok((StatusCode::CREATED, Json(tournament)))
}

/// List all tournaments ordered by date, newest first.
///
/// # Errors
///
/// - `500 Internal Server Error`: `Database error`
pub async fn list_tournaments(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<Vec<Tournament>>, ApiError> {
    let started = Instant::now();
    let result = state.tournament_manager.list_tournaments().await;
    observe_statement("SELECT", started, &result);

    let tournaments = result.map_err(|e| reject(&request_id, e.into()))?;
    Ok(Json(tournaments))
}

/// Delete a tournament by id.
///
/// # Response
///
/// Returns `200 OK` with the record as it was before deletion.
///
/// # Errors
///
/// - `400 Bad Request`: `Invalid tournament id` (not an integer)
/// - `404 Not Found`: `Tournament not found`
/// - `500 Internal Server Error`: `Database error`
pub async fn delete_tournament(
    State(state): State<AppState>,
    request_id: RequestId,
    id: Result<Path<TournamentId>, PathRejection>,
) -> Result<Json<Tournament>, ApiError> {
    let Path(id) = id.map_err(|e| reject(&request_id, e.into()))?;

    let started = Instant::now();
    let result = state.tournament_manager.delete_tournament(id).await;
    observe_statement("DELETE", started, &result);

    let tournament = result.map_err(|e| reject(&request_id, e.into()))?;
    metrics::tournaments_deleted_total();

    Ok(Json(tournament))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Raw JSON of a create request. Non-JSON and empty bodies read as `{}`.
fn read_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Check site membership on the raw value, then type the remaining fields
fn decode_request(payload: Value) -> Result<CreateTournamentRequest, ApiError> {
    match payload.get("site") {
        Some(Value::String(site)) => {
            site.parse::<Site>()?;
        }
        Some(Value::Null) | None => return Err(TournamentError::InvalidSite(None).into()),
        Some(other) => return Err(TournamentError::InvalidSite(Some(other.to_string())).into()),
    }

    serde_json::from_value(payload).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Log a failed request at a level matching its cause
fn reject(request_id: &RequestId, err: ApiError) -> ApiError {
    match &err {
        ApiError::Tournament(TournamentError::Database(cause)) => {
            tracing::error!(request_id = %request_id.as_str(), error = %cause, "Database error");
        }
        ApiError::Tournament(TournamentError::NotFound(id)) => {
            tracing::info!(request_id = %request_id.as_str(), tournament_id = id, "Tournament not found");
        }
        ApiError::Tournament(e) => {
            metrics::tournament_validation_failures_total(e.kind());
            tracing::warn!(request_id = %request_id.as_str(), error = %e, "Rejected tournament");
        }
        ApiError::InvalidBody(_) | ApiError::InvalidId(_) => {
            tracing::warn!(request_id = %request_id.as_str(), error = %err, "Malformed request");
        }
    }
    err
}

/// Record timing for calls that reached the store
fn observe_statement<T>(query_type: &str, started: Instant, result: &Result<T, TournamentError>) {
    if matches!(result, Err(e) if e.is_validation()) {
        return;
    }

    let elapsed = started.elapsed();
    logging::log_database_operation(query_type, "tournaments", elapsed.as_millis() as u64);
    metrics::db_query_duration_ms(query_type, elapsed.as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn decode(headers: &HeaderMap, body: &str) -> Result<CreateTournamentRequest, ApiError> {
        read_payload(headers, body.as_bytes()).and_then(decode_request)
    }

    fn is_invalid_site(result: Result<CreateTournamentRequest, ApiError>) -> bool {
        matches!(result, Err(ApiError::Tournament(TournamentError::InvalidSite(_))))
    }

    #[test]
    fn test_unknown_site_beats_mistyped_fields() {
        let headers = json_headers();
        assert!(is_invalid_site(decode(&headers, r#"{"itm":"yes","site":"FullTilt"}"#)));
        assert!(is_invalid_site(decode(&headers, r#"{"buy_in":true,"site":"FullTilt"}"#)));
        assert!(is_invalid_site(decode(&headers, r#"{"site":5}"#)));
        assert!(is_invalid_site(decode(&headers, r#"{"site":null,"name":[]}"#)));
        assert!(is_invalid_site(decode(&headers, "[1,2,3]")));
    }

    #[test]
    fn test_non_json_content_type_reads_as_empty_object() {
        assert!(is_invalid_site(decode(&HeaderMap::new(), r#"{"site":"Pokerstars"}"#)));

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(is_invalid_site(decode(&headers, "not json at all")));
    }

    #[test]
    fn test_empty_json_body_is_invalid_site() {
        assert!(is_invalid_site(decode(&json_headers(), "")));
    }

    #[test]
    fn test_content_type_parameters_and_suffix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(is_json(&headers));
    }

    #[test]
    fn test_malformed_json_is_invalid_body() {
        let result = decode(&json_headers(), "{not json");
        assert!(matches!(result, Err(ApiError::InvalidBody(_))));
    }

    #[test]
    fn test_known_site_then_fields_are_typed() {
        let result = decode(&json_headers(), r#"{"site":"ACR","itm":"maybe"}"#);
        assert!(matches!(result, Err(ApiError::InvalidBody(_))));

        let request = decode(&json_headers(), r#"{"site":"ACR","buy_in":"5"}"#).unwrap();
        assert_eq!(request.site.as_deref(), Some("ACR"));
        assert_eq!(request.name, None);
    }
}
