//! Correlation ids for requests.
//!
//! The caller's `x-request-id` is reused when present and non-empty, otherwise
//! a UUID v4 is minted. The id travels to handlers as a [`RequestId`]
//! extension, is echoed on the response, and tags the access log line and
//! HTTP metrics for the request.

use axum::{
    extract::{FromRequestParts, MatchedPath, Request},
    http::{HeaderMap, HeaderValue, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

use crate::{logging, metrics};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Metric `path` label for requests that reached the fallback
pub const UNMATCHED_ROUTE: &str = "<unmatched>";

/// Correlation id of the request being served
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse the id supplied in `headers`, or mint a fresh one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let supplied = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|id| !id.is_empty());

        match supplied {
            Some(id) => RequestId(id.to_owned()),
            None => RequestId(Uuid::new_v4().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestId>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "request_id_middleware is not installed",
        ))
    }
}

/// Tag every request with a [`RequestId`] and record how it went.
///
/// Install with `axum::middleware::from_fn(request_id_middleware)` on the
/// router so that [`MatchedPath`] is available; metric labels then use the
/// route template (`/api/tournaments/{id}`) rather than the raw path, and
/// the access log keeps the raw path.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = RequestId::from_headers(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    // Unmatched paths share one label
    let route = match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => UNMATCHED_ROUTE.to_owned(),
    };

    tracing::debug!(
        request_id = %request_id.as_str(),
        method = %method,
        uri = %request.uri(),
        "Request started"
    );

    request.extensions_mut().insert(request_id.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let elapsed = started.elapsed();
    let status = response.status().as_u16();
    logging::log_api_request(
        request_id.as_str(),
        method.as_str(),
        &path,
        status,
        elapsed.as_millis() as u64,
    );
    metrics::http_requests_total(method.as_str(), &route, status);
    metrics::http_request_duration_ms(method.as_str(), &route, elapsed.as_secs_f64() * 1000.0);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));

        assert_eq!(RequestId::from_headers(&headers).as_str(), "abc-123");
    }

    #[test]
    fn test_missing_or_empty_id_is_minted() {
        let mut headers = HeaderMap::new();
        let minted = RequestId::from_headers(&headers);
        assert!(Uuid::parse_str(minted.as_str()).is_ok());

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(""));
        let minted = RequestId::from_headers(&headers);
        assert!(Uuid::parse_str(minted.as_str()).is_ok());
    }

    #[test]
    fn test_minted_ids_differ() {
        let headers = HeaderMap::new();
        assert_ne!(
            RequestId::from_headers(&headers),
            RequestId::from_headers(&headers)
        );
    }
}
