//! HTTP API client for the tournament records server.

use anyhow::{Context, Result};
use poker_tracker::{CreateTournamentRequest, Tournament, TournamentId};
use serde::Deserialize;

/// Error body returned by the server on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// API client for communicating with the tournament server
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Record a new tournament result
    pub async fn create_tournament(&self, request: &CreateTournamentRequest) -> Result<Tournament> {
        let response = self
            .client
            .post(format!("{}/api/tournaments", self.base_url))
            .json(request)
            .send()
            .await
            .context("Failed to send create request")?;

        let response = check_status(response, "Create tournament failed").await?;

        response
            .json()
            .await
            .context("Failed to parse created tournament")
    }

    /// List all tournaments, most recent date first
    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let response = self
            .client
            .get(format!("{}/api/tournaments", self.base_url))
            .send()
            .await
            .context("Failed to list tournaments")?;

        let response = check_status(response, "List tournaments failed").await?;

        response
            .json()
            .await
            .context("Failed to parse tournament list")
    }

    /// Delete a tournament and return the removed record
    pub async fn delete_tournament(&self, id: TournamentId) -> Result<Tournament> {
        let response = self
            .client
            .delete(format!("{}/api/tournaments/{}", self.base_url, id))
            .send()
            .await
            .context("Failed to send delete request")?;

        let response = check_status(response, "Delete tournament failed").await?;

        response
            .json()
            .await
            .context("Failed to parse deleted tournament")
    }
}

/// Turn a non-2xx response into an error carrying the server's message
async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
    let message = serde_json::from_str::<ErrorBody>(&error_text)
        .map(|body| body.error)
        .unwrap_or(error_text);

    anyhow::bail!("{} ({}): {}", action, status.as_u16(), message)
}
