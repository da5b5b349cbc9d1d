//! Tournament error types.

use thiserror::Error;

use super::models::TournamentId;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Site is absent or not one of the accepted poker sites
    #[error("Invalid poker site: {0:?}")]
    InvalidSite(Option<String>),

    /// One or more required fields are absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A monetary field could not be read as a finite number
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Date is neither `YYYY-MM-DD` nor an RFC 3339 timestamp
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// No tournament with this id
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors collapse into a single message. The cause is only
    /// available through `Display` for logging.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Database error".to_string(),
            TournamentError::InvalidSite(_) => "Invalid poker site".to_string(),
            TournamentError::MissingFields(_) => "Missing required fields".to_string(),
            TournamentError::InvalidNumber { field, .. } => format!("Invalid number for {field}"),
            TournamentError::InvalidDate(_) => "Invalid date".to_string(),
            TournamentError::NotFound(_) => "Tournament not found".to_string(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the store
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TournamentError::InvalidSite(_)
                | TournamentError::MissingFields(_)
                | TournamentError::InvalidNumber { .. }
                | TournamentError::InvalidDate(_)
        )
    }

    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            TournamentError::Database(_) => "database",
            TournamentError::InvalidSite(_) => "invalid_site",
            TournamentError::MissingFields(_) => "missing_fields",
            TournamentError::InvalidNumber { .. } => "invalid_number",
            TournamentError::InvalidDate(_) => "invalid_date",
            TournamentError::NotFound(_) => "not_found",
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
