//! # Poker Tracker
//!
//! Record keeping for poker tournament results.
//!
//! A tournament result is a single row: name, format, buy-in, prize, an optional
//! "in the money" flag, the poker site it was played on and the date. Records are
//! created, listed newest first, and deleted. They are never edited.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Tournament model, site enumeration, request validation and the manager
//! - [`db`]: PostgreSQL connection pooling and the repository seam
//!
//! ## Example
//!
//! ```no_run
//! use poker_tracker::db::{Database, DatabaseConfig};
//! use poker_tracker::tournament::{CreateTournamentRequest, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::development()).await?;
//!     let manager = TournamentManager::from_pool(Arc::new(db.pool().clone()));
//!
//!     for tournament in manager.list_tournaments().await? {
//!         println!("{} on {} ({})", tournament.name, tournament.site, tournament.date);
//!     }
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

/// Database pool and repository implementations.
pub mod db;

/// Tournament records: model, validation and management.
pub mod tournament;

pub use tournament::{
    Amount, CreateTournamentRequest, NewTournament, Site, Tournament, TournamentError,
    TournamentId, TournamentManager, TournamentResult,
};
