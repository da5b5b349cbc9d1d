//! Tournament result records.
//!
//! This module provides:
//! - The [`Tournament`] record and the closed [`Site`] enumeration
//! - Validation of incoming create payloads ([`CreateTournamentRequest::validate`])
//! - [`TournamentManager`], which runs create, list and delete against a repository
//!
//! ## Example
//!
//! ```no_run
//! use poker_tracker::db::Database;
//! use poker_tracker::tournament::{CreateTournamentRequest, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let manager = TournamentManager::from_pool(Arc::new(db.pool().clone()));
//!
//!     let request = CreateTournamentRequest {
//!         name: Some("Sunday Million".to_string()),
//!         tournament_type: Some("MTT".to_string()),
//!         buy_in: Some("100".into()),
//!         prize: Some("50000".into()),
//!         itm: Some(true),
//!         site: Some("Pokerstars".to_string()),
//!         date: Some("2024-01-07".to_string()),
//!     };
//!
//!     let tournament = manager.create_tournament(request).await?;
//!     println!("Recorded tournament {}", tournament.id);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{Amount, CreateTournamentRequest, NewTournament, Site, Tournament, TournamentId};
