//! Tournament manager: validates requests and forwards them to the repository.

use log::{debug, info, warn};
use sqlx::PgPool;
use std::sync::Arc;

use super::errors::{TournamentError, TournamentResult};
use super::models::{CreateTournamentRequest, Tournament, TournamentId};
use crate::db::{PgTournamentRepository, TournamentRepository};

/// Tournament manager
///
/// Holds no state of its own between calls. Every operation issues exactly
/// one repository call.
#[derive(Clone)]
pub struct TournamentManager {
    repository: Arc<dyn TournamentRepository>,
}

impl TournamentManager {
    /// Create a manager over any repository implementation
    pub fn new(repository: Arc<dyn TournamentRepository>) -> Self {
        Self { repository }
    }

    /// Create a manager backed by PostgreSQL
    pub fn from_pool(pool: Arc<PgPool>) -> Self {
        Self::new(Arc::new(PgTournamentRepository::new(pool)))
    }

    /// Validate and record a new tournament result
    ///
    /// # Errors
    ///
    /// - `InvalidSite`, `MissingFields`, `InvalidNumber`, `InvalidDate` for bad input
    /// - `Database` if the insert fails
    pub async fn create_tournament(
        &self,
        request: CreateTournamentRequest,
    ) -> TournamentResult<Tournament> {
        let new = request.validate().inspect_err(|e| {
            warn!("Rejected tournament: {}", e);
        })?;

        let tournament = self.repository.insert(&new).await?;
        info!(
            "Recorded tournament {} ({} on {}, {})",
            tournament.id, tournament.name, tournament.site, tournament.date
        );

        Ok(tournament)
    }

    /// List all tournaments, most recent date first
    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let tournaments = self.repository.list_by_date_desc().await?;
        debug!("Listed {} tournaments", tournaments.len());
        Ok(tournaments)
    }

    /// Delete a tournament and return the removed record
    ///
    /// # Errors
    ///
    /// - `NotFound` if no tournament has this id
    /// - `Database` if the delete fails
    pub async fn delete_tournament(&self, id: TournamentId) -> TournamentResult<Tournament> {
        match self.repository.delete(id).await? {
            Some(tournament) => {
                info!("Deleted tournament {} ({})", tournament.id, tournament.name);
                Ok(tournament)
            }
            None => Err(TournamentError::NotFound(id)),
        }
    }

    /// Check that the underlying store is reachable
    pub async fn health_check(&self) -> TournamentResult<()> {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryTournamentRepository;
    use crate::tournament::models::Amount;
    use chrono::NaiveDate;

    fn manager() -> TournamentManager {
        TournamentManager::new(Arc::new(InMemoryTournamentRepository::new()))
    }

    fn request(name: &str, site: &str, date: &str) -> CreateTournamentRequest {
        CreateTournamentRequest {
            name: Some(name.to_string()),
            tournament_type: Some("MTT".to_string()),
            buy_in: Some("10".into()),
            prize: Some(Amount::from(25.5)),
            itm: None,
            site: Some(site.to_string()),
            date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_lists() {
        let manager = manager();
        let created = manager
            .create_tournament(request("Daily Hyper", "Winamax", "2024-05-01"))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.site, "Winamax");
        assert_eq!(created.buy_in, 10.0);
        assert_eq!(created.prize, 25.5);

        let listed = manager.list_tournaments().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_rejected_create_persists_nothing() {
        let manager = manager();
        let err = manager
            .create_tournament(request("Daily Hyper", "FullTilt", "2024-05-01"))
            .await
            .unwrap_err();

        assert!(matches!(err, TournamentError::InvalidSite(_)));
        assert!(manager.list_tournaments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_date_descending() {
        let manager = manager();
        for (name, date) in [
            ("Middle", "2024-02-10"),
            ("Oldest", "2023-12-31"),
            ("Newest", "2024-06-01"),
        ] {
            manager
                .create_tournament(request(name, "Unibet", date))
                .await
                .unwrap();
        }

        let dates: Vec<NaiveDate> = manager
            .list_tournaments()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_returns_record_then_not_found() {
        let manager = manager();
        let created = manager
            .create_tournament(request("Bounty Builder", "Coinpoker", "2024-03-03"))
            .await
            .unwrap();

        let deleted = manager.delete_tournament(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(manager.list_tournaments().await.unwrap().is_empty());

        let err = manager.delete_tournament(created.id).await.unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(id) if id == created.id));
    }

    #[tokio::test]
    async fn test_health_check_in_memory() {
        assert!(manager().health_check().await.is_ok());
    }
}
