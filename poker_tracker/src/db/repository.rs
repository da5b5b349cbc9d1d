//! Repository trait for tournament storage.
//!
//! The manager talks to storage only through [`TournamentRepository`], so the
//! PostgreSQL implementation can be swapped for [`super::InMemoryTournamentRepository`]
//! in tests.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::tournament::{NewTournament, Tournament, TournamentId, TournamentResult};

/// Trait for tournament repository operations
///
/// Each method maps to exactly one statement against the store.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a tournament and return the stored row, including its generated id
    async fn insert(&self, tournament: &NewTournament) -> TournamentResult<Tournament>;

    /// All tournaments ordered by date, newest first
    async fn list_by_date_desc(&self) -> TournamentResult<Vec<Tournament>>;

    /// Delete by id, returning the removed row if there was one
    async fn delete(&self, id: TournamentId) -> TournamentResult<Option<Tournament>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> TournamentResult<()>;
}

/// Default PostgreSQL implementation of `TournamentRepository`
pub struct PgTournamentRepository {
    pool: Arc<PgPool>,
}

impl PgTournamentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, type, buy_in, prize, itm, site, date";

fn tournament_from_row(row: &PgRow) -> Result<Tournament, sqlx::Error> {
    Ok(Tournament {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        tournament_type: row.try_get("type")?,
        buy_in: row.try_get("buy_in")?,
        prize: row.try_get("prize")?,
        itm: row.try_get("itm")?,
        site: row.try_get("site")?,
        date: row.try_get("date")?,
    })
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn insert(&self, tournament: &NewTournament) -> TournamentResult<Tournament> {
        let row = sqlx::query(&format!(
            "INSERT INTO tournaments (name, type, buy_in, prize, itm, site, date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        ))
        .bind(&tournament.name)
        .bind(&tournament.tournament_type)
        .bind(tournament.buy_in)
        .bind(tournament.prize)
        .bind(tournament.itm)
        .bind(tournament.site.as_str())
        .bind(tournament.date)
        .fetch_one(&*self.pool)
        .await?;

        Ok(tournament_from_row(&row)?)
    }

    async fn list_by_date_desc(&self) -> TournamentResult<Vec<Tournament>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM tournaments ORDER BY date DESC"
        ))
        .fetch_all(&*self.pool)
        .await?;

        let tournaments = rows
            .iter()
            .map(tournament_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tournaments)
    }

    async fn delete(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
        let row = sqlx::query(&format!(
            "DELETE FROM tournaments WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.as_ref().map(tournament_from_row).transpose()?)
    }

    async fn health_check(&self) -> TournamentResult<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}
