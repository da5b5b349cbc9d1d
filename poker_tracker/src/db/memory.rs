//! In-memory tournament repository.
//!
//! Behaves like the PostgreSQL repository (generated ids, date-descending
//! listing, `None` on deleting an unknown id) without a database. The test
//! suites run against it.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::TournamentRepository;
use crate::tournament::{NewTournament, Tournament, TournamentId, TournamentResult};

#[derive(Default)]
struct Store {
    next_id: TournamentId,
    rows: Vec<Tournament>,
}

/// Tournament storage held in process memory
#[derive(Default)]
pub struct InMemoryTournamentRepository {
    store: RwLock<Store>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tournaments
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn insert(&self, tournament: &NewTournament) -> TournamentResult<Tournament> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let stored = tournament.clone().with_id(store.next_id);
        store.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_date_desc(&self) -> TournamentResult<Vec<Tournament>> {
        let mut rows = self.store.read().await.rows.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn delete(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
        let mut store = self.store.write().await;
        let index = store.rows.iter().position(|t| t.id == id);
        Ok(index.map(|index| store.rows.remove(index)))
    }

    async fn health_check(&self) -> TournamentResult<()> {
        Ok(())
    }
}
