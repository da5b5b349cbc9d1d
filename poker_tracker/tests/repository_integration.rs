//! PostgreSQL-backed integration tests for the tournament repository.
//!
//! These need a reachable database. Run with:
//! `DATABASE_URL=postgres://... cargo test -p poker_tracker --test repository_integration -- --ignored`

use poker_tracker::db::{Database, DatabaseConfig};
use poker_tracker::tournament::{
    CreateTournamentRequest, TournamentError, TournamentManager,
};
use serial_test::serial;
use std::sync::Arc;

async fn setup() -> (Database, TournamentManager) {
    let config = DatabaseConfig {
        max_connections: 5,
        ..DatabaseConfig::from_env()
    };

    let db = Database::new(&config)
        .await
        .expect("Failed to connect to test database");
    db.ensure_schema().await.expect("Failed to create schema");

    let manager = TournamentManager::from_pool(Arc::new(db.pool().clone()));
    (db, manager)
}

fn request(name: &str, date: &str) -> CreateTournamentRequest {
    CreateTournamentRequest {
        name: Some(name.to_string()),
        tournament_type: Some("MTT".to_string()),
        buy_in: Some("100".into()),
        prize: Some("50000".into()),
        itm: Some(true),
        site: Some("Pokerstars".to_string()),
        date: Some(date.to_string()),
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_create_list_delete_round() {
    let (db, manager) = setup().await;

    let created = manager
        .create_tournament(request("Integration Sunday Million", "2024-01-07"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.buy_in, 100.0);
    assert_eq!(created.prize, 50000.0);
    assert_eq!(created.itm, Some(true));
    assert_eq!(created.site, "Pokerstars");

    let listed = manager.list_tournaments().await.unwrap();
    assert!(listed.contains(&created));
    assert!(listed.windows(2).all(|pair| pair[0].date >= pair[1].date));

    let deleted = manager.delete_tournament(created.id).await.unwrap();
    assert_eq!(deleted, created);

    let listed = manager.list_tournaments().await.unwrap();
    assert!(listed.iter().all(|t| t.id != created.id));

    db.close().await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_delete_missing_id() {
    let (db, manager) = setup().await;

    let err = manager.delete_tournament(i64::MAX).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotFound(_)));

    db.close().await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_null_itm_round_trips() {
    let (db, manager) = setup().await;

    let created = manager
        .create_tournament(CreateTournamentRequest {
            itm: None,
            ..request("Integration no ITM", "2023-11-30")
        })
        .await
        .unwrap();
    assert_eq!(created.itm, None);

    manager.delete_tournament(created.id).await.unwrap();
    db.close().await;
}
