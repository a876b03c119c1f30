use libroster_core::db::migrations::{apply_migrations, latest_version};
use libroster_core::db::{open_db, open_db_in_memory, DbError};
use libroster_core::repo::player_repo::{PlayerRepository, SaveOutcome, SqlitePlayerRepository};
use libroster_core::{Player, SqliteBookRepository};
use libroster_core::repo::book_repo::BookRepository;

fn sample_player(squad_number: i64) -> Player {
    Player {
        id: None,
        first_name: "Enzo".to_string(),
        middle_name: None,
        last_name: "Fernández".to_string(),
        date_of_birth: None,
        squad_number,
        position: "Central Midfielder".to_string(),
        abbr_position: Some("CM".to_string()),
        team: "Chelsea".to_string(),
        league: Some("Premier League".to_string()),
        starting11: false,
    }
}

#[test]
fn fresh_database_lands_on_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn schema_has_both_record_tables() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    assert!(!repo.exists("9781484200773").unwrap());

    let players = SqlitePlayerRepository::new(&conn);
    assert!(players.find_all().unwrap().is_empty());
}

#[test]
fn squad_number_unique_index_is_enforced_by_the_store() {
    // The service pre-check is bypassed entirely here; the index alone must
    // reject the duplicate.
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlayerRepository::new(&conn);

    let first = repo.insert(&sample_player(24)).unwrap();
    assert!(matches!(first, SaveOutcome::Saved(_)));

    let second = repo.insert(&sample_player(24)).unwrap();
    assert_eq!(second, SaveOutcome::SquadNumberTaken);
}

#[test]
fn applying_migrations_twice_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();
    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn file_backed_database_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqlitePlayerRepository::new(&conn);
        repo.insert(&sample_player(5)).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqlitePlayerRepository::new(&conn);
    let found = repo.find_by_squad_number(5).unwrap().unwrap();
    assert_eq!(found.last_name, "Fernández");
}
