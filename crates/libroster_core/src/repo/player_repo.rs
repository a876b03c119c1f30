//! Roster repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, squad-number lookup and league search over `players`.
//! - Decode the store's unique-constraint verdict into a typed outcome on
//!   the insert path.
//!
//! # Invariants
//! - `insert` never receives a caller-assigned id; the store assigns it.
//! - A `SQLITE_CONSTRAINT_UNIQUE` failure on insert is a normal outcome
//!   (`SquadNumberTaken`), not an error.

use crate::model::dates::CivilDate;
use crate::model::player::Player;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{ffi, params, Connection, Row};

const PLAYER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    middle_name,
    last_name,
    date_of_birth,
    squad_number,
    position,
    abbr_position,
    team,
    league,
    starting11
FROM players";

/// Verdict of a roster insert attempt.
///
/// The pre-check in the service is not atomic with the insert, so the unique
/// index on `squad_number` is the final arbiter and its verdict flows back as
/// a value the service must inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Row persisted; carries the entity with its store-assigned id.
    Saved(Player),
    /// The unique index rejected the squad number.
    SquadNumberTaken,
}

/// Repository interface for roster records.
pub trait PlayerRepository {
    fn exists(&self, id: i64) -> RepoResult<bool>;
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Player>>;
    fn find_by_squad_number(&self, squad_number: i64) -> RepoResult<Option<Player>>;
    fn find_all(&self) -> RepoResult<Vec<Player>>;
    fn search_by_league(&self, league: &str) -> RepoResult<Vec<Player>>;
    fn insert(&self, player: &Player) -> RepoResult<SaveOutcome>;
    fn update(&self, player: &Player) -> RepoResult<()>;
    fn delete_by_id(&self, id: i64) -> RepoResult<bool>;
}

/// SQLite-backed roster repository.
pub struct SqlitePlayerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlayerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PlayerRepository for SqlitePlayerRepository<'_> {
    fn exists(&self, id: i64) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM players WHERE id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn find_by_id(&self, id: i64) -> RepoResult<Option<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLAYER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_player_row(row)?));
        }
        Ok(None)
    }

    fn find_by_squad_number(&self, squad_number: i64) -> RepoResult<Option<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLAYER_SELECT_SQL} WHERE squad_number = ?1;"))?;
        let mut rows = stmt.query([squad_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_player_row(row)?));
        }
        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLAYER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut players = Vec::new();
        while let Some(row) = rows.next()? {
            players.push(parse_player_row(row)?);
        }
        Ok(players)
    }

    fn search_by_league(&self, league: &str) -> RepoResult<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PLAYER_SELECT_SQL}
             WHERE league IS NOT NULL
               AND LOWER(league) LIKE '%' || LOWER(?1) || '%'
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([league])?;
        let mut players = Vec::new();
        while let Some(row) = rows.next()? {
            players.push(parse_player_row(row)?);
        }
        Ok(players)
    }

    fn insert(&self, player: &Player) -> RepoResult<SaveOutcome> {
        let result = self.conn.execute(
            "INSERT INTO players (
                first_name,
                middle_name,
                last_name,
                date_of_birth,
                squad_number,
                position,
                abbr_position,
                team,
                league,
                starting11
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                player.first_name.as_str(),
                player.middle_name.as_deref(),
                player.last_name.as_str(),
                player.date_of_birth.map(CivilDate::to_iso),
                player.squad_number,
                player.position.as_str(),
                player.abbr_position.as_deref(),
                player.team.as_str(),
                player.league.as_deref(),
                i64::from(player.starting11),
            ],
        );

        match result {
            Ok(_) => {
                let mut saved = player.clone();
                saved.id = Some(self.conn.last_insert_rowid());
                Ok(SaveOutcome::Saved(saved))
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Ok(SaveOutcome::SquadNumberTaken)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, player: &Player) -> RepoResult<()> {
        let id = player.id.ok_or_else(|| {
            RepoError::InvalidData("player update requires an assigned id".to_string())
        })?;

        self.conn.execute(
            "UPDATE players
             SET
                first_name = ?1,
                middle_name = ?2,
                last_name = ?3,
                date_of_birth = ?4,
                squad_number = ?5,
                position = ?6,
                abbr_position = ?7,
                team = ?8,
                league = ?9,
                starting11 = ?10
             WHERE id = ?11;",
            params![
                player.first_name.as_str(),
                player.middle_name.as_deref(),
                player.last_name.as_str(),
                player.date_of_birth.map(CivilDate::to_iso),
                player.squad_number,
                player.position.as_str(),
                player.abbr_position.as_deref(),
                player.team.as_str(),
                player.league.as_deref(),
                i64::from(player.starting11),
                id,
            ],
        )?;
        Ok(())
    }

    fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM players WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_player_row(row: &Row<'_>) -> RepoResult<Player> {
    let date_of_birth = match row.get::<_, Option<String>>("date_of_birth")? {
        Some(value) => Some(CivilDate::parse_iso(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid date `{value}` in players.date_of_birth"
            ))
        })?),
        None => None,
    };

    let starting11 = match row.get::<_, i64>("starting11")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid starting11 value `{other}` in players.starting11"
            )));
        }
    };

    Ok(Player {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
        last_name: row.get("last_name")?,
        date_of_birth,
        squad_number: row.get("squad_number")?,
        position: row.get("position")?,
        abbr_position: row.get("abbr_position")?,
        team: row.get("team")?,
        league: row.get("league")?,
        starting11,
    })
}
