//! Core domain logic for the libroster record-management backend.
//! This crate is the single source of truth for business invariants.

pub mod cache;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use cache::{MemoryCache, ResourceCache};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookDto, BookValidationError};
pub use model::dates::CivilDate;
pub use model::player::{Player, PlayerDto, PlayerValidationError};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::player_repo::{PlayerRepository, SaveOutcome, SqlitePlayerRepository};
pub use repo::{RepoError, RepoResult};
pub use service::book_service::{BookCreateOutcome, BookService};
pub use service::player_service::{PlayerCreateOutcome, PlayerService};
pub use service::{CreateOutcome, InvalidationPolicy};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
