//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `libroster_core` wiring: open an
//!   in-memory store, seed it, and read it back through the services.
//! - Keep output deterministic for quick local sanity checks.

use libroster_core::db::open_db_in_memory;
use libroster_core::seed::{seed_books, seed_players};
use libroster_core::{
    BookService, MemoryCache, PlayerService, SqliteBookRepository, SqlitePlayerRepository,
};

fn main() {
    println!("libroster_core ping={}", libroster_core::ping());
    println!("libroster_core version={}", libroster_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = seed_books(&SqliteBookRepository::new(&conn)) {
        eprintln!("failed to seed books: {err}");
        std::process::exit(1);
    }
    if let Err(err) = seed_players(&SqlitePlayerRepository::new(&conn)) {
        eprintln!("failed to seed players: {err}");
        std::process::exit(1);
    }

    let books = BookService::new(SqliteBookRepository::new(&conn), MemoryCache::new());
    let players = PlayerService::new(SqlitePlayerRepository::new(&conn), MemoryCache::new());

    match (books.retrieve_all(), players.retrieve_all()) {
        (Ok(books), Ok(players)) => {
            println!("seeded books={} players={}", books.len(), players.len());
        }
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("failed to read seeded records: {err}");
            std::process::exit(1);
        }
    }
}
