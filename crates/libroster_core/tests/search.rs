use libroster_core::db::open_db_in_memory;
use libroster_core::seed::{seed_books, seed_players};
use libroster_core::{
    BookService, MemoryCache, PlayerService, ResourceCache, SqliteBookRepository,
    SqlitePlayerRepository,
};
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cache stub counting every touch; search paths must leave it at zero.
struct TouchCountingCache {
    touches: Arc<AtomicUsize>,
}

impl<K: Eq + Hash, V: Clone> ResourceCache<K, V> for TouchCountingCache {
    fn get(&self, _key: &K) -> Option<V> {
        self.touches.fetch_add(1, Ordering::Relaxed);
        None
    }
    fn put(&self, _key: K, _value: V) {
        self.touches.fetch_add(1, Ordering::Relaxed);
    }
    fn evict(&self, _key: &K) {
        self.touches.fetch_add(1, Ordering::Relaxed);
    }
    fn get_collection(&self) -> Option<Vec<V>> {
        self.touches.fetch_add(1, Ordering::Relaxed);
        None
    }
    fn put_collection(&self, _values: Vec<V>) {
        self.touches.fetch_add(1, Ordering::Relaxed);
    }
    fn evict_collection(&self) {
        self.touches.fetch_add(1, Ordering::Relaxed);
    }
    fn evict_all(&self) {
        self.touches.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn description_search_is_case_insensitive_substring_match() {
    let conn = open_db_in_memory().unwrap();
    seed_books(&SqliteBookRepository::new(&conn)).unwrap();
    let service = BookService::new(SqliteBookRepository::new(&conn), MemoryCache::new());

    let hits = service.search_by_description("GIT AND ITS USAGE").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title.as_deref(), Some("Pro Git"));

    let hits = service.search_by_description("microservice").unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn description_search_returns_empty_list_for_no_match() {
    let conn = open_db_in_memory().unwrap();
    seed_books(&SqliteBookRepository::new(&conn)).unwrap();
    let service = BookService::new(SqliteBookRepository::new(&conn), MemoryCache::new());

    assert!(service.search_by_description("haskell").unwrap().is_empty());
}

#[test]
fn league_search_is_case_insensitive_substring_match() {
    let conn = open_db_in_memory().unwrap();
    seed_players(&SqlitePlayerRepository::new(&conn)).unwrap();
    let service = PlayerService::new(SqlitePlayerRepository::new(&conn), MemoryCache::new());

    let hits = service.search_by_league("premier").unwrap();
    assert_eq!(hits.len(), 2);

    let hits = service.search_by_league("La Liga").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name.as_deref(), Some("De Paul"));

    assert!(service.search_by_league("bundesliga").unwrap().is_empty());
}

#[test]
fn squad_number_search_is_exact_match() {
    let conn = open_db_in_memory().unwrap();
    seed_players(&SqlitePlayerRepository::new(&conn)).unwrap();
    let service = PlayerService::new(SqlitePlayerRepository::new(&conn), MemoryCache::new());

    let hit = service.search_by_squad_number(10).unwrap().unwrap();
    assert_eq!(hit.last_name.as_deref(), Some("Messi"));
    assert_eq!(service.search_by_squad_number(77).unwrap(), None);
}

#[test]
fn search_bypasses_the_cache_in_both_directions() {
    let conn = open_db_in_memory().unwrap();
    seed_books(&SqliteBookRepository::new(&conn)).unwrap();
    seed_players(&SqlitePlayerRepository::new(&conn)).unwrap();

    let book_touches = Arc::new(AtomicUsize::new(0));
    let books = BookService::new(
        SqliteBookRepository::new(&conn),
        TouchCountingCache {
            touches: Arc::clone(&book_touches),
        },
    );
    books.search_by_description("git").unwrap();
    assert_eq!(book_touches.load(Ordering::Relaxed), 0);

    let player_touches = Arc::new(AtomicUsize::new(0));
    let players = PlayerService::new(
        SqlitePlayerRepository::new(&conn),
        TouchCountingCache {
            touches: Arc::clone(&player_touches),
        },
    );
    players.search_by_league("premier").unwrap();
    players.search_by_squad_number(10).unwrap();
    assert_eq!(player_touches.load(Ordering::Relaxed), 0);
}

#[test]
fn retrieve_all_preserves_store_order() {
    let conn = open_db_in_memory().unwrap();
    seed_players(&SqlitePlayerRepository::new(&conn)).unwrap();
    let service = PlayerService::new(SqlitePlayerRepository::new(&conn), MemoryCache::new());

    let all = service.retrieve_all().unwrap();
    let ids: Vec<i64> = all.iter().filter_map(|player| player.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}
