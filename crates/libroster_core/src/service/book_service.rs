//! Bibliographic record service.
//!
//! # Responsibility
//! - Provide create/retrieve/search/update/delete over bibliographic
//!   records with cache-aside reads and policy-driven write reconciliation.
//!
//! # Invariants
//! - The ISBN is the only conflict dimension; the store's primary key is
//!   checked before every create.
//! - Search results never touch the cache in either direction.

use crate::cache::ResourceCache;
use crate::model::book::{Book, BookDto, BookValidationError};
use crate::repo::book_repo::BookRepository;
use crate::repo::RepoResult;
use crate::service::{CreateOutcome, InvalidationPolicy};
use log::{debug, info};

/// Create outcome specialized for bibliographic input.
pub type BookCreateOutcome = CreateOutcome<BookDto, BookValidationError>;

/// Service over one bibliographic repository and one injected cache
/// instance scoped to the `books` namespace.
pub struct BookService<R, C> {
    repo: R,
    cache: C,
    policy: InvalidationPolicy,
}

impl<R, C> BookService<R, C>
where
    R: BookRepository,
    C: ResourceCache<String, BookDto>,
{
    /// Creates a service with point invalidation, the historical default
    /// for this family (no collection caching in play).
    pub fn new(repo: R, cache: C) -> Self {
        Self::with_policy(repo, cache, InvalidationPolicy::Point)
    }

    pub fn with_policy(repo: R, cache: C, policy: InvalidationPolicy) -> Self {
        Self {
            repo,
            cache,
            policy,
        }
    }

    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    /// Creates a new record from validated input.
    ///
    /// # Contract
    /// - Validation failure returns `Rejected` with no store or cache access.
    /// - An existing ISBN returns `Conflict` without writing.
    /// - On success the freshly mapped DTO is returned and the cache is
    ///   reconciled per policy.
    pub fn create(&self, dto: &BookDto) -> RepoResult<BookCreateOutcome> {
        let book = match dto.try_into_entity() {
            Ok(book) => book,
            Err(err) => return Ok(CreateOutcome::Rejected(err)),
        };

        if self.repo.exists(&book.isbn)? {
            info!(
                "event=book_create module=service status=conflict isbn={}",
                book.isbn
            );
            return Ok(CreateOutcome::Conflict);
        }

        self.repo.save(&book)?;
        let created = book.to_dto();
        self.reconcile_after_write(&book, &created);
        Ok(CreateOutcome::Created(created))
    }

    /// Cache-aside single-record lookup.
    ///
    /// A miss that also misses the store returns `None` without populating
    /// the cache, so a later create is observed immediately.
    pub fn retrieve_by_isbn(&self, isbn: &str) -> RepoResult<Option<BookDto>> {
        if let Some(hit) = self.cache.get(&isbn.to_string()) {
            debug!("event=book_retrieve module=service status=cache_hit isbn={isbn}");
            return Ok(Some(hit));
        }

        debug!("event=book_retrieve module=service status=cache_miss isbn={isbn}");
        match self.repo.find_by_isbn(isbn)? {
            Some(book) => {
                let dto = book.to_dto();
                self.cache.put(book.isbn.clone(), dto.clone());
                Ok(Some(dto))
            }
            None => Ok(None),
        }
    }

    /// Returns every record, served from the collection slot when the
    /// policy permits collection caching.
    pub fn retrieve_all(&self) -> RepoResult<Vec<BookDto>> {
        if self.policy == InvalidationPolicy::Full {
            if let Some(hit) = self.cache.get_collection() {
                debug!("event=book_retrieve_all module=service status=cache_hit");
                return Ok(hit);
            }
        }

        let dtos: Vec<BookDto> = self
            .repo
            .find_all()?
            .iter()
            .map(Book::to_dto)
            .collect();

        if self.policy == InvalidationPolicy::Full {
            self.cache.put_collection(dtos.clone());
        }
        Ok(dtos)
    }

    /// Case-insensitive substring search over descriptions.
    ///
    /// Bypasses the cache in both directions: result sets are keyed by an
    /// unbounded term with no eviction trigger tied to mutations.
    pub fn search_by_description(&self, keyword: &str) -> RepoResult<Vec<BookDto>> {
        Ok(self
            .repo
            .search_by_description(keyword)?
            .iter()
            .map(Book::to_dto)
            .collect())
    }

    /// Full-replace update by ISBN.
    ///
    /// Returns `false` for invalid input or an unknown ISBN, with no store
    /// write in either case.
    pub fn update(&self, dto: &BookDto) -> RepoResult<bool> {
        let book = match dto.try_into_entity() {
            Ok(book) => book,
            Err(_) => return Ok(false),
        };

        if !self.repo.exists(&book.isbn)? {
            return Ok(false);
        }

        self.repo.save(&book)?;
        let updated = book.to_dto();
        self.reconcile_after_write(&book, &updated);
        Ok(true)
    }

    /// Deletes by ISBN; `false` when absent, with no side effects.
    pub fn delete(&self, isbn: &str) -> RepoResult<bool> {
        if !self.repo.exists(isbn)? {
            return Ok(false);
        }

        self.repo.delete_by_isbn(isbn)?;
        match self.policy {
            InvalidationPolicy::Point => self.cache.evict(&isbn.to_string()),
            InvalidationPolicy::Full => self.cache.evict_all(),
        }
        Ok(true)
    }

    fn reconcile_after_write(&self, book: &Book, dto: &BookDto) {
        match self.policy {
            InvalidationPolicy::Point => self.cache.put(book.isbn.clone(), dto.clone()),
            InvalidationPolicy::Full => self.cache.evict_all(),
        }
    }
}
