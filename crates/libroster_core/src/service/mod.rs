//! Record services orchestrating validation, persistence and cache
//! coherence.
//!
//! # Responsibility
//! - Run every operation through the same state machine:
//!   validate, check existence/conflict, persist, reconcile cache, return.
//! - Keep the injected cache coherent with the store after every mutation.
//!
//! # Invariants
//! - Validation failures and missing keys short-circuit before any store or
//!   cache interaction.
//! - Negative lookups are never cached.
//! - Collection caching is only enabled under full invalidation; a point
//!   policy would leave the cached list stale after a mutation.

pub mod book_service;
pub mod player_service;

/// Result of a create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<D, E> {
    /// Record persisted; carries the DTO as stored, surrogate key included.
    Created(D),
    /// A uniqueness constraint holds the requested key already.
    Conflict,
    /// Input failed field validation; nothing was touched.
    Rejected(E),
}

/// Cache reconciliation policy applied after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationPolicy {
    /// Overwrite or evict only the single-entry slot of the mutated key.
    ///
    /// Sufficient only when the collection slot is never populated, which
    /// this layer guarantees by bypassing collection caching under `Point`.
    Point,
    /// Evict the whole namespace, collection slot included.
    Full,
}
