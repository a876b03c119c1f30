//! Roster record service.
//!
//! # Responsibility
//! - Provide create/retrieve/search/update/delete over roster records with
//!   cache-aside reads and full-namespace invalidation on writes.
//! - Enforce squad-number uniqueness: pre-check first, then translate the
//!   store's constraint verdict when a concurrent writer wins the race.
//!
//! # Invariants
//! - The surrogate id is never accepted from create input; the store
//!   assigns it and the returned DTO carries it.
//! - A `SquadNumberTaken` verdict from the insert path becomes `Conflict`,
//!   never an escaping error.

use crate::cache::ResourceCache;
use crate::model::player::{Player, PlayerDto, PlayerValidationError};
use crate::repo::player_repo::{PlayerRepository, SaveOutcome};
use crate::repo::RepoResult;
use crate::service::{CreateOutcome, InvalidationPolicy};
use log::{debug, info};

/// Create outcome specialized for roster input.
pub type PlayerCreateOutcome = CreateOutcome<PlayerDto, PlayerValidationError>;

/// Service over one roster repository and one injected cache instance
/// scoped to the `players` namespace.
pub struct PlayerService<R, C> {
    repo: R,
    cache: C,
    policy: InvalidationPolicy,
}

impl<R, C> PlayerService<R, C>
where
    R: PlayerRepository,
    C: ResourceCache<i64, PlayerDto>,
{
    /// Creates a service with full invalidation, mandatory for this family
    /// because the collection slot is cached.
    pub fn new(repo: R, cache: C) -> Self {
        Self::with_policy(repo, cache, InvalidationPolicy::Full)
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
    /// - A live record with the same squad number returns `Conflict`.
    /// - The pre-check is not atomic with the insert; when the unique index
    ///   rejects the write, the verdict is returned as `Conflict`.
    /// - On success the returned DTO carries the store-assigned id.
    pub fn create(&self, dto: &PlayerDto) -> RepoResult<PlayerCreateOutcome> {
        let mut player = match dto.try_into_entity() {
            Ok(player) => player,
            Err(err) => return Ok(CreateOutcome::Rejected(err)),
        };
        player.id = None;

        if self.repo.find_by_squad_number(player.squad_number)?.is_some() {
            info!(
                "event=player_create module=service status=conflict squad_number={}",
                player.squad_number
            );
            return Ok(CreateOutcome::Conflict);
        }

        match self.repo.insert(&player)? {
            SaveOutcome::Saved(saved) => {
                let created = saved.to_dto();
                self.reconcile_after_write(&saved, &created);
                Ok(CreateOutcome::Created(created))
            }
            SaveOutcome::SquadNumberTaken => {
                // A concurrent writer won between the pre-check and this
                // insert; the wasted attempt failed cleanly.
                info!(
                    "event=player_create module=service status=conflict_race squad_number={}",
                    player.squad_number
                );
                Ok(CreateOutcome::Conflict)
            }
        }
    }

    /// Cache-aside single-record lookup.
    ///
    /// A miss that also misses the store returns `None` without populating
    /// the cache, so a later create is observed immediately.
    pub fn retrieve_by_id(&self, id: i64) -> RepoResult<Option<PlayerDto>> {
        if let Some(hit) = self.cache.get(&id) {
            debug!("event=player_retrieve module=service status=cache_hit id={id}");
            return Ok(Some(hit));
        }

        debug!("event=player_retrieve module=service status=cache_miss id={id}");
        match self.repo.find_by_id(id)? {
            Some(player) => {
                let dto = player.to_dto();
                self.cache.put(id, dto.clone());
                Ok(Some(dto))
            }
            None => Ok(None),
        }
    }

    /// Returns every record, served from the collection slot when the
    /// policy permits collection caching.
    pub fn retrieve_all(&self) -> RepoResult<Vec<PlayerDto>> {
        if self.policy == InvalidationPolicy::Full {
            if let Some(hit) = self.cache.get_collection() {
                debug!("event=player_retrieve_all module=service status=cache_hit");
                return Ok(hit);
            }
        }

        let dtos: Vec<PlayerDto> = self
            .repo
            .find_all()?
            .iter()
            .map(Player::to_dto)
            .collect();

        if self.policy == InvalidationPolicy::Full {
            self.cache.put_collection(dtos.clone());
        }
        Ok(dtos)
    }

    /// Case-insensitive substring search over league names.
    ///
    /// Bypasses the cache in both directions: result sets are keyed by an
    /// unbounded term with no eviction trigger tied to mutations.
    pub fn search_by_league(&self, league: &str) -> RepoResult<Vec<PlayerDto>> {
        Ok(self
            .repo
            .search_by_league(league)?
            .iter()
            .map(Player::to_dto)
            .collect())
    }

    /// Exact-match lookup by squad number. Never cached: the cache is keyed
    /// by surrogate id and a second index would need its own coherence.
    pub fn search_by_squad_number(&self, squad_number: i64) -> RepoResult<Option<PlayerDto>> {
        Ok(self
            .repo
            .find_by_squad_number(squad_number)?
            .map(|player| player.to_dto()))
    }

    /// Full-replace update by surrogate id.
    ///
    /// Returns `false` when the DTO has no id, fails validation, or names an
    /// unknown id; no store write happens in any of those cases.
    pub fn update(&self, dto: &PlayerDto) -> RepoResult<bool> {
        let Some(id) = dto.id else {
            return Ok(false);
        };

        let player = match dto.try_into_entity() {
            Ok(player) => player,
            Err(_) => return Ok(false),
        };

        if !self.repo.exists(id)? {
            return Ok(false);
        }

        self.repo.update(&player)?;
        let updated = player.to_dto();
        self.reconcile_after_write(&player, &updated);
        Ok(true)
    }

    /// Deletes by surrogate id; `false` when absent, with no side effects.
    pub fn delete(&self, id: i64) -> RepoResult<bool> {
        if !self.repo.exists(id)? {
            return Ok(false);
        }

        self.repo.delete_by_id(id)?;
        match self.policy {
            InvalidationPolicy::Point => self.cache.evict(&id),
            InvalidationPolicy::Full => self.cache.evict_all(),
        }
        Ok(true)
    }

    fn reconcile_after_write(&self, player: &Player, dto: &PlayerDto) {
        match self.policy {
            InvalidationPolicy::Point => {
                if let Some(id) = player.id {
                    self.cache.put(id, dto.clone());
                }
            }
            InvalidationPolicy::Full => self.cache.evict_all(),
        }
    }
}
