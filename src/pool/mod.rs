//! The entity store.
//!
//! `EntityStore` owns a `DocumentStore` and one lazily loaded cache per
//! entity type. Callers read and mutate the cached entities directly and
//! write them back with `save` or `flush`. Queries live in `find`, derived
//! season state in `season`, clan membership in `clans`.

mod cache;
mod clans;
mod find;
mod season;

#[cfg(test)]
pub(crate) mod fixture;

use std::cell::OnceCell;
use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Clan, ClanId, EntityId, Game, Pick, PickId, Player, PoolInfo, Team, TeamId};
use crate::storage::{Collection, Document, DocumentStore, StorageError};

pub use cache::{Cached, EntityCache};

/// Errors raised by the entity store and the computations built on it.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Pick not found: {0}")]
    PickNotFound(PickId),

    #[error("Clan not found: {0}")]
    ClanNotFound(ClanId),

    #[error("Saved {0} record has no resolvable id")]
    UnresolvedId(Collection),

    #[error("No pool info record in the database")]
    MissingPoolInfo,
}

/// In-memory view of the whole pool database.
///
/// Each collection is read in full on first access and kept for the life
/// of the store. Mutations through the `_mut` accessors are visible to
/// every later query on the same store and reach the database only when
/// saved or flushed. Two stores over the same database do not see each
/// other's changes.
#[derive(Debug)]
pub struct EntityStore<S> {
    store: S,
    teams: EntityCache<Team>,
    games: EntityCache<Game>,
    picks: EntityCache<Pick>,
    players: EntityCache<Player>,
    clans: EntityCache<Clan>,
    info: OnceCell<PoolInfo>,
}

impl<S: DocumentStore> EntityStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            teams: EntityCache::default(),
            games: EntityCache::default(),
            picks: EntityCache::default(),
            players: EntityCache::default(),
            clans: EntityCache::default(),
            info: OnceCell::new(),
        }
    }

    /// The backing document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every team in the database.
    pub fn teams(&self) -> Result<&[Team], PoolError> {
        self.teams.get_or_load(&self.store)
    }

    pub fn teams_mut(&mut self) -> Result<&mut [Team], PoolError> {
        Ok(self.teams.get_or_load_mut(&self.store)?.as_mut_slice())
    }

    /// Every game in the database, all seasons.
    pub fn games(&self) -> Result<&[Game], PoolError> {
        self.games.get_or_load(&self.store)
    }

    pub fn games_mut(&mut self) -> Result<&mut [Game], PoolError> {
        Ok(self.games.get_or_load_mut(&self.store)?.as_mut_slice())
    }

    /// Every pick in the database, all seasons.
    pub fn picks(&self) -> Result<&[Pick], PoolError> {
        self.picks.get_or_load(&self.store)
    }

    pub fn picks_mut(&mut self) -> Result<&mut [Pick], PoolError> {
        Ok(self.picks.get_or_load_mut(&self.store)?.as_mut_slice())
    }

    /// Every player, active or not.
    pub fn players(&self) -> Result<&[Player], PoolError> {
        self.players.get_or_load(&self.store)
    }

    pub fn players_mut(&mut self) -> Result<&mut [Player], PoolError> {
        Ok(self.players.get_or_load_mut(&self.store)?.as_mut_slice())
    }

    pub fn clans(&self) -> Result<&[Clan], PoolError> {
        self.clans.get_or_load(&self.store)
    }

    pub fn clans_mut(&mut self) -> Result<&mut [Clan], PoolError> {
        Ok(self.clans.get_or_load_mut(&self.store)?.as_mut_slice())
    }

    fn info(&self) -> Result<&PoolInfo, PoolError> {
        if let Some(info) = self.info.get() {
            return Ok(info);
        }
        let record = self
            .store
            .find_one(Collection::Info)?
            .ok_or(PoolError::MissingPoolInfo)?;
        let info: PoolInfo = serde_json::from_value(Value::Object(record))?;
        debug!("Loaded pool info for season {}", info.current_season);
        Ok(self.info.get_or_init(|| info))
    }

    /// Season the pool is playing, read once from the metadata record.
    pub fn current_season(&self) -> Result<u32, PoolError> {
        Ok(self.info()?.current_season)
    }

    pub fn home_page_text(&self) -> Result<&str, PoolError> {
        Ok(self.info()?.home_page_text.as_str())
    }

    /// Distinct seasons that have games, ascending.
    pub fn seasons(&self) -> Result<Vec<u32>, PoolError> {
        let seasons: BTreeSet<u32> = self.games()?.iter().map(|game| game.season).collect();
        Ok(seasons.into_iter().collect())
    }

    /// Persist a detached entity and make it part of the cache.
    ///
    /// The entity is upserted on its match criteria. Its id comes from the
    /// insert when the store created a record, otherwise from the cached
    /// entity with the same criteria. The cached entity is replaced, or the
    /// saved one appended when nothing matched.
    pub fn save<T: Cached>(&mut self, mut doc: T) -> Result<EntityId, PoolError> {
        let criteria = doc.match_criteria();
        let record = doc.to_record()?;

        let (store, cache) = T::parts(self);
        let result = store.upsert(T::COLLECTION, &criteria, &record)?;
        let items = cache.get_or_load_mut(store)?;
        let position = items
            .iter()
            .position(|item| item.match_criteria() == criteria);

        let id = match result.inserted_id {
            Some(id) => id,
            None => position
                .and_then(|index| items[index].id().cloned())
                .or_else(|| doc.id().cloned())
                .ok_or(PoolError::UnresolvedId(T::COLLECTION))?,
        };
        doc.set_id(id.clone());

        match position {
            Some(index) => items[index] = doc,
            None => items.push(doc),
        }
        debug!("Saved {} into {}", id, T::COLLECTION);
        Ok(id)
    }

    /// Write back every cached entity of a type that the predicate accepts.
    ///
    /// Returns how many were written. A collection that was never loaded
    /// has nothing to flush.
    pub fn flush<T: Cached>(&self, mut accept: impl FnMut(&T) -> bool) -> Result<usize, PoolError> {
        let Some(items) = T::cache(self).loaded() else {
            return Ok(0);
        };

        let mut written = 0;
        for item in items {
            if !accept(item) {
                continue;
            }
            write_back(&self.store, item)?;
            written += 1;
        }
        info!("Flushed {} records to {}", written, T::COLLECTION);
        Ok(written)
    }
}

/// Upsert one entity on its match criteria.
fn write_back<S: DocumentStore, T: Document>(store: &S, doc: &T) -> Result<(), PoolError> {
    store.upsert(T::COLLECTION, &doc.match_criteria(), &doc.to_record()?)?;
    Ok(())
}
