//! Lazily loaded per-type collections.

use std::cell::OnceCell;

use tracing::info;

use super::{EntityStore, PoolError};
use crate::models::{Clan, Game, Pick, Player, Team};
use crate::storage::{Document, DocumentStore};

/// Every entity of one type, read from the store on first access.
///
/// Once filled the collection is never re-read; writes made through other
/// handles on the same database are not seen.
#[derive(Debug)]
pub struct EntityCache<T> {
    items: OnceCell<Vec<T>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            items: OnceCell::new(),
        }
    }
}

impl<T: Document> EntityCache<T> {
    /// Items, if they have been loaded.
    pub fn loaded(&self) -> Option<&[T]> {
        self.items.get().map(Vec::as_slice)
    }

    pub fn get_or_load<S: DocumentStore>(&self, store: &S) -> Result<&[T], PoolError> {
        if let Some(items) = self.items.get() {
            return Ok(items.as_slice());
        }
        let loaded = load(store)?;
        Ok(self.items.get_or_init(|| loaded).as_slice())
    }

    pub fn get_or_load_mut<S: DocumentStore>(
        &mut self,
        store: &S,
    ) -> Result<&mut Vec<T>, PoolError> {
        if self.items.get().is_none() {
            self.items = OnceCell::from(load(store)?);
        }
        Ok(self
            .items
            .get_mut()
            .expect("entity cache is filled before mutable access"))
    }
}

fn load<T: Document, S: DocumentStore>(store: &S) -> Result<Vec<T>, PoolError> {
    let items = store
        .read_all(T::COLLECTION)?
        .into_iter()
        .map(T::from_record)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} records from {}", items.len(), T::COLLECTION);
    Ok(items)
}

/// Entity types an [`EntityStore`] keeps a cache for.
pub trait Cached: Document + Sized {
    fn cache<S>(pool: &EntityStore<S>) -> &EntityCache<Self>;

    /// The backing store together with this type's cache, borrowed apart.
    fn parts<S>(pool: &mut EntityStore<S>) -> (&S, &mut EntityCache<Self>);
}

macro_rules! impl_cached {
    ($ty:ty, $field:ident) => {
        impl Cached for $ty {
            fn cache<S>(pool: &EntityStore<S>) -> &EntityCache<Self> {
                &pool.$field
            }

            fn parts<S>(pool: &mut EntityStore<S>) -> (&S, &mut EntityCache<Self>) {
                (&pool.store, &mut pool.$field)
            }
        }
    };
}

impl_cached!(Team, teams);
impl_cached!(Game, games);
impl_cached!(Pick, picks);
impl_cached!(Player, players);
impl_cached!(Clan, clans);
