//! Pool player model.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use super::{EntityId, Pick, PlayerId};
use crate::storage::{id_criteria, Collection, Document, Record};

/// A player in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "_id", skip_serializing)]
    pub id: PlayerId,

    pub first_name: String,
    pub last_name: String,

    /// Name shown on the standings page
    pub nick_name: String,

    pub email: String,

    /// Inactive players stay in the database but are hidden from standings
    pub active: bool,

    /// Chat account linked to this player
    pub discord_id: u64,

    /// This season's picks, loaded on first use of a derived stat
    #[serde(skip)]
    picks: OnceCell<Vec<Pick>>,
}

impl Player {
    /// Create a new active Player with a freshly generated ID.
    pub fn new(
        first_name: String,
        last_name: String,
        nick_name: String,
        email: String,
        discord_id: u64,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            first_name,
            last_name,
            nick_name,
            email,
            active: true,
            discord_id,
            picks: OnceCell::new(),
        }
    }

    /// First and last name, e.g. "John Sturgeon".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Cache slot for the player's picks. Never cleared once filled.
    pub(crate) fn picks_cache(&self) -> &OnceCell<Vec<Pick>> {
        &self.picks
    }
}

impl Document for Player {
    const COLLECTION: Collection = Collection::Players;
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "nick_name",
        "email",
        "active",
        "discord_id",
    ];

    fn id(&self) -> Option<&EntityId> {
        Some(&self.id)
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn match_criteria(&self) -> Record {
        id_criteria(&self.id)
    }
}
