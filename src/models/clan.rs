//! Player groups.

use serde::{Deserialize, Serialize};

use super::{ClanId, EntityId, PlayerId};
use crate::storage::{id_criteria, Collection, Document, Record};

/// Membership entry as stored in the clan record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanMember {
    pub member_id: PlayerId,
}

/// A named group of players with a captain.
///
/// `member_ids` never holds the same player twice; the entity store
/// enforces this when members are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clan {
    #[serde(rename = "_id", skip_serializing)]
    pub id: ClanId,

    pub clan_name: String,
    pub captain_id: PlayerId,
    pub member_ids: Vec<ClanMember>,
}

impl Clan {
    pub fn new(clan_name: String, captain_id: PlayerId) -> Self {
        Self {
            id: EntityId::generate(),
            clan_name,
            captain_id,
            member_ids: Vec::new(),
        }
    }

    pub fn has_member(&self, player_id: &PlayerId) -> bool {
        self.member_ids
            .iter()
            .any(|member| &member.member_id == player_id)
    }
}

impl Document for Clan {
    const COLLECTION: Collection = Collection::Clans;
    const FIELDS: &'static [&'static str] = &["clan_name", "captain_id", "member_ids"];

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
