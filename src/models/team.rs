//! NFL team model.

use serde::{Deserialize, Serialize};

use super::{EntityId, TeamId};
use crate::storage::{id_criteria, Collection, Document, Record};

/// An NFL team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id", skip_serializing)]
    pub id: TeamId,

    /// Abbreviation (e.g., "buf")
    pub short_name: String,

    /// City (e.g., "Buffalo")
    pub city: String,

    /// Nickname (e.g., "Bills")
    pub long_name: String,

    pub wins: u32,
    pub losses: u32,
    pub ties: u32,

    /// Identifier of the team in the upstream schedule feed
    pub tgfp_nfl_team_id: String,

    pub logo_url: String,

    /// Chat emoji markup for the team, when one has been uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_emoji: Option<String>,
}

impl Team {
    /// Create a new Team with a freshly generated ID and an empty record.
    pub fn new(
        short_name: String,
        city: String,
        long_name: String,
        tgfp_nfl_team_id: String,
        logo_url: String,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            short_name,
            city,
            long_name,
            wins: 0,
            losses: 0,
            ties: 0,
            tgfp_nfl_team_id,
            logo_url,
            discord_emoji: None,
        }
    }

    /// City and nickname, e.g. "Buffalo Bills".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.long_name)
    }
}

impl Document for Team {
    const COLLECTION: Collection = Collection::Teams;
    const FIELDS: &'static [&'static str] = &[
        "short_name",
        "city",
        "long_name",
        "wins",
        "losses",
        "ties",
        "tgfp_nfl_team_id",
        "logo_url",
        "discord_emoji",
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
