//! Weekly pick sheet model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map};

use super::{EntityId, GameId, PickId, PlayerId, TeamId};
use crate::storage::{Collection, Document, Record};

/// The team a player expects to win one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickDetail {
    pub game_id: GameId,
    pub winner_id: TeamId,
}

/// One player's picks for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    #[serde(rename = "_id", default, skip_serializing)]
    pub id: Option<PickId>,

    pub player_id: PlayerId,
    pub week_no: u32,
    pub season: u32,

    /// Team the player is most confident in
    pub lock_team_id: TeamId,

    /// Underdog the player backs for an upset, if any. The key must be
    /// present in a stored record even when null.
    #[serde(deserialize_with = "required_nullable")]
    pub upset_team_id: Option<TeamId>,

    pub wins: u32,
    pub losses: u32,
    pub bonus: i32,

    pub pick_detail: Vec<PickDetail>,
}

fn required_nullable<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TeamId>::deserialize(deserializer)
}

impl Pick {
    /// Create an empty pick sheet with zeroed totals.
    pub fn new(player_id: PlayerId, week_no: u32, season: u32, lock_team_id: TeamId) -> Self {
        Self {
            id: None,
            player_id,
            week_no,
            season,
            lock_team_id,
            upset_team_id: None,
            wins: 0,
            losses: 0,
            bonus: 0,
            pick_detail: Vec::new(),
        }
    }

    /// Builder method to set the upset team.
    pub fn with_upset(mut self, team_id: TeamId) -> Self {
        self.upset_team_id = Some(team_id);
        self
    }

    /// Builder method to add one game selection.
    pub fn with_detail(mut self, game_id: GameId, winner_id: TeamId) -> Self {
        self.pick_detail.push(PickDetail { game_id, winner_id });
        self
    }

    /// Predicted winner for a game, if the sheet covers it.
    pub fn winner_for_game_id(&self, game_id: &GameId) -> Option<&TeamId> {
        self.pick_detail
            .iter()
            .find(|detail| &detail.game_id == game_id)
            .map(|detail| &detail.winner_id)
    }

    /// Wins plus bonus.
    pub fn points(&self) -> i64 {
        i64::from(self.wins) + i64::from(self.bonus)
    }
}

impl Document for Pick {
    const COLLECTION: Collection = Collection::Picks;
    const FIELDS: &'static [&'static str] = &[
        "player_id",
        "week_no",
        "season",
        "lock_team_id",
        "upset_team_id",
        "wins",
        "losses",
        "bonus",
        "pick_detail",
    ];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn match_criteria(&self) -> Record {
        let mut criteria = Map::new();
        criteria.insert("player_id".to_string(), json!(self.player_id));
        criteria.insert("week_no".to_string(), json!(self.week_no));
        criteria.insert("season".to_string(), json!(self.season));
        criteria
    }
}
