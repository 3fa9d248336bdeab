//! NFL game model and outcome derivations.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use chrono_tz::{Tz, US::Pacific};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{EntityId, GameId, TeamId};
use crate::storage::{Collection, Document, Record};

/// Status of a game as reported by the schedule feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Halftime,
    EndPeriod,
    Final,
    Postponed,
    Canceled,
    /// Any status string the feed sends that isn't listed above
    Other(String),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Scheduled => "STATUS_SCHEDULED",
            GameStatus::InProgress => "STATUS_IN_PROGRESS",
            GameStatus::Halftime => "STATUS_HALFTIME",
            GameStatus::EndPeriod => "STATUS_END_PERIOD",
            GameStatus::Final => "STATUS_FINAL",
            GameStatus::Postponed => "STATUS_POSTPONED",
            GameStatus::Canceled => "STATUS_CANCELED",
            GameStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for GameStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STATUS_SCHEDULED" => GameStatus::Scheduled,
            "STATUS_IN_PROGRESS" => GameStatus::InProgress,
            "STATUS_HALFTIME" => GameStatus::Halftime,
            "STATUS_END_PERIOD" => GameStatus::EndPeriod,
            "STATUS_FINAL" => GameStatus::Final,
            "STATUS_POSTPONED" => GameStatus::Postponed,
            "STATUS_CANCELED" => GameStatus::Canceled,
            _ => GameStatus::Other(raw),
        }
    }
}

impl From<&str> for GameStatus {
    fn from(raw: &str) -> Self {
        GameStatus::from(raw.to_string())
    }
}

impl From<GameStatus> for String {
    fn from(status: GameStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a game from the pool's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome<'a> {
    /// Not final yet
    Pending,
    /// Final with equal scores
    Tie,
    Decided {
        winner: &'a TeamId,
        loser: &'a TeamId,
    },
}

/// A single NFL game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Set once the game has been stored
    #[serde(rename = "_id", default, skip_serializing)]
    pub id: Option<GameId>,

    pub favorite_team_id: TeamId,
    pub game_status: GameStatus,
    pub home_team_id: TeamId,
    pub home_team_score: u32,
    pub road_team_id: TeamId,
    pub road_team_score: u32,

    /// Points the favorite is giving
    pub spread: f64,

    pub start_time: DateTime<Utc>,
    pub week_no: u32,
    pub season: u32,

    /// Identifier of the game in the upstream schedule feed
    pub tgfp_nfl_game_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<Value>,
}

impl Game {
    /// Create a new scheduled, scoreless Game.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tgfp_nfl_game_id: String,
        season: u32,
        week_no: u32,
        home_team_id: TeamId,
        road_team_id: TeamId,
        favorite_team_id: TeamId,
        spread: f64,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            favorite_team_id,
            game_status: GameStatus::Scheduled,
            home_team_id,
            home_team_score: 0,
            road_team_id,
            road_team_score: 0,
            spread,
            start_time,
            week_no,
            season,
            tgfp_nfl_game_id,
            extra_info: None,
        }
    }

    pub fn is_pregame(&self) -> bool {
        self.game_status == GameStatus::Scheduled
    }

    pub fn is_final(&self) -> bool {
        self.game_status == GameStatus::Final
    }

    /// (ahead, behind) team ids with their scores; None when level.
    fn split(&self) -> Option<((&TeamId, u32), (&TeamId, u32))> {
        let home = (&self.home_team_id, self.home_team_score);
        let road = (&self.road_team_id, self.road_team_score);
        match self.home_team_score.cmp(&self.road_team_score) {
            Ordering::Greater => Some((home, road)),
            Ordering::Less => Some((road, home)),
            Ordering::Equal => None,
        }
    }

    /// Team currently ahead, whatever the status. None while level.
    pub fn leader_id(&self) -> Option<&TeamId> {
        self.split().map(|(ahead, _)| ahead.0)
    }

    /// Winning team of a final game. None before the final whistle or on a tie.
    pub fn winner_id(&self) -> Option<&TeamId> {
        if !self.is_final() {
            return None;
        }
        self.split().map(|(ahead, _)| ahead.0)
    }

    /// Losing team of a final game. None before the final whistle or on a tie.
    pub fn loser_id(&self) -> Option<&TeamId> {
        if !self.is_final() {
            return None;
        }
        self.split().map(|(_, behind)| behind.0)
    }

    /// Winning score of a final game, None on a tie.
    ///
    /// # Panics
    ///
    /// Panics if the game is not final; check `is_final` first.
    pub fn winning_score(&self) -> Option<u32> {
        assert!(
            self.is_final(),
            "winning score requested for game {} which is not final",
            self.tgfp_nfl_game_id
        );
        self.split().map(|(ahead, _)| ahead.1)
    }

    /// Losing score of a final game, None on a tie.
    ///
    /// # Panics
    ///
    /// Panics if the game is not final; check `is_final` first.
    pub fn losing_score(&self) -> Option<u32> {
        assert!(
            self.is_final(),
            "losing score requested for game {} which is not final",
            self.tgfp_nfl_game_id
        );
        self.split().map(|(_, behind)| behind.1)
    }

    /// Whichever of home/road is not the favorite.
    pub fn underdog_team_id(&self) -> &TeamId {
        if self.favorite_team_id == self.home_team_id {
            &self.road_team_id
        } else {
            &self.home_team_id
        }
    }

    pub fn outcome(&self) -> GameOutcome<'_> {
        if !self.is_final() {
            return GameOutcome::Pending;
        }
        match self.split() {
            Some((ahead, behind)) => GameOutcome::Decided {
                winner: ahead.0,
                loser: behind.0,
            },
            None => GameOutcome::Tie,
        }
    }

    /// Kickoff on the US Pacific clock.
    pub fn pacific_start_time(&self) -> DateTime<Tz> {
        self.start_time.with_timezone(&Pacific)
    }
}

impl Document for Game {
    const COLLECTION: Collection = Collection::Games;
    const FIELDS: &'static [&'static str] = &[
        "favorite_team_id",
        "game_status",
        "home_team_id",
        "home_team_score",
        "road_team_id",
        "road_team_score",
        "spread",
        "start_time",
        "week_no",
        "season",
        "tgfp_nfl_game_id",
        "extra_info",
    ];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn match_criteria(&self) -> Record {
        let mut criteria = Map::new();
        criteria.insert(
            "tgfp_nfl_game_id".to_string(),
            Value::String(self.tgfp_nfl_game_id.clone()),
        );
        criteria
    }
}
