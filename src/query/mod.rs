//! Parametric filters over cached entities.
//!
//! Each entity type has a filter value with one optional field per
//! filterable attribute. Unset fields match everything, set fields must
//! equal the entity's value, and all set fields must hold at once. Results
//! keep load order unless an ordering is requested; ordering is a stable
//! sort in both directions.

use std::ops::Deref;

use crate::models::{Clan, ClanId, Game, GameId, Pick, PickId, Player, PlayerId, Team, TeamId};

/// A predicate over one entity type.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Linear scan keeping every item the filter accepts, in load order.
pub fn select<'a, T, F>(items: &'a [T], filter: &F) -> Vec<&'a T>
where
    F: Filter<T> + ?Sized,
{
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Mutable counterpart of [`select`].
pub fn select_mut<'a, T, F>(items: &'a mut [T], filter: &F) -> Vec<&'a mut T>
where
    F: Filter<T> + ?Sized,
{
    items.iter_mut().filter(|item| filter.matches(item)).collect()
}

/// Stable sort of `items` by precomputed `keys` (one per item, same order).
///
/// Descending order compares the other way round instead of reversing the
/// sorted list, so equal keys keep load order either way.
pub fn sort_by_keys<T, K: Ord>(items: Vec<T>, keys: Vec<K>, reverse: bool) -> Vec<T> {
    let mut keyed: Vec<(K, T)> = keys.into_iter().zip(items).collect();
    if reverse {
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
    }
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn field_matches<V: PartialEq + ?Sized>(wanted: Option<&V>, actual: &V) -> bool {
    wanted.map_or(true, |wanted| wanted == actual)
}

/// Sortable game fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOrder {
    WeekNo,
    StartTime,
}

/// Filter for games.
///
/// An unset `season` means the current season once the filter reaches the
/// entity store; it never means every season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub game_id: Option<GameId>,
    pub tgfp_nfl_game_id: Option<String>,
    pub week_no: Option<u32>,
    pub season: Option<u32>,
    pub home_team_id: Option<TeamId>,
    pub ordered_by: Option<GameOrder>,
    pub reverse: bool,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game_id(mut self, game_id: impl Into<GameId>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    pub fn with_tgfp_nfl_game_id(mut self, nfl_id: impl Into<String>) -> Self {
        self.tgfp_nfl_game_id = Some(nfl_id.into());
        self
    }

    pub fn with_week_no(mut self, week_no: u32) -> Self {
        self.week_no = Some(week_no);
        self
    }

    pub fn with_season(mut self, season: u32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_home_team_id(mut self, team_id: impl Into<TeamId>) -> Self {
        self.home_team_id = Some(team_id.into());
        self
    }

    pub fn ordered_by(mut self, order: GameOrder) -> Self {
        self.ordered_by = Some(order);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sort matched games according to `ordered_by`.
    pub fn sort<G: Deref<Target = Game>>(&self, games: Vec<G>) -> Vec<G> {
        match self.ordered_by {
            Some(GameOrder::WeekNo) => {
                let keys = games.iter().map(|game| game.week_no).collect();
                sort_by_keys(games, keys, self.reverse)
            }
            Some(GameOrder::StartTime) => {
                let keys = games.iter().map(|game| game.start_time).collect();
                sort_by_keys(games, keys, self.reverse)
            }
            None => games,
        }
    }
}

impl Filter<Game> for GameFilter {
    fn matches(&self, game: &Game) -> bool {
        (self.game_id.is_none() || self.game_id.as_ref() == game.id.as_ref())
            && field_matches(self.tgfp_nfl_game_id.as_deref(), game.tgfp_nfl_game_id.as_str())
            && field_matches(self.week_no.as_ref(), &game.week_no)
            && field_matches(self.season.as_ref(), &game.season)
            && field_matches(self.home_team_id.as_ref(), &game.home_team_id)
    }
}

/// Sortable pick fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOrder {
    WeekNo,
}

/// Filter for picks. An unset `season` means the current season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickFilter {
    pub pick_id: Option<PickId>,
    pub week_no: Option<u32>,
    pub season: Option<u32>,
    pub player_id: Option<PlayerId>,
    pub ordered_by: Option<PickOrder>,
    pub reverse: bool,
}

impl PickFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pick_id(mut self, pick_id: impl Into<PickId>) -> Self {
        self.pick_id = Some(pick_id.into());
        self
    }

    pub fn with_week_no(mut self, week_no: u32) -> Self {
        self.week_no = Some(week_no);
        self
    }

    pub fn with_season(mut self, season: u32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_player_id(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    pub fn ordered_by(mut self, order: PickOrder) -> Self {
        self.ordered_by = Some(order);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn sort<P: Deref<Target = Pick>>(&self, picks: Vec<P>) -> Vec<P> {
        match self.ordered_by {
            Some(PickOrder::WeekNo) => {
                let keys = picks.iter().map(|pick| pick.week_no).collect();
                sort_by_keys(picks, keys, self.reverse)
            }
            None => picks,
        }
    }
}

impl Filter<Pick> for PickFilter {
    fn matches(&self, pick: &Pick) -> bool {
        (self.pick_id.is_none() || self.pick_id.as_ref() == pick.id.as_ref())
            && field_matches(self.week_no.as_ref(), &pick.week_no)
            && field_matches(self.season.as_ref(), &pick.season)
            && field_matches(self.player_id.as_ref(), &pick.player_id)
    }
}

/// Sortable player fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOrder {
    /// Derived from the player's current-season picks
    TotalPoints,
}

/// Filter for players.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    pub player_id: Option<PlayerId>,
    pub email: Option<String>,
    pub discord_id: Option<u64>,
    pub active: Option<bool>,
    pub full_name: Option<String>,
    pub ordered_by: Option<PlayerOrder>,
    pub reverse: bool,
}

impl PlayerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_id(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_discord_id(mut self, discord_id: u64) -> Self {
        self.discord_id = Some(discord_id);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn ordered_by(mut self, order: PlayerOrder) -> Self {
        self.ordered_by = Some(order);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

impl Filter<Player> for PlayerFilter {
    fn matches(&self, player: &Player) -> bool {
        field_matches(self.player_id.as_ref(), &player.id)
            && field_matches(self.email.as_deref(), player.email.as_str())
            && field_matches(self.discord_id.as_ref(), &player.discord_id)
            && field_matches(self.active.as_ref(), &player.active)
            && self
                .full_name
                .as_ref()
                .map_or(true, |name| *name == player.full_name())
    }
}

/// Filter for teams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamFilter {
    pub team_id: Option<TeamId>,
    pub tgfp_nfl_team_id: Option<String>,
}

impl TeamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team_id(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_tgfp_nfl_team_id(mut self, nfl_id: impl Into<String>) -> Self {
        self.tgfp_nfl_team_id = Some(nfl_id.into());
        self
    }
}

impl Filter<Team> for TeamFilter {
    fn matches(&self, team: &Team) -> bool {
        field_matches(self.team_id.as_ref(), &team.id)
            && field_matches(self.tgfp_nfl_team_id.as_deref(), team.tgfp_nfl_team_id.as_str())
    }
}

/// Filter for clans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClanFilter {
    pub clan_id: Option<ClanId>,
    pub clan_name: Option<String>,
    pub captain_id: Option<PlayerId>,
}

impl ClanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clan_id(mut self, clan_id: impl Into<ClanId>) -> Self {
        self.clan_id = Some(clan_id.into());
        self
    }

    pub fn with_clan_name(mut self, clan_name: impl Into<String>) -> Self {
        self.clan_name = Some(clan_name.into());
        self
    }

    pub fn with_captain_id(mut self, captain_id: impl Into<PlayerId>) -> Self {
        self.captain_id = Some(captain_id.into());
        self
    }
}

impl Filter<Clan> for ClanFilter {
    fn matches(&self, clan: &Clan) -> bool {
        field_matches(self.clan_id.as_ref(), &clan.id)
            && field_matches(self.clan_name.as_deref(), clan.clan_name.as_str())
            && field_matches(self.captain_id.as_ref(), &clan.captain_id)
    }
}
