//! Find operations over the cached collections.

use super::{EntityStore, PoolError};
use crate::models::{Clan, Game, Pick, Player, Team, TeamId};
use crate::query::{
    select, select_mut, sort_by_keys, ClanFilter, GameFilter, PickFilter, PlayerFilter,
    PlayerOrder, TeamFilter,
};
use crate::storage::DocumentStore;

impl<S: DocumentStore> EntityStore<S> {
    fn season_or_current(&self, season: Option<u32>) -> Result<u32, PoolError> {
        match season {
            Some(season) => Ok(season),
            None => self.current_season(),
        }
    }

    fn game_filter(&self, filter: &GameFilter) -> Result<GameFilter, PoolError> {
        Ok(GameFilter {
            season: Some(self.season_or_current(filter.season)?),
            ..filter.clone()
        })
    }

    fn pick_filter(&self, filter: &PickFilter) -> Result<PickFilter, PoolError> {
        Ok(PickFilter {
            season: Some(self.season_or_current(filter.season)?),
            ..filter.clone()
        })
    }

    /// Games matching the filter, defaulting to the current season.
    pub fn find_games(&self, filter: &GameFilter) -> Result<Vec<&Game>, PoolError> {
        let filter = self.game_filter(filter)?;
        Ok(filter.sort(select(self.games()?, &filter)))
    }

    pub fn find_games_mut(&mut self, filter: &GameFilter) -> Result<Vec<&mut Game>, PoolError> {
        let filter = self.game_filter(filter)?;
        Ok(filter.sort(select_mut(self.games_mut()?, &filter)))
    }

    /// Picks matching the filter, defaulting to the current season.
    pub fn find_picks(&self, filter: &PickFilter) -> Result<Vec<&Pick>, PoolError> {
        let filter = self.pick_filter(filter)?;
        Ok(filter.sort(select(self.picks()?, &filter)))
    }

    pub fn find_picks_mut(&mut self, filter: &PickFilter) -> Result<Vec<&mut Pick>, PoolError> {
        let filter = self.pick_filter(filter)?;
        Ok(filter.sort(select_mut(self.picks_mut()?, &filter)))
    }

    /// Players matching the filter.
    ///
    /// Ordering by total points loads each matched player's current-season
    /// picks.
    pub fn find_players(&self, filter: &PlayerFilter) -> Result<Vec<&Player>, PoolError> {
        let found = select(self.players()?, filter);
        match filter.ordered_by {
            Some(PlayerOrder::TotalPoints) => {
                let mut keys = Vec::with_capacity(found.len());
                for player in &found {
                    keys.push(self.player_stats(player)?.total_points());
                }
                Ok(sort_by_keys(found, keys, filter.reverse))
            }
            None => Ok(found),
        }
    }

    pub fn find_teams(&self, filter: &TeamFilter) -> Result<Vec<&Team>, PoolError> {
        Ok(select(self.teams()?, filter))
    }

    pub fn find_teams_mut(&mut self, filter: &TeamFilter) -> Result<Vec<&mut Team>, PoolError> {
        Ok(select_mut(self.teams_mut()?, filter))
    }

    pub fn find_clans(&self, filter: &ClanFilter) -> Result<Vec<&Clan>, PoolError> {
        Ok(select(self.clans()?, filter))
    }

    /// First clan matching the filter.
    pub fn find_clan(&self, filter: &ClanFilter) -> Result<Option<&Clan>, PoolError> {
        Ok(self.find_clans(filter)?.into_iter().next())
    }

    /// Resolve a team id, failing if the database has no such team.
    pub fn team(&self, team_id: &TeamId) -> Result<&Team, PoolError> {
        self.find_teams(&TeamFilter::new().with_team_id(team_id.clone()))?
            .into_iter()
            .next()
            .ok_or_else(|| PoolError::TeamNotFound(team_id.clone()))
    }

    /// The team that won a final game; None before the end or on a tie.
    pub fn winning_team(&self, game: &Game) -> Result<Option<&Team>, PoolError> {
        game.winner_id().map(|id| self.team(id)).transpose()
    }

    /// The team that lost a final game; None before the end or on a tie.
    pub fn losing_team(&self, game: &Game) -> Result<Option<&Team>, PoolError> {
        game.loser_id().map(|id| self.team(id)).transpose()
    }
}
