//! Week resolution, pick scoring and standings on top of the caches.

use tracing::{debug, info};

use super::{EntityStore, PoolError};
use crate::calculate::{scoring, week, PlayerStats, WeekScope};
use crate::models::{Game, Pick, PickId, Player};
use crate::query::{select, GameFilter, GameOrder, PickFilter};
use crate::storage::DocumentStore;

impl<S: DocumentStore> EntityStore<S> {
    fn season_games(&self, season: u32) -> Result<Vec<&Game>, PoolError> {
        self.find_games(
            &GameFilter::new()
                .with_season(season)
                .ordered_by(GameOrder::WeekNo),
        )
    }

    /// Next week to be played in the current season.
    pub fn current_week(&self) -> Result<u32, PoolError> {
        self.current_week_in(self.current_season()?)
    }

    pub fn current_week_in(&self, season: u32) -> Result<u32, PoolError> {
        week::current_week(&self.season_games(season)?)
    }

    /// Latest week of the current season with a final game.
    pub fn current_active_week(&self) -> Result<u32, PoolError> {
        self.current_active_week_in(self.current_season()?)
    }

    pub fn current_active_week_in(&self, season: u32) -> Result<u32, PoolError> {
        week::current_active_week(&self.season_games(season)?)
    }

    /// Recompute one cached pick against the games of its week.
    pub fn recompute_pick(&mut self, pick_id: &PickId) -> Result<(), PoolError> {
        let games = self.games.get_or_load(&self.store)?;
        let pick = self
            .picks
            .get_or_load_mut(&self.store)?
            .iter_mut()
            .find(|pick| pick.id.as_ref() == Some(pick_id))
            .ok_or_else(|| PoolError::PickNotFound(pick_id.clone()))?;

        let week_games = select(
            games,
            &GameFilter::new()
                .with_week_no(pick.week_no)
                .with_season(pick.season),
        );
        scoring::recompute(pick, &week_games)?;
        debug!(
            "Pick {} now {}-{} bonus {}",
            pick_id, pick.wins, pick.losses, pick.bonus
        );
        Ok(())
    }

    /// Recompute every cached pick of a week. Returns how many were scored.
    ///
    /// An unset season means the current season. Every pick is scored
    /// before any is updated, so an error leaves the whole week unchanged.
    pub fn recompute_week(&mut self, week_no: u32, season: Option<u32>) -> Result<usize, PoolError> {
        let season = match season {
            Some(season) => season,
            None => self.current_season()?,
        };

        let games = self.games.get_or_load(&self.store)?;
        let week_games = select(
            games,
            &GameFilter::new().with_week_no(week_no).with_season(season),
        );
        let picks = self.picks.get_or_load_mut(&self.store)?;

        let mut scored = Vec::new();
        for (index, pick) in picks.iter().enumerate() {
            if pick.week_no == week_no && pick.season == season {
                scored.push((index, scoring::tally(pick, &week_games)?));
            }
        }
        for (index, totals) in &scored {
            totals.apply(&mut picks[*index]);
        }
        info!(
            "Recomputed {} picks for week {} of {}",
            scored.len(),
            week_no,
            season
        );
        Ok(scored.len())
    }

    /// Stats over the player's current-season picks.
    ///
    /// The picks are copied into the player on first use and kept from then
    /// on, so later recomputes are not reflected for that player.
    pub fn player_stats<'a>(&'a self, player: &'a Player) -> Result<PlayerStats<'a>, PoolError> {
        let picks = match player.picks_cache().get() {
            Some(picks) => picks,
            None => {
                let loaded: Vec<Pick> = self
                    .find_picks(&PickFilter::new().with_player_id(player.id.clone()))?
                    .into_iter()
                    .cloned()
                    .collect();
                debug!("Cached {} picks for {}", loaded.len(), player.nick_name);
                player.picks_cache().get_or_init(|| loaded)
            }
        };
        Ok(PlayerStats::new(player, picks))
    }

    pub fn last_wins(&self, player: &Player) -> Result<u32, PoolError> {
        let week_no = self.current_active_week()?;
        Ok(self.player_stats(player)?.wins(WeekScope::Only(week_no)))
    }

    pub fn last_losses(&self, player: &Player) -> Result<u32, PoolError> {
        let week_no = self.current_active_week()?;
        Ok(self.player_stats(player)?.losses(WeekScope::Only(week_no)))
    }

    pub fn last_bonus(&self, player: &Player) -> Result<i32, PoolError> {
        let week_no = self.current_active_week()?;
        Ok(self.player_stats(player)?.bonus(WeekScope::Only(week_no)))
    }

    /// Cumulative points per completed week, as one CSV row.
    pub fn win_csv(&self, player: &Player) -> Result<String, PoolError> {
        let weeks = self.current_week()?.saturating_sub(1);
        Ok(self.player_stats(player)?.win_csv(weeks))
    }

    /// The player's pick sheet for the current week, if submitted.
    pub fn this_weeks_picks(&self, player: &Player) -> Result<Option<&Pick>, PoolError> {
        let week_no = self.current_week()?;
        let picks = self.find_picks(
            &PickFilter::new()
                .with_player_id(player.id.clone())
                .with_week_no(week_no),
        )?;
        Ok(picks.into_iter().next())
    }
}
