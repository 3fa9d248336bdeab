//! Week resolution.
//!
//! Both resolvers look at the latest scheduled week of a season. The
//! current week is the next one to be played; the active week is the most
//! recent one with a result in it.

use crate::models::Game;
use crate::pool::PoolError;

/// Week slot with no regular games. `current_week` steps over it.
pub const PRO_BOWL_WEEK: u32 = 21;

fn latest_week<'a>(games: &[&'a Game]) -> Result<Option<(u32, Vec<&'a Game>)>, PoolError> {
    let Some(last_week) = games.iter().map(|game| game.week_no).max() else {
        return Ok(None);
    };
    let week_games: Vec<&Game> = games
        .iter()
        .copied()
        .filter(|game| game.week_no == last_week)
        .collect();
    if week_games.is_empty() {
        return Err(PoolError::GameNotFound(format!("any game in week {}", last_week)));
    }
    Ok(Some((last_week, week_games)))
}

/// Week whose games are up next, given every game of one season.
///
/// Stays on the latest week until all of its games are final, then moves
/// to the following week. A season without games is in week 1.
pub fn current_week(games: &[&Game]) -> Result<u32, PoolError> {
    let Some((last_week, week_games)) = latest_week(games)? else {
        return Ok(1);
    };

    let mut week = if week_games.iter().all(|game| game.is_final()) {
        last_week + 1
    } else {
        last_week
    };
    if week == PRO_BOWL_WEEK {
        week += 1;
    }
    Ok(week)
}

/// Most recent week with at least one final game, given every game of one
/// season.
///
/// Unlike `current_week` this never skips the Pro Bowl slot.
pub fn current_active_week(games: &[&Game]) -> Result<u32, PoolError> {
    let Some((last_week, week_games)) = latest_week(games)? else {
        return Ok(1);
    };

    if week_games.iter().any(|game| game.is_final()) {
        Ok(last_week)
    } else {
        Ok(last_week.saturating_sub(1))
    }
}
