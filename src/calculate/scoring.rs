//! Pick scoring.

use crate::models::{Game, GameOutcome, Pick};
use crate::pool::PoolError;

/// A pick's wins, losses and bonus as scored against a set of games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickTotals {
    pub wins: u32,
    pub losses: u32,
    pub bonus: i32,
}

impl PickTotals {
    /// Overwrite the running totals stored on a pick.
    pub fn apply(&self, pick: &mut Pick) {
        pick.wins = self.wins;
        pick.losses = self.losses;
        pick.bonus = self.bonus;
    }
}

/// Score a pick sheet from authoritative games without changing it.
///
/// `games` must contain every game the pick sheet refers to. Games that
/// are not final contribute nothing; a final tie counts as a loss. The
/// lock team earns +1 for a win and -1 for a loss, the upset team +1 for a
/// win.
pub fn tally(pick: &Pick, games: &[&Game]) -> Result<PickTotals, PoolError> {
    let mut totals = PickTotals::default();

    for detail in &pick.pick_detail {
        let game = games
            .iter()
            .find(|game| game.id.as_ref() == Some(&detail.game_id))
            .ok_or_else(|| PoolError::GameNotFound(detail.game_id.to_string()))?;

        match game.outcome() {
            GameOutcome::Pending => continue,
            GameOutcome::Tie => totals.losses += 1,
            GameOutcome::Decided { winner, loser } => {
                if *winner == detail.winner_id {
                    totals.wins += 1;
                } else {
                    totals.losses += 1;
                }

                if *winner == pick.lock_team_id {
                    totals.bonus += 1;
                }
                if *loser == pick.lock_team_id {
                    totals.bonus -= 1;
                }
                if pick.upset_team_id.as_ref() == Some(winner) {
                    totals.bonus += 1;
                }
            }
        }
    }

    Ok(totals)
}

/// Recompute a pick's wins, losses and bonus from authoritative games.
///
/// Totals are rebuilt from zero, so calling this twice gives the same
/// result. On error the pick is left as it was.
pub fn recompute(pick: &mut Pick, games: &[&Game]) -> Result<(), PoolError> {
    tally(pick, games)?.apply(pick);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, GameStatus};
    use chrono::{TimeZone, Utc};

    fn game(id: &str, home: &str, road: &str, scores: (u32, u32), status: GameStatus) -> Game {
        let mut game = Game::new(
            format!("nfl.{}", id),
            2022,
            1,
            EntityId::from(home),
            EntityId::from(road),
            EntityId::from(home),
            3.5,
            Utc.with_ymd_and_hms(2022, 9, 11, 17, 0, 0).unwrap(),
        );
        game.id = Some(EntityId::from(id));
        game.home_team_score = scores.0;
        game.road_team_score = scores.1;
        game.game_status = status;
        game
    }

    #[test]
    fn test_home_win_with_lock_and_upset() {
        let g1 = game("g1", "A", "B", (10, 3), GameStatus::Final);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("A"))
            .with_upset(EntityId::from("A"))
            .with_detail(EntityId::from("g1"), EntityId::from("A"));

        recompute(&mut pick, &[&g1]).unwrap();
        assert_eq!((pick.wins, pick.losses, pick.bonus), (1, 0, 2));
    }

    #[test]
    fn test_wrong_pick_and_lost_lock() {
        let g1 = game("g1", "A", "B", (10, 3), GameStatus::Final);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("B"))
            .with_detail(EntityId::from("g1"), EntityId::from("B"));

        recompute(&mut pick, &[&g1]).unwrap();
        assert_eq!((pick.wins, pick.losses, pick.bonus), (0, 1, -1));
    }

    #[test]
    fn test_tie_counts_as_loss_without_bonus() {
        let g1 = game("g1", "A", "B", (17, 17), GameStatus::Final);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("A"))
            .with_upset(EntityId::from("B"))
            .with_detail(EntityId::from("g1"), EntityId::from("A"));

        recompute(&mut pick, &[&g1]).unwrap();
        assert_eq!((pick.wins, pick.losses, pick.bonus), (0, 1, 0));
    }

    #[test]
    fn test_unfinished_games_are_skipped() {
        let g1 = game("g1", "A", "B", (21, 0), GameStatus::Halftime);
        let g2 = game("g2", "C", "D", (0, 0), GameStatus::Scheduled);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("A"))
            .with_detail(EntityId::from("g1"), EntityId::from("A"))
            .with_detail(EntityId::from("g2"), EntityId::from("C"));
        pick.wins = 9;
        pick.bonus = 4;

        recompute(&mut pick, &[&g1, &g2]).unwrap();
        assert_eq!((pick.wins, pick.losses, pick.bonus), (0, 0, 0));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let g1 = game("g1", "A", "B", (10, 3), GameStatus::Final);
        let g2 = game("g2", "C", "D", (7, 24), GameStatus::Final);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("D"))
            .with_upset(EntityId::from("D"))
            .with_detail(EntityId::from("g1"), EntityId::from("A"))
            .with_detail(EntityId::from("g2"), EntityId::from("C"));

        recompute(&mut pick, &[&g1, &g2]).unwrap();
        let first = (pick.wins, pick.losses, pick.bonus);
        recompute(&mut pick, &[&g1, &g2]).unwrap();

        assert_eq!(first, (1, 1, 2));
        assert_eq!((pick.wins, pick.losses, pick.bonus), first);
    }

    #[test]
    fn test_missing_game_is_an_error() {
        let g1 = game("g1", "A", "B", (10, 3), GameStatus::Final);
        let mut pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("A"))
            .with_detail(EntityId::from("g404"), EntityId::from("A"));

        pick.wins = 3;

        let err = recompute(&mut pick, &[&g1]).unwrap_err();
        assert!(matches!(err, PoolError::GameNotFound(ref id) if id == "g404"));
        assert_eq!(pick.wins, 3);
    }

    #[test]
    fn test_tally_leaves_pick_alone() {
        let g1 = game("g1", "A", "B", (10, 3), GameStatus::Final);
        let pick = Pick::new(EntityId::from("p1"), 1, 2022, EntityId::from("A"))
            .with_detail(EntityId::from("g1"), EntityId::from("A"));

        let totals = tally(&pick, &[&g1]).unwrap();
        assert_eq!(
            totals,
            PickTotals {
                wins: 1,
                losses: 0,
                bonus: 1
            }
        );
        assert_eq!((pick.wins, pick.losses, pick.bonus), (0, 0, 0));
    }
}
