//! Per-player season totals.

use crate::models::{Pick, Player};

/// Which weeks a total covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekScope {
    All,
    /// Weeks 1 through N inclusive
    Through(u32),
    /// Week N alone
    Only(u32),
}

impl WeekScope {
    pub fn includes(&self, week_no: u32) -> bool {
        match *self {
            WeekScope::All => true,
            WeekScope::Through(last) => week_no <= last,
            WeekScope::Only(week) => week_no == week,
        }
    }
}

/// A player's stats over one season of picks.
///
/// Built by the entity store from the player's cached picks; nothing here
/// is stored back.
#[derive(Debug, Clone, Copy)]
pub struct PlayerStats<'a> {
    player: &'a Player,
    picks: &'a [Pick],
}

impl<'a> PlayerStats<'a> {
    pub fn new(player: &'a Player, picks: &'a [Pick]) -> Self {
        Self { player, picks }
    }

    pub fn player(&self) -> &'a Player {
        self.player
    }

    pub fn picks(&self) -> &'a [Pick] {
        self.picks
    }

    fn in_scope(&self, scope: WeekScope) -> impl Iterator<Item = &'a Pick> {
        let picks: &'a [Pick] = self.picks;
        picks
            .iter()
            .filter(move |pick| scope.includes(pick.week_no))
    }

    pub fn wins(&self, scope: WeekScope) -> u32 {
        self.in_scope(scope).map(|pick| pick.wins).sum()
    }

    pub fn losses(&self, scope: WeekScope) -> u32 {
        self.in_scope(scope).map(|pick| pick.losses).sum()
    }

    pub fn bonus(&self, scope: WeekScope) -> i32 {
        self.in_scope(scope).map(|pick| pick.bonus).sum()
    }

    /// Wins plus bonus within the scope.
    pub fn points(&self, scope: WeekScope) -> i64 {
        i64::from(self.wins(scope)) + i64::from(self.bonus(scope))
    }

    pub fn total_points(&self) -> i64 {
        self.points(WeekScope::All)
    }

    /// Share of decided picks that were right; 0.0 before any result.
    pub fn winning_pct(&self) -> f64 {
        let wins = self.wins(WeekScope::All);
        let decided = wins + self.losses(WeekScope::All);
        if decided == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(decided)
        }
    }

    /// `nick,points_through_1,...,points_through_{weeks}`
    pub fn win_csv(&self, weeks: u32) -> String {
        let mut csv = self.player.nick_name.clone();
        for week_no in 1..=weeks {
            csv.push_str(&format!(",{}", self.points(WeekScope::Through(week_no))));
        }
        csv
    }
}
