//! Derived pool state.
//!
//! Pure computations over entities already loaded by the entity store:
//! - `week`: current and active week resolution from game completion
//! - `scoring`: per-pick win/loss/bonus tallies
//! - `standings`: per-player totals over a range of weeks

pub mod scoring;
pub mod standings;
pub mod week;

pub use scoring::{recompute, tally, PickTotals};
pub use standings::{PlayerStats, WeekScope};
pub use week::{current_active_week, current_week, PRO_BOWL_WEEK};
