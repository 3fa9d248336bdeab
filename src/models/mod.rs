//! Core data models for the football pool.

mod clan;
mod game;
mod ids;
mod info;
mod pick;
mod player;
mod team;

pub use clan::*;
pub use game::*;
pub use ids::*;
pub use info::*;
pub use pick::*;
pub use player::*;
pub use team::*;
