//! # TGFP
//!
//! Object model and query layer for The Great Football Pool.
//!
//! ## Architecture
//!
//! - **models**: Teams, games, picks, players, clans and pool metadata
//! - **storage**: Document persistence (JSONL files, in-memory)
//! - **pool**: The entity store: lazily loaded caches, save and flush
//! - **query**: Parametric filters and stable ordering
//! - **calculate**: Week resolution, pick scoring and standings
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod pool;
pub mod query;
pub mod storage;

pub use models::*;
pub use pool::{EntityStore, PoolError};
