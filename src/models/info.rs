//! Singleton pool metadata.

use serde::{Deserialize, Serialize};

/// The `tgfp_info` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub current_season: u32,

    #[serde(default)]
    pub home_page_text: String,
}
