//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Number of pages needed for `total` items, at least one
pub fn page_count(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
