//! Runner configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runner configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Seed for the session's random source; entropy when absent
    pub seed: Option<u64>,
    /// Directory of rule-table JSON files; the bundled tables when absent
    pub rules_dir: Option<PathBuf>,
    /// Entries shown in each background/edge/focus offer
    pub offer_count: usize,
    /// Edges the automated session takes
    pub edge_picks: usize,
    /// Where to write the finished character; stdout when absent
    pub output: Option<PathBuf>,
}

impl RunnerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            seed: var("CHARFORGE_SEED")
                .map(|v| v.parse())
                .transpose()
                .context("CHARFORGE_SEED must be an unsigned integer")?,
            rules_dir: var("CHARFORGE_RULES_DIR").map(PathBuf::from),
            offer_count: var("CHARFORGE_OFFER_COUNT")
                .unwrap_or_else(|| "3".to_string())
                .parse()
                .context("CHARFORGE_OFFER_COUNT must be a positive integer")?,
            edge_picks: var("CHARFORGE_EDGE_PICKS")
                .unwrap_or_else(|| "2".to_string())
                .parse()
                .context("CHARFORGE_EDGE_PICKS must be a positive integer")?,
            output: var("CHARFORGE_OUTPUT").map(PathBuf::from),
        })
    }
}
