use clap::Parser;
use std::path::PathBuf;

use crate::engine::rolling::DEFAULT_WINDOW;

/// Salary-weighted draft impact service
#[derive(Parser, Debug, Clone)]
#[command(name = "draft-impact", version, about)]
pub struct Config {
    /// Seasons offered to clients, most recent first; the first is the default
    #[arg(
        long,
        env = "SEASONS",
        value_delimiter = ',',
        default_value = "2025-26,2024-25,2023-24"
    )]
    pub seasons: Vec<String>,

    /// Base URL serving `{season}.json` documents
    #[arg(long, env = "DATA_URL", default_value = "http://127.0.0.1:8000/data")]
    pub data_url: String,

    /// Read season documents from this directory instead of `data_url`.
    /// The directory is also served at `/data`.
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Dashboard API listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Teams moving at least this many picks get an EXPOSED/ETHICAL flag
    #[arg(long, env = "DRAFT_MOVE_THRESHOLD", default_value = "3")]
    pub draft_move_threshold: u32,

    /// Trailing window (games) for the salary rolling average
    #[arg(long, env = "ROLLING_WINDOW", default_value_t = DEFAULT_WINDOW)]
    pub rolling_window: usize,

    /// Print the standings for this season and exit instead of serving
    #[arg(long, env = "REPORT")]
    pub report: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.seasons.is_empty() || self.seasons.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("at least one non-empty season must be configured");
        }
        if self.rolling_window == 0 {
            anyhow::bail!("rolling_window must be at least 1");
        }
        if self.draft_move_threshold == 0 {
            anyhow::bail!("draft_move_threshold must be at least 1");
        }
        if let Some(dir) = &self.data_dir {
            if !dir.is_dir() {
                anyhow::bail!("data_dir {} is not a directory", dir.display());
            }
        }
        Ok(())
    }

    pub fn default_season(&self) -> &str {
        &self.seasons[0]
    }
}
