pub mod cache;
pub mod source;

pub use cache::SeasonCache;
pub use source::{FileSource, HttpSource, SeasonSource};

use anyhow::Result;
use std::collections::HashSet;
use tracing::warn;

use crate::models::Season;

/// Ingestion checks, run once per document before it is cached.
///
/// - duplicate abbreviations are rejected
/// - teams with no games played are dropped (the engine cannot rank them)
/// - `effective_losses` must lie within `[0, losses]`
pub fn validate_season(mut season: Season) -> Result<Season> {
    let mut seen = HashSet::new();
    for team in &season.teams {
        if !seen.insert(team.abbr.to_uppercase()) {
            anyhow::bail!("season {}: duplicate team {}", season.season, team.abbr);
        }
        if team.effective_losses < 0.0 || team.effective_losses > team.losses as f64 + 1e-9 {
            anyhow::bail!(
                "season {}: team {} has {} effective losses but {} losses",
                season.season,
                team.abbr,
                team.effective_losses,
                team.losses
            );
        }
    }

    let label = season.season.clone();
    season.teams.retain(|t| {
        let keep = t.games_played() > 0;
        if !keep {
            warn!("season {}: excluding {} (no games played)", label, t.abbr);
        }
        keep
    });
    Ok(season)
}
