//! Team page: one club's record, metrics, league-wide picks and game series.

use serde::Serialize;

use crate::models::{Conference, Season};

use super::aggregation::{aggregate, TeamMetrics};
use super::ranking::{rank, DraftRank};
use super::rolling::{game_log, salary_timeline, GameLogEntry, TimelinePoint};
use super::EngineError;

/// Everything the team page shows for one club.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub season: String,
    pub abbr: String,
    pub name: String,
    pub conference: Conference,
    pub wins: u32,
    pub losses: u32,
    pub effective_losses: f64,
    pub avg_win_salary_pct: f64,
    pub avg_loss_salary_pct: f64,
    /// Salary cap in millions of USD, rounded
    pub max_salary_millions: f64,
    pub metrics: TeamMetrics,
    /// Picks within the whole league
    pub draft: DraftRank,
    pub timeline: Vec<TimelinePoint>,
    pub games: Vec<GameLogEntry>,
}

/// Build the report for `abbr`. Draft picks come from ranking the entire
/// season, never the team in isolation.
pub fn team_report(season: &Season, abbr: &str, window: usize) -> Result<TeamReport, EngineError> {
    let team = season.find_team(abbr)?;
    let metrics = aggregate(team)?;
    let draft = rank(&season.teams)?.get(&team.abbr)?;

    Ok(TeamReport {
        season: season.season.clone(),
        abbr: team.abbr.clone(),
        name: team.name.clone(),
        conference: team.conference,
        wins: team.wins,
        losses: team.losses,
        effective_losses: team.effective_losses,
        avg_win_salary_pct: team.avg_win_salary_pct,
        avg_loss_salary_pct: team.avg_loss_salary_pct,
        max_salary_millions: (team.max_salary / 1e6).round(),
        metrics,
        draft,
        timeline: salary_timeline(&team.games, window),
        games: game_log(&team.games),
    })
}
