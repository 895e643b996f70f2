//! Display views over the ranked league.
//!
//! Ranking always runs over the entire season first. The functions here only
//! ever see [`StandingRow`]s that already carry their league-wide picks, so a
//! conference or lottery filter narrows what is shown without changing any
//! rank.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::models::{Conference, Season, Team};

use super::aggregation::{aggregate, round_to};
use super::ranking::{actual_order, rank, DraftBoard, DraftMove};
use super::EngineError;

/// Number of teams eligible for the draft lottery.
pub const LOTTERY_SIZE: usize = 14;

/// Teams shown in the unearned-losses bar chart.
pub const UNEARNED_LEADERS: usize = 15;

/// Display order for a standings table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Actual draft order (worst record first)
    #[default]
    ActualWorst,
    /// Salary-weighted draft order (most effective losses first)
    EffWorst,
    /// Most unearned losses first
    MostUnearned,
    /// Best record first
    ActualBest,
}

/// Which subset of the league to show, and in what order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct View {
    /// `East`, `West`, or `All` (same as leaving it out)
    #[serde(default, deserialize_with = "conference_filter")]
    pub conference: Option<Conference>,
    #[serde(default)]
    pub lottery_only: bool,
    #[serde(default)]
    pub sort: SortKey,
}

fn conference_filter<'de, D>(deserializer: D) -> Result<Option<Conference>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("east") => Ok(Some(Conference::East)),
        Some(s) if s.eq_ignore_ascii_case("west") => Ok(Some(Conference::West)),
        Some(s) => Err(de::Error::unknown_variant(s, &["East", "West", "All"])),
    }
}

/// One team annotated with every derived field, ready for a table.
#[derive(Debug, Clone, Serialize)]
pub struct StandingRow {
    pub abbr: String,
    pub name: String,
    pub conference: Conference,
    pub wins: u32,
    pub losses: u32,
    pub effective_losses: f64,
    pub avg_win_salary_pct: f64,
    pub avg_loss_salary_pct: f64,
    pub win_pct: f64,
    pub eff_win_pct: f64,
    pub unearned_losses: f64,
    /// Rounded to three decimals for display
    pub loss_win_ratio: f64,
    pub actual_draft: usize,
    pub eff_draft: usize,
    pub draft_change: i64,
    pub draft_move: Option<DraftMove>,
}

impl StandingRow {
    fn build(team: &Team, board: &DraftBoard, move_threshold: u32) -> Result<Self, EngineError> {
        let metrics = aggregate(team)?;
        let pick = board.get(&team.abbr)?;
        Ok(StandingRow {
            abbr: team.abbr.clone(),
            name: team.name.clone(),
            conference: team.conference,
            wins: team.wins,
            losses: team.losses,
            effective_losses: team.effective_losses,
            avg_win_salary_pct: team.avg_win_salary_pct,
            avg_loss_salary_pct: team.avg_loss_salary_pct,
            win_pct: metrics.win_pct,
            eff_win_pct: metrics.eff_win_pct,
            unearned_losses: metrics.unearned_losses,
            loss_win_ratio: round_to(metrics.loss_win_ratio, 3),
            actual_draft: pick.actual,
            eff_draft: pick.effective,
            draft_change: pick.change,
            draft_move: DraftMove::classify(pick.change, move_threshold),
        })
    }
}

/// The `LOTTERY_SIZE` teams with the lowest win percentage. Ties keep input
/// order, exactly as in the actual draft ranking.
pub fn lottery_teams(teams: &[Team]) -> Result<HashSet<String>, EngineError> {
    if teams.len() < LOTTERY_SIZE {
        return Err(EngineError::InsufficientTeams {
            required: LOTTERY_SIZE,
            found: teams.len(),
        });
    }
    let order = actual_order(teams)?;
    Ok(order
        .into_iter()
        .take(LOTTERY_SIZE)
        .map(|idx| teams[idx].abbr.clone())
        .collect())
}

/// Rank the whole season and annotate every team, in input order.
pub fn ranked_rows(season: &Season, move_threshold: u32) -> Result<Vec<StandingRow>, EngineError> {
    let board = rank(&season.teams)?;
    season
        .teams
        .iter()
        .map(|t| StandingRow::build(t, &board, move_threshold))
        .collect()
}

/// Narrow already-ranked rows to a conference and/or the lottery set.
pub fn apply_view(
    rows: Vec<StandingRow>,
    conference: Option<Conference>,
    lottery: Option<&HashSet<String>>,
) -> Vec<StandingRow> {
    rows.into_iter()
        .filter(|r| conference.map_or(true, |c| r.conference == c))
        .filter(|r| lottery.map_or(true, |set| set.contains(&r.abbr)))
        .collect()
}

/// Reorder rows for display. Rank fields are left untouched; equal keys keep
/// their current relative order.
pub fn sort_rows(rows: &mut [StandingRow], key: SortKey) {
    match key {
        SortKey::ActualWorst => rows.sort_by_key(|r| r.actual_draft),
        SortKey::EffWorst => rows.sort_by_key(|r| r.eff_draft),
        SortKey::MostUnearned => {
            rows.sort_by(|a, b| b.unearned_losses.total_cmp(&a.unearned_losses))
        }
        SortKey::ActualBest => rows.sort_by(|a, b| b.win_pct.total_cmp(&a.win_pct)),
    }
}

/// Standings table for one view: rank everything, then filter, then sort.
pub fn standings(
    season: &Season,
    view: &View,
    move_threshold: u32,
) -> Result<Vec<StandingRow>, EngineError> {
    let rows = ranked_rows(season, move_threshold)?;
    let lottery = if view.lottery_only {
        Some(lottery_teams(&season.teams)?)
    } else {
        None
    };
    let mut rows = apply_view(rows, view.conference, lottery.as_ref());
    sort_rows(&mut rows, view.sort);
    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub abbr: String,
    pub name: String,
    pub losses: u32,
    pub effective_losses: f64,
    pub unearned: f64,
}

/// Actual vs effective losses. Teams on the diagonal played full salary in
/// their losses.
#[derive(Debug, Clone, Serialize)]
pub struct TankScatter {
    /// Shared upper bound for both axes
    pub axis_max: f64,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnearnedBar {
    pub abbr: String,
    pub name: String,
    pub unearned: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub scatter: TankScatter,
    pub unearned_leaders: Vec<UnearnedBar>,
}

/// Chart data for a season. Charts honour the lottery toggle but not the
/// conference filter.
pub fn charts(season: &Season, lottery_only: bool) -> Result<ChartView, EngineError> {
    // charts carry no move flags
    let rows = ranked_rows(season, u32::MAX)?;
    let lottery = if lottery_only {
        Some(lottery_teams(&season.teams)?)
    } else {
        None
    };
    let mut rows = apply_view(rows, None, lottery.as_ref());

    let points: Vec<ScatterPoint> = rows
        .iter()
        .map(|r| ScatterPoint {
            abbr: r.abbr.clone(),
            name: r.name.clone(),
            losses: r.losses,
            effective_losses: r.effective_losses,
            unearned: r.unearned_losses,
        })
        .collect();
    let axis_max = points.iter().map(|p| p.losses).max().unwrap_or(0) as f64 + 3.0;

    sort_rows(&mut rows, SortKey::MostUnearned);
    let unearned_leaders = rows
        .iter()
        .take(UNEARNED_LEADERS)
        .map(|r| UnearnedBar {
            abbr: r.abbr.clone(),
            name: r.name.clone(),
            unearned: r.unearned_losses,
        })
        .collect();

    Ok(ChartView {
        scatter: TankScatter { axis_max, points },
        unearned_leaders,
    })
}
