//! Per-team scalar metrics derived from the raw season record.
//!
//! Every rounded figure in the crate goes through [`round1`] (or
//! [`round_to`]) so the table, the charts and the team page agree on the
//! same value bit for bit.

use serde::Serialize;

use crate::models::Team;

use super::EngineError;

/// Round to `places` decimals, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Derived scalars for one team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamMetrics {
    /// wins / (wins + losses)
    pub win_pct: f64,
    /// wins / (wins + effective_losses)
    pub eff_win_pct: f64,
    /// losses − effective_losses, rounded to one decimal
    pub unearned_losses: f64,
    /// Avg salary % in losses ÷ avg salary % in wins; 0.0 when the team
    /// never played salary in a win
    pub loss_win_ratio: f64,
}

/// Compute the derived scalars for a single team.
///
/// Precondition: the team has played at least one game. Teams without games
/// must be excluded before they reach the engine.
pub fn aggregate(team: &Team) -> Result<TeamMetrics, EngineError> {
    let played = team.games_played();
    if played == 0 {
        return Err(EngineError::DivisionByZero {
            abbr: team.abbr.clone(),
        });
    }
    debug_assert!(
        team.effective_losses >= 0.0 && team.effective_losses <= team.losses as f64 + 1e-9,
        "effective_losses out of range for {}",
        team.abbr
    );

    let wins = team.wins as f64;
    let losses = team.losses as f64;

    Ok(TeamMetrics {
        win_pct: wins / played as f64,
        eff_win_pct: eff_win_pct(wins, team.effective_losses),
        unearned_losses: round1(losses - team.effective_losses).max(0.0),
        loss_win_ratio: loss_win_ratio(team.avg_win_salary_pct, team.avg_loss_salary_pct),
    })
}

fn eff_win_pct(wins: f64, effective_losses: f64) -> f64 {
    let denom = wins + effective_losses;
    // 0-W team whose losses were all played at 0% salary
    if denom <= 0.0 {
        return 0.0;
    }
    wins / denom
}

/// Ratio of salary played in losses to salary played in wins.
/// Below 1.0 means the team rested payroll when it lost.
pub fn loss_win_ratio(avg_win_salary_pct: f64, avg_loss_salary_pct: f64) -> f64 {
    if avg_win_salary_pct > 0.0 {
        avg_loss_salary_pct / avg_win_salary_pct
    } else {
        0.0
    }
}
