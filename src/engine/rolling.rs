//! Per-game series for a single team: the salary timeline with its trailing
//! average, and the running record.
//!
//! Both are single passes with running sums, O(n) in the number of games.
//! The timeline works in integer tenths of a percent so every window mean
//! is exact before it is rounded.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Game, GameResult, HomeAway};

use super::aggregation::round1;

/// Default trailing window, in games.
pub const DEFAULT_WINDOW: usize = 10;

/// Trailing mean of `tenths` (values in tenths of a unit), rounded half away
/// from zero to one decimal of that unit. The window is clamped at the start
/// of the series: position `i` averages `[max(0, i - window + 1), i]`.
///
/// Output length always equals input length. A `window` of 0 is treated
/// as 1.
pub fn rolling_average(tenths: &[i64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut sum = 0i64;

    tenths
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            sum += v;
            if i >= window {
                sum -= tenths[i - window];
            }
            let len = (i + 1).min(window) as i64;
            div_round(sum, len) as f64 / 10.0
        })
        .collect()
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round(num: i64, den: i64) -> i64 {
    let q = (2 * num.abs() + den) / (2 * den);
    if num < 0 {
        -q
    } else {
        q
    }
}

/// A salary fraction as a one-decimal percentage, in integer tenths.
fn pct_tenths(salary_pct: f64) -> i64 {
    (round1(salary_pct * 100.0) * 10.0).round() as i64
}

/// One point on the salary timeline. Percentages are 0–100.
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePoint {
    pub index: usize,
    pub date: NaiveDate,
    pub opponent: String,
    pub wl: GameResult,
    pub salary_pct: f64,
    pub rolling_avg: f64,
    pub effective_loss: f64,
}

/// Salary % per game alongside its trailing `window`-game average.
pub fn salary_timeline(games: &[Game], window: usize) -> Vec<TimelinePoint> {
    let pcts: Vec<i64> = games.iter().map(|g| pct_tenths(g.salary_pct)).collect();
    let rolling = rolling_average(&pcts, window);

    games
        .iter()
        .zip(&pcts)
        .zip(rolling)
        .enumerate()
        .map(|(index, ((g, &tenths), rolling_avg))| TimelinePoint {
            index,
            date: g.date,
            opponent: g.opponent.clone(),
            wl: g.wl,
            salary_pct: tenths as f64 / 10.0,
            rolling_avg,
            effective_loss: g.effective_loss,
        })
        .collect()
}

/// A game with the season-to-date record attached.
#[derive(Debug, Clone, Serialize)]
pub struct GameLogEntry {
    pub date: NaiveDate,
    pub opponent: String,
    pub home_away: HomeAway,
    pub pts_for: u32,
    pub pts_against: u32,
    pub wl: GameResult,
    pub salary_pct: f64,
    pub effective_loss: f64,
    pub running_wins: u32,
    pub running_losses: u32,
    /// Cumulative effective losses, rounded to one decimal
    pub running_effective_losses: f64,
}

pub fn game_log(games: &[Game]) -> Vec<GameLogEntry> {
    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut effective = 0.0f64;

    games
        .iter()
        .map(|g| {
            match g.wl {
                GameResult::Win => wins += 1,
                GameResult::Loss => losses += 1,
            }
            effective += g.effective_loss;
            GameLogEntry {
                date: g.date,
                opponent: g.opponent.clone(),
                home_away: g.home_away,
                pts_for: g.pts_for,
                pts_against: g.pts_against,
                wl: g.wl,
                salary_pct: g.salary_pct,
                effective_loss: g.effective_loss,
                running_wins: wins,
                running_losses: losses,
                running_effective_losses: round1(effective),
            }
        })
        .collect()
}
