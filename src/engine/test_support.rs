//! Fixture builders shared by the engine tests.

use chrono::NaiveDate;

use crate::models::{Conference, Game, GameResult, HomeAway, Season, Team};

pub fn team(abbr: &str, wins: u32, losses: u32, effective_losses: f64) -> Team {
    team_in(abbr, Conference::East, wins, losses, effective_losses)
}

pub fn team_in(
    abbr: &str,
    conference: Conference,
    wins: u32,
    losses: u32,
    effective_losses: f64,
) -> Team {
    Team {
        abbr: abbr.to_string(),
        name: format!("{} Team", abbr),
        conference,
        wins,
        losses,
        effective_losses,
        avg_win_salary_pct: 0.9,
        avg_loss_salary_pct: 0.8,
        max_salary: 140_588_000.0,
        games: Vec::new(),
    }
}

/// `n` teams alternating East/West, with strictly improving records and
/// effective losses equal to actual losses.
pub fn league(n: usize) -> Vec<Team> {
    (0..n)
        .map(|i| {
            let conference = if i % 2 == 0 {
                Conference::East
            } else {
                Conference::West
            };
            let wins = 10 + i as u32 * 2;
            let losses = 82 - wins;
            team_in(&format!("T{:02}", i), conference, wins, losses, losses as f64)
        })
        .collect()
}

pub fn season(teams: Vec<Team>) -> Season {
    Season {
        season: "2024-25".into(),
        teams,
    }
}

/// Build a chronological game log from `(result, salary_pct)` pairs.
pub fn games(log: &[(GameResult, f64)]) -> Vec<Game> {
    let opening = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
    log.iter()
        .enumerate()
        .map(|(i, (wl, salary_pct))| {
            let won = *wl == GameResult::Win;
            Game {
                date: opening + chrono::Duration::days(2 * i as i64),
                opponent: "OPP".into(),
                home_away: if i % 2 == 0 {
                    HomeAway::Home
                } else {
                    HomeAway::Away
                },
                pts_for: if won { 110 } else { 100 },
                pts_against: if won { 100 } else { 110 },
                wl: *wl,
                salary_pct: *salary_pct,
                effective_loss: if won { 0.0 } else { *salary_pct },
            }
        })
        .collect()
}
