use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Which side of the court a game was played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeAway {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
}

/// Game outcome from the owning team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    East,
    West,
}

/// One played contest, seen from a single team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub date: NaiveDate,
    /// Opponent abbreviation
    pub opponent: String,
    pub home_away: HomeAway,
    pub pts_for: u32,
    pub pts_against: u32,
    pub wl: GameResult,
    /// Fraction of payroll active for this game (0.0–1.0)
    pub salary_pct: f64,
    /// `salary_pct` for a loss, 0.0 for a win. Supplied by the data source.
    pub effective_loss: f64,
}

/// A league member for one season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Short identifier, unique within a season (e.g. "OKC")
    pub abbr: String,
    pub name: String,
    pub conference: Conference,
    pub wins: u32,
    pub losses: u32,
    /// Sum of every game's `effective_loss`; never exceeds `losses`
    pub effective_losses: f64,
    pub avg_win_salary_pct: f64,
    pub avg_loss_salary_pct: f64,
    /// Season salary cap in USD
    pub max_salary: f64,
    /// Chronological game log
    #[serde(default)]
    pub games: Vec<Game>,
}

impl Team {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// A full season document: `{ "season": "2024-25", "teams": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub season: String,
    pub teams: Vec<Team>,
}

impl Season {
    /// Look up a team by abbreviation, ignoring case.
    pub fn find_team(&self, abbr: &str) -> Result<&Team, EngineError> {
        let wanted = abbr.trim().to_uppercase();
        self.teams
            .iter()
            .find(|t| t.abbr.eq_ignore_ascii_case(&wanted))
            .ok_or(EngineError::UnknownTeam(wanted))
    }
}
