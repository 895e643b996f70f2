//! League-wide draft orderings.
//!
//! Two independent orderings are produced over the **whole** league:
//!
//! - *actual*: ascending win percentage (worst record picks first)
//! - *effective*: descending effective losses (most salary-weighted losses
//!   picks first)
//!
//! Ties keep the input order. No secondary tiebreak is applied.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::Team;

use super::aggregation::aggregate;
use super::EngineError;

/// A team's position in both draft orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DraftRank {
    /// 1-based pick by actual record
    pub actual: usize,
    /// 1-based pick by effective losses
    pub effective: usize,
    /// `actual − effective`; positive means a better pick under the
    /// salary-weighted order
    pub change: i64,
}

/// Flag for teams whose pick moves by at least the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftMove {
    /// Lost position: the team's losses came with salary on the bench.
    Exposed,
    /// Gained position: the team played its payroll and still lost.
    Ethical,
}

impl DraftMove {
    pub fn classify(change: i64, threshold: u32) -> Option<DraftMove> {
        if change.unsigned_abs() < threshold as u64 {
            None
        } else if change < 0 {
            Some(DraftMove::Exposed)
        } else {
            Some(DraftMove::Ethical)
        }
    }
}

/// Ranks for every team in a season, keyed by abbreviation.
#[derive(Debug, Clone)]
pub struct DraftBoard {
    ranks: HashMap<String, DraftRank>,
}

impl DraftBoard {
    pub fn get(&self, abbr: &str) -> Result<DraftRank, EngineError> {
        self.ranks
            .get(abbr)
            .copied()
            .ok_or_else(|| EngineError::UnknownTeam(abbr.to_string()))
    }
}

/// Indices of `teams` ordered worst record first (ascending win %).
/// Stable: equal win percentages keep their input order.
pub(crate) fn actual_order(teams: &[Team]) -> Result<Vec<usize>, EngineError> {
    let win_pcts = teams
        .iter()
        .map(|t| aggregate(t).map(|m| m.win_pct))
        .collect::<Result<Vec<_>, _>>()?;
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| win_pcts[a].total_cmp(&win_pcts[b]));
    Ok(order)
}

/// Indices of `teams` ordered most effective losses first. Stable.
fn effective_order(teams: &[Team]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| {
        teams[b]
            .effective_losses
            .total_cmp(&teams[a].effective_losses)
    });
    order
}

/// Rank every team in the league under both orderings.
///
/// Must be given the full, unfiltered team set: ranks are only meaningful
/// relative to the whole league.
pub fn rank(teams: &[Team]) -> Result<DraftBoard, EngineError> {
    if teams.is_empty() {
        return Err(EngineError::EmptyLeague);
    }

    let actual = actual_order(teams)?;
    let effective = effective_order(teams);

    let mut actual_pick = vec![0usize; teams.len()];
    for (pos, &idx) in actual.iter().enumerate() {
        actual_pick[idx] = pos + 1;
    }
    let mut effective_pick = vec![0usize; teams.len()];
    for (pos, &idx) in effective.iter().enumerate() {
        effective_pick[idx] = pos + 1;
    }

    let ranks = teams
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let rank = DraftRank {
                actual: actual_pick[idx],
                effective: effective_pick[idx],
                change: actual_pick[idx] as i64 - effective_pick[idx] as i64,
            };
            (t.abbr.clone(), rank)
        })
        .collect();

    Ok(DraftBoard { ranks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{league, team};
    use std::collections::HashSet;

    fn picks(board: &DraftBoard, teams: &[Team]) -> Vec<DraftRank> {
        teams.iter().map(|t| board.get(&t.abbr).unwrap()).collect()
    }

    fn assert_permutation(board: &DraftBoard, teams: &[Team]) {
        let picks = picks(board, teams);
        let actual: HashSet<usize> = picks.iter().map(|r| r.actual).collect();
        let effective: HashSet<usize> = picks.iter().map(|r| r.effective).collect();
        let expected: HashSet<usize> = (1..=teams.len()).collect();
        assert_eq!(actual, expected);
        assert_eq!(effective, expected);
    }

    /// Teams A and B plus 13 teams with worse records than both.
    fn tie_fixture(a_first: bool) -> Vec<Team> {
        let a = team("AAA", 10, 40, 30.0);
        let b = team("BBB", 20, 30, 30.0);
        let mut teams = if a_first { vec![a, b] } else { vec![b, a] };
        for i in 0..13 {
            teams.push(team(&format!("W{:02}", i), 5, 45, 45.0));
        }
        teams
    }

    #[test]
    fn test_empty_league() {
        assert_eq!(rank(&[]).unwrap_err(), EngineError::EmptyLeague);
    }

    #[test]
    fn test_ranks_are_permutations() {
        let teams = league(30);
        let board = rank(&teams).unwrap();
        assert_permutation(&board, &teams);
    }

    #[test]
    fn test_actual_order_worst_record_first() {
        let teams = vec![
            team("MID", 41, 41, 41.0),
            team("BAD", 15, 67, 60.0),
            team("TOP", 64, 18, 18.0),
        ];
        let board = rank(&teams).unwrap();
        assert_eq!(board.get("BAD").unwrap().actual, 1);
        assert_eq!(board.get("MID").unwrap().actual, 2);
        assert_eq!(board.get("TOP").unwrap().actual, 3);
    }

    #[test]
    fn test_effective_order_most_effective_losses_first() {
        // BAD rested its payroll: fewest effective losses despite worst record
        let teams = vec![
            team("MID", 41, 41, 38.0),
            team("BAD", 15, 67, 30.0),
            team("TOP", 64, 18, 18.0),
        ];
        let board = rank(&teams).unwrap();
        let bad = board.get("BAD").unwrap();
        let mid = board.get("MID").unwrap();
        assert_eq!(mid.effective, 1);
        assert_eq!(bad.effective, 2);
        assert_eq!(bad.change, -1);
        assert_eq!(mid.change, 1);
    }

    #[test]
    fn test_change_is_actual_minus_effective() {
        let mut teams = league(20);
        // scramble effective losses against the actual order
        for (i, t) in teams.iter_mut().enumerate() {
            t.effective_losses = ((i * 7) % 20) as f64;
        }
        let board = rank(&teams).unwrap();
        for r in picks(&board, &teams) {
            assert_eq!(r.change, r.actual as i64 - r.effective as i64);
        }
        assert_permutation(&board, &teams);
    }

    #[test]
    fn test_effective_tie_resolved_by_input_order() {
        let board = rank(&tie_fixture(true)).unwrap();
        let a = board.get("AAA").unwrap();
        let b = board.get("BBB").unwrap();
        assert_eq!((a.actual, a.effective, a.change), (14, 14, 0));
        assert_eq!((b.actual, b.effective, b.change), (15, 15, 0));

        let board = rank(&tie_fixture(false)).unwrap();
        let a = board.get("AAA").unwrap();
        let b = board.get("BBB").unwrap();
        assert_eq!((a.actual, a.effective, a.change), (14, 15, -1));
        assert_eq!((b.actual, b.effective, b.change), (15, 14, 1));
    }

    #[test]
    fn test_actual_tie_resolved_by_input_order() {
        let teams = vec![
            team("ONE", 20, 62, 50.0),
            team("TWO", 20, 62, 50.0),
            team("TRE", 20, 62, 50.0),
        ];
        let board = rank(&teams).unwrap();
        assert_eq!(board.get("ONE").unwrap().actual, 1);
        assert_eq!(board.get("TWO").unwrap().actual, 2);
        assert_eq!(board.get("TRE").unwrap().actual, 3);
        assert_eq!(board.get("TRE").unwrap().effective, 3);
    }

    #[test]
    fn test_zero_game_team_fails_whole_ranking() {
        let mut teams = league(5);
        teams.push(team("NEW", 0, 0, 0.0));
        assert!(matches!(
            rank(&teams),
            Err(EngineError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_unknown_abbr_on_board() {
        let board = rank(&league(3)).unwrap();
        assert_eq!(
            board.get("ZZZ").unwrap_err(),
            EngineError::UnknownTeam("ZZZ".into())
        );
    }

    #[test]
    fn test_draft_move_classification() {
        assert_eq!(DraftMove::classify(0, 3), None);
        assert_eq!(DraftMove::classify(2, 3), None);
        assert_eq!(DraftMove::classify(-2, 3), None);
        assert_eq!(DraftMove::classify(3, 3), Some(DraftMove::Ethical));
        assert_eq!(DraftMove::classify(-3, 3), Some(DraftMove::Exposed));
        assert_eq!(DraftMove::classify(-9, 3), Some(DraftMove::Exposed));
    }
}
