use thiserror::Error;

/// Failures raised by the ranking engine. All of them are deterministic
/// functions of the input; none are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A team with no games played reached aggregation.
    #[error("team {abbr} has no games played; win percentage is undefined")]
    DivisionByZero { abbr: String },

    #[error("cannot rank an empty league")]
    EmptyLeague,

    #[error("lottery needs at least {required} teams, got {found}")]
    InsufficientTeams { required: usize, found: usize },

    #[error("team not found: {0}")]
    UnknownTeam(String),
}
