use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::warn;

use crate::engine::{self, EngineError, View};
use crate::models::Season;
use crate::store::SeasonCache;

#[derive(Clone)]
pub struct AppState {
    pub cache: SeasonCache,
    /// Seasons clients may request, default first
    pub seasons: Vec<String>,
    pub draft_move_threshold: u32,
    pub rolling_window: usize,
}

type ApiError = (StatusCode, String);

/// Build the Axum router for the dashboard API. When `data_dir` is set the
/// raw season documents are also served under `/data`.
pub fn router(state: AppState, data_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/api/seasons", get(seasons_handler))
        .route("/api/seasons/:season/standings", get(standings_handler))
        .route("/api/seasons/:season/charts", get(charts_handler))
        .route("/api/seasons/:season/teams/:abbr", get(team_handler));
    if let Some(dir) = data_dir {
        router = router.nest_service("/data", ServeDir::new(dir));
    }
    router
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Map engine failures onto HTTP statuses. An unknown team is a normal
/// "not found"; the rest mean the season document cannot support the view.
pub fn engine_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownTeam(_) => StatusCode::NOT_FOUND,
        EngineError::DivisionByZero { .. }
        | EngineError::EmptyLeague
        | EngineError::InsufficientTeams { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn engine_error(err: EngineError) -> ApiError {
    (engine_status(&err), err.to_string())
}

async fn load_season(state: &AppState, season: &str) -> Result<Arc<Season>, ApiError> {
    if !state.seasons.iter().any(|s| s == season) {
        return Err((StatusCode::NOT_FOUND, format!("unknown season: {}", season)));
    }
    state.cache.get(season).await.map_err(|e| {
        warn!("Failed to load season {}: {:#}", season, e);
        (StatusCode::BAD_GATEWAY, format!("{:#}", e))
    })
}

/// GET /api/seasons
async fn seasons_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.seasons.clone())
}

/// GET /api/seasons/:season/standings?conference=East&lottery_only=true&sort=eff_worst
async fn standings_handler(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
    Query(view): Query<View>,
) -> Result<impl IntoResponse, ApiError> {
    let data = load_season(&state, &season).await?;
    engine::standings(&data, &view, state.draft_move_threshold)
        .map(Json)
        .map_err(engine_error)
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuery {
    #[serde(default)]
    lottery_only: bool,
}

/// GET /api/seasons/:season/charts?lottery_only=true
async fn charts_handler(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let data = load_season(&state, &season).await?;
    engine::charts(&data, query.lottery_only)
        .map(Json)
        .map_err(engine_error)
}

/// GET /api/seasons/:season/teams/:abbr
async fn team_handler(
    State(state): State<Arc<AppState>>,
    Path((season, abbr)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let data = load_season(&state, &season).await?;
    engine::team_report(&data, &abbr, state.rolling_window)
        .map(Json)
        .map_err(engine_error)
}
