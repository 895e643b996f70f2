use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dashboard;
mod engine;
mod models;
mod store;

use config::Config;
use dashboard::AppState;
use engine::{StandingRow, View};
use store::{FileSource, HttpSource, SeasonCache, SeasonSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let source: Arc<dyn SeasonSource> = match &config.data_dir {
        Some(dir) => {
            info!("Reading season documents from {}", dir.display());
            Arc::new(FileSource::new(dir))
        }
        None => {
            info!("Fetching season documents from {}", config.data_url);
            Arc::new(HttpSource::new(&config.data_url)?)
        }
    };
    let cache = SeasonCache::new(source);

    if let Some(season) = &config.report {
        return print_report(&cache, season, config.draft_move_threshold).await;
    }

    // Warm every configured season in the background; failures are retried
    // on first request.
    {
        let cache = cache.clone();
        let seasons = config.seasons.clone();
        tokio::spawn(async move {
            let loads = seasons.iter().map(|s| cache.get(s));
            let results = futures_util::future::join_all(loads).await;
            for (season, result) in seasons.iter().zip(results) {
                if let Err(e) = result {
                    warn!("Season {} not preloaded: {:#}", season, e);
                }
            }
        });
    }

    let state = AppState {
        cache,
        seasons: config.seasons.clone(),
        draft_move_threshold: config.draft_move_threshold,
        rolling_window: config.rolling_window,
    };
    let app = dashboard::router(state, config.data_dir.clone());
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!(
        "Dashboard API listening on http://{} (default season {})",
        addr,
        config.default_season()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Print the full-league standings in actual draft order.
async fn print_report(cache: &SeasonCache, season: &str, move_threshold: u32) -> Result<()> {
    let data = cache.get(season).await?;
    let rows = engine::standings(&data, &View::default(), move_threshold)?;

    println!("{} standings ({} teams)", data.season, rows.len());
    println!(
        "{:>3} {:>3} {:>4}  {:<4} {:>7} {:>6} {:>6} {:>8} {:>9} {:>6}",
        "Act", "New", "±", "Team", "W-L", "Eff L", "Unernd", "Win Sal%", "Loss Sal%", "L/W"
    );
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &StandingRow) -> String {
    let change = match row.draft_change {
        0 => "—".to_string(),
        c if c > 0 => format!("+{}", c),
        c => c.to_string(),
    };
    let flag = match row.draft_move {
        Some(m) => format!(" {:?}", m).to_uppercase(),
        None => String::new(),
    };
    format!(
        "{:>3} {:>3} {:>4}  {:<4} {:>7} {:>6.1} {:>6.1} {:>7.1}% {:>8.1}% {:>6.3}{}",
        row.actual_draft,
        row.eff_draft,
        change,
        row.abbr,
        format!("{}-{}", row.wins, row.losses),
        row.effective_losses,
        row.unearned_losses,
        row.avg_win_salary_pct * 100.0,
        row.avg_loss_salary_pct * 100.0,
        row.loss_win_ratio,
        flag
    )
}
