//! Process-lifetime memo of season documents.
//!
//! Each season key owns a `OnceCell`. The first caller runs the fetch; any
//! concurrent caller for the same key waits on that same fetch. A success is
//! kept forever; a failure leaves the cell empty so the next call retries.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::info;

use crate::models::Season;

use super::source::SeasonSource;
use super::validate_season;

#[derive(Clone)]
pub struct SeasonCache {
    source: Arc<dyn SeasonSource>,
    slots: Arc<Mutex<HashMap<String, Arc<OnceCell<Arc<Season>>>>>>,
}

impl SeasonCache {
    pub fn new(source: Arc<dyn SeasonSource>) -> Self {
        SeasonCache {
            source,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the validated season, fetching it at most once per key.
    pub async fn get(&self, season: &str) -> Result<Arc<Season>> {
        let cell = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(season.to_string()).or_default())
        };

        let loaded = cell
            .get_or_try_init(|| async {
                let raw = self.source.fetch_season(season).await?;
                let validated = validate_season(raw)?;
                info!(
                    "Loaded season {} from {} ({} teams)",
                    validated.season,
                    self.source.name(),
                    validated.teams.len()
                );
                Ok::<_, anyhow::Error>(Arc::new(validated))
            })
            .await?;

        Ok(Arc::clone(loaded))
    }
}
