//! Relay cycle implementation.
//!
//! Runs the pipeline once, top to bottom:
//! search -> load history -> select -> save history -> caption -> publish
//!
//! Every step that fails is logged and either falls back (unparseable
//! search response, unreadable history, unwritable history) or ends the
//! cycle. Nothing here panics or propagates errors to the scheduler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::caption::format_caption;
use crate::history::{append_and_trim, trim, HistoryStore};
use crate::publisher::Publisher;
use crate::scheduler::Cycle;
use crate::searcher::{SearchEntry, Searcher};
use crate::selector::select_candidate;

use super::config::RelayConfig;
use super::types::{CycleOutcome, CycleStage};

/// The relay pipeline with its collaborators.
pub struct RelayCycle {
    config: RelayConfig,
    searcher: Arc<dyn Searcher>,
    history: Arc<dyn HistoryStore>,
    publisher: Arc<dyn Publisher>,
}

impl RelayCycle {
    pub fn new(
        config: RelayConfig,
        searcher: Arc<dyn Searcher>,
        history: Arc<dyn HistoryStore>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            searcher,
            history,
            publisher,
        }
    }

    /// Run one full cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let results = match self.searcher.search().await {
            Ok(results) => results,
            Err(e) if e.is_parse() => {
                warn!(searcher = self.searcher.name(), "Search JSON could not be parsed: {}", e);
                Vec::new()
            }
            Err(e) => {
                error!(searcher = self.searcher.name(), "Could not receive search results: {}", e);
                return CycleOutcome::Failed {
                    stage: CycleStage::Search,
                    error: e.to_string(),
                };
            }
        };
        debug!(results = results.len(), "Search results received");

        let Some(entry) = self.pick_and_remember(&results).await else {
            info!("There are no valid submissions to post");
            return CycleOutcome::NoCandidate;
        };

        info!(id = %entry.id, score = entry.score, "Proceeding to post submission");

        let caption = {
            let mut rng = rand::thread_rng();
            format_caption(&entry, &self.config.caption, &mut rng)
        };
        let Some(caption) = caption else {
            debug!(id = %entry.id, "Submission lacks an id or file URL, skipping");
            return CycleOutcome::Rejected { id: entry.id };
        };

        match self.publisher.publish(&entry.file_url, &caption).await {
            Ok(status) => CycleOutcome::Published {
                id: entry.id,
                status_id: status.id,
            },
            Err(e) => {
                error!(
                    id = %entry.id,
                    publisher = self.publisher.name(),
                    "Failed to upload media and create post: {}",
                    e
                );
                CycleOutcome::Failed {
                    stage: CycleStage::Publish,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Select a candidate and persist the updated history.
    ///
    /// The history is written back even when nothing was selected so that a
    /// lowered capacity is applied.
    async fn pick_and_remember(&self, results: &[SearchEntry]) -> Option<SearchEntry> {
        let history = match self.history.load().await {
            Ok(history) => history,
            Err(e) => {
                warn!("Failed to read data from history table: {}", e);
                Vec::new()
            }
        };

        let picked = select_candidate(results, &history, self.config.min_score).cloned();

        let updated = match &picked {
            Some(entry) => append_and_trim(&history, &entry.id, self.config.history_size),
            None => trim(&history, self.config.history_size),
        };

        if let Err(e) = self.history.save(&updated).await {
            warn!("Failed to add data to history table: {}", e);
        }

        picked
    }
}

#[async_trait]
impl Cycle for RelayCycle {
    async fn run(&self) -> CycleOutcome {
        self.run_cycle().await
    }
}
