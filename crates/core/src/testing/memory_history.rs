//! In-memory history store for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::history::{HistoryError, HistoryStore};

/// History store kept in memory, with switchable failures.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    ids: RwLock<Vec<String>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored ids.
    pub async fn set(&self, ids: Vec<String>) {
        *self.ids.write().await = ids;
    }

    /// Current stored ids.
    pub async fn snapshot(&self) -> Vec<String> {
        self.ids.read().await.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<Vec<String>, HistoryError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(HistoryError::Io(std::io::Error::other("simulated read failure")));
        }
        Ok(self.ids.read().await.clone())
    }

    async fn save(&self, history: &[String]) -> Result<(), HistoryError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(HistoryError::Io(std::io::Error::other("simulated write failure")));
        }
        *self.ids.write().await = history.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
