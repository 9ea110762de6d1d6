//! History stored as a JSON array of strings in a single file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{HistoryError, HistoryStore};

/// File backed history store.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the
/// target, so an interrupted write leaves the previous history intact.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn load(&self) -> Result<Vec<String>, HistoryError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let history: Vec<String> = serde_json::from_slice(&data)?;
        Ok(history)
    }

    async fn save(&self, history: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec(history)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), entries = history.len(), "History saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("bot_history.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("bot_history.json"));

        store.save(&ids(&["1", "2", "3"])).await.unwrap();
        assert_eq!(store.load().await.unwrap(), ids(&["1", "2", "3"]));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"["1","2","3"]"#);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_load_round_trip_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot_history.json");
        std::fs::write(&path, r#"["a","b"]"#).unwrap();
        let store = JsonHistoryStore::new(&path);

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["a","b"]"#);
    }

    #[tokio::test]
    async fn test_load_malformed_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot_history.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = JsonHistoryStore::new(&path).load().await;
        assert!(matches!(result, Err(HistoryError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_wrong_shape_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot_history.json");
        std::fs::write(&path, r#"{"ids": []}"#).unwrap();

        let result = JsonHistoryStore::new(&path).load().await;
        assert!(matches!(result, Err(HistoryError::Parse(_))));
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("state/nested/bot_history.json"));

        store.save(&ids(&["x"])).await.unwrap();
        assert_eq!(store.load().await.unwrap(), ids(&["x"]));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("bot_history.json"));

        store.save(&ids(&["1", "2"])).await.unwrap();
        store.save(&ids(&["3"])).await.unwrap();
        assert_eq!(store.load().await.unwrap(), ids(&["3"]));
    }
}
