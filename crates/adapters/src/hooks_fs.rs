//! Filesystem hook data source (the JSON file written by `hooks export`)

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tweet_scheduler_domain::{HookCategory, HookSource, ServiceError};

use crate::http::parse_hook_map;

pub struct FsHookSource {
    path: PathBuf,
}

impl FsHookSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl HookSource for FsHookSource {
    async fn fetch(&self) -> Result<Vec<HookCategory>, ServiceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ServiceError::Transport(format!(
                "Failed to read hooks file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| {
                ServiceError::InvalidFormat(format!("hooks file {}: {}", self.path.display(), e))
            })?;

        parse_hook_map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_exported_hooks_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(
            &path,
            r#"{"stats": {"title": "Statistics & Numbers", "examples": ["{number} things"]},
                "question": {"title": "Question Hooks", "examples": ["Want to {outcome}?"]}}"#,
        )
        .unwrap();

        let categories = FsHookSource::new(&path).fetch().await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, "stats");
        assert_eq!(categories[1].examples, vec!["Want to {outcome}?"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let source = FsHookSource::new(dir.path().join("missing.json"));

        assert!(matches!(
            source.fetch().await,
            Err(ServiceError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_invalid_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            FsHookSource::new(&path).fetch().await,
            Err(ServiceError::InvalidFormat(_))
        ));
    }
}
