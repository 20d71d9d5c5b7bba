use crate::domain::ports::ConfigStore;
use crate::domain::session::SessionColumn;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    active_session: Option<String>,
}

/// File-backed configuration store.
///
/// Holds the single active-session value as a small JSON document. The file
/// is re-read on every lookup, so an edit between scans takes effect on the
/// next attendance attempt.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the platform configuration directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rollcall")
            .join("config.json")
    }

    fn load(&self) -> Result<ConfigDocument> {
        if !self.path.exists() {
            return Ok(ConfigDocument::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, document: &ConfigDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(document)?)?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn active_session(&self) -> Result<Option<SessionColumn>> {
        match self.load()?.active_session {
            None => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }

    async fn set_active_session(&self, column: SessionColumn) -> Result<()> {
        let mut document = self.load()?;
        document.active_session = Some(column.to_string());
        self.save(&document)
    }
}
