// JSON session adapter - Crop settings persisted between runs

use crate::domain::errors::*;
use crate::domain::store::{CropEntry, CropSettingsStore};
use crate::ports::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current session file layout
pub const SESSION_VERSION: u32 = 1;

/// On-disk session document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub version: u32,
    pub input_dir: PathBuf,
    pub saved_at: DateTime<Utc>,
    pub entries: Vec<CropEntry>,
}

/// Session adapter storing one JSON document per input folder
pub struct JsonSessionAdapter;

impl JsonSessionAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(content: &str) -> Result<SessionFile, DomainError> {
        let session: SessionFile = serde_json::from_str(content)
            .map_err(|e| DomainError::Session(format!("Failed to parse session file: {}", e)))?;

        if session.version != SESSION_VERSION {
            return Err(DomainError::Session(format!(
                "Unsupported session version {} (expected {})",
                session.version, SESSION_VERSION
            )));
        }
        Ok(session)
    }
}

impl Default for JsonSessionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionPort for JsonSessionAdapter {
    async fn load_session(
        &self,
        file_path: &Path,
    ) -> Result<Option<CropSettingsStore>, DomainError> {
        if !file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(file_path)
            .map_err(|e| DomainError::Session(format!("Failed to read session file: {}", e)))?;
        let session = Self::decode(&content)?;

        tracing::debug!(
            "Loaded {} crop setting(s) saved at {}",
            session.entries.len(),
            session.saved_at.to_rfc3339()
        );
        Ok(Some(CropSettingsStore::from_entries(session.entries)))
    }

    async fn save_session(
        &self,
        file_path: &Path,
        input_dir: &Path,
        store: &CropSettingsStore,
    ) -> Result<(), DomainError> {
        let session = SessionFile {
            version: SESSION_VERSION,
            input_dir: input_dir.to_path_buf(),
            saved_at: Utc::now(),
            entries: store.entries().to_vec(),
        };

        let content = serde_json::to_string_pretty(&session)
            .map_err(|e| DomainError::Session(format!("Failed to encode session: {}", e)))?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::Session(format!("Failed to create session directory: {}", e))
            })?;
        }
        fs::write(file_path, content)
            .map_err(|e| DomainError::Session(format!("Failed to write session file: {}", e)))?;

        tracing::debug!("Saved {} crop setting(s) to {}", store.len(), file_path.display());
        Ok(())
    }
}
