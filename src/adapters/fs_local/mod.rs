// Local filesystem adapter - Media discovery and output directories

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::PathUtils;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }

    /// Media files directly inside `dir_path`, sorted by file name
    fn scan_media(dir_path: &Path) -> Result<Vec<MediaItem>, DomainError> {
        if !dir_path.is_dir() {
            return Err(DomainError::FsFail(format!(
                "Input folder does not exist: {}",
                dir_path.display()
            )));
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(dir_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .map_err(|e| DomainError::FsFail(format!("Failed to read input folder: {}", e)))?;
            if entry.file_type().is_file() && PathUtils::is_media_file(entry.path()) {
                items.push(MediaItem::new(
                    PathUtils::item_id(entry.path()),
                    entry.path().to_path_buf(),
                ));
            }
        }

        tracing::debug!("Found {} media file(s) in {}", items.len(), dir_path.display());
        Ok(items)
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSourcePort for FsLocalAdapter {
    async fn list_media(&self, dir_path: &Path) -> Result<Vec<MediaItem>, DomainError> {
        Self::scan_media(dir_path)
    }

    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(file_path.exists())
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to create directory: {}", e)))?;
        Ok(())
    }
}
