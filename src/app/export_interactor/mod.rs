// Export interactor - Single-item crops and batch export of saved settings

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::batch_controller::{BatchController, BatchHandle};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::PathUtils;

/// Request to crop one file
#[derive(Debug, Clone)]
pub struct CropRequest {
    pub input: PathBuf,
    pub rect: CropRect,
    /// `<input folder>/cropped` when `None`
    pub output_dir: Option<PathBuf>,
}

/// Request to export every saved setting of a folder
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub input_dir: PathBuf,
    pub session_path: PathBuf,
    /// `<input_dir>/cropped` when `None`
    pub output_dir: Option<PathBuf>,
    /// Apply this rectangle to every item first
    pub uniform: Option<CropRect>,
}

/// Interactor for the export use cases
pub struct ExportInteractor {
    media_port: Arc<dyn MediaSourcePort>,
    session_port: Arc<dyn SessionPort>,
    transcode_port: Arc<dyn TranscodePort>,
    config_port: Arc<dyn ConfigPort>,
    log_port: Arc<dyn LogPort>,
}

impl ExportInteractor {
    /// Create new export interactor with injected ports
    pub fn new(
        media_port: Arc<dyn MediaSourcePort>,
        session_port: Arc<dyn SessionPort>,
        transcode_port: Arc<dyn TranscodePort>,
        config_port: Arc<dyn ConfigPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            media_port,
            session_port,
            transcode_port,
            config_port,
            log_port,
        }
    }

    async fn excerpt_len(&self) -> Result<usize, DomainError> {
        let value = self
            .config_port
            .get_config_or_default("error_excerpt_len", &DEFAULT_EXCERPT_LEN.to_string())
            .await?;
        value.parse::<usize>().map_err(|e| {
            DomainError::ConfigurationError(format!("Invalid error_excerpt_len: {}", e))
        })
    }

    async fn controller(
        &self,
        items: Vec<MediaItem>,
        output_dir: PathBuf,
    ) -> Result<BatchController, DomainError> {
        Ok(BatchController::new(
            items,
            Some(output_dir),
            Arc::clone(&self.transcode_port),
            Arc::clone(&self.media_port),
            Arc::clone(&self.log_port),
        )
        .with_excerpt_len(self.excerpt_len().await?))
    }

    /// Crop a single file
    pub async fn crop(&self, request: CropRequest) -> Result<ItemOutcome, DomainError> {
        if !self.media_port.file_exists(&request.input).await? {
            return Err(DomainError::SourceOpenFailure {
                item: PathUtils::item_id(&request.input),
                message: "file does not exist".to_string(),
            });
        }

        let input_dir = request
            .input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let output_dir = request
            .output_dir
            .unwrap_or_else(|| PathUtils::default_output_dir(&input_dir));
        let item = MediaItem::new(PathUtils::item_id(&request.input), request.input.clone());

        let controller = self.controller(vec![item], output_dir).await?;
        controller.export_current(request.rect).await
    }

    /// Export the folder's saved settings, reporting each progress event
    ///
    /// With `uniform`, the rectangle is stored for every item and the session
    /// saved before the batch starts.
    pub async fn export<F>(
        &self,
        request: ExportRequest,
        mut on_progress: F,
    ) -> Result<BatchReport, DomainError>
    where
        F: FnMut(&BatchProgress) + Send,
    {
        let items = self.media_port.list_media(&request.input_dir).await?;
        let store = self
            .session_port
            .load_session(&request.session_path)
            .await?
            .unwrap_or_default();
        let output_dir = request
            .output_dir
            .clone()
            .unwrap_or_else(|| PathUtils::default_output_dir(&request.input_dir));

        let mut controller = self.controller(items, output_dir).await?.with_store(store);

        if let Some(rect) = request.uniform {
            let changed = controller.apply_to_all(rect);
            self.log_port
                .info(&format!("Applied {} to {} item(s)", rect, changed))
                .await;
            if changed > 0 {
                self.session_port
                    .save_session(&request.session_path, &request.input_dir, controller.store())
                    .await?;
            }
        }

        let BatchHandle { mut progress, task } = controller.spawn_batch()?;
        while let Some(event) = progress.recv().await {
            on_progress(&event);
        }

        task.await
            .map_err(|e| DomainError::TaskFailed(e.to_string()))?
    }
}
