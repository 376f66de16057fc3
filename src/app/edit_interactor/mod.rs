// Edit interactor - Replays pointer gestures against one item's crop region

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::batch_controller::BatchController;
use crate::domain::editor::EditorFeedback;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::AspectRatioClassifier;
use crate::ports::*;

/// Request to edit the crop region of one item
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub input_dir: PathBuf,
    pub item: String,
    pub session_path: PathBuf,
    /// Skip probing and use this frame size
    pub source: Option<FrameSize>,
    /// Preview surface size; the configured viewport when `None`
    pub viewport: Option<(u32, u32)>,
    pub events: Vec<PointerEvent>,
    /// Start from the full frame instead of the saved rectangle
    pub reset: bool,
}

/// Result of an edit session
#[derive(Debug, Clone)]
pub struct EditResponse {
    pub item: String,
    pub frame: FrameSize,
    pub mapping: ViewportMapping,
    pub rect: CropRect,
    pub crop_info: String,
    /// Number of rectangles written to the store
    pub commits: usize,
    pub feedback: Vec<EditorFeedback>,
}

/// Request to store a rectangle for one item without gestures
#[derive(Debug, Clone)]
pub struct SetRequest {
    pub input_dir: PathBuf,
    pub item: String,
    pub session_path: PathBuf,
    pub rect: CropRect,
}

/// Interactor for the crop editing use case
pub struct EditInteractor {
    probe_port: Arc<dyn ProbePort>,
    media_port: Arc<dyn MediaSourcePort>,
    session_port: Arc<dyn SessionPort>,
    transcode_port: Arc<dyn TranscodePort>,
    config_port: Arc<dyn ConfigPort>,
    log_port: Arc<dyn LogPort>,
}

impl EditInteractor {
    /// Create new edit interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        media_port: Arc<dyn MediaSourcePort>,
        session_port: Arc<dyn SessionPort>,
        transcode_port: Arc<dyn TranscodePort>,
        config_port: Arc<dyn ConfigPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            media_port,
            session_port,
            transcode_port,
            config_port,
            log_port,
        }
    }

    async fn open_controller(
        &self,
        input_dir: &Path,
        session_path: &Path,
    ) -> Result<BatchController, DomainError> {
        let items = self.media_port.list_media(input_dir).await?;
        let store = self
            .session_port
            .load_session(session_path)
            .await?
            .unwrap_or_default();

        Ok(BatchController::new(
            items,
            None,
            Arc::clone(&self.transcode_port),
            Arc::clone(&self.media_port),
            Arc::clone(&self.log_port),
        )
        .with_store(store))
    }

    async fn configured_viewport(&self) -> Result<(u32, u32), DomainError> {
        let width = self
            .config_port
            .get_config_or_default("viewport_width", "640")
            .await?;
        let height = self
            .config_port
            .get_config_or_default("viewport_height", "360")
            .await?;

        let parse = |key: &str, value: &str| {
            value.parse::<u32>().map_err(|e| {
                DomainError::ConfigurationError(format!("Invalid {}: {}", key, e))
            })
        };
        Ok((parse("viewport_width", &width)?, parse("viewport_height", &height)?))
    }

    /// Load the item, replay the events and commit every finished gesture
    pub async fn edit(&self, request: EditRequest) -> Result<EditResponse, DomainError> {
        let mut controller = self
            .open_controller(&request.input_dir, &request.session_path)
            .await?;
        let item = controller.select_by_id(&request.item)?.clone();

        let frame = match request.source {
            Some(frame) => frame,
            None => match self.probe_port.probe_frame_size(&item.path).await {
                Ok(frame) => frame,
                Err(e) => {
                    self.log_port
                        .warn(&format!("Skipping preview of {}: {}", item.id, e))
                        .await;
                    return Err(e);
                }
            },
        };

        let (viewport_width, viewport_height) = match request.viewport {
            Some(viewport) => viewport,
            None => self.configured_viewport().await?,
        };

        let mut editor = controller.load_current(frame, viewport_width, viewport_height)?;
        let mut commits = 0;

        if request.reset {
            let rect = editor.reset_to_full_frame(frame.width, frame.height);
            if controller.commit_current(rect)? {
                commits += 1;
            }
        }

        let mut feedback = Vec::with_capacity(request.events.len());
        for event in request.events {
            let result = editor.handle_event(event);
            if let EditorFeedback::Committed(rect) = result {
                if controller.commit_current(rect)? {
                    commits += 1;
                }
            }
            feedback.push(result);
        }

        if !editor.gesture().is_idle() {
            self.log_port
                .warn("Gesture still in progress at end of script; last drag not committed")
                .await;
        }

        if commits > 0 {
            self.session_port
                .save_session(&request.session_path, &request.input_dir, controller.store())
                .await?;
        }

        let rect = editor.rect();
        let crop_info = AspectRatioClassifier::crop_info(&rect);
        self.log_port
            .info(&format!("{}: {}", item.id, crop_info))
            .await;

        Ok(EditResponse {
            item: item.id,
            frame,
            mapping: *editor.mapping(),
            rect,
            crop_info,
            commits,
            feedback,
        })
    }

    /// Store a rectangle for an item directly
    pub async fn set(&self, request: SetRequest) -> Result<bool, DomainError> {
        let mut controller = self
            .open_controller(&request.input_dir, &request.session_path)
            .await?;
        controller.select_by_id(&request.item)?;

        let changed = controller.commit_current(request.rect)?;
        if changed {
            self.session_port
                .save_session(&request.session_path, &request.input_dir, controller.store())
                .await?;
            self.log_port
                .info(&format!(
                    "{}: {}",
                    request.item,
                    AspectRatioClassifier::crop_info(&request.rect)
                ))
                .await;
        } else {
            self.log_port
                .warn(&format!(
                    "Not storing an empty rectangle for {}",
                    request.item
                ))
                .await;
        }
        Ok(changed)
    }
}
