// Inspect interactor - Listing media items and probing frame geometry

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::mapper::fit_to_viewport;
use crate::domain::model::*;
use crate::domain::rules::AspectRatioClassifier;
use crate::ports::*;
use crate::utils::PathUtils;

/// One media item with its saved crop, if any
#[derive(Debug, Clone, Serialize)]
pub struct ListedItem {
    pub item: MediaItem,
    pub rect: Option<CropRect>,
}

impl ListedItem {
    /// `name  [crop line]` or `name  (no crop)`
    pub fn summary(&self) -> String {
        match &self.rect {
            Some(rect) => format!("{}  [{}]", self.item.id, AspectRatioClassifier::crop_info(rect)),
            None => format!("{}  (no crop)", self.item.id),
        }
    }
}

/// Frame size of a file and how it fits the preview viewport
#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    pub input: PathBuf,
    pub frame: FrameSize,
    pub mapping: ViewportMapping,
    pub summary: String,
}

/// Interactor for listing and inspecting media items
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    media_port: Arc<dyn MediaSourcePort>,
    session_port: Arc<dyn SessionPort>,
    log_port: Arc<dyn LogPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        media_port: Arc<dyn MediaSourcePort>,
        session_port: Arc<dyn SessionPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            media_port,
            session_port,
            log_port,
        }
    }

    /// Media items of a folder, each with the crop saved in the session
    pub async fn list(
        &self,
        input_dir: &Path,
        session_path: &Path,
    ) -> Result<Vec<ListedItem>, DomainError> {
        let items = self.media_port.list_media(input_dir).await?;
        let store = self
            .session_port
            .load_session(session_path)
            .await?
            .unwrap_or_default();

        self.log_port
            .info(&format!(
                "Found {} media item(s), {} with crop settings",
                items.len(),
                store.len()
            ))
            .await;

        Ok(items
            .into_iter()
            .map(|item| {
                let rect = store.get(&item.id);
                ListedItem { item, rect }
            })
            .collect())
    }

    /// Probe a file and fit it into the viewport
    pub async fn inspect(
        &self,
        input: &Path,
        viewport_width: u32,
        viewport_height: u32,
        json: bool,
    ) -> Result<InspectResponse, DomainError> {
        self.log_port
            .info(&format!("Inspecting {}", input.display()))
            .await;

        if !self.media_port.file_exists(input).await? {
            return Err(DomainError::SourceOpenFailure {
                item: PathUtils::item_id(input),
                message: "file does not exist".to_string(),
            });
        }

        let frame = self.probe_port.probe_frame_size(input).await?;
        let mapping = fit_to_viewport(frame.width, frame.height, viewport_width, viewport_height)?;

        let mut response = InspectResponse {
            input: input.to_path_buf(),
            frame,
            mapping,
            summary: String::new(),
        };
        response.summary = if json {
            serde_json::to_string_pretty(&response).map_err(|e| {
                DomainError::BadArgs(format!("JSON serialization failed: {}", e))
            })?
        } else {
            Self::format_as_text(&response)
        };

        Ok(response)
    }

    fn format_as_text(response: &InspectResponse) -> String {
        let mapping = &response.mapping;
        let full = CropRect::full_frame(response.frame);

        let mut output = String::new();
        output.push_str("Media File Information:\n");
        output.push_str(&format!("  File: {}\n", response.input.display()));
        output.push_str(&format!("  Frame: {}\n", response.frame));
        output.push_str(&format!(
            "  Aspect Ratio: {}\n",
            AspectRatioClassifier::classify(&full)
        ));
        output.push_str(&format!(
            "  Preview: {}x{} (scale {:.3} x {:.3})\n",
            mapping.display_width, mapping.display_height, mapping.scale_x, mapping.scale_y
        ));
        output
    }
}
