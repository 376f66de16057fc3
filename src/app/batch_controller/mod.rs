// Batch controller - Item navigation, committed crop settings and export

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::editor::CropRegionEditor;
use crate::domain::errors::*;
use crate::domain::mapper::fit_to_viewport;
use crate::domain::model::*;
use crate::domain::store::CropSettingsStore;
use crate::ports::*;
use crate::utils::PathUtils;

/// Characters of tool output written to the log for a failed batch item
pub const BATCH_LOG_EXCERPT_LEN: usize = 200;

/// A snapshot entry resolved to a job, or an outcome that already failed
pub type PlannedJob = Result<CropJob, ItemOutcome>;

/// Running batch: progress events plus the task producing the final report
pub struct BatchHandle {
    pub progress: mpsc::UnboundedReceiver<BatchProgress>,
    pub task: JoinHandle<Result<BatchReport, DomainError>>,
}

/// Runs planned jobs one at a time and aggregates the outcome
#[derive(Clone)]
pub struct BatchRunner {
    transcode_port: Arc<dyn TranscodePort>,
    media_port: Arc<dyn MediaSourcePort>,
    log_port: Arc<dyn LogPort>,
}

impl BatchRunner {
    pub fn new(
        transcode_port: Arc<dyn TranscodePort>,
        media_port: Arc<dyn MediaSourcePort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            transcode_port,
            media_port,
            log_port,
        }
    }

    /// Check the tool, create the output folder, then process every job
    ///
    /// Only a missing tool or an unusable output folder stop the run, and
    /// both are detected before the first job. Per-item failures are counted.
    pub async fn execute(
        &self,
        jobs: Vec<PlannedJob>,
        output_dir: &Path,
        progress: Option<&mpsc::UnboundedSender<BatchProgress>>,
    ) -> Result<BatchReport, DomainError> {
        self.transcode_port.check_available().await?;
        self.media_port.create_directory(output_dir).await?;
        Ok(self.run(jobs, progress).await)
    }

    /// Process jobs sequentially in order
    pub async fn run(
        &self,
        jobs: Vec<PlannedJob>,
        progress: Option<&mpsc::UnboundedSender<BatchProgress>>,
    ) -> BatchReport {
        let emit = |event: BatchProgress| {
            if let Some(tx) = progress {
                // A dropped receiver only means nobody is watching
                let _ = tx.send(event);
            }
        };

        let total = jobs.len();
        let mut report = BatchReport::default();
        emit(BatchProgress::Started { total });

        for (index, planned) in jobs.into_iter().enumerate() {
            let item = match &planned {
                Ok(job) => job.item.clone(),
                Err(outcome) => outcome.item.clone(),
            };
            emit(BatchProgress::ItemStarted { index, total, item });

            let outcome = match planned {
                Ok(job) => self.run_one(&job).await,
                Err(outcome) => {
                    self.log_failure(&outcome).await;
                    outcome
                }
            };

            report.record(outcome.clone());
            emit(BatchProgress::ItemFinished { index, outcome });
        }

        emit(BatchProgress::Finished {
            succeeded: report.succeeded,
            failed: report.failed,
        });
        self.log_port
            .info(&format!(
                "Batch complete: {} succeeded, {} failed",
                report.succeeded, report.failed
            ))
            .await;
        report
    }

    async fn run_one(&self, job: &CropJob) -> ItemOutcome {
        self.log_port
            .debug(&format!("Cropping {} with {}", job.item, job.rect))
            .await;

        match self.transcode_port.crop(job).await {
            Ok(()) => {
                self.log_port
                    .info(&format!("Cropped {} -> {}", job.item, job.output_path.display()))
                    .await;
                ItemOutcome {
                    item: job.item.clone(),
                    output_path: job.output_path.clone(),
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                let outcome = ItemOutcome {
                    item: job.item.clone(),
                    output_path: job.output_path.clone(),
                    success: false,
                    error: Some(e.to_string()),
                };
                self.log_failure(&outcome).await;
                outcome
            }
        }
    }

    async fn log_failure(&self, outcome: &ItemOutcome) {
        let message = outcome.error.as_deref().unwrap_or("unknown error");
        self.log_port
            .error(&format!(
                "Error processing {}: {}",
                outcome.item,
                excerpt(message, BATCH_LOG_EXCERPT_LEN)
            ))
            .await;
    }
}

/// Owns the item list, the current selection and the committed crop settings
pub struct BatchController {
    items: Vec<MediaItem>,
    output_dir: Option<PathBuf>,
    current: usize,
    store: CropSettingsStore,
    excerpt_len: usize,
    runner: BatchRunner,
    transcode_port: Arc<dyn TranscodePort>,
    media_port: Arc<dyn MediaSourcePort>,
    log_port: Arc<dyn LogPort>,
}

impl BatchController {
    /// Create a controller over `items`, exporting into `output_dir`
    pub fn new(
        items: Vec<MediaItem>,
        output_dir: Option<PathBuf>,
        transcode_port: Arc<dyn TranscodePort>,
        media_port: Arc<dyn MediaSourcePort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let runner = BatchRunner::new(
            Arc::clone(&transcode_port),
            Arc::clone(&media_port),
            Arc::clone(&log_port),
        );
        Self {
            items,
            output_dir,
            current: 0,
            store: CropSettingsStore::new(),
            excerpt_len: DEFAULT_EXCERPT_LEN,
            runner,
            transcode_port,
            media_port,
            log_port,
        }
    }

    /// Start from previously saved settings
    pub fn with_store(mut self, store: CropSettingsStore) -> Self {
        self.store = store;
        self
    }

    /// Characters of tool output kept when a single export fails
    pub fn with_excerpt_len(mut self, excerpt_len: usize) -> Self {
        self.excerpt_len = excerpt_len;
        self
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn store(&self) -> &CropSettingsStore {
        &self.store
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.current)
    }

    pub fn select(&mut self, index: usize) -> Result<&MediaItem, DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::BadArgs(format!(
                "Item index {} out of range (have {})",
                index,
                self.items.len()
            )));
        }
        self.current = index;
        Ok(&self.items[index])
    }

    pub fn select_by_id(&mut self, id: &str) -> Result<&MediaItem, DomainError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| DomainError::BadArgs(format!("No media item named {}", id)))?;
        self.select(index)
    }

    /// Move to the next item; false at the end of the list
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.items.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous item; false at the start of the list
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Fit the current item's frame into the viewport and prepare an editor
    ///
    /// The editor starts from the saved rectangle, or the full frame when the
    /// item has none.
    pub fn load_current(
        &self,
        frame: FrameSize,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<CropRegionEditor, DomainError> {
        let item = self.current_item().ok_or_else(no_items)?;
        let mapping = fit_to_viewport(frame.width, frame.height, viewport_width, viewport_height)?;
        let rect = self
            .store
            .get(&item.id)
            .unwrap_or_else(|| CropRect::full_frame(frame));
        Ok(CropRegionEditor::new(mapping).with_rect(rect))
    }

    /// Write a finished rectangle into the store
    pub fn commit(&mut self, item: &str, rect: CropRect) -> bool {
        self.store.commit(item, rect)
    }

    pub fn commit_current(&mut self, rect: CropRect) -> Result<bool, DomainError> {
        let id = self.current_item().ok_or_else(no_items)?.id.clone();
        Ok(self.commit(&id, rect))
    }

    /// Use the same rectangle for every item; returns how many entries changed
    pub fn apply_to_all(&mut self, rect: CropRect) -> usize {
        let ids: Vec<String> = self.items.iter().map(|item| item.id.clone()).collect();
        ids.iter().filter(|id| self.store.commit(id, rect)).count()
    }

    /// Owned copy of every committed setting in insertion order
    pub fn snapshot(&self) -> Vec<(String, CropRect)> {
        self.store.snapshot()
    }

    fn require_output_dir(&self) -> Result<&Path, DomainError> {
        self.output_dir.as_deref().ok_or_else(|| {
            DomainError::ConfigurationError("No output directory selected".to_string())
        })
    }

    fn job_for(&self, item: &MediaItem, rect: CropRect, output_dir: &Path) -> CropJob {
        CropJob {
            item: item.id.clone(),
            input_path: item.path.clone(),
            output_path: PathUtils::output_path_for(&item.path, output_dir),
            rect,
        }
    }

    /// Resolve snapshot entries against the item list
    ///
    /// Fails before any work when there is no output folder or nothing to do.
    pub fn plan_batch(
        &self,
        snapshot: Vec<(String, CropRect)>,
    ) -> Result<(PathBuf, Vec<PlannedJob>), DomainError> {
        let output_dir = self.require_output_dir()?.to_path_buf();
        if self.items.is_empty() {
            return Err(no_items());
        }
        if snapshot.is_empty() {
            return Err(DomainError::ConfigurationError(
                "No crop settings to export".to_string(),
            ));
        }

        let jobs = snapshot
            .into_iter()
            .map(|(id, rect)| match self.items.iter().find(|item| item.id == id) {
                Some(item) => Ok(self.job_for(item, rect, &output_dir)),
                None => Err(ItemOutcome {
                    output_path: PathUtils::output_path_for(Path::new(&id), &output_dir),
                    error: Some(
                        DomainError::SourceOpenFailure {
                            item: id.clone(),
                            message: "not found in input folder".to_string(),
                        }
                        .to_string(),
                    ),
                    item: id,
                    success: false,
                }),
            })
            .collect();

        Ok((output_dir, jobs))
    }

    /// Crop the current item with `rect`
    ///
    /// A transcoder failure comes back as `TranscodeFailure` with the tool's
    /// output cut to the configured excerpt length.
    pub async fn export_current(&self, rect: CropRect) -> Result<ItemOutcome, DomainError> {
        let output_dir = self.require_output_dir()?;
        let item = self.current_item().ok_or_else(no_items)?;

        self.transcode_port.check_available().await?;
        self.media_port.create_directory(output_dir).await?;

        let job = self.job_for(item, rect, output_dir);
        self.log_port
            .info(&format!("Cropping {} with {}", job.item, job.rect))
            .await;

        match self.transcode_port.crop(&job).await {
            Ok(()) => {
                self.log_port
                    .info(&format!("Saved {}", job.output_path.display()))
                    .await;
                Ok(ItemOutcome {
                    item: job.item,
                    output_path: job.output_path,
                    success: true,
                    error: None,
                })
            }
            Err(DomainError::TranscodeFailure {
                item,
                exit_code,
                excerpt: output,
            }) => Err(DomainError::TranscodeFailure {
                item,
                exit_code,
                excerpt: excerpt(&output, self.excerpt_len),
            }),
            Err(e) => Err(e),
        }
    }

    /// Export every entry of a snapshot, one at a time, to completion
    pub async fn export_batch(
        &self,
        snapshot: Vec<(String, CropRect)>,
    ) -> Result<BatchReport, DomainError> {
        let (output_dir, jobs) = self.plan_batch(snapshot)?;
        self.log_port
            .info(&format!("Exporting {} item(s) to {}", jobs.len(), output_dir.display()))
            .await;
        self.runner.execute(jobs, &output_dir, None).await
    }

    /// Snapshot the store now and export it on a background task
    ///
    /// Configuration problems are returned immediately. Later edits to the
    /// store do not reach the running batch.
    pub fn spawn_batch(&self) -> Result<BatchHandle, DomainError> {
        let (output_dir, jobs) = self.plan_batch(self.snapshot())?;
        let runner = self.runner.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move { runner.execute(jobs, &output_dir, Some(&tx)).await });

        Ok(BatchHandle { progress: rx, task })
    }
}

fn no_items() -> DomainError {
    DomainError::ConfigurationError("No media items available".to_string())
}
