use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, JsonSessionAdapter, TomlConfigAdapter,
    TracingLogAdapter,
};
use crate::app::{EditInteractor, ExportInteractor, InspectInteractor};
use crate::config_initialization::CropperConfig;
use crate::ports::{ConfigPort, LogPort, MediaSourcePort, ProbePort, SessionPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn edit_interactor(&self) -> Arc<EditInteractor>;
    fn export_interactor(&self) -> Arc<ExportInteractor>;
}

pub struct DefaultAppContainer {
    inspect_interactor: Arc<InspectInteractor>,
    edit_interactor: Arc<EditInteractor>,
    export_interactor: Arc<ExportInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real adapters using resolved settings
    pub fn new(config_adapter: TomlConfigAdapter, config: &CropperConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::with_binary(&config.ffprobe_path));
        let transcode_port = Arc::new(
            FFmpegAdapter::with_binary(&config.ffmpeg_path)
                .with_excerpt_len(config.error_excerpt_len),
        );
        let media_port = Arc::new(FsLocalAdapter::new());
        let session_port = Arc::new(JsonSessionAdapter::new());
        let config_port = Arc::new(config_adapter);
        let log_port = Arc::new(TracingLogAdapter::new().with_min_level(config.log_level));

        Self::with_ports(
            probe_port,
            transcode_port,
            media_port,
            session_port,
            config_port,
            log_port,
        )
    }

    /// Wire interactors over arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        media_port: Arc<dyn MediaSourcePort>,
        session_port: Arc<dyn SessionPort>,
        config_port: Arc<dyn ConfigPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&media_port),
            Arc::clone(&session_port),
            Arc::clone(&log_port),
        ));

        let edit_interactor = Arc::new(EditInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&media_port),
            Arc::clone(&session_port),
            Arc::clone(&transcode_port),
            Arc::clone(&config_port),
            Arc::clone(&log_port),
        ));

        let export_interactor = Arc::new(ExportInteractor::new(
            Arc::clone(&media_port),
            Arc::clone(&session_port),
            Arc::clone(&transcode_port),
            Arc::clone(&config_port),
            Arc::clone(&log_port),
        ));

        Self {
            inspect_interactor,
            edit_interactor,
            export_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn edit_interactor(&self) -> Arc<EditInteractor> {
        Arc::clone(&self.edit_interactor)
    }

    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }
}
