//! Integration tests for the editing and export workflows
//!
//! The transcoder and prober are replaced by recording mocks, while media
//! discovery, sessions and configuration use the real adapters on a temp dir.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use batchcrop_cli::adapters::{
    FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, JsonSessionAdapter, TomlConfigAdapter,
    TracingLogAdapter,
};
use batchcrop_cli::app::container::{AppContainer, DefaultAppContainer};
use batchcrop_cli::app::edit_interactor::{EditRequest, SetRequest};
use batchcrop_cli::app::export_interactor::{CropRequest, ExportRequest};
use batchcrop_cli::domain::editor::EditorFeedback;
use batchcrop_cli::domain::model::*;
use batchcrop_cli::ports::*;
use batchcrop_cli::utils::PathUtils;
use batchcrop_cli::DomainError;

mod test_utils {
    use super::*;

    /// Prober answering with one fixed frame size
    pub struct FixedProbe(pub FrameSize);

    #[async_trait]
    impl ProbePort for FixedProbe {
        async fn probe_frame_size(&self, file_path: &Path) -> Result<FrameSize, DomainError> {
            if file_path.exists() {
                Ok(self.0)
            } else {
                Err(DomainError::SourceOpenFailure {
                    item: PathUtils::item_id(file_path),
                    message: "missing".to_string(),
                })
            }
        }
    }

    /// Transcoder recording every job, failing the named items
    #[derive(Default)]
    pub struct RecordingTranscoder {
        pub fail_items: Vec<String>,
        pub jobs: Mutex<Vec<CropJob>>,
    }

    #[async_trait]
    impl TranscodePort for RecordingTranscoder {
        async fn check_available(&self) -> Result<String, DomainError> {
            Ok("ffmpeg version test".to_string())
        }

        async fn crop(&self, job: &CropJob) -> Result<(), DomainError> {
            self.jobs.lock().unwrap().push(job.clone());
            if self.fail_items.contains(&job.item) {
                return Err(DomainError::transcode_failure(
                    &job.item,
                    Some(1),
                    "Error reinitializing filters!",
                    500,
                ));
            }
            Ok(())
        }
    }

    pub fn media_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"fake video data").unwrap();
        }
        dir
    }

    pub fn container(transcoder: Arc<RecordingTranscoder>) -> DefaultAppContainer {
        DefaultAppContainer::with_ports(
            Arc::new(FixedProbe(FrameSize::new(1920, 1080).unwrap())),
            transcoder,
            Arc::new(FsLocalAdapter::new()),
            Arc::new(JsonSessionAdapter::new()),
            Arc::new(TomlConfigAdapter::new()),
            Arc::new(TracingLogAdapter::new()),
        )
    }

    pub fn edit_request(dir: &Path, item: &str, events: Vec<PointerEvent>) -> EditRequest {
        EditRequest {
            input_dir: dir.to_path_buf(),
            item: item.to_string(),
            session_path: PathUtils::default_session_path(dir),
            source: None,
            viewport: Some((640, 360)),
            events,
            reset: false,
        }
    }

    pub fn p(x: i32, y: i32) -> DisplayPoint {
        DisplayPoint::new(x, y)
    }
}

use test_utils::*;

#[tokio::test]
async fn test_list_marks_items_with_saved_crops() {
    let dir = media_dir(&["b.mov", "a.MP4", "readme.txt"]);
    let container = container(Arc::new(RecordingTranscoder::default()));

    container
        .edit_interactor()
        .set(SetRequest {
            input_dir: dir.path().to_path_buf(),
            item: "b.mov".to_string(),
            session_path: PathUtils::default_session_path(dir.path()),
            rect: CropRect::new(0, 0, 1080, 1080),
        })
        .await
        .unwrap();

    let listed = container
        .inspect_interactor()
        .list(dir.path(), &PathUtils::default_session_path(dir.path()))
        .await
        .unwrap();

    let ids: Vec<&str> = listed.iter().map(|l| l.item.id.as_str()).collect();
    assert_eq!(ids, vec!["a.MP4", "b.mov"]);
    assert_eq!(listed[0].rect, None);
    assert_eq!(listed[1].rect, Some(CropRect::new(0, 0, 1080, 1080)));
}

#[tokio::test]
async fn test_move_gesture_on_fresh_item_commits_and_persists() {
    let dir = media_dir(&["clip.mp4"]);
    let container = container(Arc::new(RecordingTranscoder::default()));

    let response = container
        .edit_interactor()
        .edit(edit_request(
            dir.path(),
            "clip.mp4",
            vec![
                PointerEvent::Hover(p(320, 180)),
                PointerEvent::Press(p(320, 180)),
                PointerEvent::Drag(p(330, 190)),
                PointerEvent::Release(p(330, 190)),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.mapping.display_width, 640);
    assert_eq!(response.mapping.scale_x, 3.0);
    assert_eq!(response.rect, CropRect::new(30, 30, 1920, 1080));
    assert_eq!(response.commits, 1);
    assert_eq!(
        response.feedback[0],
        EditorFeedback::Cursor(HitKind::Move, CursorHint::Move)
    );
    assert_eq!(
        response.crop_info,
        "Crop: x=30, y=30, width=1920, height=1080 | Aspect Ratio: 16:9"
    );

    let session = fs::read_to_string(PathUtils::default_session_path(dir.path())).unwrap();
    assert!(session.contains("clip.mp4"));
}

#[tokio::test]
async fn test_drawing_new_box_from_saved_rect() {
    let dir = media_dir(&["clip.mp4"]);
    let container = container(Arc::new(RecordingTranscoder::default()));
    let session_path = PathUtils::default_session_path(dir.path());

    container
        .edit_interactor()
        .set(SetRequest {
            input_dir: dir.path().to_path_buf(),
            item: "clip.mp4".to_string(),
            session_path: session_path.clone(),
            rect: CropRect::new(0, 0, 960, 540),
        })
        .await
        .unwrap();

    // Saved rect shows as 0,0 320x180 on the preview, so (400,300) is outside it
    let response = container
        .edit_interactor()
        .edit(edit_request(
            dir.path(),
            "clip.mp4",
            vec![
                PointerEvent::Press(p(400, 300)),
                PointerEvent::Drag(p(500, 330)),
                PointerEvent::Release(p(500, 330)),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.rect, CropRect::new(1200, 900, 300, 90));
    assert!(response.crop_info.ends_with("Aspect Ratio: 3.33"));

    let listed = container
        .inspect_interactor()
        .list(dir.path(), &session_path)
        .await
        .unwrap();
    assert_eq!(listed[0].rect, Some(CropRect::new(1200, 900, 300, 90)));
}

#[tokio::test]
async fn test_unfinished_gesture_is_not_committed() {
    let dir = media_dir(&["clip.mp4"]);
    let container = container(Arc::new(RecordingTranscoder::default()));

    let response = container
        .edit_interactor()
        .edit(edit_request(
            dir.path(),
            "clip.mp4",
            vec![PointerEvent::Press(p(320, 180)), PointerEvent::Drag(p(330, 190))],
        ))
        .await
        .unwrap();

    assert_eq!(response.commits, 0);
    assert!(!PathUtils::default_session_path(dir.path()).exists());
}

#[tokio::test]
async fn test_release_without_press_commits_nothing() {
    let dir = media_dir(&["fresh.mp4"]);
    let transcoder = Arc::new(RecordingTranscoder::default());
    let container = container(Arc::clone(&transcoder));
    let session_path = PathUtils::default_session_path(dir.path());

    let response = container
        .edit_interactor()
        .edit(edit_request(
            dir.path(),
            "fresh.mp4",
            vec![PointerEvent::Release(p(5, 5))],
        ))
        .await
        .unwrap();

    assert_eq!(response.commits, 0);
    assert_eq!(response.feedback, vec![EditorFeedback::Ignored]);
    assert!(!session_path.exists());

    let listed = container
        .inspect_interactor()
        .list(dir.path(), &session_path)
        .await
        .unwrap();
    assert_eq!(listed[0].rect, None);

    let result = container
        .export_interactor()
        .export(
            ExportRequest {
                input_dir: dir.path().to_path_buf(),
                session_path,
                output_dir: None,
                uniform: None,
            },
            |_| {},
        )
        .await;
    assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    assert!(transcoder.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_unknown_item_is_rejected() {
    let dir = media_dir(&["clip.mp4"]);
    let container = container(Arc::new(RecordingTranscoder::default()));

    let result = container
        .edit_interactor()
        .edit(edit_request(dir.path(), "other.mp4", Vec::new()))
        .await;
    assert!(matches!(result, Err(DomainError::BadArgs(_))));
}

#[tokio::test]
async fn test_export_uses_saved_rects_and_counts_failures() {
    let dir = media_dir(&["a.mp4", "b.mkv", "c.avi"]);
    let transcoder = Arc::new(RecordingTranscoder {
        fail_items: vec!["b.mkv".to_string()],
        ..RecordingTranscoder::default()
    });
    let container = container(Arc::clone(&transcoder));
    let session_path = PathUtils::default_session_path(dir.path());

    for (item, rect) in [
        ("c.avi", CropRect::new(0, 0, 640, 480)),
        ("b.mkv", CropRect::new(10, 10, 100, 100)),
    ] {
        container
            .edit_interactor()
            .set(SetRequest {
                input_dir: dir.path().to_path_buf(),
                item: item.to_string(),
                session_path: session_path.clone(),
                rect,
            })
            .await
            .unwrap();
    }

    let mut events = Vec::new();
    let report = container
        .export_interactor()
        .export(
            ExportRequest {
                input_dir: dir.path().to_path_buf(),
                session_path,
                output_dir: None,
                uniform: None,
            },
            |event| events.push(event.clone()),
        )
        .await
        .unwrap();

    assert_eq!((report.succeeded, report.failed), (1, 1));
    assert_eq!(events.len(), 6);

    let jobs = transcoder.jobs.lock().unwrap().clone();
    assert_eq!(jobs[0].item, "c.avi");
    assert_eq!(jobs[0].rect, CropRect::new(0, 0, 640, 480));
    assert_eq!(
        jobs[0].output_path,
        dir.path().join("cropped").join("c_cropped.avi")
    );
    assert!(dir.path().join("cropped").is_dir());
}

#[tokio::test]
async fn test_uniform_export_covers_every_item() {
    let dir = media_dir(&["a.mp4", "b.mkv"]);
    let transcoder = Arc::new(RecordingTranscoder::default());
    let container = container(Arc::clone(&transcoder));
    let out = dir.path().join("exports");

    let report = container
        .export_interactor()
        .export(
            ExportRequest {
                input_dir: dir.path().to_path_buf(),
                session_path: PathUtils::default_session_path(dir.path()),
                output_dir: Some(out.clone()),
                uniform: Some(CropRect::new(0, 140, 1920, 800)),
            },
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!((report.succeeded, report.failed), (2, 0));
    let jobs = transcoder.jobs.lock().unwrap().clone();
    assert!(jobs.iter().all(|j| j.rect == CropRect::new(0, 140, 1920, 800)));
    assert_eq!(jobs[1].output_path, out.join("b_cropped.mkv"));
}

#[tokio::test]
async fn test_export_without_settings_is_configuration_error() {
    let dir = media_dir(&["a.mp4"]);
    let transcoder = Arc::new(RecordingTranscoder::default());
    let container = container(Arc::clone(&transcoder));

    let result = container
        .export_interactor()
        .export(
            ExportRequest {
                input_dir: dir.path().to_path_buf(),
                session_path: PathUtils::default_session_path(dir.path()),
                output_dir: None,
                uniform: None,
            },
            |_| {},
        )
        .await;

    assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    assert!(transcoder.jobs.lock().unwrap().is_empty());
    assert!(!dir.path().join("cropped").exists());
}

#[tokio::test]
async fn test_single_crop_surfaces_tool_output() {
    let dir = media_dir(&["b.mkv"]);
    let transcoder = Arc::new(RecordingTranscoder {
        fail_items: vec!["b.mkv".to_string()],
        ..RecordingTranscoder::default()
    });
    let container = container(transcoder);

    let result = container
        .export_interactor()
        .crop(CropRequest {
            input: dir.path().join("b.mkv"),
            rect: CropRect::new(0, 0, 100, 100),
            output_dir: None,
        })
        .await;

    match result {
        Err(DomainError::TranscodeFailure { excerpt, .. }) => {
            assert_eq!(excerpt, "Error reinitializing filters!");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// End-to-end crop with the real tools; returns early when ffmpeg is not installed
#[tokio::test]
async fn test_real_ffmpeg_crop() {
    let ffmpeg = FFmpegAdapter::new();
    if ffmpeg.check_available().await.is_err() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("testsrc.mp4");
    let status = std::process::Command::new("ffmpeg")
        .args([
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=1:size=320x240:rate=10",
            "-y",
        ])
        .arg(&input)
        .output()
        .unwrap();
    if !status.status.success() {
        return;
    }

    let container = DefaultAppContainer::with_ports(
        Arc::new(FFprobeAdapter::new()),
        Arc::new(ffmpeg),
        Arc::new(FsLocalAdapter::new()),
        Arc::new(JsonSessionAdapter::new()),
        Arc::new(TomlConfigAdapter::new()),
        Arc::new(TracingLogAdapter::new()),
    );

    let outcome = container
        .export_interactor()
        .crop(CropRequest {
            input: input.clone(),
            rect: CropRect::new(40, 20, 160, 120),
            output_dir: None,
        })
        .await
        .unwrap();

    let expected: PathBuf = dir.path().join("cropped").join("testsrc_cropped.mp4");
    assert_eq!(outcome.output_path, expected);

    let frame = FFprobeAdapter::new().probe_frame_size(&expected).await;
    if let Ok(frame) = frame {
        assert_eq!((frame.width, frame.height), (160, 120));
    }
}
