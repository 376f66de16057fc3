// Domain rules - Business logic and policies

use std::path::Path;

use crate::domain::model::*;

/// Named aspect ratios, in the order they are matched
pub const COMMON_ASPECT_RATIOS: [(f64, &str); 5] = [
    (16.0 / 9.0, "16:9"),
    (4.0 / 3.0, "4:3"),
    (1.0, "1:1"),
    (9.0 / 16.0, "9:16"),
    (3.0 / 4.0, "3:4"),
];

/// Absolute tolerance for matching a named aspect ratio
pub const ASPECT_TOLERANCE: f64 = 0.1;

/// Suffix appended to the stem of every exported file
pub const OUTPUT_SUFFIX: &str = "_cropped";

/// Business rules for labelling crop rectangles
pub struct AspectRatioClassifier;

impl AspectRatioClassifier {
    /// Label a rectangle's aspect ratio
    ///
    /// The first table entry within tolerance wins, so overlapping windows
    /// always resolve the same way. Unmatched ratios print with two decimals.
    /// A rectangle without area has no ratio.
    pub fn classify(rect: &CropRect) -> String {
        if rect.is_degenerate() {
            return "N/A".to_string();
        }

        let ratio = rect.width as f64 / rect.height as f64;
        COMMON_ASPECT_RATIOS
            .iter()
            .find(|(target, _)| (ratio - target).abs() < ASPECT_TOLERANCE)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| format!("{:.2}", ratio))
    }

    /// One-line summary shown after every edit
    pub fn crop_info(rect: &CropRect) -> String {
        format!(
            "Crop: {} | Aspect Ratio: {}",
            rect,
            Self::classify(rect)
        )
    }
}

/// Business rules for the transcoder invocation
pub struct CropCommandRules;

impl CropCommandRules {
    /// Video filter expression for a rectangle, `crop=W:H:X:Y`
    pub fn crop_filter(rect: &CropRect) -> String {
        format!(
            "crop={}:{}:{}:{}",
            rect.width, rect.height, rect.x, rect.y
        )
    }

    /// Arguments after the program name: crop video, copy audio, overwrite output
    pub fn transcode_args(input: &Path, output: &Path, rect: &CropRect) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-filter:v".to_string(),
            Self::crop_filter(rect),
            "-c:a".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}
