//! Path utilities for media discovery and output naming

use std::path::{Path, PathBuf};

use crate::domain::rules::OUTPUT_SUFFIX;

/// Extensions recognized as media, compared case-insensitively
pub const MEDIA_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "wmv"];

/// Name of the output folder created next to the inputs by default
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "cropped";

/// File name of the saved session inside the input folder
pub const SESSION_FILE_NAME: &str = ".batchcrop-session.json";

/// Path helpers shared by the adapters and the batch controller
pub struct PathUtils;

impl PathUtils {
    /// Get file extension from path, lowercased
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Get file stem (name without extension) from path
    pub fn get_stem(path: &Path) -> Option<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    }

    /// Whether the path carries one of the recognized media extensions
    pub fn is_media_file(path: &Path) -> bool {
        Self::get_extension(path)
            .map(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// `<output_dir>/<stem>_cropped<.ext>`, keeping the input's extension as written
    pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
        let stem = Self::get_stem(input).unwrap_or_default();
        let file_name = match input.extension() {
            Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
            None => format!("{}{}", stem, OUTPUT_SUFFIX),
        };
        output_dir.join(file_name)
    }

    /// `<input_dir>/cropped`
    pub fn default_output_dir(input_dir: &Path) -> PathBuf {
        input_dir.join(DEFAULT_OUTPUT_DIR_NAME)
    }

    /// `<input_dir>/.batchcrop-session.json`
    pub fn default_session_path(input_dir: &Path) -> PathBuf {
        input_dir.join(SESSION_FILE_NAME)
    }

    /// Item id for a path: its file name
    pub fn item_id(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extension_matching() {
        assert!(PathUtils::is_media_file(Path::new("clip.mp4")));
        assert!(PathUtils::is_media_file(Path::new("CLIP.MOV")));
        assert!(PathUtils::is_media_file(Path::new("a/b/movie.Mkv")));
        assert!(PathUtils::is_media_file(Path::new("old.wmv")));
        assert!(!PathUtils::is_media_file(Path::new("notes.txt")));
        assert!(!PathUtils::is_media_file(Path::new("mp4")));
        assert!(!PathUtils::is_media_file(Path::new("clip.webm")));
    }

    #[test]
    fn test_output_path_keeps_extension() {
        let out = PathUtils::output_path_for(Path::new("/in/holiday.MOV"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/holiday_cropped.MOV"));

        let out = PathUtils::output_path_for(Path::new("/in/a.b.mp4"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/a.b_cropped.mp4"));
    }

    #[test]
    fn test_default_locations() {
        let dir = Path::new("/videos");
        assert_eq!(PathUtils::default_output_dir(dir), PathBuf::from("/videos/cropped"));
        assert_eq!(
            PathUtils::default_session_path(dir),
            PathBuf::from("/videos/.batchcrop-session.json")
        );
        assert_eq!(PathUtils::item_id(Path::new("/videos/x.mp4")), "x.mp4");
    }
}
