//! Reads documents from disk and hands back their text

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_for;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Path-keyed text cache in front of the extractors. A job description
/// that is also passed as a resume is only read once per run.
#[derive(Default)]
pub struct InputManager {
    texts: HashMap<PathBuf, String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(text) = self.texts.get(path) {
            debug!("Using cached text for: {}", path.display());
            return Ok(text.clone());
        }

        let format = FileType::from_path(path);
        if format == FileType::Unknown {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await.map_err(|e| {
            ScreenerError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        info!("Extracting text from {} ({}, {} bytes)", path.display(), format, bytes.len());

        let text = extract_for(format, &bytes)?;
        self.texts.insert(path.to_path_buf(), text.clone());
        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.texts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_once_per_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Rust engineer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust engineer");

        std::fs::write(&path, "changed on disk").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust engineer");
        assert_eq!(manager.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_is_rejected_before_reading() {
        let mut manager = InputManager::new();
        let result = manager.extract_text(Path::new("missing/notes.odt")).await;

        assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let mut manager = InputManager::new();
        let result = manager.extract_text(Path::new("missing/cv.pdf")).await;

        assert!(matches!(result, Err(ScreenerError::InvalidInput(_))));
    }
}
