//! Stored resume documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_for;
use chrono::Local;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// An uploaded resume. Identified by a generated unique file name and
/// immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    stored_name: String,
    content: Vec<u8>,
    format: FileType,
}

impl ResumeDocument {
    /// Create a document for an upload called `original_name`.
    pub fn new(original_name: &str, content: Vec<u8>) -> Result<Self> {
        let format = FileType::from_path(Path::new(original_name));
        if !format.is_resume_format() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Resumes must be PDF, DOC or DOCX: {}",
                original_name
            )));
        }

        Ok(Self {
            stored_name: generate_unique_filename(original_name),
            content,
            format,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScreenerError::InvalidInput(format!("Invalid file name: {}", path.display())))?;
        let content = fs::read(path).await?;
        Self::new(name, content)
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn format(&self) -> FileType {
        self.format
    }

    /// Plain text of the document. PDF failures come back as sentinel text,
    /// Word failures as errors.
    pub fn extract_text(&self) -> Result<String> {
        extract_for(self.format, &self.content)
    }

    /// Write the document into `dir` under its stored name.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(&self.stored_name);
        fs::write(&path, &self.content).await?;
        info!("Stored resume {} ({} bytes)", path.display(), self.content.len());
        Ok(path)
    }
}

/// `<base>_<YYYYmmdd_HHMMSS>_<6 hex chars><.ext>`
pub fn generate_unique_filename(original_name: &str) -> String {
    let path = Path::new(original_name);
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let unique_id = Uuid::new_v4().simple().to_string();

    format!("{}_{}_{}{}", base, timestamp, &unique_id[..6], extension)
}
