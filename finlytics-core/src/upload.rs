//! Statement file selection: accepted formats and selection-time limits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SelectionError;

pub const MAX_FILES: usize = 10;
pub const MAX_FILE_BYTES: u64 = 30 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    Csv,
    Pdf,
    Image,
}

impl StatementKind {
    /// Classify by file extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(StatementKind::Csv),
            "pdf" => Some(StatementKind::Pdf),
            "png" | "jpg" | "jpeg" | "gif" | "webp" => Some(StatementKind::Image),
            _ => None,
        }
    }
}

/// MIME type sent with the multipart part
pub fn mime_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A file picked by the user, held in memory until submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("statement")
            .to_string();
        Ok(Self { name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn kind(&self) -> Option<StatementKind> {
        StatementKind::from_file_name(&self.name)
    }

    pub fn mime(&self) -> &'static str {
        mime_for(&self.name)
    }
}

/// Check a selection against the picker limits: at most [`MAX_FILES`] files,
/// each at most [`MAX_FILE_BYTES`], each a CSV, PDF or image.
pub fn validate_selection(files: &[SelectedFile]) -> Result<(), SelectionError> {
    if files.len() > MAX_FILES {
        return Err(SelectionError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES,
        });
    }
    for f in files {
        if f.kind().is_none() {
            return Err(SelectionError::UnsupportedType {
                name: f.name.clone(),
            });
        }
        if f.size() > MAX_FILE_BYTES {
            return Err(SelectionError::FileTooLarge {
                name: f.name.clone(),
                size: f.size(),
                max: MAX_FILE_BYTES,
            });
        }
    }
    Ok(())
}
