//! Source documents: format detection and text extraction.

mod epub;
mod pdf;

use crate::error::PipelineError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Source format, resolved once from the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Epub,
    /// Any other extension (lowercased, empty when there is none)
    Unsupported(String),
}

impl DocumentKind {
    /// Detect the format from the path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Self::Pdf,
            "epub" => Self::Epub,
            _ => Self::Unsupported(ext),
        }
    }
}

/// Raw text pulled out of a document, one section per PDF page or EPUB
/// spine item.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    pub title: Option<String>,
    pub author: Option<String>,
    pub sections: Vec<String>,
}

impl ExtractedDocument {
    /// All sections joined by newlines, ready for normalization.
    pub fn raw_text(&self) -> String {
        self.sections.join("\n")
    }

    /// Total word count across all sections (approximate)
    pub fn total_words(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.split_whitespace().count())
            .sum()
    }
}

/// Extract text with the adapter matching `kind`.
pub fn extract(path: &Path, kind: &DocumentKind) -> Result<ExtractedDocument, PipelineError> {
    match kind {
        DocumentKind::Pdf => pdf::extract(path),
        DocumentKind::Epub => epub::extract(path),
        DocumentKind::Unsupported(ext) => Err(PipelineError::UnsupportedFormat(ext.clone())),
    }
}

/// Progress bar shared by the extraction adapters.
fn section_progress(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(label.to_string());
    pb
}
