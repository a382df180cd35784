// PDF text extraction

use super::{ExtractedDocument, section_progress};
use crate::error::PipelineError;
use pdf_oxide::PdfDocument;
use std::path::Path;

/// Extract the text of every page, in page order.
///
/// Any page that fails to extract aborts the whole document; no partial
/// text is returned.
pub fn extract(path: &Path) -> Result<ExtractedDocument, PipelineError> {
    // Page access takes &mut self in some pdf_oxide 0.3 releases and &self in others
    let doc = &mut PdfDocument::open(path)
        .map_err(|e| PipelineError::extraction(path, format!("failed to parse PDF: {}", e)))?;

    let page_count = doc
        .page_count()
        .map_err(|e| PipelineError::extraction(path, format!("failed to read page count: {}", e)))?;

    log::debug!("{}: {} pages", path.display(), page_count);

    let pb = section_progress(page_count, "Processing PDF pages");
    let mut sections = Vec::with_capacity(page_count);

    for page_index in 0..page_count {
        let text = doc.extract_text(page_index).map_err(|e| {
            PipelineError::extraction(
                path,
                format!("failed to extract page {}: {}", page_index + 1, e),
            )
        })?;

        if !text.trim().is_empty() {
            sections.push(text);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok(ExtractedDocument {
        title: None,
        author: None,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_oxide::api::Pdf;

    #[test]
    fn test_extract_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        Pdf::from_text("Hello from a generated page.")
            .unwrap()
            .save(&path)
            .unwrap();

        let doc = extract(&path).unwrap();
        assert!(doc.title.is_none());
        assert!(doc.raw_text().contains("Hello from a generated page."));
    }
}
