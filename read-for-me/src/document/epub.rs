// EPUB parsing and text extraction

use super::{ExtractedDocument, section_progress};
use crate::error::PipelineError;
use epub::doc::EpubDoc;
use std::path::Path;

/// Line width handed to html2text; wide enough that paragraphs stay on one
/// line before whitespace is collapsed anyway.
const HTML_TEXT_WIDTH: usize = 1000;

/// Parse an EPUB file and extract the text of each spine item in reading order
pub fn extract(path: &Path) -> Result<ExtractedDocument, PipelineError> {
    let mut doc = EpubDoc::new(path)
        .map_err(|e| PipelineError::extraction(path, format!("failed to open EPUB: {}", e)))?;

    let title = doc.mdata("title").map(|m| m.value.clone());
    let author = doc.mdata("creator").map(|m| m.value.clone());

    let spine = doc.spine.clone();
    let pb = section_progress(spine.len(), "Processing EPUB chapters");
    let mut sections = Vec::new();

    for spine_item in spine.iter() {
        pb.inc(1);

        let Some((content_bytes, _mime)) = doc.get_resource(&spine_item.idref) else {
            log::debug!("Spine item '{}' has no resource, skipping", spine_item.idref);
            continue;
        };

        let html = String::from_utf8_lossy(&content_bytes);
        let plain_text = html_to_text(&html);

        // Skip empty chapters (cover pages, image-only items)
        if plain_text.trim().is_empty() {
            continue;
        }

        sections.push(plain_text);
    }

    pb.finish_and_clear();

    Ok(ExtractedDocument {
        title,
        author,
        sections,
    })
}

/// Convert HTML to plain text
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), HTML_TEXT_WIDTH)
}
