use crate::Result;
use log::{info, warn};
use std::path::Path;

/// Extract the text layer of a PDF as one string, pages concatenated in page
/// order with no separator between them.
///
/// Pages that fail to decode contribute nothing (logged at warn level). When
/// lopdf produces no text at all, `pdf-extract` is tried once as a fallback
/// before giving up on the text layer. The document handle is dropped on every
/// return path; nothing is written.
///
/// Failing to open or parse the file is an error; an empty text layer is not.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    let document = lopdf::Document::load(pdf_path)?;

    let mut text = String::new();
    for (page_num, _) in document.get_pages() {
        match document.extract_text(&[page_num]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!(
                    "failed to extract text from page {} of {}: {}",
                    page_num,
                    pdf_path.display(),
                    e
                );
            }
        }
    }

    // Some producers store text in streams lopdf cannot decode; pdf-extract
    // parses those differently and sometimes succeeds where lopdf is blank.
    if text.trim().is_empty() {
        match pdf_extract::extract_text(pdf_path) {
            Ok(extracted) if !extracted.trim().is_empty() => {
                info!("using pdf-extract fallback for {}", pdf_path.display());
                return Ok(extracted);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("pdf-extract fallback failed for {}: {}", pdf_path.display(), e);
            }
        }
    }

    Ok(text)
}
