use engine_logging::engine_debug;
use webstat_core::tokenize;

use crate::document::{attr_or, ParsedDocument};

/// `src` of every `<img>` in document order; empty or missing values are skipped.
///
/// Values are passed through as written: relative paths stay relative and
/// duplicates are kept.
pub fn extract_images(doc: &ParsedDocument) -> Vec<String> {
    let images: Vec<String> = doc
        .elements("img")
        .map(|img| attr_or(&img, "src", ""))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect();
    engine_debug!("Extracted {} image references", images.len());
    images
}

/// Cleaned word tokens of the document's visible text.
pub fn extract_words(doc: &ParsedDocument) -> Vec<String> {
    let words = tokenize(&doc.inner_text());
    engine_debug!("Extracted {} word tokens", words.len());
    words
}
