//! Document and page font-size statistics.

use std::collections::HashMap;

use crate::model::{Document, Page};

/// Body text size assumed when a document or page carries no text.
pub const DEFAULT_BODY_SIZE: f32 = 12.0;

/// How many leading pages the body-size histogram samples by default.
///
/// Body-text style is near-uniform across a document, so a bounded prefix
/// is enough and keeps very long documents cheap.
pub const DEFAULT_MAX_PAGES_SAMPLED: usize = 20;

/// Dominant body-text font size of a document.
///
/// Builds a character-weighted histogram keyed by rounded span size over
/// the first `max_pages` pages: long spans dominate incidental short text
/// such as page numbers. Returns [`DEFAULT_BODY_SIZE`] when no text exists.
pub fn body_text_size(doc: &Document, max_pages: usize) -> f32 {
    let mut histogram: HashMap<i32, usize> = HashMap::new();

    for page in doc.pages.iter().take(max_pages) {
        for line in &page.lines {
            for span in &line.spans {
                *histogram.entry(span.size.round() as i32).or_insert(0) += span.text.chars().count();
            }
        }
    }

    histogram
        .into_iter()
        .max_by_key(|&(size, weight)| (weight, size))
        .map(|(size, _)| size as f32)
        .unwrap_or(DEFAULT_BODY_SIZE)
}

/// Arithmetic mean and maximum of all span sizes on a page.
///
/// Returns `(12.0, 12.0)` for a page with no spans. Used to normalize
/// heading scores against the local page context.
pub fn page_font_stats(page: &Page) -> (f32, f32) {
    let mut sum = 0.0f32;
    let mut max = 0.0f32;
    let mut count = 0usize;

    for line in &page.lines {
        for span in &line.spans {
            sum += span.size;
            max = max.max(span.size);
            count += 1;
        }
    }

    if count == 0 {
        (DEFAULT_BODY_SIZE, DEFAULT_BODY_SIZE)
    } else {
        (sum / count as f32, max)
    }
}
