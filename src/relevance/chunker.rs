//! Text normalization and chunking for relevance scoring.

use unicode_normalization::UnicodeNormalization;

use crate::model::{Document, Page, TextChunk};

/// Ligature and punctuation replacements applied before chunking.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{fb00}', "ff"),
    ('\u{fb01}', "fi"),
    ('\u{fb02}', "fl"),
    ('\u{fb03}', "ffi"),
    ('\u{fb04}', "ffl"),
    ('\u{2022}', "-"), // bullet
    ('\u{2013}', "-"), // en dash
    ('\u{2014}', "-"), // em dash
];

/// Configuration for sliding-window chunking.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Words per sliding window
    pub window_words: usize,

    /// Words advanced between windows (window minus overlap)
    pub stride_words: usize,

    /// Minimum joined length in characters for a window to be kept
    pub min_chunk_len: usize,
}

impl ChunkConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size in words.
    pub fn with_window(mut self, words: usize) -> Self {
        self.window_words = words;
        self
    }

    /// Set the stride in words.
    pub fn with_stride(mut self, words: usize) -> Self {
        self.stride_words = words;
        self
    }

    /// Set the minimum kept window length in characters.
    pub fn with_min_len(mut self, chars: usize) -> Self {
        self.min_chunk_len = chars;
        self
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_words: 50,
            stride_words: 40,
            min_chunk_len: 30,
        }
    }
}

/// Normalize extracted page text.
///
/// Applies NFC normalization, replaces known ligature and punctuation code
/// points with ASCII equivalents, and collapses whitespace runs to single
/// spaces.
pub fn clean_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for c in text.nfc() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => normalized.push_str(to),
            None => normalized.push(c),
        }
    }
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Chunk a single page into one section chunk and zero or more
/// sliding-window subsection chunks.
///
/// Returns `(section, subsections)`; `section` is `None` for a page with
/// no text after cleaning.
pub fn chunk_page(
    document: &str,
    page: &Page,
    config: &ChunkConfig,
) -> (Option<TextChunk>, Vec<TextChunk>) {
    let cleaned = clean_text(&page.plain_text());
    if cleaned.is_empty() {
        return (None, Vec::new());
    }

    let section = TextChunk::new(document, page.number, cleaned.clone());

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let mut subsections = Vec::new();
    let stride = config.stride_words.max(1);

    let mut offset = 0;
    while offset < words.len() {
        let end = (offset + config.window_words).min(words.len());
        let window = words[offset..end].join(" ");
        if window.trim().len() > config.min_chunk_len {
            subsections.push(TextChunk::new(document, page.number, window));
        }
        offset += stride;
    }

    (Some(section), subsections)
}

/// Chunk every page of a document.
///
/// Returns `(sections, subsections)` in page order.
pub fn chunk_document(doc: &Document, config: &ChunkConfig) -> (Vec<TextChunk>, Vec<TextChunk>) {
    let mut sections = Vec::new();
    let mut subsections = Vec::new();

    for page in &doc.pages {
        let (section, mut windows) = chunk_page(&doc.name, page, config);
        if let Some(section) = section {
            sections.push(section);
        }
        subsections.append(&mut windows);
    }

    (sections, subsections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    #[test]
    fn test_clean_text_ligatures_and_dashes() {
        assert_eq!(clean_text("e\u{fb03}cient \u{2014} yes"), "efficient - yes");
        assert_eq!(clean_text("\u{2022} item"), "- item");
    }

    #[test]
    fn test_clean_text_whitespace_collapse() {
        assert_eq!(clean_text("a\n\n b\t\tc   d"), "a b c d");
        assert_eq!(clean_text("   "), "");
    }

    fn page_with_words(n: usize) -> Page {
        let text = (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        Page::with_lines(1, vec![Line::with_span(text, 12.0, "F1")])
    }

    #[test]
    fn test_window_count_120_words() {
        // 120 words, window 50, stride 40 → offsets 0, 40, 80.
        let (section, windows) = chunk_page("a.pdf", &page_with_words(120), &ChunkConfig::default());
        assert!(section.is_some());
        assert_eq!(windows.len(), 3);

        for w in &windows {
            assert!(w.text.split_whitespace().count() <= 50);
        }

        // Consecutive windows share exactly 10 words.
        let first: Vec<&str> = windows[0].text.split_whitespace().collect();
        let second: Vec<&str> = windows[1].text.split_whitespace().collect();
        assert_eq!(&first[40..], &second[..10]);
    }

    #[test]
    fn test_short_trailing_fragment_discarded() {
        // 81 words → windows at 0, 40, 80; the last window is one word
        // ("word80", 6 chars ≤ 30) and is dropped.
        let (_, windows) = chunk_page("a.pdf", &page_with_words(81), &ChunkConfig::default());
        assert_eq!(windows.len(), 2);
    }

    #[test]
    fn test_empty_page_yields_no_chunks() {
        let page = Page::new(3);
        let (section, windows) = chunk_page("a.pdf", &page, &ChunkConfig::default());
        assert!(section.is_none());
        assert!(windows.is_empty());
    }

    #[test]
    fn test_chunks_tagged_with_document_and_page() {
        let mut doc = Document::new("guide.pdf");
        doc.add_page(page_with_words(60));
        let (sections, subsections) = chunk_document(&doc, &ChunkConfig::default());

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].document, "guide.pdf");
        assert_eq!(sections[0].page_number, 1);
        assert!(subsections.iter().all(|c| c.document == "guide.pdf"));
    }
}
