//! Text chunks used as units of relevance scoring.

use serde::{Deserialize, Serialize};

/// A contiguous span of cleaned text from one page of one document.
///
/// Two flavors exist: whole-page chunks ("sections") and sliding-window
/// sub-page chunks ("subsections"). Both are read-only once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// Source document name
    pub document: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Cleaned chunk text
    pub text: String,
}

impl TextChunk {
    /// Create a new text chunk.
    pub fn new(document: impl Into<String>, page_number: u32, text: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            page_number,
            text: text.into(),
        }
    }

    /// Case-insensitive substring check against a keyword.
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.text.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// A chunk paired with its relevance score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The scored chunk
    pub chunk: TextChunk,

    /// Relevance score (cosine similarity, possibly keyword-boosted)
    pub score: f32,
}

impl ScoredChunk {
    /// Create a scored chunk.
    pub fn new(chunk: TextChunk, score: f32) -> Self {
        Self { chunk, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_keyword() {
        let chunk = TextChunk::new("a.pdf", 1, "Great Nightlife and bars downtown");
        assert!(chunk.contains_keyword("nightlife"));
        assert!(chunk.contains_keyword("BAR"));
        assert!(!chunk.contains_keyword("museum"));
    }
}
