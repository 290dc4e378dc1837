//! Header/footer boilerplate detection by cross-page repetition.

use std::collections::{HashMap, HashSet};

use crate::model::Document;

/// Which lines of each page are considered as repetition candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepetitionScope {
    /// The first and last `n` lines of each page's plain-text rendering.
    ///
    /// Higher precision: mid-page repeats (e.g., a common heading word)
    /// are never flagged.
    Edges(usize),

    /// Every line on every page. Higher recall for mid-page boilerplate.
    AllLines,
}

/// Configuration for the repetition filter.
#[derive(Debug, Clone)]
pub struct RepetitionConfig {
    /// A line is repetitive when it occurs on at least
    /// `threshold × page count` pages.
    pub threshold: f32,

    /// Candidate scope per page.
    pub scope: RepetitionScope,
}

impl RepetitionConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the occurrence threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the candidate scope.
    pub fn with_scope(mut self, scope: RepetitionScope) -> Self {
        self.scope = scope;
        self
    }
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            scope: RepetitionScope::Edges(5),
        }
    }
}

/// Detect lines that recur across pages, such as running headers and footers.
///
/// Candidate lines must be longer than 5 characters after trimming and not
/// purely numeric (page numbers are not boilerplate). Documents with fewer
/// than 3 pages always yield the empty set: repetition is not a meaningful
/// signal with so few samples.
pub fn repetitive_lines(doc: &Document, config: &RepetitionConfig) -> HashSet<String> {
    let total_pages = doc.pages.len();
    if total_pages < 3 {
        return HashSet::new();
    }

    let mut counts: HashMap<String, usize> = HashMap::new();

    for page in &doc.pages {
        let text = page.plain_text();
        let lines: Vec<&str> = text.lines().collect();

        let candidates: Vec<&str> = match config.scope {
            RepetitionScope::Edges(n) => {
                let mut edge: Vec<&str> = lines.iter().take(n).copied().collect();
                if lines.len() > n {
                    let tail_start = lines.len().saturating_sub(n).max(n);
                    edge.extend(lines[tail_start..].iter().copied());
                }
                edge
            }
            RepetitionScope::AllLines => lines,
        };

        for line in candidates {
            let cleaned = line.trim();
            if cleaned.chars().count() > 5 && !cleaned.chars().all(|c| c.is_ascii_digit()) {
                *counts.entry(cleaned.to_string()).or_insert(0) += 1;
            }
        }
    }

    let min_count = (config.threshold * total_pages as f32).ceil() as usize;
    counts
        .into_iter()
        .filter(|&(_, count)| count >= min_count.max(1))
        .map(|(line, _)| line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Page};

    fn doc_with_repeated_header(pages: usize, header: &str) -> Document {
        let mut doc = Document::new("test.pdf");
        for i in 0..pages {
            doc.add_page(Page::with_lines(
                (i + 1) as u32,
                vec![
                    Line::with_span(header, 10.0, "F1"),
                    Line::with_span(format!("Body text of page {}", i + 1), 12.0, "F1"),
                    Line::with_span(header, 10.0, "F1"),
                ],
            ));
        }
        doc
    }

    #[test]
    fn test_repeated_header_detected() {
        let doc = doc_with_repeated_header(5, "Confidential - Draft");
        let set = repetitive_lines(&doc, &RepetitionConfig::default());
        assert!(set.contains("Confidential - Draft"));
        assert!(!set.iter().any(|l| l.starts_with("Body text")));
    }

    #[test]
    fn test_short_documents_always_empty() {
        let doc = doc_with_repeated_header(2, "Confidential - Draft");
        for threshold in [0.1, 0.7, 0.9] {
            let config = RepetitionConfig::default().with_threshold(threshold);
            assert!(repetitive_lines(&doc, &config).is_empty());
        }
    }

    #[test]
    fn test_page_numbers_ignored() {
        let mut doc = Document::new("test.pdf");
        for i in 0..4 {
            doc.add_page(Page::with_lines(
                i + 1,
                vec![
                    Line::with_span("123456", 10.0, "F1"),
                    Line::with_span("short", 10.0, "F1"),
                ],
            ));
        }
        // Purely numeric and ≤5 char lines never qualify.
        assert!(repetitive_lines(&doc, &RepetitionConfig::default()).is_empty());
    }

    #[test]
    fn test_all_lines_scope_catches_mid_page_boilerplate() {
        let mut doc = Document::new("test.pdf");
        for i in 0..4 {
            let mut lines = vec![Line::with_span(format!("Header {i}"), 10.0, "F1")];
            for j in 0..6 {
                lines.push(Line::with_span(format!("filler {i} {j}"), 12.0, "F1"));
            }
            lines.push(Line::with_span("watermark notice", 8.0, "F1"));
            for j in 0..6 {
                lines.push(Line::with_span(format!("more filler {i} {j}"), 12.0, "F1"));
            }
            doc.add_page(Page::with_lines(i + 1, lines));
        }

        let edges = RepetitionConfig::default();
        assert!(!repetitive_lines(&doc, &edges).contains("watermark notice"));

        let all = RepetitionConfig::default().with_scope(RepetitionScope::AllLines);
        assert!(repetitive_lines(&doc, &all).contains("watermark notice"));
    }
}
