//! Document, page, line, and span types produced by a layout provider.

use serde::{Deserialize, Serialize};

/// A run of text sharing one font size and style within a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font size in points
    pub size: f32,

    /// Font name as reported by the layout provider (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, font_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font_name: font_name.into(),
        }
    }

    /// Whether the font appears to be bold, inferred from the font name.
    pub fn is_bold(&self) -> bool {
        let name = self.font_name.to_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }

    /// Whether the font appears to be italic, inferred from the font name.
    pub fn is_italic(&self) -> bool {
        let name = self.font_name.to_lowercase();
        name.contains("italic") || name.contains("oblique")
    }
}

/// A line of text composed of one or more spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// The spans in this line, in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a line with a single span.
    pub fn with_span(text: impl Into<String>, size: f32, font_name: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::new(text, size, font_name)],
        }
    }

    /// Combined text of all spans, joined without separator and trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Font size of the first span, or `None` for an empty line.
    pub fn primary_size(&self) -> Option<f32> {
        self.spans.first().map(|s| s.size)
    }

    /// Whether the first span's font appears bold.
    pub fn is_bold(&self) -> bool {
        self.spans.first().map(|s| s.is_bold()).unwrap_or(false)
    }

    /// Check if the line carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() || self.text().is_empty()
    }
}

/// A single page of extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Lines on the page, in reading order
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    /// Create a page from lines.
    pub fn with_lines(number: u32, lines: Vec<Line>) -> Self {
        Self { number, lines }
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Plain-text rendering of the page, one line per text line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// An extracted document: an ordered sequence of pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source name, typically the file name (e.g., "guide.pdf")
    pub name: String,

    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
