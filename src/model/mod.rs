//! Data model for extracted documents, outlines, and relevance chunks.

mod chunk;
mod document;
mod outline;
mod report;

pub use chunk::{ScoredChunk, TextChunk};
pub use document::{Document, Line, Page, Span};
pub use outline::{HeadingLevel, OutlineDocument, OutlineEntry};
pub use report::{RankedSection, RankedSubsection, RelevanceReport, ReportMetadata};
