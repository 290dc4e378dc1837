//! # docsift
//!
//! Document structure and relevance extraction from parsed PDF page content.
//!
//! The library does two independent things over the same layout input:
//!
//! - **Outline extraction**: reconstructs a title and H1/H2/H3 heading
//!   outline from typographic cues (font-size statistics, boldness,
//!   numbering patterns), filtering out repeated header/footer boilerplate.
//! - **Relevance ranking**: chunks page text into whole-page sections and
//!   overlapping word windows, then ranks them against a persona/task
//!   query using a pluggable semantic encoder plus a keyword boost.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline, OutlineConfig};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", outline.title);
//!     for entry in &outline.outline {
//!         println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! PDF access sits behind the [`layout::LayoutProvider`] trait, so the
//! whole engine also runs against in-memory pages
//! ([`layout::StaticProvider`]) with no PDF in sight.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod job;
pub mod layout;
pub mod model;
pub mod relevance;

// Re-export commonly used types
pub use analysis::{LevelingStrategy, OutlineConfig, RepetitionConfig, RepetitionScope};
pub use batch::{outline_directory, outline_file, relevance_report, run_relevance_job};
pub use error::{Error, Result};
pub use job::JobSpec;
pub use layout::{LayoutProvider, LopdfProvider, StaticProvider};
pub use model::{
    Document, HeadingLevel, Line, OutlineDocument, OutlineEntry, Page, RelevanceReport, Span,
    TextChunk,
};
pub use relevance::{ChunkConfig, Encoder, HashingEncoder, RankerConfig};

use std::path::Path;

/// Extract the outline of a PDF file with default configuration.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineDocument> {
    batch::outline_file(path, &OutlineConfig::default())
}

/// Extract the outline of a PDF file with custom configuration.
pub fn extract_outline_with_config<P: AsRef<Path>>(
    path: P,
    config: &OutlineConfig,
) -> Result<OutlineDocument> {
    batch::outline_file(path, config)
}

/// Extract an outline from any layout provider.
pub fn outline_from_provider<L: LayoutProvider>(
    provider: &L,
    config: &OutlineConfig,
) -> Result<OutlineDocument> {
    let doc = provider.document()?;
    Ok(analysis::extract_outline(&doc, config))
}
