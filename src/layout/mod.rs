//! Layout provider abstraction.
//!
//! Isolates the concrete PDF library from the structure and relevance
//! analysis: the engine only ever sees [`Page`] values full of lines and
//! spans, never raw PDF objects.

mod lopdf_provider;
mod static_provider;

pub use lopdf_provider::LopdfProvider;
pub use static_provider::StaticProvider;

use crate::error::Result;
use crate::model::{Document, Page};

/// Abstract source of already-laid-out page content.
///
/// Implementations walk whatever backing store they have and produce the
/// pages of one document. A fake implementation ([`StaticProvider`]) makes
/// the whole engine testable without a PDF in sight.
pub trait LayoutProvider {
    /// Produce all pages of the document, in order, 1-indexed.
    fn produce_pages(&self) -> Result<Vec<Page>>;

    /// Source name for the document (typically the file name).
    fn name(&self) -> &str;

    /// Materialize the full document.
    fn document(&self) -> Result<Document> {
        let mut doc = Document::new(self.name());
        for page in self.produce_pages()? {
            doc.add_page(page);
        }
        Ok(doc)
    }
}
