//! In-memory layout provider for tests and embedding.

use super::LayoutProvider;
use crate::error::Result;
use crate::model::Page;

/// A [`LayoutProvider`] backed by pre-built pages.
///
/// Used by the test suite and by callers that obtain layout data from a
/// source other than a PDF file.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: String,
    pages: Vec<Page>,
}

impl StaticProvider {
    /// Create a provider over the given pages.
    pub fn new(name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Create an empty provider (a document with no pages).
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

impl LayoutProvider for StaticProvider {
    fn produce_pages(&self) -> Result<Vec<Page>> {
        Ok(self.pages.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
