//! Persona-driven relevance ranking of text chunks.

use super::encoder::{cosine_similarity, Encoder};
use crate::error::Result;
use crate::model::{ScoredChunk, TextChunk};

/// Default domain keyword list, from the original travel-planning
/// deployment. Swappable per deployment through [`RankerConfig`].
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "nightlife",
    "bar",
    "club",
    "party",
    "beach",
    "budget",
    "cheap",
    "affordable",
    "restaurant",
    "hotel",
    "hostel",
    "activity",
    "adventure",
    "friends",
    "group",
];

/// Configuration for the relevance ranker.
#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Domain keywords joined into the query and used for the lexical boost
    pub keywords: Vec<String>,

    /// Multiplier applied when a chunk contains any keyword
    pub keyword_boost: f32,

    /// How many whole-page sections the report keeps
    pub top_sections: usize,

    /// How many sliding-window subsections the report keeps
    pub top_subsections: usize,
}

impl RankerConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keyword list.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the keyword boost factor.
    pub fn with_keyword_boost(mut self, boost: f32) -> Self {
        self.keyword_boost = boost;
        self
    }

    /// Set the number of kept sections.
    pub fn with_top_sections(mut self, k: usize) -> Self {
        self.top_sections = k;
        self
    }

    /// Set the number of kept subsections.
    pub fn with_top_subsections(mut self, k: usize) -> Self {
        self.top_subsections = k;
        self
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            keyword_boost: 1.5,
            top_sections: 10,
            top_subsections: 15,
        }
    }
}

/// Build the single query string for a persona, task, and keyword list.
pub fn build_query(persona: &str, task: &str, keywords: &[String]) -> String {
    format!(
        "Information for a {persona}: {task}. Focus on: {}.",
        keywords.join(", ")
    )
}

/// Score and rank chunks against a query, descending.
///
/// Computes the query embedding once and the chunk embeddings as a single
/// batched call, takes cosine similarity per chunk, multiplies by
/// `keyword_boost` when any configured keyword appears in the chunk text
/// (case-insensitive substring), and stable-sorts by score so that equal
/// scores preserve original chunk order.
pub fn rank(
    query: &str,
    chunks: &[TextChunk],
    encoder: &dyn Encoder,
    config: &RankerConfig,
) -> Result<Vec<ScoredChunk>> {
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let query_embedding = encoder.embed(query)?;
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = encoder.embed_batch(&texts)?;

    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .zip(embeddings.iter())
        .map(|(chunk, embedding)| {
            let mut score = cosine_similarity(&query_embedding, embedding);
            if config.keywords.iter().any(|k| chunk.contains_keyword(k)) {
                score *= config.keyword_boost;
            }
            ScoredChunk::new(chunk.clone(), score)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(scored)
}
