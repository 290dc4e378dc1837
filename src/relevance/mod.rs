//! Relevance pipeline: text chunking, embedding, and persona-driven ranking.

mod chunker;
mod encoder;
mod ranker;

pub use chunker::{chunk_document, chunk_page, clean_text, ChunkConfig};
pub use encoder::{cosine_similarity, Encoder, HashingEncoder};
pub use ranker::{build_query, rank, RankerConfig, DEFAULT_KEYWORDS};
