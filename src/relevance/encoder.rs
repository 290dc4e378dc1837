//! Semantic encoder abstraction and the built-in hashing encoder.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::Result;

/// Produces fixed-dimension embeddings for text.
///
/// Real deployments plug a sentence-transformer style model in behind this
/// trait; the engine only ever calls it with immutable chunk lists.
pub trait Encoder {
    /// Embed a single string.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of strings.
    ///
    /// Callers issue one batched call per chunk list to amortize model
    /// overhead; implementations that have no cheaper batch path inherit
    /// this per-item loop.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Cosine similarity between two embeddings, in [-1, 1].
///
/// Returns 0.0 when either vector is empty or zero-length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Deterministic feature-hashed bag-of-words encoder.
///
/// Tokenizes on non-alphanumeric boundaries, lowercases, hashes each token
/// into a fixed-dimension bucket, and L2-normalizes the result. No model
/// weights, fully deterministic: useful as a lexical-overlap fallback and
/// for tests.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimension: usize,
}

impl HashingEncoder {
    /// Create an encoder with the given embedding dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() % self.dimension as u64) as usize
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Encoder for HashingEncoder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            vector[self.bucket(&token.to_lowercase())] += 1.0;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identity() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_hashing_encoder_deterministic() {
        let enc = HashingEncoder::default();
        let a = enc.embed("nightlife bars and clubs").unwrap();
        let b = enc.embed("nightlife bars and clubs").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 384);
    }

    #[test]
    fn test_hashing_encoder_lexical_overlap_scores_higher() {
        let enc = HashingEncoder::default();
        let query = enc.embed("cheap nightlife bars").unwrap();
        let related = enc.embed("the best cheap bars for nightlife").unwrap();
        let unrelated = enc.embed("quarterly revenue projections spreadsheet").unwrap();

        assert!(
            cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated)
        );
    }

    #[test]
    fn test_embed_batch_matches_single() {
        let enc = HashingEncoder::new(64);
        let texts = vec!["alpha beta".to_string(), "gamma".to_string()];
        let batch = enc.embed_batch(&texts).unwrap();
        assert_eq!(batch[0], enc.embed("alpha beta").unwrap());
        assert_eq!(batch[1], enc.embed("gamma").unwrap());
    }

    #[test]
    fn test_embed_is_normalized() {
        let enc = HashingEncoder::new(32);
        let v = enc.embed("some words here").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
