//! Heading scoring, leveling, title selection, and outline assembly.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::fonts::{body_text_size, page_font_stats, DEFAULT_MAX_PAGES_SAMPLED};
use super::repetition::{repetitive_lines, RepetitionConfig};
use crate::model::{Document, HeadingLevel, Line, OutlineDocument, OutlineEntry, Page};

/// Leading numbering prefix, e.g. "3.1.4 Results".
fn numbering_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(\.\d+)*)\s+").unwrap())
}

/// How surviving heading candidates are bucketed into levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelingStrategy {
    /// Level follows the dot-separated numbering depth ("3.1.4" → H3);
    /// non-numbered lines qualify as H1 only when short, bold, and
    /// clearly larger than body text.
    NumberingExact,

    /// Level follows the candidate score's position in the document-wide
    /// score distribution: ≥ 75th percentile → H1, ≥ 25th → H2, else H3.
    #[default]
    QuantileStatistical,
}

/// Configuration for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Leveling strategy
    pub leveling: LevelingStrategy,

    /// Minimum score for a line to become a heading candidate
    pub acceptance_threshold: f32,

    /// Page prefix sampled for the body-size histogram
    pub max_pages_sampled: usize,

    /// Boilerplate detection settings
    pub repetition: RepetitionConfig,
}

impl OutlineConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leveling strategy.
    pub fn with_leveling(mut self, leveling: LevelingStrategy) -> Self {
        self.leveling = leveling;
        self
    }

    /// Set the candidate acceptance threshold.
    pub fn with_acceptance_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Set the repetition filter config.
    pub fn with_repetition(mut self, repetition: RepetitionConfig) -> Self {
        self.repetition = repetition;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            leveling: LevelingStrategy::default(),
            acceptance_threshold: 5.0,
            max_pages_sampled: DEFAULT_MAX_PAGES_SAMPLED,
            repetition: RepetitionConfig::default(),
        }
    }
}

/// A line that survived heading scoring, awaiting level assignment.
#[derive(Debug, Clone)]
pub struct HeadingCandidate {
    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Heading likelihood score
    pub score: f32,
}

/// Score a line's heading likelihood.
///
/// Returns `(0.0, "")` for lines with no spans or blank text. Size signals
/// are taken from the line's primary (first) span; text signals from the
/// concatenated trimmed line text.
pub fn score_line(line: &Line, body_size: f32, page_mean: f32, _page_max: f32) -> (f32, String) {
    let Some(size) = line.primary_size() else {
        return (0.0, String::new());
    };
    let text = line.text();
    if text.is_empty() {
        return (0.0, String::new());
    }

    let mut score = 0.0f32;

    // Size relative to the document body and to the local page.
    score += (size / body_size - 1.0) * 10.0;
    score += (size / page_mean - 1.0) * 5.0;

    if line.is_bold() {
        score += 5.0;
    }

    if is_all_uppercase(&text) && text.chars().count() > 3 {
        score += 3.0;
    }

    if text.split_whitespace().count() < 10 {
        score += 3.0;
    }

    if numbering_pattern().is_match(&text) {
        score += 3.0;
    }

    // Trailing sentence punctuation: likely prose, not a heading.
    if text.ends_with('.') {
        score -= 10.0;
    }

    (score, text)
}

/// Extract the title and H1/H2/H3 outline of a document.
pub fn extract_outline(doc: &Document, config: &OutlineConfig) -> OutlineDocument {
    let body_size = body_text_size(doc, config.max_pages_sampled);
    let repetitive = repetitive_lines(doc, &config.repetition);

    match config.leveling {
        LevelingStrategy::QuantileStatistical => {
            quantile_outline(doc, config, body_size, &repetitive)
        }
        LevelingStrategy::NumberingExact => numbering_outline(doc, config, body_size, &repetitive),
    }
}

fn quantile_outline(
    doc: &Document,
    config: &OutlineConfig,
    body_size: f32,
    repetitive: &HashSet<String>,
) -> OutlineDocument {
    let title = doc
        .pages
        .first()
        .map(|page| score_based_title(page, body_size, repetitive))
        .unwrap_or_default();

    let mut candidates = Vec::new();
    for page in &doc.pages {
        let (page_mean, page_max) = page_font_stats(page);
        for line in &page.lines {
            let (score, text) = score_line(line, body_size, page_mean, page_max);
            if score > config.acceptance_threshold
                && !text.is_empty()
                && !repetitive.contains(&text)
            {
                candidates.push(HeadingCandidate {
                    text,
                    page: page.number,
                    score,
                });
            }
        }
    }

    if candidates.is_empty() {
        return OutlineDocument::new(title, Vec::new());
    }

    let mut scores: Vec<f32> = candidates.iter().map(|c| c.score).collect();
    scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let h1_cutoff = percentile(&scores, 0.75);
    let h2_cutoff = percentile(&scores, 0.25);

    let entries = candidates
        .into_iter()
        .map(|c| {
            let level = if c.score >= h1_cutoff {
                HeadingLevel::H1
            } else if c.score >= h2_cutoff {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            };
            OutlineEntry::new(level, c.text, c.page)
        })
        .collect();

    OutlineDocument::new(title, dedup_entries(entries))
}

fn numbering_outline(
    doc: &Document,
    _config: &OutlineConfig,
    body_size: f32,
    repetitive: &HashSet<String>,
) -> OutlineDocument {
    let title = doc
        .pages
        .first()
        .map(largest_font_title)
        .unwrap_or_default();
    let title_lower = title.to_lowercase();

    let mut entries = Vec::new();
    for page in &doc.pages {
        for line in &page.lines {
            let Some(size) = line.primary_size() else {
                continue;
            };
            let text = line.text();
            if text.is_empty()
                || repetitive.contains(&text)
                || (!title.is_empty() && text.to_lowercase() == title_lower)
            {
                continue;
            }

            if let Some(caps) = numbering_pattern().captures(&text) {
                // Numbered heading: level = dot-segment depth, capped at H3.
                let depth = caps[1].split('.').count();
                if size > body_size * 0.9 {
                    entries.push(OutlineEntry::new(
                        HeadingLevel::from_depth(depth),
                        text,
                        page.number,
                    ));
                }
            } else {
                // Non-numbered headings are usually short, bold, and larger.
                let is_short = text.split_whitespace().count() < 5;
                if is_short && line.is_bold() && size > body_size * 1.15 {
                    entries.push(OutlineEntry::new(HeadingLevel::H1, text, page.number));
                }
            }
        }
    }

    OutlineDocument::new(title, dedup_entries(entries))
}

/// Title under the quantile strategy: the first maximal-score
/// non-repetitive line on the first page.
fn score_based_title(page: &Page, body_size: f32, repetitive: &HashSet<String>) -> String {
    let (page_mean, page_max) = page_font_stats(page);
    let mut title = String::new();
    let mut best = f32::NEG_INFINITY;

    for line in &page.lines {
        let (score, text) = score_line(line, body_size, page_mean, page_max);
        if !text.is_empty() && score > best && !repetitive.contains(&text) {
            best = score;
            title = text;
        }
    }

    title
}

/// Title under the numbering strategy: all spans sharing the page's single
/// largest rounded font size, space-joined and trimmed.
fn largest_font_title(page: &Page) -> String {
    let max_size = page
        .lines
        .iter()
        .flat_map(|l| l.spans.iter())
        .map(|s| s.size)
        .fold(0.0f32, f32::max);
    if max_size == 0.0 {
        return String::new();
    }

    let parts: Vec<String> = page
        .lines
        .iter()
        .flat_map(|l| l.spans.iter())
        .filter(|s| s.size.round() == max_size.round())
        .map(|s| s.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    parts.join(" ").trim().to_string()
}

/// Drop entries repeating an already-seen `(text, page)` pair, preserving
/// first-seen order.
fn dedup_entries(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert((e.text.clone(), e.page)))
        .collect()
}

/// Linear-interpolated percentile over an ascending-sorted slice.
fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f32;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Python-style `isupper`: at least one cased character, none lowercase.
fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
