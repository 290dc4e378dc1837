//! Document structure analysis: font statistics, boilerplate detection,
//! heading scoring, and outline assembly.

mod fonts;
mod heading;
mod repetition;

pub use fonts::{body_text_size, page_font_stats, DEFAULT_BODY_SIZE, DEFAULT_MAX_PAGES_SAMPLED};
pub use heading::{extract_outline, score_line, HeadingCandidate, LevelingStrategy, OutlineConfig};
pub use repetition::{repetitive_lines, RepetitionConfig, RepetitionScope};
