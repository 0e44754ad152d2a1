//! Overlap-aware, UTF-8 safe text splitting.
//!
//! Divides a document into exactly `plan.chunk_count` ordered chunks
//! (fewer only when the text has fewer characters than that). The
//! character window `ceil(chars / chunk_count)` is only a placement
//! heuristic: each cut is moved to the nearest paragraph break, then
//! line break, then space within a quarter window of its ideal
//! position, and falls back to a plain character boundary. Every
//! chunk after the first also carries the tail of its predecessor
//! (`overlap_ratio` of the window) so context spanning a boundary
//! survives retrieval.
//!
//! Sizes are reported in tokens via the injected [`TokenCounter`].
//!
//! # Safety
//!
//! All positions are character indices taken from `char_indices()`,
//! so byte offsets always fall on character boundaries.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use corpus_ingest::core::indexer::{planner, TextSplitter, WordCounter};
//!
//! let splitter = TextSplitter::new(Arc::new(WordCounter), 0.1);
//! let text = "alpha beta gamma delta\n\nepsilon zeta eta theta";
//! let plan = planner::plan(1000);
//! let chunks = splitter.split(text, &plan, "notes.md").unwrap();
//!
//! assert_eq!(chunks.len(), 2);
//! assert!(chunks[0].text.starts_with("alpha"));
//! assert!(chunks[1].text.ends_with("theta"));
//! ```

use std::sync::Arc;

use crate::core::error::{IngestError, Result};
use crate::core::indexer::tokens::TokenCounter;
use crate::core::types::{Chunk, ChunkPlan};

/// Boundaries in order of preference
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Splits documents according to a [`ChunkPlan`]
#[derive(Clone)]
pub struct TextSplitter {
    counter: Arc<dyn TokenCounter>,

    /// Fraction of the window repeated at the start of the next chunk
    overlap_ratio: f64,
}

impl TextSplitter {
    /// Create a splitter measuring chunks with `counter`.
    ///
    /// `overlap_ratio` is clamped to `[0, 0.5]`.
    pub fn new(counter: Arc<dyn TokenCounter>, overlap_ratio: f64) -> Self {
        Self {
            counter,
            overlap_ratio: overlap_ratio.clamp(0.0, 0.5),
        }
    }

    pub fn overlap_ratio(&self) -> f64 {
        self.overlap_ratio
    }

    /// Overlap in characters for a given window size (always < window)
    pub fn overlap_for(&self, window: usize) -> usize {
        let overlap = (window as f64 * self.overlap_ratio).ceil() as usize;
        overlap.min(window.saturating_sub(1))
    }

    /// Split `text` into ordered, overlapping chunks.
    ///
    /// Returns a planning error for plans with fewer than two chunks
    /// (those files bypass the splitter) and a split error for blank
    /// text.
    pub fn split(&self, text: &str, plan: &ChunkPlan, source: &str) -> Result<Vec<Chunk>> {
        if plan.chunk_count < 2 {
            return Err(IngestError::Planning(format!(
                "splitter needs at least 2 chunks, plan has {}",
                plan.chunk_count
            )));
        }
        if text.trim().is_empty() {
            return Err(IngestError::Split(format!("{source} has no content to split")));
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let window = chars.len().div_ceil(plan.chunk_count);
        let overlap = self.overlap_for(window);
        let cuts = cut_points(text, &chars, plan.chunk_count, window);

        let byte_at = |idx: usize| {
            if idx < chars.len() {
                chars[idx].0
            } else {
                text.len()
            }
        };

        let mut chunks = Vec::with_capacity(cuts.len() - 1);
        for i in 0..cuts.len() - 1 {
            let (cut, end) = (cuts[i], cuts[i + 1]);
            let start = if i == 0 {
                0
            } else {
                let floor = cut.saturating_sub(overlap).max(cuts[i - 1]);
                snap_to_word_start(&chars, floor, cut)
            };

            let (byte_start, byte_end) = (byte_at(start), byte_at(end));
            let chunk_text = &text[byte_start..byte_end];

            chunks.push(Chunk {
                text: chunk_text.to_string(),
                token_count: self.counter.count(chunk_text),
                source_path: source.to_string(),
                chunk_index: i,
                start_offset: byte_start,
                end_offset: byte_end,
            });
        }

        Ok(chunks)
    }
}

/// Character indices where chunks begin, plus the text length.
///
/// Cuts are strictly increasing, so every chunk is non-empty.
fn cut_points(text: &str, chars: &[(usize, char)], count: usize, window: usize) -> Vec<usize> {
    let len = chars.len();
    let radius = (window / 4).max(1);
    let mut cuts = vec![0];
    let mut prev = 0;

    for i in 1..count {
        let ideal = i * window;
        if ideal >= len {
            break;
        }
        let lo = ideal.saturating_sub(radius).max(prev + 1);
        let hi = (ideal + radius).min(len - 1);
        if lo > hi {
            break;
        }

        let cut = preferred_boundary(text, chars, lo, hi, ideal).unwrap_or(ideal.clamp(lo, hi));
        cuts.push(cut);
        prev = cut;
    }

    cuts.push(len);
    cuts
}

/// Closest position in `lo..=hi` that directly follows the most
/// preferred separator present in that range.
fn preferred_boundary(
    text: &str,
    chars: &[(usize, char)],
    lo: usize,
    hi: usize,
    ideal: usize,
) -> Option<usize> {
    for sep in SEPARATORS {
        let best = (lo..=hi)
            .filter(|&idx| text[..chars[idx].0].ends_with(sep))
            .min_by_key(|&idx| idx.abs_diff(ideal));
        if best.is_some() {
            return best;
        }
    }
    None
}

/// Move an overlap start forward to the first word start at or before
/// `cut`, so overlaps do not begin mid-word. Text without any word
/// start in range keeps the character-level start.
fn snap_to_word_start(chars: &[(usize, char)], floor: usize, cut: usize) -> usize {
    if floor == 0 || chars[floor - 1].1.is_whitespace() {
        return floor;
    }
    (floor + 1..=cut)
        .find(|&idx| chars[idx - 1].1.is_whitespace() && !chars[idx].1.is_whitespace())
        .unwrap_or(floor)
}
