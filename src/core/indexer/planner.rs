//! Token-budget chunk sizing.
//!
//! Decides, from a file's token count alone, whether the file is
//! stored whole or split, and into how many chunks. Short documents
//! stay intact, mid-sized ones are divided into a handful of equal
//! parts, and anything above 4000 tokens is cut into fixed 700-token
//! windows.

use crate::core::types::{ChunkPlan, PlanTier};

/// Files up to this size are always stored as one chunk
pub const SINGLE_CHUNK_MAX_TOKENS: usize = 650;

/// Window size used once a file exceeds the last tier
pub const FIXED_WINDOW_TOKENS: usize = 700;

/// Upper bound (inclusive) of each equal-split tier and its chunk count
const EQUAL_SPLIT_TIERS: &[(usize, usize, PlanTier)] = &[
    (1500, 2, PlanTier::Halves),
    (2500, 3, PlanTier::Thirds),
    (4000, 4, PlanTier::Quarters),
];

/// Compute the chunk plan for a file with `token_count` tokens
pub fn plan(token_count: usize) -> ChunkPlan {
    if token_count <= SINGLE_CHUNK_MAX_TOKENS {
        return ChunkPlan {
            target_token_size: token_count.max(1),
            chunk_count: 1,
            tier: PlanTier::Single,
        };
    }

    for &(upper, chunks, tier) in EQUAL_SPLIT_TIERS {
        if token_count <= upper {
            return ChunkPlan {
                target_token_size: token_count.div_ceil(chunks),
                chunk_count: chunks,
                tier,
            };
        }
    }

    ChunkPlan {
        target_token_size: FIXED_WINDOW_TOKENS,
        chunk_count: token_count.div_ceil(FIXED_WINDOW_TOKENS),
        tier: PlanTier::FixedWindow,
    }
}
