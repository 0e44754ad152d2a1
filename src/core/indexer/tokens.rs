//! Token counting.
//!
//! Chunk budgets are expressed in tokens because embedding backends
//! bill and truncate by token count. A [`TokenCounter`] is a pure
//! `text -> usize` function; it is injected into the scanner, the
//! splitter and the pipeline so counting policy stays separate from
//! splitting mechanics.

use tiktoken_rs::CoreBPE;

use crate::core::error::{IngestError, Result};

/// Counts tokens in a piece of text
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// cl100k_base tokenizer, as used by OpenAI `text-embedding-3-*` models
pub struct Cl100kCounter {
    bpe: CoreBPE,
}

impl Cl100kCounter {
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| IngestError::Setup(format!("Failed to load cl100k_base tokenizer: {e}")))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for Cl100kCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Counts whitespace-separated words.
///
/// Useful offline and in tests where exact token totals matter more
/// than tokenizer fidelity.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
