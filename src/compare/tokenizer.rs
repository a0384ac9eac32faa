//! Token counting seam.

/// Counts model tokens in a piece of text.
pub trait Tokenizer: Send + Sync {
    fn count(&self, text: &str) -> u64;
}

/// Rough estimate of four characters per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTokenizer;

impl Tokenizer for ApproxTokenizer {
    fn count(&self, text: &str) -> u64 {
        text.chars().count().div_ceil(4) as u64
    }
}
