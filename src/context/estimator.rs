//! Token estimation
//!
//! Approximates token counts from character counts. Cheap enough to run
//! on every outgoing message; never accurate enough for billing. The
//! ceiling keeps the estimate conservative so a prompt judged to fit a
//! budget really does fit it under the same heuristic.

/// Tokens estimated per character of prompt text
pub const TOKENS_PER_CHAR: f64 = 0.4;

/// Character-ratio token estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenEstimator {
    tokens_per_char: f64,
}

impl TokenEstimator {
    /// Create an estimator with the default ratio
    pub fn new() -> Self {
        Self {
            tokens_per_char: TOKENS_PER_CHAR,
        }
    }

    /// Create an estimator with a custom tokens-per-character ratio
    pub fn with_ratio(tokens_per_char: f64) -> Self {
        Self { tokens_per_char }
    }

    /// Estimate the token count of `text`.
    ///
    /// ```text
    /// estimate(text) = ⌈chars(text) × ratio⌉
    /// ```
    ///
    /// Characters are Unicode scalars, so multi-byte text is not
    /// over-counted. Complexity: O(n) in the text length.
    pub fn estimate(&self, text: &str) -> usize {
        let char_count = text.chars().count();

        (char_count as f64 * self.tokens_per_char).ceil() as usize
    }

    /// The tokens-per-character ratio in use
    pub fn ratio(&self) -> f64 {
        self.tokens_per_char
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}
