//! Prompt window truncation
//!
//! Fits a turn history into a hard token budget. When the rendered
//! prompt is over budget, the window drops the oldest exchange after the
//! anchor turn and re-estimates, so the first turn and the most recent
//! messages survive for as long as any truncation is possible. Shrinking
//! below an anchor-plus-exchange window fails instead of looping.

use crate::context::estimator::TokenEstimator;
use crate::errors::{ChatError, Result};
use crate::types::Turn;

/// Default prompt budget in tokens
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Marker prepended to the prompt once history has been cut
pub const SNIP_MARKER: &str = "<!-- snip -->";

/// Smallest history the window will still cut: the anchor turn plus the
/// latest exchange
pub const MIN_WINDOW_TURNS: usize = 3;

/// Render a turn history into a single prompt string.
///
/// Turns are rendered in order, joined with newlines, with a trailing
/// newline appended. Pure function of the input.
pub fn render_prompt(turns: &[Turn]) -> String {
    let body = turns
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n", body)
}

/// Budget-driven prompt window
#[derive(Debug, Clone)]
pub struct PromptWindow {
    /// Maximum estimated tokens permitted in the rendered prompt
    max_tokens: usize,

    /// Estimator used for every budget check
    estimator: TokenEstimator,
}

impl PromptWindow {
    /// Create a window with the given budget and the default estimator
    pub fn new(max_tokens: usize) -> Self {
        Self::with_estimator(max_tokens, TokenEstimator::new())
    }

    /// Create a window with a custom estimator
    pub fn with_estimator(max_tokens: usize, estimator: TokenEstimator) -> Self {
        Self {
            max_tokens,
            estimator,
        }
    }

    /// The configured token budget
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Check whether a history would be cut before it fits
    pub fn needs_truncation(&self, turns: &[Turn]) -> bool {
        self.estimator.estimate(&render_prompt(turns)) > self.max_tokens
    }

    /// Fit a turn history into the token budget.
    ///
    /// ```text
    /// 1. Render the history; if the estimate is within budget
    ///    (inclusive), return it.
    /// 2. With fewer than 3 turns left, fail: there is no more history
    ///    to drop without destroying the minimal window.
    /// 3. Drop turns 1 and 2 (the anchor at index 0 is never dropped),
    ///    prepend the elision marker, and go to 1.
    ///
    /// Each pass removes exactly two turns, so the loop terminates in at
    /// most ⌈n/2⌉ + 1 passes.
    /// ```
    ///
    /// The input slice is never mutated; the caller receives the
    /// surviving window in the result and decides whether to adopt it.
    pub fn fit(&self, turns: &[Turn]) -> Result<FittedPrompt> {
        let mut window = turns.to_vec();
        let mut removed = 0usize;
        let mut prompt = render_prompt(&window);

        loop {
            let estimated_tokens = self.estimator.estimate(&prompt);
            if estimated_tokens <= self.max_tokens {
                return Ok(FittedPrompt {
                    prompt,
                    turns: window,
                    removed,
                    estimated_tokens,
                });
            }

            if window.len() < MIN_WINDOW_TURNS {
                return Err(ChatError::PromptTooLong {
                    estimated: estimated_tokens,
                    max: self.max_tokens,
                });
            }

            // Evict the oldest exchange after the anchor. Always a
            // positional cut, never largest-first: which context survives
            // is part of the contract.
            window.drain(1..3);
            removed += 2;

            // The marker counts against the budget on the next pass.
            prompt = format!("{}\n{}", SNIP_MARKER, render_prompt(&window));
        }
    }
}

impl Default for PromptWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

/// Result of fitting a history into the budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedPrompt {
    /// Rendered prompt, elision marker included when history was cut
    pub prompt: String,

    /// Turns that survived the window
    pub turns: Vec<Turn>,

    /// Number of turns evicted
    pub removed: usize,

    /// Token estimate of the final prompt
    pub estimated_tokens: usize,
}

impl FittedPrompt {
    /// Whether any history was dropped to make the prompt fit
    pub fn was_truncated(&self) -> bool {
        self.removed > 0
    }
}
