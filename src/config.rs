//! Configuration options for the search
//!
//! This module defines the parameters that control how edges are scored
//! during selection.

use crate::{SearchError, Result};

/// What the quality term does while the evaluation range is degenerate
///
/// Until two distinct evaluations have been observed the spread
/// `best - min` is zero (or not yet finite), so the normalized quality is
/// undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeFallback {
    /// Use a quality of 0, leaving selection to the exploration term
    #[default]
    ZeroQuality,

    /// Use the raw average evaluation without normalization
    Unnormalized,
}

/// Configuration for the search
///
/// There is no `Default`; the exploration parameter depends on the scale of
/// the evaluator and is always chosen by the caller.
///
/// # Example
///
/// ```
/// use combat_mcts::{SearchConfig, config::RangeFallback};
///
/// let config = SearchConfig::new(3.0)
///     .with_range_fallback(RangeFallback::Unnormalized);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Weight of the exploration term in the selection formula
    pub exploration_parameter: f64,

    /// Behavior of the quality term while the evaluation range is degenerate
    pub range_fallback: RangeFallback,
}

impl SearchConfig {
    /// Creates a configuration with the given exploration parameter
    pub fn new(exploration_parameter: f64) -> Self {
        SearchConfig {
            exploration_parameter,
            range_fallback: RangeFallback::default(),
        }
    }

    /// Sets the exploration parameter
    pub fn with_exploration_parameter(mut self, exploration_parameter: f64) -> Self {
        self.exploration_parameter = exploration_parameter;
        self
    }

    /// Sets the degenerate range fallback
    pub fn with_range_fallback(mut self, fallback: RangeFallback) -> Self {
        self.range_fallback = fallback;
        self
    }

    /// Checks that the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_parameter.is_finite() || self.exploration_parameter < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration parameter must be finite and non-negative, got {}",
                self.exploration_parameter
            )));
        }
        Ok(())
    }
}
