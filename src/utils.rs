//! Terms of the edge selection formula

use crate::config::RangeFallback;

/// Normalized quality of a child
///
/// The child's average is taken over `visits + 1` so unvisited children score
/// 0, then divided by the spread of evaluations seen so far. When the spread
/// is not a positive finite number, `fallback` decides the result.
pub fn quality_term(
    evaluation_sum: f64,
    visits: u64,
    best_value: f64,
    min_value: f64,
    fallback: RangeFallback,
) -> f64 {
    let avg_evaluation = evaluation_sum / (visits + 1) as f64;
    let eval_range = best_value - min_value;

    if eval_range.is_finite() && eval_range > 0.0 {
        return avg_evaluation / eval_range;
    }

    match fallback {
        RangeFallback::ZeroQuality => 0.0,
        RangeFallback::Unnormalized => avg_evaluation,
    }
}

/// Exploration bonus for a child
///
/// Both counts are shifted by one, so the bonus is finite for unvisited
/// children and for an unvisited parent.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_parameter: f64) -> f64 {
    exploration_parameter
        * (((parent_visits + 1) as f64).ln() / (child_visits + 1) as f64).sqrt()
}
