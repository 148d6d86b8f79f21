//! Selection policies for the search
//!
//! Selection policies pick which edge of an expanded node to descend into,
//! balancing exploitation of good trajectories against exploration of
//! rarely visited ones.

use crate::{
    config::RangeFallback,
    tree::Node,
    utils::{exploration_term, quality_term},
};

/// Evaluation range observed so far in a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationBounds {
    /// Best evaluation seen, if any trajectory has been recorded
    pub best: Option<f64>,

    /// Lowest evaluation seen
    pub min: f64,
}

impl EvaluationBounds {
    /// Bounds before any simulation completed
    ///
    /// Under these bounds [`NormalizedUcbPolicy`] scores edges by exploration
    /// alone. Custom policies can use them to score nodes outside a search.
    pub fn empty() -> Self {
        EvaluationBounds {
            best: None,
            min: f64::INFINITY,
        }
    }
}

/// Trait for policies that select edges to explore
pub trait SelectionPolicy<A> {
    /// Returns the index of the edge to follow from `node`
    ///
    /// `node` always has at least one edge.
    fn select_edge(&self, node: &Node<A>, bounds: &EvaluationBounds) -> usize;
}

/// UCT with a quality term normalized by the observed evaluation range
///
/// ```text
/// value = (child_sum / (child_visits + 1)) / (best - min)
///       + c * sqrt(ln(parent_visits + 1) / (child_visits + 1))
/// ```
///
/// The quality term is 0 until a best trajectory exists.
#[derive(Debug, Clone)]
pub struct NormalizedUcbPolicy {
    pub exploration_parameter: f64,
    pub range_fallback: RangeFallback,
}

impl NormalizedUcbPolicy {
    pub fn new(exploration_parameter: f64, range_fallback: RangeFallback) -> Self {
        NormalizedUcbPolicy {
            exploration_parameter,
            range_fallback,
        }
    }

    /// Score of a child reached from a parent with `parent_visits`
    pub fn edge_value<A>(
        &self,
        parent_visits: u64,
        child: &Node<A>,
        bounds: &EvaluationBounds,
    ) -> f64 {
        let quality = match bounds.best {
            Some(best) => quality_term(
                child.evaluation_sum,
                child.simulation_count,
                best,
                bounds.min,
                self.range_fallback,
            ),
            None => 0.0,
        };

        quality + exploration_term(parent_visits, child.simulation_count, self.exploration_parameter)
    }
}

impl<A> SelectionPolicy<A> for NormalizedUcbPolicy {
    fn select_edge(&self, node: &Node<A>, bounds: &EvaluationBounds) -> usize {
        if node.edges.len() == 1 {
            return 0;
        }

        let mut best_edge = 0;
        let mut best_value = f64::NEG_INFINITY;

        for (i, edge) in node.edges.iter().enumerate() {
            let value = self.edge_value(node.simulation_count, &edge.node, bounds);
            // Strict comparison keeps the first of equal edges
            if i == 0 || value > best_value {
                best_edge = i;
                best_value = value;
            }
        }

        best_edge
    }
}
