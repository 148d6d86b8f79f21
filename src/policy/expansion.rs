//! Expansion of leaf nodes
//!
//! Expansion is full width: every legal action of the leaf's state becomes an
//! edge at once, and one of the new edges is chosen uniformly for the current
//! iteration.

use log::{error, trace};
use rand::Rng;

use crate::{game_state::CombatState, tree::Node, Result, SearchError};

/// Enumerates the legal actions of a non-terminal state
///
/// An empty list on a non-terminal state means the rules engine broke its
/// contract; the failure is logged with enough context to reproduce it and
/// returned as [`SearchError::NoLegalActions`].
pub fn enumerate_actions<S: CombatState>(state: &S, simulation: u64) -> Result<Vec<S::Action>> {
    let actions = state.legal_actions();
    if actions.is_empty() {
        error!(
            "no legal actions in non-terminal state: seed {} simulation {} floor {} turn {}: {}",
            state.seed(),
            simulation,
            state.floor_num(),
            state.turn(),
            state.context_description()
        );
        return Err(SearchError::NoLegalActions {
            seed: state.seed(),
            floor_num: state.floor_num(),
            turn: state.turn(),
            simulation,
            context: state.context_description(),
        });
    }
    Ok(actions)
}

/// Expands `node` with every legal action of `state`
///
/// Returns the number of edges created.
pub fn expand_node<S: CombatState>(
    node: &mut Node<S::Action>,
    state: &S,
    simulation: u64,
) -> Result<usize> {
    let actions = enumerate_actions(state, simulation)?;
    let created = node.expand(actions);
    trace!("expanded leaf with {} edges", created);
    Ok(created)
}

/// Picks the edge a freshly expanded leaf descends into
pub fn select_first_action_for_leaf<A, R: Rng>(node: &Node<A>, rng: &mut R) -> usize {
    rng.gen_range(0..node.edges.len())
}
