//! Random rollouts
//!
//! A rollout completes a trajectory from the tree boundary to a terminal
//! state. Nothing it visits is added to the tree.

use rand::Rng;

use crate::{game_state::CombatState, policy::expansion::enumerate_actions, Result};

/// Plays uniformly random legal actions until `state` is terminal
///
/// Every action taken is appended to `action_stack`. `simulation` counts
/// enumerations and is reported if the rules engine fails. Returns the number
/// of actions played.
pub fn playout_random<S, R>(
    state: &mut S,
    action_stack: &mut Vec<S::Action>,
    rng: &mut R,
    simulation: &mut u64,
) -> Result<usize>
where
    S: CombatState,
    R: Rng,
{
    let mut steps = 0;

    while !state.is_terminal() {
        *simulation += 1;
        let mut actions = enumerate_actions(state, *simulation)?;

        let selected = rng.gen_range(0..actions.len());
        let action = actions.swap_remove(selected);
        state.apply_action(&action);
        action_stack.push(action);
        steps += 1;
    }

    Ok(steps)
}
