//! Main implementation of the search driver
//!
//! This module contains [`SearchDriver`], which runs the
//! selection, expansion, rollout and backpropagation loop over a fixed
//! simulation budget and tracks the best and worst outcomes seen.

use std::time::Instant;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    config::SearchConfig,
    evaluation::Evaluator,
    game_state::CombatState,
    policy::{
        expansion::{expand_node, select_first_action_for_leaf},
        rollout::playout_random,
        selection::{EvaluationBounds, NormalizedUcbPolicy, SelectionPolicy},
    },
    stats::SearchStatistics,
    tree::{Node, NodePath},
    Result, SearchError,
};

/// Derives the search seed from the battle it was started on
fn search_seed<S: CombatState>(state: &S) -> u64 {
    state.seed().wrapping_add(state.floor_num())
}

/// The search driver
///
/// Owns the tree, a snapshot of the initial state, the evaluator and the
/// random source of one search session. All randomness comes from a
/// `ChaCha20Rng` seeded from the initial state, so two drivers built from
/// equal states and configurations produce identical trees and results.
pub struct SearchDriver<S: CombatState, E> {
    /// Root node of the search tree
    root: Node<S::Action>,

    /// State the search was started from
    root_state: S,

    /// Scores terminal states
    evaluator: E,

    rng: ChaCha20Rng,

    config: SearchConfig,

    /// Policy for selecting edges of expanded nodes
    selection_policy: Box<dyn SelectionPolicy<S::Action>>,

    /// Actions of the best trajectory found so far, root to terminal
    best_action_sequence: Vec<S::Action>,

    best_action_value: f64,

    min_action_value: f64,

    /// Player HP at the end of the best trajectory
    outcome_player_hp: i32,

    /// Actions taken by the most recent step, selection and rollout
    action_stack: Vec<S::Action>,

    /// Tree path of the most recent step
    search_path: NodePath,

    /// Number of action enumerations so far, reported on engine failures
    simulation_index: u64,

    /// Rules engine failure that ended the session
    failure: Option<SearchError>,

    statistics: SearchStatistics,
}

impl<S, E> SearchDriver<S, E>
where
    S: CombatState,
    E: Evaluator<S>,
{
    /// Creates a driver for the given initial state
    ///
    /// Fails if `config` does not validate.
    pub fn new(initial_state: S, evaluator: E, config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let selection_policy: Box<dyn SelectionPolicy<S::Action>> = Box::new(
            NormalizedUcbPolicy::new(config.exploration_parameter, config.range_fallback),
        );

        Ok(SearchDriver {
            root: Node::new(),
            rng: ChaCha20Rng::seed_from_u64(search_seed(&initial_state)),
            root_state: initial_state,
            evaluator,
            config,
            selection_policy,
            best_action_sequence: Vec::new(),
            best_action_value: f64::NEG_INFINITY,
            min_action_value: f64::INFINITY,
            outcome_player_hp: 0,
            action_stack: Vec::new(),
            search_path: NodePath::new(),
            simulation_index: 0,
            failure: None,
            statistics: SearchStatistics::new(),
        })
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S::Action> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Runs `simulations` iterations of the search
    ///
    /// A terminal root is scored once and stamped with a single simulation,
    /// whatever the budget. The first rules engine failure ends the session
    /// and is returned, here and from every later call.
    pub fn search(&mut self, simulations: u64) -> Result<()> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        if self.root_state.is_terminal() {
            let evaluation = self.evaluator.evaluate(&self.root_state);
            self.outcome_player_hp = self.root_state.player_hp();
            self.best_action_sequence.clear();
            self.best_action_value = evaluation;
            self.min_action_value = evaluation;

            self.root.evaluation_sum = evaluation;
            self.root.simulation_count = 1;

            debug!("root state is terminal, evaluation {}", evaluation);
            return Ok(());
        }

        debug!(
            "starting search: {} simulations, seed {}",
            simulations,
            search_seed(&self.root_state)
        );

        let start_time = Instant::now();
        let result = (0..simulations).try_for_each(|_| self.step());
        self.statistics.total_time += start_time.elapsed();
        result?;

        debug!(
            "search finished: best {} min {} over {} actions, tree size {}",
            self.best_action_value,
            self.min_action_value,
            self.best_action_sequence.len(),
            self.statistics.tree_size
        );
        Ok(())
    }

    /// Executes a single iteration of the search
    ///
    /// Once a step has failed the tree is left as it was and the same error
    /// is returned without doing any work.
    pub fn step(&mut self) -> Result<()> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.run_step().map_err(|error| {
            self.failure = Some(error.clone());
            error
        })
    }

    fn run_step(&mut self) -> Result<()> {
        let mut state = self.root_state.clone();
        self.action_stack.clear();
        self.search_path.clear();

        let bounds = self.bounds();
        let mut rollout_length = 0;
        let mut node = &mut self.root;

        loop {
            if state.is_terminal() {
                self.statistics.terminal_hits += 1;
                break;
            }

            if node.is_leaf() {
                self.simulation_index += 1;
                self.statistics.tree_size += expand_node(node, &state, self.simulation_index)?;

                let index = select_first_action_for_leaf(node, &mut self.rng);
                let edge = &node.edges[index];
                state.apply_action(&edge.action);
                self.action_stack.push(edge.action.clone());
                self.search_path.push(index);

                rollout_length = playout_random(
                    &mut state,
                    &mut self.action_stack,
                    &mut self.rng,
                    &mut self.simulation_index,
                )?;
                break;
            }

            let index = self.selection_policy.select_edge(node, &bounds);
            let edge = &mut node.edges[index];
            state.apply_action(&edge.action);
            self.action_stack.push(edge.action.clone());
            self.search_path.push(index);
            node = &mut edge.node;
        }

        self.statistics.iterations += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(self.search_path.len());
        self.statistics.max_rollout_length = self.statistics.max_rollout_length.max(rollout_length);

        self.update_from_playout(&state);
        Ok(())
    }

    /// Records the outcome of a finished trajectory
    fn update_from_playout(&mut self, end_state: &S) {
        let evaluation = self.evaluator.evaluate(end_state);

        if evaluation > self.best_action_value {
            self.best_action_sequence = self.action_stack.clone();
            self.best_action_value = evaluation;
            self.outcome_player_hp = end_state.player_hp();
        }

        if evaluation < self.min_action_value {
            self.min_action_value = evaluation;
        }

        let mut node = &mut self.root;
        node.record(evaluation);
        for &index in &self.search_path.indices {
            node = &mut node.edges[index].node;
            node.record(evaluation);
        }
    }

    fn bounds(&self) -> EvaluationBounds {
        EvaluationBounds {
            best: (!self.best_action_sequence.is_empty()).then_some(self.best_action_value),
            min: self.min_action_value,
        }
    }

    /// Returns the root of the search tree
    pub fn root(&self) -> &Node<S::Action> {
        &self.root
    }

    /// Returns the state the search was started from
    pub fn root_state(&self) -> &S {
        &self.root_state
    }

    /// Actions of the best trajectory found, root to terminal
    pub fn best_action_sequence(&self) -> &[S::Action] {
        &self.best_action_sequence
    }

    /// First action of the best trajectory, if one was found
    pub fn best_action(&self) -> Option<&S::Action> {
        self.best_action_sequence.first()
    }

    pub fn best_action_value(&self) -> f64 {
        self.best_action_value
    }

    pub fn min_action_value(&self) -> f64 {
        self.min_action_value
    }

    pub fn outcome_player_hp(&self) -> i32 {
        self.outcome_player_hp
    }

    /// Actions taken by the most recent step
    pub fn action_stack(&self) -> &[S::Action] {
        &self.action_stack
    }

    /// Tree path followed by the most recent step
    pub fn search_path(&self) -> &NodePath {
        &self.search_path
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rules engine failure that ended the session, if any
    pub fn failure(&self) -> Option<&SearchError> {
        self.failure.as_ref()
    }

    /// Returns the search statistics
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
