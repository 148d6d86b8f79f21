//! # combat-mcts
//!
//! A single-player Monte Carlo Tree Search planner for turn-based combat.
//!
//! Given a snapshot of a battle in progress, the search explores sequences of
//! legal actions and reports the best trajectory it found, its value, and the
//! worst value seen. The combat rules themselves live outside this crate and
//! are reached through the [`CombatState`] trait.
//!
//! ## Features
//!
//! - UCT selection with a quality term normalized by the observed range of
//!   evaluations
//! - Full-width lazy expansion: a leaf gets one edge per legal action the
//!   first time it is reached
//! - Uniform random rollouts to a terminal outcome
//! - Pluggable evaluation; closures work as evaluators
//! - Fully deterministic given the initial state
//!
//! ## Basic Usage
//!
//! ```
//! use combat_mcts::{Action, CombatState, SearchConfig, SearchDriver};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Move {
//!     Strike,
//!     Wait,
//! }
//!
//! impl Action for Move {
//!     fn id(&self) -> u64 {
//!         match self {
//!             Move::Strike => 1,
//!             Move::Wait => 2,
//!         }
//!     }
//! }
//!
//! // The monster dies after enough strikes; the fight ends after four moves.
//! #[derive(Clone, Debug)]
//! struct Fight {
//!     monster_hp: i32,
//!     moves: i32,
//! }
//!
//! impl CombatState for Fight {
//!     type Action = Move;
//!
//!     fn is_terminal(&self) -> bool {
//!         self.monster_hp <= 0 || self.moves >= 4
//!     }
//!
//!     fn legal_actions(&self) -> Vec<Move> {
//!         if self.is_terminal() {
//!             return vec![];
//!         }
//!         vec![Move::Strike, Move::Wait]
//!     }
//!
//!     fn apply_action(&mut self, action: &Move) {
//!         if *action == Move::Strike {
//!             self.monster_hp -= 5;
//!         }
//!         self.moves += 1;
//!     }
//!
//!     fn seed(&self) -> u64 { 7 }
//!     fn floor_num(&self) -> u64 { 1 }
//!     fn player_hp(&self) -> i32 { 10 }
//!     fn turn(&self) -> i32 { self.moves }
//! }
//!
//! fn main() -> Result<(), combat_mcts::SearchError> {
//!     let fight = Fight { monster_hp: 10, moves: 0 };
//!     let evaluate = |state: &Fight| -state.monster_hp as f64;
//!
//!     let mut driver = SearchDriver::new(fight, evaluate, SearchConfig::new(2.0))?;
//!     driver.search(50)?;
//!
//!     assert_eq!(driver.root().simulation_count, 50);
//!     assert_eq!(driver.best_action_value(), 0.0);
//!     println!("best line: {:?}", driver.best_action_sequence());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration of the search:
//!
//! 1. **Selection**: walks down from the root through expanded nodes using
//!    the selection policy, replaying actions on a clone of the root state.
//! 2. **Expansion**: at a non-terminal leaf, creates an edge for every legal
//!    action and picks one of them uniformly at random.
//! 3. **Rollout**: plays uniformly random actions until the battle ends.
//!    Rollout states are never added to the tree.
//! 4. **Backpropagation**: scores the terminal state and adds the score to
//!    every tree node on the path.
//!
//! A non-terminal state with no legal actions is a rules engine bug; the
//! search logs it and returns [`SearchError::NoLegalActions`].

pub mod config;
pub mod diagnostics;
pub mod evaluation;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::{RangeFallback, SearchConfig};
pub use evaluation::{BattleSummary, DefaultEvaluation, Encounter, Evaluator, MonsterHp, Outcome};
pub use game_state::{Action, CombatState};
pub use mcts::SearchDriver;
pub use policy::{EvaluationBounds, NormalizedUcbPolicy, SelectionPolicy};
pub use stats::SearchStatistics;
pub use tree::{Edge, Node, NodePath};

/// Error types for the search
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The rules engine reported no legal actions for a non-terminal state
    #[error(
        "No legal actions in non-terminal state (seed {seed}, floor {floor_num}, \
         turn {turn}, simulation {simulation}): {context}"
    )]
    NoLegalActions {
        seed: u64,
        floor_num: u64,
        turn: i32,
        simulation: u64,
        context: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
