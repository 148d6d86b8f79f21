//! Traits defining the combat simulator interface consumed by the search.
//!
//! The search never implements combat rules itself. Everything it knows about
//! an encounter comes through the [`CombatState`] trait, which must be
//! implemented by the rules engine that owns the battle.

use std::fmt::Debug;

/// Trait for actions that can be taken during a battle
///
/// Actions are stored in the search tree and copied into action sequences,
/// so they should be cheap to clone.
pub trait Action: Clone + Debug {
    /// Returns an opaque encoding of this action, used for offline replay
    fn id(&self) -> u64;
}

/// Trait defining the simulator contract required by the search
///
/// Implementations must be deterministic: given the same state and the same
/// action, `apply_action` must always produce the same successor. The search
/// clones states freely, so `Clone` must produce a deep, independent copy.
pub trait CombatState: Clone + Debug {
    /// The type of actions that can be taken in this battle
    type Action: Action;

    /// Returns true once the outcome of the encounter is decided
    fn is_terminal(&self) -> bool;

    /// Returns the legal actions in this state
    ///
    /// The order must be stable for a given state, since the search relies on
    /// it for reproducibility. The list may only be empty at a terminal state.
    ///
    /// # Example
    ///
    /// ```
    /// # use combat_mcts::{Action, CombatState};
    /// # #[derive(Debug, Clone)]
    /// # struct EndTurn;
    /// # impl Action for EndTurn { fn id(&self) -> u64 { 0 } }
    /// # #[derive(Debug, Clone)]
    /// # struct Battle { over: bool }
    /// # impl CombatState for Battle {
    /// # type Action = EndTurn;
    /// # fn is_terminal(&self) -> bool { self.over }
    /// fn legal_actions(&self) -> Vec<EndTurn> {
    ///     if self.over { vec![] } else { vec![EndTurn] }
    /// }
    /// # fn apply_action(&mut self, _: &EndTurn) { self.over = true; }
    /// # fn seed(&self) -> u64 { 0 }
    /// # fn floor_num(&self) -> u64 { 0 }
    /// # fn player_hp(&self) -> i32 { 0 }
    /// # fn turn(&self) -> i32 { 0 }
    /// # }
    /// ```
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action to this state in place
    fn apply_action(&mut self, action: &Self::Action);

    /// Seed of the run this battle belongs to
    fn seed(&self) -> u64;

    /// Floor (stage) number of the battle
    fn floor_num(&self) -> u64;

    /// Current player HP
    fn player_hp(&self) -> i32;

    /// Current turn number
    fn turn(&self) -> i32;

    /// Human-readable description of `action` taken from this state
    fn describe_action(&self, action: &Self::Action) -> String {
        format!("{:?}", action)
    }

    /// Description of the state used when reporting a rules engine failure
    fn context_description(&self) -> String {
        format!("{:?}", self)
    }
}
