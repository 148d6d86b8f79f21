//! Policies for the phases of the search
//!
//! - Selection: which edge of an expanded node to follow
//! - Expansion: how a leaf grows its edges and which one it tries first
//! - Rollout: how a trajectory is completed outside the tree

pub mod expansion;
pub mod rollout;
pub mod selection;

pub use rollout::playout_random;
pub use selection::{EvaluationBounds, NormalizedUcbPolicy, SelectionPolicy};
