//! Inspection helpers for a search in progress
//!
//! Nodes store no game states, so printers that describe actions rebuild the
//! states by replaying actions from the root. This is only cheap for shallow
//! depths.

use std::io::{self, Write};

use crate::{
    evaluation::Evaluator,
    game_state::{Action, CombatState},
    mcts::SearchDriver,
    tree::Node,
};

/// Writes every edge `remaining` levels below `node`
fn write_layer<S, W>(
    node: &Node<S::Action>,
    state: &S,
    remaining: usize,
    sink: &mut W,
) -> io::Result<()>
where
    S: CombatState,
    W: Write + ?Sized,
{
    if remaining == 1 {
        for edge in &node.edges {
            write!(
                sink,
                "({}){}\t",
                edge.node.simulation_count,
                state.describe_action(&edge.action)
            )?;
        }
        return Ok(());
    }

    for edge in node.edges.iter().filter(|edge| !edge.node.is_leaf()) {
        let mut next = state.clone();
        next.apply_action(&edge.action);
        write_layer(&edge.node, &next, remaining - 1, sink)?;
    }
    Ok(())
}

impl<S, E> SearchDriver<S, E>
where
    S: CombatState,
    E: Evaluator<S>,
{
    /// Prints the edges of the first `levels` depths of the tree
    ///
    /// Each depth is one line of `(visits)description` entries separated by
    /// tabs, in depth-first order.
    pub fn print_search_tree<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        levels: usize,
    ) -> io::Result<()> {
        for depth in 1..=levels {
            write_layer(self.root(), self.root_state(), depth, sink)?;
            writeln!(sink)?;
        }
        sink.flush()
    }

    /// Dumps the actions of the most recent step as hex ids, one per line
    ///
    /// With `skip_last` the final action is left out.
    pub fn print_search_stack<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        skip_last: bool,
    ) -> io::Result<()> {
        let actions = self.action_stack();
        let count = if skip_last {
            actions.len().saturating_sub(1)
        } else {
            actions.len()
        };

        for action in &actions[..count] {
            writeln!(sink, "{:x}", action.id())?;
        }
        sink.flush()
    }

    /// Returns an indented rendering of the tree
    ///
    /// Unvisited edges are skipped. `max_depth` limits how deep the rendering
    /// goes below the root.
    pub fn visualize_tree(&self, max_depth: Option<usize>) -> String {
        let mut result = String::new();
        Self::visualize_node(self.root(), None, 0, max_depth, &mut result);
        result
    }

    fn visualize_node(
        node: &Node<S::Action>,
        action: Option<&S::Action>,
        depth: usize,
        max_depth: Option<usize>,
        output: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        let action_str = match action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, value: {:.3})\n",
            indent,
            action_str,
            node.simulation_count,
            node.value()
        ));

        if max_depth.map_or(false, |max| depth >= max) {
            return;
        }

        for edge in node.edges.iter().filter(|edge| edge.node.simulation_count > 0) {
            Self::visualize_node(&edge.node, Some(&edge.action), depth + 1, max_depth, output);
        }
    }
}
