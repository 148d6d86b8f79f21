//! Tree data structures for the search
//!
//! The tree is a pure ownership hierarchy: every [`Edge`] owns its child
//! [`Node`] by value. Nodes carry statistics only, never game states; states
//! are rebuilt by replaying actions from the root.

use std::fmt;

/// A node in the search tree
///
/// A node with no edges is a leaf. Expansion fills `edges` exactly once with
/// one edge per legal action, in enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<A> {
    /// Outgoing edges, one per legal action once expanded
    pub edges: Vec<Edge<A>>,

    /// Number of simulations routed through this node
    pub simulation_count: u64,

    /// Sum of the evaluations of simulations routed through this node
    pub evaluation_sum: f64,
}

/// An action leading from a node to its exclusively owned child
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<A> {
    pub action: A,
    pub node: Node<A>,
}

impl<A> Node<A> {
    /// Creates an unexpanded node with no statistics
    pub fn new() -> Self {
        Node {
            edges: Vec::new(),
            simulation_count: 0,
            evaluation_sum: 0.0,
        }
    }

    /// Returns true if this node has not been expanded
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the average evaluation of this node
    pub fn value(&self) -> f64 {
        if self.simulation_count == 0 {
            return 0.0;
        }
        self.evaluation_sum / self.simulation_count as f64
    }

    /// Expands the node with one child per action
    ///
    /// Returns the number of edges created. An already expanded node is left
    /// unchanged and 0 is returned.
    pub fn expand(&mut self, actions: Vec<A>) -> usize {
        if !self.is_leaf() {
            return 0;
        }

        self.edges = actions
            .into_iter()
            .map(|action| Edge {
                action,
                node: Node::new(),
            })
            .collect();
        self.edges.len()
    }

    /// Records one simulation with the given evaluation
    pub fn record(&mut self, evaluation: f64) {
        self.simulation_count += 1;
        self.evaluation_sum += evaluation;
    }

    /// Follows `path` from this node
    pub fn descendant(&self, path: &NodePath) -> Option<&Node<A>> {
        let mut node = self;
        for &index in &path.indices {
            node = &node.edges.get(index)?.node;
        }
        Some(node)
    }

    /// Total number of nodes in the subtree rooted here
    pub fn subtree_size(&self) -> usize {
        1 + self
            .edges
            .iter()
            .map(|edge| edge.node.subtree_size())
            .sum::<usize>()
    }
}

impl<A> Default for Node<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents a path through the search tree
///
/// A path is a sequence of edge indices leading from the root to a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath {
    /// Indices of edges to follow from the root
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates a new empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    /// Extends the path with a new index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Resets the path to point at the root
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Returns the length of the path
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the path is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
