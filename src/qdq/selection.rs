//! Selection records
//!
//! A [`NodesToOptimize`] is the immutable output artifact of a successful
//! match: the target node plus the matched DQ and Q nodes, in stable slot
//! order, handed to the downstream rewrite pass. It holds no ownership over
//! nodes; every entry is a stable identity into the owning graph.

use crate::graph::{Graph, Node, NodeIndex};

/// Staging structure for assembling a [`NodesToOptimize`]
///
/// Fields are public so that a family's layout hook can reshape the record
/// before it is frozen: pad input slots to a fixed width, or collapse several
/// physical producers into one logical input def.
#[derive(Debug)]
pub struct NodesToOptimizeBuilder {
    /// The candidate node being fused around
    pub target_node: NodeIndex,
    /// Matched DQ producers by input slot; `None` marks an empty slot
    pub input_nodes: Vec<Option<NodeIndex>>,
    /// Matched Q consumers by output slot
    pub output_nodes: Vec<NodeIndex>,
    /// Override of the logical input-def count, when several physical
    /// producers occupy one logical slot (variadic inputs)
    pub num_input_defs: Option<usize>,
}

impl NodesToOptimizeBuilder {
    /// Create a builder for the given target node
    pub fn new(target_node: NodeIndex) -> Self {
        Self {
            target_node,
            input_nodes: Vec::new(),
            output_nodes: Vec::new(),
            num_input_defs: None,
        }
    }

    /// Freeze the staged fields into an immutable record
    pub fn build(self) -> NodesToOptimize {
        NodesToOptimize {
            target: self.target_node,
            input_slots: self.input_nodes,
            output_slots: self.output_nodes,
            num_input_defs: self.num_input_defs,
        }
    }
}

/// Immutable, slot-ordered record of a matched QDQ node group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodesToOptimize {
    target: NodeIndex,
    input_slots: Vec<Option<NodeIndex>>,
    output_slots: Vec<NodeIndex>,
    num_input_defs: Option<usize>,
}

impl NodesToOptimize {
    /// The target node's identity
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Matched DQ producers by input slot
    ///
    /// A `None` slot means no DQ producer occupies that logical input.
    pub fn input_slots(&self) -> &[Option<NodeIndex>] {
        &self.input_slots
    }

    /// Matched Q consumers by output slot
    pub fn output_slots(&self) -> &[NodeIndex] {
        &self.output_slots
    }

    /// Logical input-def count
    ///
    /// Defaults to the physical input-slot count; families with variadic
    /// inputs override it to collapse N physical producers into one slot.
    pub fn num_input_defs(&self) -> usize {
        self.num_input_defs.unwrap_or(self.input_slots.len())
    }

    /// Resolve the target to a mutable handle in its owning graph
    pub fn target_mut<'g>(&self, graph: &'g mut Graph) -> &'g mut Node {
        graph.node_mut(self.target)
    }

    /// Resolve the DQ node at an input slot to a mutable handle
    pub fn input_mut<'g>(&self, graph: &'g mut Graph, slot: usize) -> Option<&'g mut Node> {
        let index = self.input_slots.get(slot).copied().flatten()?;
        Some(graph.node_mut(index))
    }

    /// Resolve the Q node at an output slot to a mutable handle
    pub fn output_mut<'g>(&self, graph: &'g mut Graph, slot: usize) -> Option<&'g mut Node> {
        let index = self.output_slots.get(slot).copied()?;
        Some(graph.node_mut(index))
    }
}
