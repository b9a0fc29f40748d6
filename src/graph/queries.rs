//! Type-filtered neighborhood queries
//!
//! Read-only queries over a node's immediate producers and consumers, used by
//! the QDQ selectors. All queries are slot-ordered and never mutate.

use super::store::{Graph, Node, NodeIndex};

impl Graph {
    /// Find the producer of each input slot, filtered by op type
    ///
    /// Returns one entry per input slot of `node`:
    ///
    /// - `Some(index)` if the slot's tensor is produced by a node of
    ///   `op_type`
    /// - `None` if the slot is an absent optional input, the tensor has no
    ///   producing node (graph input or initializer), or the producer has a
    ///   different op type
    ///
    /// Absent optional inputs are never an error; they keep their position so
    /// later slots do not shift.
    pub fn find_producers_by_type(&self, node: &Node, op_type: &str) -> Vec<Option<NodeIndex>> {
        node.inputs
            .iter()
            .map(|slot| {
                let def = slot.as_ref()?;
                let index = self.producer(&def.name)?;
                if self.node(index).is_op_type(op_type) {
                    Some(index)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Find the consumers of `node`'s outputs, filtered by op type
    ///
    /// Consumers are ordered by the node's output slot, then by edge
    /// insertion order within a slot.
    pub fn find_consumers_by_type(&self, node: &Node, op_type: &str) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        for output in &node.outputs {
            for &consumer in self.consumers(&output.name) {
                if self.node(consumer).is_op_type(op_type) {
                    found.push(consumer);
                }
            }
        }
        found
    }

    /// Check that the entirety of `node`'s output usage is accounted for
    ///
    /// True iff the total number of consuming edges across all of `node`'s
    /// outputs equals `expected` and none of its outputs is a graph output.
    /// A graph output is an escape past the fusion boundary, so it always
    /// defeats the check.
    pub fn check_output_fanout(&self, node: &Node, expected: usize) -> bool {
        let mut edges = 0;
        for output in &node.outputs {
            if self.is_graph_output(&output.name) {
                return false;
            }
            edges += self.consumers(&output.name).len();
        }
        edges == expected
    }
}
