//! Candidate iteration over a whole graph
//!
//! Walks every node in graph order, dispatches to the registered selector
//! for its op type, and collects the resulting selection records. Matching a
//! candidate never observes the outcome of matching another, so callers may
//! process the records in any order.

use log::{debug, trace};

use crate::graph::Graph;

use super::registry::SelectorRegistry;
use super::selection::NodesToOptimize;
use super::{DQ_OP_TYPE, Q_OP_TYPE};

/// Statistics from one finder run
#[derive(Debug, Default, Clone)]
pub struct FinderStats {
    /// Nodes with a registered selector that were examined
    pub candidates_examined: usize,
    /// Node groups that matched
    pub groups_selected: usize,
}

/// Finds all QDQ node groups in a graph
///
/// Holds only borrows; the graph stays read-only for the whole run.
pub struct NodeGroupFinder<'a> {
    graph: &'a Graph,
    registry: &'a SelectorRegistry,
    stats: FinderStats,
}

impl<'a> NodeGroupFinder<'a> {
    /// Create a finder over a graph with the given registry
    pub fn new(graph: &'a Graph, registry: &'a SelectorRegistry) -> Self {
        Self {
            graph,
            registry,
            stats: FinderStats::default(),
        }
    }

    /// Get statistics from the last run
    pub fn stats(&self) -> &FinderStats {
        &self.stats
    }

    /// Examine every candidate node and collect the matched groups
    pub fn run(&mut self) -> Vec<NodesToOptimize> {
        self.stats = FinderStats::default();
        let mut selections = Vec::new();

        for (index, node) in self.graph.iter() {
            // Q/DQ nodes are group members, never targets.
            if node.is_op_type(DQ_OP_TYPE) || node.is_op_type(Q_OP_TYPE) {
                continue;
            }

            let selector = match self.registry.get(&node.op_type) {
                Some(s) => s,
                None => continue,
            };
            self.stats.candidates_examined += 1;

            match selector.select(self.graph, index) {
                Some(selection) => {
                    debug!(
                        "selected QDQ group around '{}' ({}): {} input slot(s), {} output slot(s)",
                        node.name,
                        node.op_type,
                        selection.input_slots().len(),
                        selection.output_slots().len()
                    );
                    self.stats.groups_selected += 1;
                    selections.push(selection);
                }
                None => {
                    trace!("candidate '{}' ({}) did not match", node.name, node.op_type);
                }
            }
        }

        debug!(
            "QDQ selection: {} candidate(s) examined, {} group(s) selected",
            self.stats.candidates_examined, self.stats.groups_selected
        );
        selections
    }
}
