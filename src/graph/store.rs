//! Arena-backed graph store
//!
//! Nodes live in a flat arena and are identified by a stable [`NodeIndex`].
//! Nodes are never removed during matching, so an index obtained while
//! matching remains valid for the later rewrite phase.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::error::{OptError, OptResult};
use crate::tensor::{ElemType, TensorDef};

/// Stable node identity within its owning graph
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Zero-based position in the owning graph's arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n[{}]", self.0)
    }
}

/// A graph operation with slot-ordered inputs and outputs
///
/// An input slot holding `None` is a declared-but-absent optional input; it
/// is excluded from arity counts but keeps its position so that later slots
/// do not shift.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name, unique within the graph
    pub name: String,
    /// Operator type tag (e.g. `"Conv"`, `"DequantizeLinear"`)
    pub op_type: String,
    /// Input descriptors by slot; `None` marks an absent optional input
    pub inputs: Vec<Option<TensorDef>>,
    /// Output descriptors by slot
    pub outputs: Vec<TensorDef>,
}

impl Node {
    /// Create a new node
    pub fn new(
        name: impl Into<String>,
        op_type: impl Into<String>,
        inputs: Vec<Option<TensorDef>>,
        outputs: Vec<TensorDef>,
    ) -> Self {
        Self {
            name: name.into(),
            op_type: op_type.into(),
            inputs,
            outputs,
        }
    }

    /// Count the inputs that actually exist, skipping absent optional slots
    pub fn num_present_inputs(&self) -> usize {
        self.inputs.iter().filter(|slot| slot.is_some()).count()
    }

    /// Get the input descriptor at a slot, if the slot exists and is present
    pub fn input(&self, slot: usize) -> Option<&TensorDef> {
        self.inputs.get(slot).and_then(|s| s.as_ref())
    }

    /// Get the output descriptor at a slot
    pub fn output(&self, slot: usize) -> Option<&TensorDef> {
        self.outputs.get(slot)
    }

    /// Check if this node has a specific op type
    pub fn is_op_type(&self, op_type: &str) -> bool {
        self.op_type == op_type
    }
}

/// Constant tensor data attached to the graph
///
/// Only scalar/small constants are needed here: quantization scales and
/// zero points consulted by the QDQ pair-compatibility predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    /// Tensor name
    pub name: String,
    /// Element type tag
    pub elem_type: ElemType,
    /// Element values, widened to f64
    pub values: Vec<f64>,
}

impl Initializer {
    /// Create a scalar initializer
    pub fn scalar(name: impl Into<String>, elem_type: ElemType, value: f64) -> Self {
        Self {
            name: name.into(),
            elem_type,
            values: vec![value],
        }
    }
}

/// Consumer list, optimized for the common case of 1-4 consumers
pub type ConsumerList = SmallVec<[NodeIndex; 4]>;

/// Arena-backed graph with O(1) producer/consumer lookups
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    /// tensor name → producing node
    producer_map: FxHashMap<String, NodeIndex>,
    /// tensor name → consuming nodes, in insertion order
    consumer_map: FxHashMap<String, ConsumerList>,
    /// name → constant tensor
    initializer_map: FxHashMap<String, Initializer>,
    /// tensor names exposed as graph outputs
    graph_outputs: FxHashSet<String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a node, updating the producer and consumer maps
    ///
    /// Returns the node's stable index. Fails if the node has an empty name
    /// or an output tensor already claimed by another node.
    pub fn add_node(&mut self, node: Node) -> OptResult<NodeIndex> {
        if node.name.is_empty() {
            return Err(OptError::InvalidNode("empty node name".to_string()));
        }
        for output in &node.outputs {
            if self.producer_map.contains_key(&output.name) {
                return Err(OptError::DuplicateProducer(output.name.clone()));
            }
        }

        let index = NodeIndex::new(self.nodes.len());

        for output in &node.outputs {
            self.producer_map.insert(output.name.clone(), index);
        }
        for def in node.inputs.iter().flatten() {
            self.consumer_map
                .entry(def.name.clone())
                .or_default()
                .push(index);
        }

        self.nodes.push(node);
        Ok(index)
    }

    /// Add a constant tensor
    pub fn add_initializer(&mut self, init: Initializer) -> OptResult<()> {
        if self.initializer_map.contains_key(&init.name) {
            return Err(OptError::DuplicateInitializer(init.name));
        }
        self.initializer_map.insert(init.name.clone(), init);
        Ok(())
    }

    /// Mark a tensor as a graph output
    pub fn mark_graph_output(&mut self, name: impl Into<String>) {
        self.graph_outputs.insert(name.into());
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Resolve a node by its stable index
    ///
    /// # Panics
    /// Panics if the index does not belong to this graph.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()]
    }

    /// Resolve a mutable node handle by its stable index
    ///
    /// This is the upgrade path from a read-only match result to a handle the
    /// rewrite pass can modify: same identity, same owning store.
    ///
    /// # Panics
    /// Panics if the index does not belong to this graph.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.index()]
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes with their indices, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex::new(i), n))
    }

    /// Get the node producing a tensor
    pub fn producer(&self, tensor_name: &str) -> Option<NodeIndex> {
        self.producer_map.get(tensor_name).copied()
    }

    /// Get the nodes consuming a tensor
    pub fn consumers(&self, tensor_name: &str) -> &[NodeIndex] {
        self.consumer_map
            .get(tensor_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get an initializer by name
    pub fn initializer(&self, name: &str) -> Option<&Initializer> {
        self.initializer_map.get(name)
    }

    /// Check if a tensor is a graph output
    pub fn is_graph_output(&self, name: &str) -> bool {
        self.graph_outputs.contains(name)
    }
}
