//! Operation-family selectors
//!
//! Each supported operation family implements [`NodeGroupSelector`]: a
//! stateless check over a candidate node's DQ/Q neighborhood plus an
//! optional hook reshaping the final selection layout. The shared structural
//! rule (arity and fan-out) lives in [`check_node_group`]; families add
//! their element-type constraints on top.
//!
//! Failure carries no diagnostic payload. A selector answers "does this
//! neighborhood qualify", and the caller moves on to the next candidate when
//! it does not.

use crate::graph::{Graph, Node, NodeIndex};
use crate::tensor::ElemType;

use super::selection::{NodesToOptimize, NodesToOptimizeBuilder};
use super::util::is_qdq_pair_supported;
use super::{DQ_OP_TYPE, Q_OP_TYPE};

// ============================================================================
// Shared helpers
// ============================================================================

/// Count the input slots occupied by a matched DQ producer
fn matched_dq_count(dq_slots: &[Option<NodeIndex>]) -> usize {
    dq_slots.iter().flatten().count()
}

/// Quantized element type entering a DQ node (its first input)
fn dq_quantized_type(graph: &Graph, dq: NodeIndex) -> Option<ElemType> {
    graph.node(dq).input(0).map(|def| def.elem_type)
}

/// Quantized element type leaving a Q node (its first output)
fn q_quantized_type(graph: &Graph, q: NodeIndex) -> Option<ElemType> {
    graph.node(q).output(0).map(|def| def.elem_type)
}

/// Type allowed as a quantized activation
fn is_supported_activation(ty: ElemType, int8_allowed: bool) -> bool {
    ty == ElemType::Uint8 || (int8_allowed && ty == ElemType::Int8)
}

/// Shared structural check for a candidate's DQ/Q neighborhood
///
/// `expected_dq` of `None` derives the expectation from the target's count
/// of actually present inputs. Succeeds iff the matched DQ count equals the
/// expectation, the Q count equals the target's output count, and the
/// matched Q nodes consume the entirety of the target's output usage (see
/// [`Graph::check_output_fanout`]).
///
/// Pure predicate; no side effects.
pub fn check_node_group(
    graph: &Graph,
    target: &Node,
    dq_slots: &[Option<NodeIndex>],
    q_nodes: &[NodeIndex],
    expected_dq: Option<usize>,
) -> bool {
    let expected_dq = expected_dq.unwrap_or_else(|| target.num_present_inputs());

    matched_dq_count(dq_slots) == expected_dq
        && q_nodes.len() == target.outputs.len()
        && graph.check_output_fanout(target, q_nodes.len())
}

// ============================================================================
// Selector trait and shared harness
// ============================================================================

/// Matching strategy for one operation family
///
/// Implementations are stateless single-shot predicates. The provided
/// [`select`](NodeGroupSelector::select) harness queries the candidate's
/// immediate DQ producers and Q consumers, delegates to the family's
/// [`check`](NodeGroupSelector::check), and on success stages the matched
/// identities into a [`NodesToOptimize`] record. Nothing is mutated on any
/// path; the stable indices in the record are the handles the rewrite pass
/// later upgrades via [`Graph::node_mut`].
pub trait NodeGroupSelector {
    /// Family-specific acceptance rule over the queried neighborhood
    ///
    /// `dq_slots` has one entry per input slot of `target` (`None` for an
    /// absent optional input or a slot without a DQ producer); `q_nodes` are
    /// the Q consumers in output-slot order.
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool;

    /// Layout hook applied to the staged selection; default is a no-op
    fn update_builder(&self, _builder: &mut NodesToOptimizeBuilder) {}

    /// Match the candidate and produce a selection record on success
    fn select(&self, graph: &Graph, target_index: NodeIndex) -> Option<NodesToOptimize> {
        let target = graph.node(target_index);
        let dq_slots = graph.find_producers_by_type(target, DQ_OP_TYPE);
        let q_nodes = graph.find_consumers_by_type(target, Q_OP_TYPE);

        if !self.check(graph, target, &dq_slots, &q_nodes) {
            return None;
        }

        let mut builder = NodesToOptimizeBuilder::new(target_index);
        builder.input_nodes = dq_slots;
        builder.output_nodes = q_nodes;
        self.update_builder(&mut builder);

        Some(builder.build())
    }
}

// ============================================================================
// Family implementations
// ============================================================================

/// Drop-pair family: a single DQ/Q pair flanking a pass-through op
///
/// Matches ops like Gather, Reshape, Transpose or MaxPool where the pair can
/// be dropped entirely, provided requantizing through it is a no-op.
#[derive(Debug, Default)]
pub struct DropQdqSelector;

impl NodeGroupSelector for DropQdqSelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if !check_node_group(graph, target, dq_slots, q_nodes, Some(1)) {
            return false;
        }

        let dq = match dq_slots.iter().flatten().next() {
            Some(&dq) => dq,
            None => return false,
        };
        let q = q_nodes[0];

        is_qdq_pair_supported(graph, graph.node(q), graph.node(dq))
    }
}

/// Unary family: one DQ in, one Q out
///
/// Input and output quantized types are checked independently against the
/// supported activation set.
#[derive(Debug)]
pub struct UnarySelector {
    int8_allowed: bool,
}

impl UnarySelector {
    /// Create a unary selector, optionally admitting signed int8 activations
    pub fn new(int8_allowed: bool) -> Self {
        Self { int8_allowed }
    }
}

impl NodeGroupSelector for UnarySelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if !check_node_group(graph, target, dq_slots, q_nodes, Some(1)) {
            return false;
        }

        let dt_input = dq_slots
            .iter()
            .flatten()
            .next()
            .and_then(|&dq| dq_quantized_type(graph, dq));
        let dt_output = q_quantized_type(graph, q_nodes[0]);

        match (dt_input, dt_output) {
            (Some(input), Some(output)) => {
                is_supported_activation(input, self.int8_allowed)
                    && is_supported_activation(output, self.int8_allowed)
            }
            _ => false,
        }
    }
}

/// Binary family: both DQ inputs and the Q output share one quantized type
#[derive(Debug, Default)]
pub struct BinarySelector;

impl NodeGroupSelector for BinarySelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if !check_node_group(graph, target, dq_slots, q_nodes, None) {
            return false;
        }

        let dt_input_1 = dq_slots
            .first()
            .copied()
            .flatten()
            .and_then(|dq| dq_quantized_type(graph, dq));
        let dt_input_2 = dq_slots
            .get(1)
            .copied()
            .flatten()
            .and_then(|dq| dq_quantized_type(graph, dq));
        let dt_output = q_quantized_type(graph, q_nodes[0]);

        match (dt_input_1, dt_input_2, dt_output) {
            (Some(a), Some(b), Some(out)) => a == b && a == out,
            _ => false,
        }
    }
}

/// Variadic family: N >= 1 DQ producers collapsing into one logical input
///
/// All DQ quantized types must agree pairwise and match the Q output type.
/// The selection reports a single logical input def regardless of how many
/// physical producers matched.
#[derive(Debug, Default)]
pub struct VariadicSelector;

impl NodeGroupSelector for VariadicSelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if !check_node_group(graph, target, dq_slots, q_nodes, None) {
            return false;
        }

        let mut dq_types = dq_slots
            .iter()
            .flatten()
            .map(|&dq| dq_quantized_type(graph, dq));

        let dt_input = match dq_types.next() {
            Some(Some(ty)) => ty,
            _ => return false,
        };
        for ty in dq_types {
            if ty != Some(dt_input) {
                return false;
            }
        }

        q_quantized_type(graph, q_nodes[0]) == Some(dt_input)
    }

    fn update_builder(&self, builder: &mut NodesToOptimizeBuilder) {
        // N physical producers feed one variadic input def.
        builder.num_input_defs = Some(1);
    }
}

/// Convolution family: uint8 activations, optional int32 bias
///
/// The selection's input slots are padded to a fixed width of 3 so a missing
/// bias leaves an explicit empty third slot instead of shifting positions.
#[derive(Debug, Default)]
pub struct ConvSelector;

impl NodeGroupSelector for ConvSelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if !check_node_group(graph, target, dq_slots, q_nodes, None) {
            return false;
        }

        let dt_input = dq_slots
            .first()
            .copied()
            .flatten()
            .and_then(|dq| dq_quantized_type(graph, dq));
        let dt_output = q_quantized_type(graph, q_nodes[0]);
        if dt_input != Some(ElemType::Uint8) || dt_output != Some(ElemType::Uint8) {
            return false;
        }

        match dq_slots.get(2).copied().flatten() {
            // no bias
            None => true,
            Some(bias_dq) => dq_quantized_type(graph, bias_dq) == Some(ElemType::Int32),
        }
    }

    fn update_builder(&self, builder: &mut NodesToOptimizeBuilder) {
        // Fixed-width slots: empty third slot for a missing bias.
        builder.input_nodes.resize(3, None);
    }
}

/// Matrix-multiply family with a dual mode keyed on Q presence
///
/// With a Q consumer ("linear" mode) the full structural check applies and
/// the output type is fixed to uint8. Without one ("integer-to-float" mode)
/// only the 2-DQ requirement holds. Both modes require the first DQ's
/// quantized type to be uint8.
#[derive(Debug, Default)]
pub struct MatMulSelector;

impl NodeGroupSelector for MatMulSelector {
    fn check(
        &self,
        graph: &Graph,
        target: &Node,
        dq_slots: &[Option<NodeIndex>],
        q_nodes: &[NodeIndex],
    ) -> bool {
        if matched_dq_count(dq_slots) != 2 {
            return false;
        }

        let qlinear = !q_nodes.is_empty();
        if qlinear {
            if !check_node_group(graph, target, dq_slots, q_nodes, None) {
                return false;
            }
            if q_quantized_type(graph, q_nodes[0]) != Some(ElemType::Uint8) {
                return false;
            }
        }

        let dt_input = dq_slots
            .first()
            .copied()
            .flatten()
            .and_then(|dq| dq_quantized_type(graph, dq));
        dt_input == Some(ElemType::Uint8)
    }
}
