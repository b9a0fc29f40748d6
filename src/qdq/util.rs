//! QDQ pair compatibility
//!
//! A Q node directly followed by a DQ node (or the pair flanking a
//! pass-through op) can be dropped only when requantizing through the pair is
//! a no-op: identical scales, identical zero points, identical zero-point
//! types. Anything unresolvable is treated as incompatible, never as an
//! error.

use crate::graph::{Graph, Node};

/// Input slot carrying the quantization scale on Q and DQ nodes
const SCALE_SLOT: usize = 1;

/// Input slot carrying the zero point on Q and DQ nodes
const ZERO_POINT_SLOT: usize = 2;

/// Check whether a Q/DQ pair is a supported pass-through
///
/// True iff both nodes carry constant scales with equal values and their
/// zero points agree: either both absent (implicit zero) or both constant
/// with equal values and equal element types. Missing or non-constant
/// quantization parameters make the pair unsupported.
pub fn is_qdq_pair_supported(graph: &Graph, q_node: &Node, dq_node: &Node) -> bool {
    let q_scale = match constant_values(graph, q_node, SCALE_SLOT) {
        Some(v) => v,
        None => return false,
    };
    let dq_scale = match constant_values(graph, dq_node, SCALE_SLOT) {
        Some(v) => v,
        None => return false,
    };
    if q_scale != dq_scale {
        return false;
    }

    match (
        zero_point(graph, q_node),
        zero_point(graph, dq_node),
    ) {
        (Some(Some((q_zp, q_ty))), Some(Some((dq_zp, dq_ty)))) => q_zp == dq_zp && q_ty == dq_ty,
        (Some(None), Some(None)) => true, // both implicit zero
        _ => false,
    }
}

/// Constant values backing a node's input slot, if any
fn constant_values<'g>(graph: &'g Graph, node: &Node, slot: usize) -> Option<&'g [f64]> {
    let def = node.input(slot)?;
    graph.initializer(&def.name).map(|init| init.values.as_slice())
}

/// Zero point of a Q/DQ node
///
/// `None`: the slot exists but is not a resolvable constant.
/// `Some(None)`: no zero point provided (implicit zero).
/// `Some(Some(..))`: constant values plus their element type.
fn zero_point<'g>(
    graph: &'g Graph,
    node: &Node,
) -> Option<Option<(&'g [f64], crate::tensor::ElemType)>> {
    match node.input(ZERO_POINT_SLOT) {
        None => Some(None),
        Some(def) => {
            let init = graph.initializer(&def.name)?;
            Some(Some((init.values.as_slice(), init.elem_type)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Initializer, Node, NodeIndex};
    use crate::tensor::{ElemType, TensorDef};

    fn td(name: &str, ty: ElemType) -> TensorDef {
        TensorDef::new(name, ty)
    }

    /// DQ and Q nodes referencing the given scale/zero-point tensor names.
    fn make_pair_graph(
        dq_params: (&str, Option<&str>),
        q_params: (&str, Option<&str>),
    ) -> (Graph, NodeIndex, NodeIndex) {
        let mut graph = Graph::new();

        let mut dq_inputs = vec![
            Some(td("x", ElemType::Uint8)),
            Some(td(dq_params.0, ElemType::Float)),
        ];
        if let Some(zp) = dq_params.1 {
            dq_inputs.push(Some(td(zp, ElemType::Uint8)));
        }
        let dq = graph
            .add_node(Node::new(
                "dq_0",
                "DequantizeLinear",
                dq_inputs,
                vec![td("dq_out", ElemType::Float)],
            ))
            .unwrap();

        let mut q_inputs = vec![
            Some(td("dq_out", ElemType::Float)),
            Some(td(q_params.0, ElemType::Float)),
        ];
        if let Some(zp) = q_params.1 {
            q_inputs.push(Some(td(zp, ElemType::Uint8)));
        }
        let q = graph
            .add_node(Node::new(
                "q_0",
                "QuantizeLinear",
                q_inputs,
                vec![td("y", ElemType::Uint8)],
            ))
            .unwrap();

        (graph, dq, q)
    }

    #[test]
    fn test_shared_params_supported() {
        let (mut graph, dq, q) = make_pair_graph(("s", Some("z")), ("s", Some("z")));
        graph
            .add_initializer(Initializer::scalar("s", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z", ElemType::Uint8, 128.0))
            .unwrap();

        assert!(is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_equal_valued_params_supported() {
        let (mut graph, dq, q) = make_pair_graph(("s1", Some("z1")), ("s2", Some("z2")));
        graph
            .add_initializer(Initializer::scalar("s1", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("s2", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z1", ElemType::Uint8, 0.0))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z2", ElemType::Uint8, 0.0))
            .unwrap();

        assert!(is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_differing_scale_unsupported() {
        let (mut graph, dq, q) = make_pair_graph(("s1", Some("z")), ("s2", Some("z")));
        graph
            .add_initializer(Initializer::scalar("s1", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("s2", ElemType::Float, 0.25))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z", ElemType::Uint8, 0.0))
            .unwrap();

        assert!(!is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_zero_point_type_mismatch_unsupported() {
        let (mut graph, dq, q) = make_pair_graph(("s", Some("z1")), ("s", Some("z2")));
        graph
            .add_initializer(Initializer::scalar("s", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z1", ElemType::Uint8, 0.0))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z2", ElemType::Int8, 0.0))
            .unwrap();

        assert!(!is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_missing_constant_unsupported() {
        // Scale tensors referenced but never added as initializers.
        let (graph, dq, q) = make_pair_graph(("s", Some("z")), ("s", Some("z")));

        assert!(!is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_both_implicit_zero_points_supported() {
        let (mut graph, dq, q) = make_pair_graph(("s", None), ("s", None));
        graph
            .add_initializer(Initializer::scalar("s", ElemType::Float, 0.5))
            .unwrap();

        assert!(is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }

    #[test]
    fn test_one_implicit_zero_point_unsupported() {
        let (mut graph, dq, q) = make_pair_graph(("s", Some("z")), ("s", None));
        graph
            .add_initializer(Initializer::scalar("s", ElemType::Float, 0.5))
            .unwrap();
        graph
            .add_initializer(Initializer::scalar("z", ElemType::Uint8, 0.0))
            .unwrap();

        assert!(!is_qdq_pair_supported(
            &graph,
            graph.node(q),
            graph.node(dq)
        ));
    }
}
