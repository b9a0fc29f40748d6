//! # QDQ Optimizer
//!
//! Quantize/Dequantize (QDQ) subgraph selection for graph-level optimization
//! of quantized models.
//!
//! This crate identifies fusible `DequantizeLinear -> op -> QuantizeLinear`
//! neighborhoods around a candidate node and packages the matched nodes into
//! an ordered selection record consumable by a downstream rewrite pass. It
//! never mutates the graph: matching is a read-only traversal of a node's
//! immediate producers and consumers, and "no match" is an expected outcome,
//! not an error.
//!
//! ## Features
//!
//! - **Structural matching**: arity and fan-out validation shared by every
//!   operation family
//! - **Family selectors**: per-operation rules (drop-pair, unary, binary,
//!   variadic, convolution, matrix-multiply) with element-type constraints
//! - **Selection records**: stable, slot-ordered node groups handed to the
//!   rewrite pass
//!
//! ## Example
//!
//! ```ignore
//! use qdq_optimizer::prelude::*;
//!
//! let registry = SelectorRegistry::standard();
//! let mut finder = NodeGroupFinder::new(&graph, &registry);
//! let selections = finder.run();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod graph;
pub mod qdq;
pub mod tensor;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module - import commonly used types with `use qdq_optimizer::prelude::*`
pub mod prelude {
    pub use crate::error::{OptError, OptResult};
    pub use crate::graph::{Graph, Initializer, Node, NodeIndex};
    pub use crate::qdq::{
        NodeGroupFinder, NodeGroupSelector, NodesToOptimize, NodesToOptimizeBuilder,
        SelectorRegistry, DQ_OP_TYPE, Q_OP_TYPE,
    };
    pub use crate::tensor::{ElemType, TensorDef};
}

// ============================================================================
// Crate-level re-exports
// ============================================================================

pub use error::{OptError, OptResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
