//! QDQ subgraph selection
//!
//! Identifies fusible `DequantizeLinear -> op -> QuantizeLinear`
//! neighborhoods and packages them into [`NodesToOptimize`] records:
//!
//! - [`NodeGroupSelector`]: per-operation-family matching strategy
//! - [`selectors`]: the six family implementations and the shared
//!   structural checker
//! - [`SelectorRegistry`]: op-type name → selector dispatch
//! - [`NodeGroupFinder`]: candidate iteration over a whole graph
//!
//! Matching is read-only and stateless. A selector either produces a
//! complete, slot-ordered record or nothing; there is no partial result and
//! no diagnostic payload on failure.

pub mod finder;
pub mod registry;
pub mod selection;
pub mod selectors;
pub mod util;

// Re-export main types
pub use finder::{FinderStats, NodeGroupFinder};
pub use registry::SelectorRegistry;
pub use selection::{NodesToOptimize, NodesToOptimizeBuilder};
pub use selectors::{
    BinarySelector, ConvSelector, DropQdqSelector, MatMulSelector, NodeGroupSelector,
    UnarySelector, VariadicSelector,
};

/// Op type of dequantize nodes
pub const DQ_OP_TYPE: &str = "DequantizeLinear";

/// Op type of quantize nodes
pub const Q_OP_TYPE: &str = "QuantizeLinear";
