//! Graph storage and traversal
//!
//! This module provides the in-memory graph the selection engine works on:
//!
//! - [`Graph`]: arena-backed node store with O(1) producer/consumer lookups
//! - [`Node`]: a graph-owned operation with slot-ordered inputs and outputs
//! - [`NodeIndex`]: stable node identity within its owning graph
//!
//! # Overview
//!
//! Nodes are owned by the [`Graph`] and identified by a permanent integer
//! index. Matching works on shared references; after a successful match the
//! same index is used to re-resolve a mutable handle via
//! [`Graph::node_mut`], so the matching phase and the rewrite phase never
//! alias.
//!
//! # Example
//!
//! ```ignore
//! use qdq_optimizer::graph::{Graph, Node};
//! use qdq_optimizer::tensor::{ElemType, TensorDef};
//!
//! let mut graph = Graph::new();
//! let conv = graph.add_node(Node::new(
//!     "conv_0",
//!     "Conv",
//!     vec![Some(TensorDef::new("x", ElemType::Float))],
//!     vec![TensorDef::new("conv_out", ElemType::Float)],
//! ))?;
//!
//! let producers = graph.find_producers_by_type(graph.node(conv), "DequantizeLinear");
//! ```
//!
//! # Maps
//!
//! The graph maintains several maps for O(1) lookups:
//!
//! | Map | Description |
//! |-----|-------------|
//! | `producer_map` | tensor name → producing node index |
//! | `consumer_map` | tensor name → consuming node indices |
//! | `initializer_map` | name → constant tensor data |

pub mod queries;
pub mod store;

// Re-export main types
pub use store::{Graph, Initializer, Node, NodeIndex};
