//! Selector dispatch by operation type
//!
//! Families never know about each other; an external registry keyed on
//! op-type name decides which selector examines a candidate node.

use std::sync::Arc;

use indexmap::IndexMap;

use super::selectors::{
    BinarySelector, ConvSelector, DropQdqSelector, MatMulSelector, NodeGroupSelector,
    UnarySelector, VariadicSelector,
};

/// Op-type name → selector registry
///
/// Registration order is preserved, so iteration and debugging output stay
/// deterministic.
#[derive(Default)]
pub struct SelectorRegistry {
    selectors: IndexMap<String, Arc<dyn NodeGroupSelector>>,
}

impl SelectorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            selectors: IndexMap::new(),
        }
    }

    /// Register one selector for a set of op types
    ///
    /// A later registration for the same op type replaces the earlier one.
    pub fn register(&mut self, op_types: &[&str], selector: Arc<dyn NodeGroupSelector>) {
        for op_type in op_types {
            self.selectors
                .insert((*op_type).to_string(), Arc::clone(&selector));
        }
    }

    /// Look up the selector for an op type
    pub fn get(&self, op_type: &str) -> Option<&dyn NodeGroupSelector> {
        self.selectors.get(op_type).map(|s| s.as_ref())
    }

    /// Check if an op type has a registered selector
    pub fn contains(&self, op_type: &str) -> bool {
        self.selectors.contains_key(op_type)
    }

    /// Number of registered op types
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Registered op types, in registration order
    pub fn op_types(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(|s| s.as_str())
    }

    /// Registry covering the standard ONNX operation families
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(
            &["Gather", "Reshape", "Transpose", "MaxPool", "Squeeze", "Unsqueeze"],
            Arc::new(DropQdqSelector),
        );
        registry.register(&["AveragePool"], Arc::new(UnarySelector::new(true)));
        registry.register(&["Add", "Mul"], Arc::new(BinarySelector));
        registry.register(&["Concat"], Arc::new(VariadicSelector));
        registry.register(&["Conv"], Arc::new(ConvSelector));
        registry.register(&["MatMul"], Arc::new(MatMulSelector));

        registry
    }
}

impl std::fmt::Debug for SelectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorRegistry")
            .field("op_types", &self.selectors.keys().collect::<Vec<_>>())
            .finish()
    }
}
