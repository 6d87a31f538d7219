use std::fmt;
use std::sync::Arc;

use lazycol_error::{LcError, Result};

use super::node::ExprNode;
use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::functions::FunctionExpr;

/// Opaque, immutable handle to a node in an expression graph.
///
/// Cloning is cheap, and handles can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprHandle(Arc<ExprNode>);

impl ExprHandle {
    pub fn column(name: impl Into<String>) -> Self {
        Self::from_node(ExprNode::Column(name.into()))
    }

    pub fn literal(value: ScalarValue) -> Self {
        Self::from_node(ExprNode::Literal(value))
    }

    pub fn alias(input: &ExprHandle, name: impl Into<String>) -> Self {
        Self::from_node(ExprNode::Alias {
            input: input.clone(),
            name: name.into(),
        })
    }

    pub fn cast(input: &ExprHandle, datatype: DataType, strict: bool) -> Self {
        Self::from_node(ExprNode::Cast {
            input: input.clone(),
            datatype,
            strict,
        })
    }

    /// Create a function node, checking the function gets the number of
    /// inputs it expects.
    pub fn function(function: impl Into<FunctionExpr>, inputs: Vec<ExprHandle>) -> Result<Self> {
        let function = function.into();
        if inputs.len() != function.num_inputs() {
            return Err(LcError::new("Function called with wrong number of inputs")
                .with_field("function", function.name())
                .with_field("expected", function.num_inputs())
                .with_field("got", inputs.len()));
        }
        Ok(Self::from_node(ExprNode::Function { function, inputs }))
    }

    pub(crate) fn from_node(node: ExprNode) -> Self {
        ExprHandle(Arc::new(node))
    }

    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// Check if two handles point at the same node.
    pub fn ptr_eq(&self, other: &ExprHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
