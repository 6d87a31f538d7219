//! Row at a time engine over in-memory columns.
//!
//! Not vectorized and not planned, nodes are evaluated bottom up exactly as
//! they appear in the graph.
use lazycol_error::{LcError, Result};
use tracing::trace;

use super::Engine;
use super::context::EvalContext;
use super::handle::ExprHandle;
use super::node::ExprNode;
use crate::arrays::batch::Batch;
use crate::arrays::column::Column;
use crate::config::eval::EvalConfig;
use crate::functions::cast::cast_column;

/// Output name for literal expressions.
pub const LITERAL_NAME: &str = "literal";

#[derive(Debug, Clone, Default)]
pub struct ReferenceEngine {
    config: EvalConfig,
}

impl ReferenceEngine {
    pub fn new(config: EvalConfig) -> Self {
        ReferenceEngine { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn evaluate_node(&self, ctx: &mut EvalContext, expr: &ExprHandle, batch: &Batch) -> Result<Column> {
        trace!(%expr, "evaluating node");

        match expr.node() {
            ExprNode::Column(name) => batch.column(name).cloned().ok_or_else(|| {
                LcError::compute(format!("Missing column '{name}'"))
                    .with_field("column", name)
            }),
            ExprNode::Literal(value) => Ok(Column::from_scalar(LITERAL_NAME, value.clone())),
            ExprNode::Alias { input, name } => {
                Ok(self.evaluate_node(ctx, input, batch)?.with_name(name))
            }
            ExprNode::Cast {
                input,
                datatype,
                strict,
            } => {
                let column = self.evaluate_node(ctx, input, batch)?;
                cast_column(&column, datatype, *strict)
            }
            ExprNode::Function { function, inputs } => {
                let inputs = inputs
                    .iter()
                    .map(|input| self.evaluate_node(ctx, input, batch))
                    .collect::<Result<Vec<_>>>()?;
                function.evaluate(ctx, inputs)
            }
        }
    }
}

impl Engine for ReferenceEngine {
    fn evaluate(&self, expr: &ExprHandle, batch: &Batch) -> Result<Column> {
        let mut ctx = EvalContext::new(&self.config);
        self.evaluate_node(&mut ctx, expr, batch)
    }
}
