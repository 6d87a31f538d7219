pub mod context;
pub mod handle;
pub mod node;
pub mod reference;

use std::fmt::Debug;

use handle::ExprHandle;
use lazycol_error::Result;

use crate::arrays::batch::Batch;
use crate::arrays::column::Column;
use crate::expr::Expr;

/// Evaluates expression graphs against batches.
///
/// Graphs are never mutated by evaluation, the same graph may be evaluated
/// any number of times from any thread.
pub trait Engine: Debug + Sync + Send {
    /// Evaluate a single expression.
    ///
    /// Literal expressions produce a single row.
    fn evaluate(&self, expr: &ExprHandle, batch: &Batch) -> Result<Column>;

    /// Evaluate multiple expressions into a new batch.
    ///
    /// Single row outputs are broadcast to the length of the longest output.
    fn select(&self, exprs: &[Expr], batch: &Batch) -> Result<Batch> {
        let columns = exprs
            .iter()
            .map(|expr| self.evaluate(expr.handle(), batch))
            .collect::<Result<Vec<_>>>()?;

        let len = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let columns = columns
            .into_iter()
            .map(|c| c.broadcast_to(len))
            .collect::<Result<Vec<_>>>()?;

        Batch::try_new(columns)
    }
}
