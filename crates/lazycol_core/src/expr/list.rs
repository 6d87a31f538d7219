use lazycol_error::Result;

use super::{Expr, ExprInput, lit_or_col};
use crate::functions::list::ListFunction;

/// Operations on list expressions.
#[derive(Debug, Clone, Copy)]
pub struct ListNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> ListNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        ListNameSpace { expr }
    }

    pub fn lengths(&self) -> Result<Expr> {
        self.expr.apply(ListFunction::Lengths, [])
    }

    /// Element at `index`, negative indices count from the end. Out of
    /// bounds produces null.
    pub fn get(&self, index: i64) -> Result<Expr> {
        self.expr.apply(ListFunction::Get { index }, [])
    }

    pub fn first(&self) -> Result<Expr> {
        self.get(0)
    }

    pub fn last(&self) -> Result<Expr> {
        self.get(-1)
    }

    /// Join string elements, skipping nulls.
    pub fn join(&self, separator: &str) -> Result<Expr> {
        self.expr.apply(
            ListFunction::Join {
                separator: separator.to_string(),
            },
            [],
        )
    }

    pub fn contains(&self, item: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(ListFunction::Contains, [lit_or_col(item, true)])
    }
}
