use lazycol_error::Result;

use super::Expr;
use crate::functions::categorical::CategoricalFunction;

/// Operations on categorical expressions.
#[derive(Debug, Clone, Copy)]
pub struct CategoricalNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> CategoricalNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        CategoricalNameSpace { expr }
    }

    pub fn len_bytes(&self) -> Result<Expr> {
        self.expr.apply(CategoricalFunction::LenBytes, [])
    }

    pub fn len_chars(&self) -> Result<Expr> {
        self.expr.apply(CategoricalFunction::LenChars, [])
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Result<Expr> {
        self.expr.apply(
            CategoricalFunction::StartsWith {
                prefix: prefix.into(),
            },
            [],
        )
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Result<Expr> {
        self.expr.apply(
            CategoricalFunction::EndsWith {
                suffix: suffix.into(),
            },
            [],
        )
    }
}
