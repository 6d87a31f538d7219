use lazycol_error::Result;

use super::{Expr, ExprInput, lit_or_col};
use crate::functions::array::ArrayFunction;

/// Operations on fixed width array expressions.
#[derive(Debug, Clone, Copy)]
pub struct ArrayNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> ArrayNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        ArrayNameSpace { expr }
    }

    /// Element at `index`, negative indices count from the end. Out of
    /// bounds produces null.
    pub fn get(&self, index: i64) -> Result<Expr> {
        self.expr.apply(ArrayFunction::Get { index }, [])
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
            ArrayFunction::Join {
                separator: separator.to_string(),
            },
            [],
        )
    }

    pub fn contains(&self, item: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(ArrayFunction::Contains, [lit_or_col(item, true)])
    }

    pub fn to_list(&self) -> Result<Expr> {
        self.expr.apply(ArrayFunction::ToList, [])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    #[test]
    fn display() {
        let a = col("a");
        let cases = [
            (a.arr().first().unwrap(), r#"col("a").arr.first()"#),
            (a.arr().get(1).unwrap(), r#"col("a").arr.get(1)"#),
            (a.arr().join("|").unwrap(), r#"col("a").arr.join("|")"#),
            (
                a.arr().contains(3_i64).unwrap(),
                r#"col("a").arr.contains(lit(3))"#,
            ),
            (a.arr().to_list().unwrap(), r#"col("a").arr.to_list()"#),
        ];

        for case in cases {
            assert_eq!(case.1, case.0.to_string(), "case: {case:?}");
        }
    }
}
