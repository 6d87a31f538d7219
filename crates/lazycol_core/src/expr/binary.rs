use lazycol_error::Result;

use super::{Expr, ExprInput, lit_or_col};
use crate::functions::binary::BinaryFunction;
use crate::functions::encoding::BinaryEncoding;

/// Operations on binary expressions.
#[derive(Debug, Clone, Copy)]
pub struct BinaryNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> BinaryNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        BinaryNameSpace { expr }
    }

    /// Check if values contain the given bytes.
    pub fn contains(&self, literal: impl AsRef<[u8]>) -> Result<Expr> {
        self.expr.apply(
            BinaryFunction::Contains {
                literal: literal.as_ref().to_vec(),
            },
            [],
        )
    }

    pub fn starts_with(&self, prefix: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(BinaryFunction::StartsWith, [lit_or_col(prefix, true)])
    }

    pub fn ends_with(&self, suffix: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(BinaryFunction::EndsWith, [lit_or_col(suffix, true)])
    }

    /// Encode as "hex" or "base64" text.
    pub fn encode(&self, encoding: &str) -> Result<Expr> {
        let encoding: BinaryEncoding = encoding.parse()?;
        self.expr.apply(BinaryFunction::Encode { encoding }, [])
    }

    /// Decode bytes holding "hex" or "base64" text.
    pub fn decode(&self, encoding: &str, strict: bool) -> Result<Expr> {
        let encoding: BinaryEncoding = encoding.parse()?;
        self.expr
            .apply(BinaryFunction::Decode { encoding, strict }, [])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    #[test]
    fn display() {
        let b = col("b");
        let cases = [
            (
                b.bin().contains(b"\x00ab").unwrap(),
                r#"col("b").bin.contains(b"\x00ab")"#,
            ),
            (
                b.bin().starts_with(&b"ab"[..]).unwrap(),
                r#"col("b").bin.starts_with(lit(b"ab"))"#,
            ),
            (
                b.bin().ends_with(col("suffix")).unwrap(),
                r#"col("b").bin.ends_with(col("suffix"))"#,
            ),
            (b.bin().encode("hex").unwrap(), r#"col("b").bin.encode("hex")"#),
            (
                b.bin().decode("base64", true).unwrap(),
                r#"col("b").bin.decode("base64", strict=true)"#,
            ),
        ];

        for case in cases {
            assert_eq!(case.1, case.0.to_string(), "case: {case:?}");
        }
    }

    #[test]
    fn unknown_encoding() {
        let err = col("b").bin().encode("base85").unwrap_err();
        assert!(err.is_argument());
        assert_eq!(Some("base85"), err.field("value"));
    }
}
