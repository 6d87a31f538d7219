use lazycol_error::{LcError, Result};

use super::Expr;
use crate::functions::structs::StructFunction;

/// Operations on struct expressions.
#[derive(Debug, Clone, Copy)]
pub struct StructNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> StructNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        StructNameSpace { expr }
    }

    /// Retrieve a single field.
    ///
    /// A missing field is only detected when evaluated.
    pub fn field(&self, name: impl Into<String>) -> Result<Expr> {
        self.expr
            .apply(StructFunction::Field { name: name.into() }, [])
    }

    /// Rename all fields, in order.
    pub fn rename_fields<S: Into<String>>(
        &self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Expr> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LcError::argument("rename_fields requires at least one name")
                .with_field("argument", "names"));
        }
        if let Some(idx) = names.iter().position(|n| n.is_empty()) {
            return Err(LcError::argument("Field names cannot be empty")
                .with_field("argument", "names")
                .with_field("index", idx));
        }

        self.expr
            .apply(StructFunction::RenameFields { names }, [])
    }
}
