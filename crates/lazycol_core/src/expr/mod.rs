//! Public expression API.
//!
//! An `Expr` wraps an engine handle. Building expressions never evaluates
//! anything; arguments that can be checked up front are validated when the
//! expression is built.
pub mod array;
pub mod binary;
pub mod categorical;
pub mod datetime;
pub mod list;
pub mod meta;
pub mod string;
pub mod structs;

use std::fmt;

use array::ArrayNameSpace;
use binary::BinaryNameSpace;
use categorical::CategoricalNameSpace;
use datetime::DateTimeNameSpace;
use lazycol_error::{LcError, Result};
use list::ListNameSpace;
use meta::MetaNameSpace;
use string::StringNameSpace;
use structs::StructNameSpace;

use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::engine::handle::ExprHandle;
use crate::functions::FunctionExpr;
pub use crate::functions::string::to_temporal::StrptimeOptions;

/// A deferred computation over columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    handle: ExprHandle,
}

/// Lift an engine handle into an expression.
pub fn wrap(handle: ExprHandle) -> Expr {
    Expr { handle }
}

/// Reference a column by name.
pub fn col(name: impl Into<String>) -> Expr {
    wrap(ExprHandle::column(name))
}

/// A literal value.
pub fn lit(value: impl Into<ScalarValue>) -> Expr {
    wrap(ExprHandle::literal(value.into()))
}

/// Something that can be used where an expression is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprInput {
    Expr(Expr),
    Scalar(ScalarValue),
}

impl From<Expr> for ExprInput {
    fn from(value: Expr) -> Self {
        ExprInput::Expr(value)
    }
}

impl From<&Expr> for ExprInput {
    fn from(value: &Expr) -> Self {
        ExprInput::Expr(value.clone())
    }
}

impl From<ScalarValue> for ExprInput {
    fn from(value: ScalarValue) -> Self {
        ExprInput::Scalar(value)
    }
}

macro_rules! impl_expr_input_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ExprInput {
                fn from(value: $ty) -> Self {
                    ExprInput::Scalar(value.into())
                }
            }
        )*
    };
}

impl_expr_input_from_scalar!(&str, String, &[u8], Vec<u8>, bool, i32, i64, u32, f64);

impl ExprInput {
    /// The string value if this is a plain string scalar.
    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            ExprInput::Scalar(ScalarValue::Utf8(s)) => Some(s),
            _ => None,
        }
    }
}

/// Turn an input into an expression.
///
/// Scalars become literals, except strings when `str_to_lit` is false, which
/// are treated as column names.
pub fn lit_or_col(input: impl Into<ExprInput>, str_to_lit: bool) -> Expr {
    match input.into() {
        ExprInput::Expr(expr) => expr,
        ExprInput::Scalar(ScalarValue::Utf8(s)) if !str_to_lit => col(s),
        ExprInput::Scalar(value) => lit(value),
    }
}

impl Expr {
    pub fn handle(&self) -> &ExprHandle {
        &self.handle
    }

    pub fn into_handle(self) -> ExprHandle {
        self.handle
    }

    /// Rename the output of this expression.
    pub fn alias(&self, name: impl Into<String>) -> Expr {
        wrap(ExprHandle::alias(&self.handle, name))
    }

    /// Cast to another type.
    ///
    /// The target type must be fully parameterized.
    pub fn cast(&self, datatype: DataType, strict: bool) -> Result<Expr> {
        if !datatype.is_fully_parameterized() {
            return Err(LcError::argument(format!(
                "Cannot cast to {datatype}, the type must be fully parameterized"
            ))
            .with_field("argument", "dtype")
            .with_field("value", &datatype));
        }
        Ok(wrap(ExprHandle::cast(&self.handle, datatype, strict)))
    }

    pub fn str(&self) -> StringNameSpace<'_> {
        StringNameSpace::new(self)
    }

    pub fn bin(&self) -> BinaryNameSpace<'_> {
        BinaryNameSpace::new(self)
    }

    pub fn list(&self) -> ListNameSpace<'_> {
        ListNameSpace::new(self)
    }

    pub fn arr(&self) -> ArrayNameSpace<'_> {
        ArrayNameSpace::new(self)
    }

    pub fn struct_(&self) -> StructNameSpace<'_> {
        StructNameSpace::new(self)
    }

    pub fn dt(&self) -> DateTimeNameSpace<'_> {
        DateTimeNameSpace::new(self)
    }

    pub fn cat(&self) -> CategoricalNameSpace<'_> {
        CategoricalNameSpace::new(self)
    }

    pub fn meta(&self) -> MetaNameSpace<'_> {
        MetaNameSpace::new(self)
    }

    /// Apply a function with this expression as the first input.
    pub(crate) fn apply(
        &self,
        function: impl Into<FunctionExpr>,
        args: impl IntoIterator<Item = Expr>,
    ) -> Result<Expr> {
        let inputs = std::iter::once(self.handle.clone())
            .chain(args.into_iter().map(Expr::into_handle))
            .collect();
        Ok(wrap(ExprHandle::function(function, inputs)?))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.handle.fmt(f)
    }
}
