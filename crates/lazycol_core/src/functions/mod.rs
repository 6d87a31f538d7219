pub mod array;
pub mod binary;
pub mod cast;
pub mod categorical;
pub mod datetime;
pub mod encoding;
pub mod executor;
pub mod list;
pub mod string;
pub mod structs;
pub mod temporal;

use array::ArrayFunction;
use binary::BinaryFunction;
use categorical::CategoricalFunction;
use datetime::DatetimeFunction;
use lazycol_error::{LcError, Result};
use list::ListFunction;
use string::StringFunction;
use structs::StructFunction;

use crate::arrays::column::Column;
use crate::engine::context::EvalContext;

/// A function node in an expression graph, grouped by namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionExpr {
    String(StringFunction),
    Binary(BinaryFunction),
    List(ListFunction),
    Array(ArrayFunction),
    Struct(StructFunction),
    Datetime(DatetimeFunction),
    Categorical(CategoricalFunction),
}

impl FunctionExpr {
    /// Namespace the function is accessed through, e.g. "str" in
    /// `col("a").str.lengths()`.
    pub const fn namespace(&self) -> &'static str {
        match self {
            Self::String(_) => "str",
            Self::Binary(_) => "bin",
            Self::List(_) => "list",
            Self::Array(_) => "arr",
            Self::Struct(_) => "struct",
            Self::Datetime(_) => "dt",
            Self::Categorical(_) => "cat",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String(f) => f.name(),
            Self::Binary(f) => f.name(),
            Self::List(f) => f.name(),
            Self::Array(f) => f.name(),
            Self::Struct(f) => f.name(),
            Self::Datetime(f) => f.name(),
            Self::Categorical(f) => f.name(),
        }
    }

    /// Number of expression inputs, including the one the namespace was
    /// accessed on.
    pub fn num_inputs(&self) -> usize {
        match self {
            Self::String(f) => f.num_inputs(),
            Self::Binary(f) => f.num_inputs(),
            Self::List(f) => f.num_inputs(),
            Self::Array(f) => f.num_inputs(),
            Self::Struct(f) => f.num_inputs(),
            Self::Datetime(f) => f.num_inputs(),
            Self::Categorical(f) => f.num_inputs(),
        }
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::String(f) => f.params(),
            Self::Binary(f) => f.params(),
            Self::List(f) => f.params(),
            Self::Array(f) => f.params(),
            Self::Struct(f) => f.params(),
            Self::Datetime(f) => f.params(),
            Self::Categorical(f) => f.params(),
        }
    }

    /// Evaluate the function on already evaluated inputs.
    ///
    /// Single row inputs are broadcast to the length of the others.
    pub fn evaluate(&self, ctx: &mut EvalContext, inputs: Vec<Column>) -> Result<Column> {
        if inputs.len() != self.num_inputs() {
            return Err(LcError::new("Wrong number of function inputs")
                .with_field("function", self.name())
                .with_field("expected", self.num_inputs())
                .with_field("got", inputs.len()));
        }
        let inputs = broadcast_inputs(inputs)?;

        match self {
            Self::String(f) => f.evaluate(ctx, &inputs),
            Self::Binary(f) => f.evaluate(ctx, &inputs),
            Self::List(f) => f.evaluate(ctx, &inputs),
            Self::Array(f) => f.evaluate(ctx, &inputs),
            Self::Struct(f) => f.evaluate(ctx, &inputs),
            Self::Datetime(f) => f.evaluate(ctx, &inputs),
            Self::Categorical(f) => f.evaluate(ctx, &inputs),
        }
    }
}

impl From<StringFunction> for FunctionExpr {
    fn from(value: StringFunction) -> Self {
        FunctionExpr::String(value)
    }
}

impl From<BinaryFunction> for FunctionExpr {
    fn from(value: BinaryFunction) -> Self {
        FunctionExpr::Binary(value)
    }
}

impl From<ListFunction> for FunctionExpr {
    fn from(value: ListFunction) -> Self {
        FunctionExpr::List(value)
    }
}

impl From<ArrayFunction> for FunctionExpr {
    fn from(value: ArrayFunction) -> Self {
        FunctionExpr::Array(value)
    }
}

impl From<StructFunction> for FunctionExpr {
    fn from(value: StructFunction) -> Self {
        FunctionExpr::Struct(value)
    }
}

impl From<DatetimeFunction> for FunctionExpr {
    fn from(value: DatetimeFunction) -> Self {
        FunctionExpr::Datetime(value)
    }
}

impl From<CategoricalFunction> for FunctionExpr {
    fn from(value: CategoricalFunction) -> Self {
        FunctionExpr::Categorical(value)
    }
}

/// Get a function input by position.
pub(crate) fn input_at(inputs: &[Column], idx: usize) -> Result<&Column> {
    inputs.get(idx).ok_or_else(|| {
        LcError::new("Missing function input")
            .with_field("index", idx)
            .with_field("num_inputs", inputs.len())
    })
}

/// Broadcast single row inputs to the length of the other inputs.
fn broadcast_inputs(inputs: Vec<Column>) -> Result<Vec<Column>> {
    if inputs.len() < 2 {
        return Ok(inputs);
    }
    let len = inputs
        .iter()
        .map(|c| c.len())
        .find(|&len| len != 1)
        .unwrap_or(1);

    inputs.into_iter().map(|c| c.broadcast_to(len)).collect()
}
