use std::fmt;

use super::handle::ExprHandle;
use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::functions::FunctionExpr;

/// A node in an expression graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Reference to a column by name.
    Column(String),
    Literal(ScalarValue),
    Alias {
        input: ExprHandle,
        name: String,
    },
    Cast {
        input: ExprHandle,
        datatype: DataType,
        strict: bool,
    },
    Function {
        function: FunctionExpr,
        /// The first input is the expression the function was called on.
        inputs: Vec<ExprHandle>,
    },
}

impl ExprNode {
    /// Direct children of this node.
    pub fn inputs(&self) -> &[ExprHandle] {
        match self {
            Self::Column(_) | Self::Literal(_) => &[],
            Self::Alias { input, .. } | Self::Cast { input, .. } => std::slice::from_ref(input),
            Self::Function { inputs, .. } => inputs,
        }
    }
}

struct LiteralDisplay<'a>(&'a ScalarValue);

impl fmt::Display for LiteralDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ScalarValue::Utf8(s) | ScalarValue::Categorical(s) => write!(f, "{s:?}"),
            ScalarValue::Binary(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => write!(f, "col({name:?})"),
            Self::Literal(value) => write!(f, "lit({})", LiteralDisplay(value)),
            Self::Alias { input, name } => write!(f, "{input}.alias({name:?})"),
            Self::Cast {
                input,
                datatype,
                strict,
            } => write!(f, "{input}.cast({datatype}, strict={strict})"),
            Self::Function { function, inputs } => {
                let (first, rest) = match inputs.split_first() {
                    Some((first, rest)) => (Some(first), rest),
                    None => (None, &[][..]),
                };
                if let Some(first) = first {
                    write!(f, "{first}.")?;
                }
                write!(f, "{}.{}(", function.namespace(), function.name())?;

                let args = rest
                    .iter()
                    .map(|input| input.to_string())
                    .chain(function.params());
                for (idx, arg) in args.enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
