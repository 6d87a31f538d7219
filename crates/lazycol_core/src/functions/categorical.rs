//! Functions on categorical values.
use lazycol_error::{LcError, Result};

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::engine::context::EvalContext;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoricalFunction {
    LenBytes,
    LenChars,
    StartsWith { prefix: String },
    EndsWith { suffix: String },
}

impl CategoricalFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LenBytes => "len_bytes",
            Self::LenChars => "len_chars",
            Self::StartsWith { .. } => "starts_with",
            Self::EndsWith { .. } => "ends_with",
        }
    }

    pub fn num_inputs(&self) -> usize {
        1
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::StartsWith { prefix } => vec![format!("{prefix:?}")],
            Self::EndsWith { suffix } => vec![format!("{suffix:?}")],
            _ => Vec::new(),
        }
    }

    pub fn evaluate(&self, _ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;
        if input.datatype() != &DataType::Categorical {
            return Err(LcError::compute("Expected a categorical column")
                .with_field("column", input.name())
                .with_field("datatype", input.datatype()));
        }

        let (datatype, values) = match self {
            Self::LenBytes => (
                DataType::UInt32,
                UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
                    buf.put(s.len() as u32)
                })?,
            ),
            Self::LenChars => (
                DataType::UInt32,
                UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
                    buf.put(s.chars().count() as u32)
                })?,
            ),
            Self::StartsWith { prefix } => (
                DataType::Boolean,
                UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
                    buf.put(s.starts_with(prefix.as_str()))
                })?,
            ),
            Self::EndsWith { suffix } => (
                DataType::Boolean,
                UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
                    buf.put(s.ends_with(suffix.as_str()))
                })?,
            ),
        };

        Ok(Column::new(input.name(), datatype, values))
    }
}
