//! Functions on fixed width array values.
//!
//! Array values are held the same way as lists, so element access is shared
//! with the list functions.
use lazycol_error::{LcError, Result};

use super::input_at;
use super::list::ListFunction;
use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::engine::context::EvalContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayFunction {
    /// Negative indices count from the end.
    Get { index: i64 },
    Join { separator: String },
    /// Inputs: array, item.
    Contains,
    /// Same values typed as a variable length list.
    ToList,
}

impl ArrayFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Get { index: 0 } => "first",
            Self::Get { index: -1 } => "last",
            Self::Get { .. } => "get",
            Self::Join { .. } => "join",
            Self::Contains => "contains",
            Self::ToList => "to_list",
        }
    }

    pub fn num_inputs(&self) -> usize {
        match self {
            Self::Contains => 2,
            _ => 1,
        }
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Get { index } if *index != 0 && *index != -1 => vec![index.to_string()],
            Self::Join { separator } => vec![format!("{separator:?}")],
            _ => Vec::new(),
        }
    }

    pub fn evaluate(&self, ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;
        let DataType::Array(Some(meta)) = input.datatype() else {
            return Err(LcError::compute("Expected an array column")
                .with_field("column", input.name())
                .with_field("datatype", input.datatype()));
        };

        let list_function = match self {
            Self::Get { index } => ListFunction::Get { index: *index },
            Self::Join { separator } => ListFunction::Join {
                separator: separator.clone(),
            },
            Self::Contains => ListFunction::Contains,
            Self::ToList => {
                let datatype = DataType::list((*meta.datatype).clone());
                return Ok(Column::new(input.name(), datatype, input.values().to_vec()));
            }
        };

        list_function.evaluate(ctx, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::scalar::ScalarValue;
    use crate::config::eval::EvalConfig;

    fn array_column() -> Column {
        Column::new(
            "a",
            DataType::array(DataType::Int64, 2).unwrap(),
            vec![
                ScalarValue::List(vec![ScalarValue::Int64(1), ScalarValue::Int64(2)]),
                ScalarValue::Null,
                ScalarValue::List(vec![ScalarValue::Null, ScalarValue::Int64(4)]),
            ],
        )
    }

    #[test]
    fn get_and_contains() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let cases = [
            (0, vec![ScalarValue::Int64(1), ScalarValue::Null, ScalarValue::Null]),
            (-1, vec![ScalarValue::Int64(2), ScalarValue::Null, ScalarValue::Int64(4)]),
            (5, vec![ScalarValue::Null, ScalarValue::Null, ScalarValue::Null]),
        ];

        for case in cases {
            let out = ArrayFunction::Get { index: case.0 }
                .evaluate(&mut ctx, &[array_column()])
                .unwrap();
            assert_eq!(&DataType::Int64, out.datatype());
            assert_eq!(case.1.as_slice(), out.values(), "case: {case:?}");
        }

        let item = Column::new("item", DataType::Int32, vec![ScalarValue::Int32(4); 3]);
        let out = ArrayFunction::Contains
            .evaluate(&mut ctx, &[array_column(), item])
            .unwrap();
        assert_eq!(
            &[ScalarValue::Boolean(false), ScalarValue::Null, ScalarValue::Boolean(true)],
            out.values()
        );
    }

    #[test]
    fn to_list_keeps_values() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let out = ArrayFunction::ToList
            .evaluate(&mut ctx, &[array_column()])
            .unwrap();
        assert_eq!(&DataType::list(DataType::Int64), out.datatype());
        assert_eq!(array_column().values(), out.values());
    }

    #[test]
    fn requires_array_column() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let list = Column::new(
            "l",
            DataType::list(DataType::Int64),
            vec![ScalarValue::List(vec![ScalarValue::Int64(1)])],
        );
        let err = ArrayFunction::ToList.evaluate(&mut ctx, &[list]).unwrap_err();
        assert!(err.is_compute());
    }
}
