//! Functions on list values.
use lazycol_error::Result;

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::cast::cast_scalar;
use crate::functions::executor::{BinaryExecutor, PhysicalAny, PhysicalList, UnaryExecutor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFunction {
    Lengths,
    /// Negative indices count from the end.
    Get { index: i64 },
    Join { separator: String },
    /// Inputs: list, item.
    Contains,
}

/// Resolve a possibly negative index against a list length.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let idx = if index < 0 {
        (len as i64).checked_add(index)?
    } else {
        index
    };
    usize::try_from(idx).ok().filter(|&idx| idx < len)
}

/// Bring a numeric item to the list's element type so that `1_i32` finds
/// `1_i64`. Returns None when the cast loses information, such an item can
/// never be an element.
fn align_item(item: &ScalarValue, inner: Option<&DataType>) -> Option<ScalarValue> {
    let item_type = item.datatype();
    match inner {
        Some(inner) if *inner != item_type && inner.is_numeric() && item_type.is_numeric() => {
            let cast = cast_scalar(item, inner)?;
            let back = cast_scalar(&cast, &item_type)?;
            (back == *item).then_some(cast)
        }
        _ => Some(item.clone()),
    }
}

impl ListFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lengths => "lengths",
            Self::Get { index: 0 } => "first",
            Self::Get { index: -1 } => "last",
            Self::Get { .. } => "get",
            Self::Join { .. } => "join",
            Self::Contains => "contains",
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

    pub fn evaluate(&self, _ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;

        let (datatype, values) = match self {
            Self::Lengths => (
                DataType::UInt32,
                UnaryExecutor::execute::<PhysicalList, _>(input, |list, buf| {
                    buf.put(list.len() as u32)
                })?,
            ),
            Self::Get { index } => (
                input
                    .datatype()
                    .inner_datatype()
                    .cloned()
                    .unwrap_or(DataType::Unknown),
                UnaryExecutor::execute::<PhysicalList, _>(input, |list, buf| {
                    match resolve_index(*index, list.len()) {
                        Some(idx) => buf.put(list[idx].clone()),
                        None => buf.put_null(),
                    }
                })?,
            ),
            Self::Join { separator } => (
                DataType::Utf8,
                UnaryExecutor::execute::<PhysicalList, _>(input, |list, buf| {
                    let parts: Vec<String> = list
                        .iter()
                        .filter(|v| !v.is_null())
                        .map(|v| match v {
                            ScalarValue::Utf8(s) | ScalarValue::Categorical(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect();
                    buf.put(parts.join(separator))
                })?,
            ),
            Self::Contains => {
                let inner = input.datatype().inner_datatype();
                (
                    DataType::Boolean,
                    BinaryExecutor::execute::<PhysicalList, PhysicalAny, _>(
                        input,
                        input_at(inputs, 1)?,
                        |list, item, buf| match align_item(item, inner) {
                            Some(item) => buf.put(list.contains(&item)),
                            None => buf.put(false),
                        },
                    )?,
                )
            }
        };

        Ok(Column::new(input.name(), datatype, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::eval::EvalConfig;

    fn list_column() -> Column {
        Column::new(
            "l",
            DataType::list(DataType::Utf8),
            vec![
                ScalarValue::List(vec![
                    ScalarValue::from("a"),
                    ScalarValue::Null,
                    ScalarValue::from("c"),
                ]),
                ScalarValue::List(Vec::new()),
                ScalarValue::Null,
            ],
        )
    }

    #[test]
    fn resolve_index_cases() {
        let test_cases = [
            ((0, 3), Some(0)),
            ((2, 3), Some(2)),
            ((3, 3), None),
            ((-1, 3), Some(2)),
            ((-3, 3), Some(0)),
            ((-4, 3), None),
            ((0, 0), None),
        ];

        for case in test_cases {
            let out = resolve_index(case.0.0, case.0.1);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }

    #[test]
    fn get_first_last() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let test_cases = [
            (0, vec![ScalarValue::from("a"), ScalarValue::Null, ScalarValue::Null]),
            (-1, vec![ScalarValue::from("c"), ScalarValue::Null, ScalarValue::Null]),
            (1, vec![ScalarValue::Null, ScalarValue::Null, ScalarValue::Null]),
        ];

        for case in test_cases {
            let out = ListFunction::Get { index: case.0 }
                .evaluate(&mut ctx, &[list_column()])
                .unwrap();
            assert_eq!(&DataType::Utf8, out.datatype());
            assert_eq!(case.1.as_slice(), out.values(), "case: {case:?}");
        }
    }

    #[test]
    fn lengths_join_contains() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let out = ListFunction::Lengths.evaluate(&mut ctx, &[list_column()]).unwrap();
        assert_eq!(
            &[ScalarValue::UInt32(3), ScalarValue::UInt32(0), ScalarValue::Null],
            out.values()
        );

        let out = ListFunction::Join {
            separator: "-".to_string(),
        }
        .evaluate(&mut ctx, &[list_column()])
        .unwrap();
        assert_eq!(
            &[ScalarValue::from("a-c"), ScalarValue::from(""), ScalarValue::Null],
            out.values()
        );

        let item = Column::from_strs("item", [Some("c"), Some("c"), Some("c")]);
        let out = ListFunction::Contains
            .evaluate(&mut ctx, &[list_column(), item])
            .unwrap();
        assert_eq!(
            &[ScalarValue::Boolean(true), ScalarValue::Boolean(false), ScalarValue::Null],
            out.values()
        );
    }

    #[test]
    fn contains_casts_numeric_items() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        let ints = Column::new(
            "l",
            DataType::list(DataType::Int64),
            vec![
                ScalarValue::List(vec![ScalarValue::Int64(1), ScalarValue::Int64(2)]),
                ScalarValue::List(vec![ScalarValue::Int64(3)]),
            ],
        );

        let test_cases = [
            (ScalarValue::Int32(1), vec![true, false]),
            (ScalarValue::UInt8(3), vec![false, true]),
            (ScalarValue::Float64(2.0), vec![true, false]),
            (ScalarValue::Float64(1.5), vec![false, false]),
            (ScalarValue::from("1"), vec![false, false]),
        ];

        for case in test_cases {
            let item = Column::new("item", case.0.datatype(), vec![case.0.clone(); 2]);
            let out = ListFunction::Contains
                .evaluate(&mut ctx, &[ints.clone(), item])
                .unwrap();
            let expected: Vec<_> = case.1.iter().map(|&b| ScalarValue::Boolean(b)).collect();
            assert_eq!(expected.as_slice(), out.values(), "case: {case:?}");
        }
    }
}
