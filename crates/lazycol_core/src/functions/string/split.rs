use lazycol_error::{LcError, Result};

use crate::arrays::column::Column;
use crate::arrays::datatype::{DataType, Field, StructTypeMeta};
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

/// Largest number of struct fields a split may produce.
pub const MAX_SPLIT_FIELDS: usize = 65_535;

/// Check split arguments. `num_fields` is the number of output fields, if
/// the split produces a struct.
pub fn validate_split(by: &str, num_fields: Option<usize>) -> Result<()> {
    if by.is_empty() {
        return Err(LcError::argument("Split delimiter must not be empty")
            .with_field("argument", "by"));
    }
    if let Some(num_fields) = num_fields {
        if num_fields == 0 {
            return Err(LcError::argument("Split must produce at least one field")
                .with_field("argument", "n")
                .with_field("value", num_fields));
        }
        if num_fields > MAX_SPLIT_FIELDS {
            return Err(LcError::argument(format!(
                "Split would produce {num_fields} fields, max is {MAX_SPLIT_FIELDS}"
            ))
            .with_field("argument", "n")
            .with_field("value", num_fields));
        }
    }
    Ok(())
}

/// Struct type produced by `split_exact` and `splitn`.
pub fn split_struct_type(num_fields: usize) -> DataType {
    DataType::Struct(Some(StructTypeMeta {
        fields: (0..num_fields)
            .map(|idx| Field::new(field_name(idx), DataType::Utf8))
            .collect(),
    }))
}

fn field_name(idx: usize) -> String {
    format!("field_{idx}")
}

fn split_pieces<'a>(s: &'a str, by: &str, inclusive: bool) -> Vec<&'a str> {
    if inclusive {
        s.split_inclusive(by).collect()
    } else {
        s.split(by).collect()
    }
}

/// Exactly `n + 1` pieces, padding with None and dropping any surplus.
fn split_exact<'a>(s: &'a str, by: &str, n: usize, inclusive: bool) -> Vec<Option<&'a str>> {
    let mut pieces = split_pieces(s, by, inclusive).into_iter();
    (0..=n).map(|_| pieces.next()).collect()
}

/// At most `n` pieces, the last holding the remainder of the string.
fn splitn<'a>(s: &'a str, by: &str, n: usize) -> Vec<Option<&'a str>> {
    let mut pieces = s.splitn(n, by);
    (0..n).map(|_| pieces.next()).collect()
}

fn to_struct(pieces: Vec<Option<&str>>) -> ScalarValue {
    ScalarValue::Struct(
        pieces
            .into_iter()
            .enumerate()
            .map(|(idx, piece)| (field_name(idx), ScalarValue::from(piece)))
            .collect(),
    )
}

pub fn eval_split(input: &Column, by: &str, inclusive: bool) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        buf.put(ScalarValue::List(
            split_pieces(s, by, inclusive)
                .into_iter()
                .map(ScalarValue::from)
                .collect(),
        ))
    })
}

pub fn eval_split_exact(
    input: &Column,
    by: &str,
    n: usize,
    inclusive: bool,
) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        buf.put(to_struct(split_exact(s, by, n, inclusive)))
    })
}

pub fn eval_splitn(input: &Column, by: &str, n: usize) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        buf.put(to_struct(splitn(s, by, n)))
    })
}
