use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

/// Length in bytes.
pub fn eval_lengths(input: &Column) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(s.len() as u32))
}

/// Length in unicode codepoints.
pub fn eval_n_chars(input: &Column) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(s.chars().count() as u32))
}
