use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, ScalarStorage, storage_mismatch};

/// One row per character, flattened across rows.
///
/// Null and empty strings each produce a single null row.
pub fn eval_explode(input: &Column) -> Result<Vec<ScalarValue>> {
    let mut out = Vec::with_capacity(input.len());

    for value in input.values() {
        if value.is_null() {
            out.push(ScalarValue::Null);
            continue;
        }
        let s = PhysicalUtf8::get(value)
            .ok_or_else(|| storage_mismatch::<PhysicalUtf8>(input, value))?;
        if s.is_empty() {
            out.push(ScalarValue::Null);
        } else {
            out.extend(s.chars().map(|c| ScalarValue::Utf8(c.to_string())));
        }
    }

    Ok(out)
}
