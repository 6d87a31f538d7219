use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;

/// Join every value in the column into a single string.
///
/// Values of any type are rendered with their display form, nulls as
/// "null".
pub fn eval_concat(input: &Column, delimiter: &str) -> ScalarValue {
    let mut out = String::new();

    for (idx, value) in input.values().iter().enumerate() {
        if idx > 0 {
            out.push_str(delimiter);
        }
        match value {
            ScalarValue::Utf8(s) | ScalarValue::Categorical(s) => out.push_str(s),
            other => out.push_str(&other.to_string()),
        }
    }

    ScalarValue::Utf8(out)
}
