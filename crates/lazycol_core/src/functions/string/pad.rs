use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

/// Pad with zeros on the left to `width` characters, keeping a leading sign
/// in front.
fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }

    let (sign, digits) = match s.as_bytes().first() {
        Some(b'+' | b'-') => s.split_at(1),
        _ => ("", s),
    };

    let mut out = String::with_capacity(width);
    out.push_str(sign);
    out.extend(std::iter::repeat_n('0', width - len));
    out.push_str(digits);
    out
}

fn pad(s: &str, width: usize, fill: char, left: bool) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }

    let padding: String = std::iter::repeat_n(fill, width - len).collect();
    if left { padding + s } else { format!("{s}{padding}") }
}

pub fn eval_zfill(input: &Column, width: usize) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(zfill(s, width)))
}

/// Left justify, padding on the right.
pub fn eval_ljust(input: &Column, width: usize, fill: char) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(pad(s, width, fill, false)))
}

/// Right justify, padding on the left.
pub fn eval_rjust(input: &Column, width: usize, fill: char) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(pad(s, width, fill, true)))
}
