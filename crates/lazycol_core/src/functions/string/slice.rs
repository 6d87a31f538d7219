use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

/// Character based substring.
///
/// A negative offset counts from the end. Start and end are each clipped to
/// the string.
fn slice(s: &str, offset: i64, length: Option<u64>) -> &str {
    let n_chars = s.chars().count() as i64;

    let start = if offset < 0 { n_chars + offset } else { offset };
    let end = match length {
        Some(length) => start.saturating_add(length.min(i64::MAX as u64) as i64),
        None => n_chars,
    };

    let start = start.clamp(0, n_chars) as usize;
    let end = end.clamp(0, n_chars) as usize;
    if start >= end {
        return "";
    }

    let byte_offset = |char_idx: usize| {
        s.char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(s.len())
    };

    &s[byte_offset(start)..byte_offset(end)]
}

pub fn eval_slice(input: &Column, offset: i64, length: Option<u64>) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        buf.put(slice(s, offset, length))
    })
}
