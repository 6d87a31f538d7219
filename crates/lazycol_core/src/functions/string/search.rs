use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::executor::{BinaryExecutor, ErrorState, PhysicalUtf8};

/// Check if the subject contains the pattern.
///
/// Patterns are regular expressions unless `literal` is set. An invalid
/// pattern errors when `strict`, otherwise the row is null.
pub fn eval_contains(
    ctx: &mut EvalContext,
    subject: &Column,
    pattern: &Column,
    literal: bool,
    strict: bool,
) -> Result<Vec<ScalarValue>> {
    let mut error_state = ErrorState::new(strict);

    let out = BinaryExecutor::execute::<PhysicalUtf8, PhysicalUtf8, _>(
        subject,
        pattern,
        |s, pattern, buf| {
            if literal {
                buf.put(s.contains(pattern));
                return;
            }
            match ctx.regex(pattern) {
                Ok(regex) => buf.put(regex.is_match(s)),
                Err(e) => error_state.set_error(|| e),
            }
        },
    )?;

    error_state.into_result()?;
    Ok(out)
}

pub fn eval_starts_with(subject: &Column, prefix: &Column) -> Result<Vec<ScalarValue>> {
    BinaryExecutor::execute::<PhysicalUtf8, PhysicalUtf8, _>(subject, prefix, |s, prefix, buf| {
        buf.put(s.starts_with(prefix))
    })
}

pub fn eval_ends_with(subject: &Column, suffix: &Column) -> Result<Vec<ScalarValue>> {
    BinaryExecutor::execute::<PhysicalUtf8, PhysicalUtf8, _>(subject, suffix, |s, suffix, buf| {
        buf.put(s.ends_with(suffix))
    })
}
