use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::executor::{BinaryExecutor, ErrorState, PhysicalUtf8, UnaryExecutor};

/// Extract a capture group from the first match. Group 0 is the whole match.
pub fn eval_extract(
    ctx: &mut EvalContext,
    input: &Column,
    pattern: &str,
    group_index: usize,
) -> Result<Vec<ScalarValue>> {
    let regex = ctx.regex(pattern)?;

    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        match regex
            .captures(s)
            .and_then(|caps| caps.get(group_index))
        {
            Some(m) => buf.put(m.as_str()),
            None => buf.put_null(),
        }
    })
}

/// Extract all non-overlapping matches into a list.
pub fn eval_extract_all(
    ctx: &mut EvalContext,
    input: &Column,
    pattern: &Column,
) -> Result<Vec<ScalarValue>> {
    let mut error_state = ErrorState::new(true);

    let out = BinaryExecutor::execute::<PhysicalUtf8, PhysicalUtf8, _>(
        input,
        pattern,
        |s, pattern, buf| match ctx.regex(pattern) {
            Ok(regex) => buf.put(ScalarValue::List(
                regex
                    .find_iter(s)
                    .map(|m| ScalarValue::from(m.as_str()))
                    .collect(),
            )),
            Err(e) => error_state.set_error(|| e),
        },
    )?;

    error_state.into_result()?;
    Ok(out)
}

/// Count non-overlapping matches.
pub fn eval_count_match(
    ctx: &mut EvalContext,
    input: &Column,
    pattern: &str,
) -> Result<Vec<ScalarValue>> {
    let regex = ctx.regex(pattern)?;

    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        buf.put(regex.find_iter(s).count() as u32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::eval::EvalConfig;

    #[test]
    fn extract_groups() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let input = Column::from_strs(
            "s",
            [
                Some("http://vote.com/ballon_dor?candidate=messi&ref=news"),
                Some("http://vote.com/ballon_dor?candidat=jorginho&ref=news"),
                None,
            ],
        );

        let out = eval_extract(&mut ctx, &input, r"candidate=(\w+)", 1).unwrap();
        assert_eq!(
            vec![ScalarValue::from("messi"), ScalarValue::Null, ScalarValue::Null],
            out
        );

        let out = eval_extract(&mut ctx, &input, r"candidate=(\w+)", 0).unwrap();
        assert_eq!(ScalarValue::from("candidate=messi"), out[0]);

        // Group that doesn't exist.
        let out = eval_extract(&mut ctx, &input, r"candidate=(\w+)", 2).unwrap();
        assert_eq!(ScalarValue::Null, out[0]);
    }

    #[test]
    fn extract_all_and_count() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let input = Column::from_strs("s", [Some("123 bla 45 asd"), Some("xyz"), None]);
        let pattern = Column::from_strs("p", [Some(r"\d+"), Some(r"\d+"), Some(r"\d+")]);

        let out = eval_extract_all(&mut ctx, &input, &pattern).unwrap();
        assert_eq!(
            vec![
                ScalarValue::List(vec![ScalarValue::from("123"), ScalarValue::from("45")]),
                ScalarValue::List(Vec::new()),
                ScalarValue::Null,
            ],
            out
        );

        let out = eval_count_match(&mut ctx, &input, r"\d").unwrap();
        assert_eq!(
            vec![ScalarValue::UInt32(5), ScalarValue::UInt32(0), ScalarValue::Null],
            out
        );
    }

    #[test]
    fn extract_all_invalid_pattern() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let input = Column::from_strs("s", [Some("abc")]);
        let pattern = Column::from_strs("p", [Some("[")]);

        let err = eval_extract_all(&mut ctx, &input, &pattern).unwrap_err();
        assert!(err.is_compute());
    }
}
