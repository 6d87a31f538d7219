use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::executor::{ErrorState, PhysicalUtf8, TernaryExecutor};

/// How many matches to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceCount {
    First(usize),
    All,
}

/// Replace matches of `pattern` in `subject` with `value`, row by row.
///
/// With `literal` both the pattern and the value are used verbatim,
/// otherwise the pattern is a regex and the value may reference capture
/// groups with `$1`.
pub fn eval_replace(
    ctx: &mut EvalContext,
    subject: &Column,
    pattern: &Column,
    value: &Column,
    count: ReplaceCount,
    literal: bool,
) -> Result<Vec<ScalarValue>> {
    let mut error_state = ErrorState::new(true);

    let out = TernaryExecutor::execute::<PhysicalUtf8, PhysicalUtf8, PhysicalUtf8, _>(
        subject,
        pattern,
        value,
        |s, pattern, value, buf| {
            if count == ReplaceCount::First(0) {
                buf.put(s);
                return;
            }

            if literal {
                let out = match count {
                    ReplaceCount::First(n) => s.replacen(pattern, value, n),
                    ReplaceCount::All => s.replace(pattern, value),
                };
                buf.put(out);
                return;
            }

            match ctx.regex(pattern) {
                Ok(regex) => {
                    let out = match count {
                        ReplaceCount::First(n) => regex.replacen(s, n, value),
                        ReplaceCount::All => regex.replace_all(s, value),
                    };
                    buf.put(out.into_owned());
                }
                Err(e) => error_state.set_error(|| e),
            }
        },
    )?;

    error_state.into_result()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::eval::EvalConfig;

    fn run(
        subject: &str,
        pattern: &str,
        value: &str,
        count: ReplaceCount,
        literal: bool,
    ) -> ScalarValue {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let out = eval_replace(
            &mut ctx,
            &Column::from_strs("s", [Some(subject)]),
            &Column::from_strs("p", [Some(pattern)]),
            &Column::from_strs("v", [Some(value)]),
            count,
            literal,
        )
        .unwrap();
        out[0].clone()
    }

    #[test]
    fn replace_cases() {
        let test_cases = [
            (("123abc", r"\d", "-", ReplaceCount::First(1), false), "-23abc"),
            (("123abc", r"\d", "-", ReplaceCount::First(2), false), "--3abc"),
            (("123abc", r"\d", "-", ReplaceCount::First(0), false), "123abc"),
            (("123abc", r"\d", "-", ReplaceCount::All, false), "---abc"),
            (("a.b.c", ".", "_", ReplaceCount::All, true), "a_b_c"),
            (("a.b.c", ".", "_", ReplaceCount::First(1), true), "a_b.c"),
            (("abc", r"(b)", "[$1]", ReplaceCount::All, false), "a[b]c"),
            (("abc", "b", "$1", ReplaceCount::All, true), "a$1c"),
            (("abc", "x", "y", ReplaceCount::All, false), "abc"),
        ];

        for case in test_cases {
            let (s, p, v, count, literal) = case.0;
            let out = run(s, p, v, count, literal);
            assert_eq!(ScalarValue::from(case.1), out, "case: {case:?}");
        }
    }

    #[test]
    fn replace_null_propagates() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let out = eval_replace(
            &mut ctx,
            &Column::from_strs("s", [Some("abc"), None]),
            &Column::from_strs("p", [None, Some("a")]),
            &Column::from_strs("v", [Some("x"), Some("x")]),
            ReplaceCount::All,
            false,
        )
        .unwrap();
        assert_eq!(vec![ScalarValue::Null, ScalarValue::Null], out);
    }
}
