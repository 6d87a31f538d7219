use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

/// Which end(s) of the string to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripSide {
    Both,
    Start,
    End,
}

impl StripSide {
    pub const fn function_name(&self) -> &'static str {
        match self {
            Self::Both => "strip",
            Self::Start => "lstrip",
            Self::End => "rstrip",
        }
    }
}

/// Strip a single character, or unicode whitespace if no character is given.
fn strip(s: &str, side: StripSide, mask: Option<char>) -> &str {
    match (side, mask) {
        (StripSide::Both, None) => s.trim(),
        (StripSide::Start, None) => s.trim_start(),
        (StripSide::End, None) => s.trim_end(),
        (StripSide::Both, Some(c)) => s.trim_matches(c),
        (StripSide::Start, Some(c)) => s.trim_start_matches(c),
        (StripSide::End, Some(c)) => s.trim_end_matches(c),
    }
}

pub fn eval_strip(input: &Column, side: StripSide, mask: Option<char>) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(strip(s, side, mask)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_cases() {
        let test_cases = [
            (("  hello  ", StripSide::Both, None), "hello"),
            (("  hello  ", StripSide::Start, None), "hello  "),
            (("  hello  ", StripSide::End, None), "  hello"),
            (("\u{3000}hello\t\n", StripSide::Both, None), "hello"),
            (("xxhixx", StripSide::Both, Some('x')), "hi"),
            (("xxhixx", StripSide::Start, Some('x')), "hixx"),
            (("xxhixx", StripSide::End, Some('x')), "xxhi"),
            ((" xhi", StripSide::Both, Some('x')), " xhi"),
            (("", StripSide::Both, None), ""),
        ];

        for case in test_cases {
            let out = strip(case.0.0, case.0.1, case.0.2);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }
}
