//! Functions on binary values.
use lazycol_error::Result;

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::engine::context::EvalContext;
use crate::functions::encoding::BinaryEncoding;
use crate::functions::executor::{BinaryExecutor, PhysicalBinary, UnaryExecutor};
use crate::functions::string::codec::{eval_decode, eval_encode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryFunction {
    Contains { literal: Vec<u8> },
    /// Inputs: subject, prefix.
    StartsWith,
    /// Inputs: subject, suffix.
    EndsWith,
    Encode { encoding: BinaryEncoding },
    Decode { encoding: BinaryEncoding, strict: bool },
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

impl BinaryFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains { .. } => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Encode { .. } => "encode",
            Self::Decode { .. } => "decode",
        }
    }

    pub fn num_inputs(&self) -> usize {
        match self {
            Self::StartsWith | Self::EndsWith => 2,
            _ => 1,
        }
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Contains { literal } => vec![format!("b\"{}\"", literal.escape_ascii())],
            Self::StartsWith | Self::EndsWith => Vec::new(),
            Self::Encode { encoding } => vec![format!("{:?}", encoding.as_str())],
            Self::Decode { encoding, strict } => {
                vec![format!("{:?}", encoding.as_str()), format!("strict={strict}")]
            }
        }
    }

    pub fn evaluate(&self, _ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;

        let (datatype, values) = match self {
            Self::Contains { literal } => (
                DataType::Boolean,
                UnaryExecutor::execute::<PhysicalBinary, _>(input, |b, buf| {
                    buf.put(contains_bytes(b, literal))
                })?,
            ),
            Self::StartsWith => (
                DataType::Boolean,
                BinaryExecutor::execute::<PhysicalBinary, PhysicalBinary, _>(
                    input,
                    input_at(inputs, 1)?,
                    |b, prefix, buf| buf.put(b.starts_with(prefix)),
                )?,
            ),
            Self::EndsWith => (
                DataType::Boolean,
                BinaryExecutor::execute::<PhysicalBinary, PhysicalBinary, _>(
                    input,
                    input_at(inputs, 1)?,
                    |b, suffix, buf| buf.put(b.ends_with(suffix)),
                )?,
            ),
            Self::Encode { encoding } => (DataType::Utf8, eval_encode(input, *encoding)?),
            Self::Decode { encoding, strict } => {
                (DataType::Binary, eval_decode(input, *encoding, *strict)?)
            }
        };

        Ok(Column::new(input.name(), datatype, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::scalar::ScalarValue;
    use crate::config::eval::EvalConfig;

    #[test]
    fn contains_bytes_cases() {
        let test_cases = [
            ((b"\x00\xffab".as_slice(), b"\xffa".as_slice()), true),
            ((b"abc".as_slice(), b"".as_slice()), true),
            ((b"ab".as_slice(), b"abc".as_slice()), false),
            ((b"".as_slice(), b"a".as_slice()), false),
        ];

        for case in test_cases {
            let out = contains_bytes(case.0.0, case.0.1);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }

    #[test]
    fn starts_ends_with() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let input = Column::from_binary("b", [Some(b"\x00\x01\x02".as_slice()), None]);
        let affix = Column::from_binary("p", [Some(b"\x00".as_slice()), Some(b"\x00".as_slice())]);

        let out = BinaryFunction::StartsWith
            .evaluate(&mut ctx, &[input.clone(), affix.clone()])
            .unwrap();
        assert_eq!(&[ScalarValue::Boolean(true), ScalarValue::Null], out.values());

        let out = BinaryFunction::EndsWith
            .evaluate(&mut ctx, &[input, affix])
            .unwrap();
        assert_eq!(&[ScalarValue::Boolean(false), ScalarValue::Null], out.values());
    }

    #[test]
    fn encode_binary() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);
        let input = Column::from_binary("b", [Some(b"\xde\xad".as_slice())]);

        let out = BinaryFunction::Encode {
            encoding: BinaryEncoding::Hex,
        }
        .evaluate(&mut ctx, &[input])
        .unwrap();
        assert_eq!(&DataType::Utf8, out.datatype());
        assert_eq!(&[ScalarValue::from("dead")], out.values());
    }
}
