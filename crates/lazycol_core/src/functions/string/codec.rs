use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::encoding::BinaryEncoding;
use crate::functions::executor::{ErrorState, PhysicalBinary, UnaryExecutor};

/// Encode the bytes of each value as text.
pub fn eval_encode(input: &Column, encoding: BinaryEncoding) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalBinary, _>(input, |bytes, buf| {
        buf.put(encoding.encode(bytes))
    })
}

/// Decode text into bytes. Malformed input errors when `strict`, otherwise
/// the row is null.
pub fn eval_decode(
    input: &Column,
    encoding: BinaryEncoding,
    strict: bool,
) -> Result<Vec<ScalarValue>> {
    let mut error_state = ErrorState::new(strict);

    let out = UnaryExecutor::execute::<PhysicalBinary, _>(input, |text, buf| {
        match encoding.decode(text) {
            Ok(bytes) => buf.put(bytes),
            Err(e) => error_state.set_error(|| e.with_field("column", input.name())),
        }
    })?;

    error_state.into_result()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_strings() {
        let input = Column::from_strs("s", [Some("foo"), None]);

        let out = eval_encode(&input, BinaryEncoding::Hex).unwrap();
        assert_eq!(vec![ScalarValue::from("666f6f"), ScalarValue::Null], out);

        let out = eval_encode(&input, BinaryEncoding::Base64).unwrap();
        assert_eq!(vec![ScalarValue::from("Zm9v"), ScalarValue::Null], out);
    }

    #[test]
    fn decode_strict_and_lenient() {
        let input = Column::from_strs("s", [Some("666f6f"), Some("xyz"), None]);

        let err = eval_decode(&input, BinaryEncoding::Hex, true).unwrap_err();
        assert!(err.is_compute());

        let out = eval_decode(&input, BinaryEncoding::Hex, false).unwrap();
        assert_eq!(
            vec![
                ScalarValue::Binary(b"foo".to_vec()),
                ScalarValue::Null,
                ScalarValue::Null
            ],
            out
        );
    }
}
