use lazycol_error::{LcError, Result};

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::cast::parse::{Parser, RadixParser};
use crate::functions::executor::{ErrorState, PhysicalUtf8, UnaryExecutor};

pub fn validate_radix(radix: u32) -> Result<()> {
    if !(2..=36).contains(&radix) {
        return Err(LcError::argument(format!("Radix must be between 2 and 36, got {radix}"))
            .with_field("argument", "radix")
            .with_field("value", radix));
    }
    Ok(())
}

/// Parse integers written in `radix` into Int32 values.
pub fn eval_parse_int(input: &Column, radix: u32, strict: bool) -> Result<Vec<ScalarValue>> {
    validate_radix(radix)?;

    let mut parser = RadixParser::new(radix);
    let mut error_state = ErrorState::new(strict);

    let out = UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| match parser.parse(s) {
        Some(v) => buf.put(v),
        None => error_state.set_error(|| {
            LcError::compute(format!("Failed to parse '{s}' as an integer in radix {radix}"))
                .with_field("value", s)
                .with_field("radix", radix)
        }),
    })?;

    error_state.into_result()?;
    Ok(out)
}
