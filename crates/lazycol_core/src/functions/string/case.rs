use lazycol_error::Result;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

pub fn eval_to_uppercase(input: &Column) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(s.to_uppercase()))
}

pub fn eval_to_lowercase(input: &Column) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| buf.put(s.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_idempotent() {
        let input = Column::from_strs(
            "s",
            [Some("hello"), Some("Straße"), Some("İstanbul"), Some("東京"), None],
        );

        let upper = Column::new("s", input.datatype().clone(), eval_to_uppercase(&input).unwrap());
        let upper2 = eval_to_uppercase(&upper).unwrap();
        assert_eq!(upper.values(), upper2.as_slice());
        assert_eq!(ScalarValue::from("STRASSE"), upper.values()[1]);
        assert_eq!(ScalarValue::Null, upper.values()[4]);

        let lower = Column::new("s", input.datatype().clone(), eval_to_lowercase(&input).unwrap());
        let lower2 = eval_to_lowercase(&lower).unwrap();
        assert_eq!(lower.values(), lower2.as_slice());
        assert_eq!(ScalarValue::from("hello"), lower.values()[0]);
    }
}
