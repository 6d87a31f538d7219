use lazycol_error::{LcError, Result};
use serde_json::Value;
use tracing::debug;

use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::cast::{cast_scalar, float_to_scalar, int_to_scalar};
use crate::infer::{InputValue, infer_column};

/// Parse each string as JSON and convert it to `datatype`.
///
/// When no type is given it's inferred from the first
/// `json_infer_schema_length` non-null documents. Invalid JSON always
/// errors. Values that don't fit the target type become null.
pub fn eval_json_extract(
    ctx: &EvalContext,
    input: &Column,
    datatype: Option<&DataType>,
) -> Result<Column> {
    let docs = input
        .values()
        .iter()
        .map(|value| {
            if value.is_null() {
                return Ok(None);
            }
            let s = value.try_as_str()?;
            serde_json::from_str::<Value>(s).map(Some).map_err(|e| {
                LcError::compute("Failed to parse JSON")
                    .with_field("column", input.name())
                    .with_field("value", s)
                    .with_source(e)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let datatype = match datatype {
        Some(datatype) => datatype.clone(),
        None => {
            let limit = ctx.config().json_infer_schema_length as usize;
            let sample: Vec<InputValue> = docs
                .iter()
                .flatten()
                .take(limit)
                .map(|doc| InputValue::from(doc.clone()))
                .collect();
            let datatype = infer_column(input.name(), &sample)?;
            debug!(column = input.name(), sampled = sample.len(), %datatype, "inferred json type");
            datatype
        }
    };

    let values = docs
        .iter()
        .map(|doc| match doc {
            Some(doc) => json_to_scalar(doc, &datatype).unwrap_or(ScalarValue::Null),
            None => ScalarValue::Null,
        })
        .collect();

    Ok(Column::new(input.name(), datatype, values))
}

/// Convert a JSON value to a scalar of the given type, None if it doesn't
/// fit.
pub fn json_to_scalar(value: &Value, datatype: &DataType) -> Option<ScalarValue> {
    match (value, datatype) {
        (Value::Null, _) => Some(ScalarValue::Null),
        (Value::Bool(b), DataType::Boolean) => Some(ScalarValue::Boolean(*b)),
        (Value::Number(n), to) if to.is_integer() => {
            let v = n
                .as_i64()
                .map(|v| v as i128)
                .or_else(|| n.as_u64().map(|v| v as i128))?;
            int_to_scalar(v, to)
        }
        (Value::Number(n), to) if to.is_float() => float_to_scalar(n.as_f64()?, to),
        (Value::String(s), DataType::Utf8) => Some(ScalarValue::Utf8(s.clone())),
        (Value::String(s), to) => cast_scalar(&ScalarValue::Utf8(s.clone()), to),
        (other, DataType::Utf8) => Some(ScalarValue::Utf8(other.to_string())),
        (Value::Array(values), DataType::List(Some(meta))) => Some(ScalarValue::List(
            values
                .iter()
                .map(|v| json_to_scalar(v, &meta.datatype).unwrap_or(ScalarValue::Null))
                .collect(),
        )),
        (Value::Object(map), DataType::Struct(Some(meta))) => Some(ScalarValue::Struct(
            meta.fields
                .iter()
                .map(|field| {
                    let value = map
                        .get(&field.name)
                        .and_then(|v| json_to_scalar(v, &field.datatype))
                        .unwrap_or(ScalarValue::Null);
                    (field.name.clone(), value)
                })
                .collect(),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::datatype::Field;
    use crate::config::eval::EvalConfig;

    fn struct_ab() -> DataType {
        DataType::struct_type([
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::Boolean),
        ])
        .unwrap()
    }

    #[test]
    fn extract_with_dtype() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs(
            "json",
            [
                Some(r#"{"a":1, "b": true}"#),
                None,
                Some(r#"{"a":2, "b": false}"#),
                Some(r#"{"a":"x"}"#),
            ],
        );

        let out = eval_json_extract(&ctx, &input, Some(&struct_ab())).unwrap();
        assert_eq!(&struct_ab(), out.datatype());
        assert_eq!(
            &[
                ScalarValue::Struct(vec![
                    ("a".to_string(), ScalarValue::Int64(1)),
                    ("b".to_string(), ScalarValue::Boolean(true)),
                ]),
                ScalarValue::Null,
                ScalarValue::Struct(vec![
                    ("a".to_string(), ScalarValue::Int64(2)),
                    ("b".to_string(), ScalarValue::Boolean(false)),
                ]),
                ScalarValue::Struct(vec![
                    ("a".to_string(), ScalarValue::Null),
                    ("b".to_string(), ScalarValue::Null),
                ]),
            ],
            out.values()
        );
    }

    #[test]
    fn extract_inferred() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("json", [Some(r#"{"a":1, "b": true}"#), Some(r#"{"a":2.5}"#)]);

        let out = eval_json_extract(&ctx, &input, None).unwrap();
        let expected = DataType::struct_type([
            Field::new("a", DataType::Float64),
            Field::new("b", DataType::Boolean),
        ])
        .unwrap();
        assert_eq!(&expected, out.datatype());
        assert_eq!(
            ScalarValue::Struct(vec![
                ("a".to_string(), ScalarValue::Float64(2.5)),
                ("b".to_string(), ScalarValue::Null),
            ]),
            out.values()[1]
        );
    }

    #[test]
    fn inferred_fields_keep_document_order() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("json", [Some(r#"{"b": 1, "a": "x"}"#)]);

        let out = eval_json_extract(&ctx, &input, None).unwrap();
        let expected = DataType::struct_type([
            Field::new("b", DataType::Int64),
            Field::new("a", DataType::Utf8),
        ])
        .unwrap();
        assert_eq!(&expected, out.datatype());
        assert_eq!(
            ScalarValue::Struct(vec![
                ("b".to_string(), ScalarValue::Int64(1)),
                ("a".to_string(), ScalarValue::from("x")),
            ]),
            out.values()[0]
        );
    }

    #[test]
    fn inference_limited_to_sample_length() {
        let config = EvalConfig {
            json_infer_schema_length: 1,
            ..Default::default()
        };
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("json", [Some("1"), Some("2.5")]);

        let out = eval_json_extract(&ctx, &input, None).unwrap();
        assert_eq!(&DataType::Int64, out.datatype());
        assert_eq!(&[ScalarValue::Int64(1), ScalarValue::Null], out.values());
    }

    #[test]
    fn invalid_json_errors() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("json", [Some(r#"{"a":1}"#), Some("{oops")]);

        let err = eval_json_extract(&ctx, &input, None).unwrap_err();
        assert!(err.is_compute());
        assert_eq!(Some("{oops"), err.field("value"));

        let err = eval_json_extract(&ctx, &input, Some(&DataType::Utf8)).unwrap_err();
        assert!(err.is_compute());
    }

    #[test]
    fn json_to_scalar_cases() {
        let list_i64 = DataType::list(DataType::Int64);
        let test_cases = [
            (("[1, null, 3]", list_i64.clone()), Some(ScalarValue::List(vec![
                ScalarValue::Int64(1),
                ScalarValue::Null,
                ScalarValue::Int64(3),
            ]))),
            (("300", DataType::UInt8), None),
            (("\"2024-01-02\"", DataType::Date), Some(ScalarValue::Date(19724))),
            (("{\"a\":1}", DataType::Utf8), Some(ScalarValue::from("{\"a\":1}"))),
            (("true", DataType::Int64), None),
        ];

        for case in test_cases {
            let value: Value = serde_json::from_str(case.0.0).unwrap();
            let out = json_to_scalar(&value, &case.0.1);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }
}
