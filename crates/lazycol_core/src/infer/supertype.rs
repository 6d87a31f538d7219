use crate::arrays::datatype::{DataType, Field, ListTypeMeta, StructTypeMeta};

/// Find the narrowest type both inputs widen to, if one exists.
///
/// Null and Unknown are absorbed by anything.
pub fn supertype(a: &DataType, b: &DataType) -> Option<DataType> {
    match (a, b) {
        (DataType::Null | DataType::Unknown, other) | (other, DataType::Null | DataType::Unknown) => {
            Some(other.clone())
        }
        (a, b) if a == b => Some(a.clone()),
        (a, b) if a.is_integer() && b.is_integer() => Some(integer_supertype(a, b)),
        (a, b) if (a.is_integer() || a.is_float()) && (b.is_integer() || b.is_float()) => {
            Some(DataType::Float64)
        }
        (DataType::List(Some(a)), DataType::List(Some(b))) => {
            let inner = supertype(&a.datatype, &b.datatype)?;
            Some(DataType::List(Some(ListTypeMeta {
                datatype: Box::new(inner),
            })))
        }
        (DataType::Struct(Some(a)), DataType::Struct(Some(b))) => {
            let mut fields: Vec<Field> = a.fields.clone();
            for field in &b.fields {
                match fields.iter_mut().find(|f| f.name == field.name) {
                    Some(existing) => {
                        existing.datatype = supertype(&existing.datatype, &field.datatype)?;
                    }
                    None => fields.push(field.clone()),
                }
            }
            Some(DataType::Struct(Some(StructTypeMeta { fields })))
        }
        _ => None,
    }
}

fn integer_supertype(a: &DataType, b: &DataType) -> DataType {
    let (a_bits, b_bits) = match (a.integer_bits(), b.integer_bits()) {
        (Some(a_bits), Some(b_bits)) => (a_bits, b_bits),
        _ => return DataType::Int64,
    };

    if a.is_signed_integer() != b.is_signed_integer() {
        return DataType::Int64;
    }

    if a_bits >= b_bits { a.clone() } else { b.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supertype_cases() {
        let cases = [
            ((DataType::Null, DataType::Int64), Some(DataType::Int64)),
            ((DataType::Utf8, DataType::Unknown), Some(DataType::Utf8)),
            ((DataType::Int64, DataType::Float64), Some(DataType::Float64)),
            ((DataType::Int8, DataType::Int32), Some(DataType::Int32)),
            ((DataType::UInt8, DataType::UInt16), Some(DataType::UInt16)),
            ((DataType::UInt8, DataType::Int8), Some(DataType::Int64)),
            ((DataType::Float32, DataType::Float64), Some(DataType::Float64)),
            ((DataType::Utf8, DataType::Int64), None),
            ((DataType::Boolean, DataType::Int64), None),
            (
                (DataType::list(DataType::Unknown), DataType::list(DataType::Int64)),
                Some(DataType::list(DataType::Int64)),
            ),
            (
                (DataType::list(DataType::Int64), DataType::list(DataType::Float64)),
                Some(DataType::list(DataType::Float64)),
            ),
            (
                (DataType::list(DataType::Int64), DataType::list(DataType::Utf8)),
                None,
            ),
        ];

        for case in cases {
            let out = supertype(&case.0.0, &case.0.1);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }

    #[test]
    fn struct_fields_merge_in_first_seen_order() {
        let a = DataType::struct_type([
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::Null),
        ])
        .unwrap();
        let b = DataType::struct_type([
            Field::new("c", DataType::Boolean),
            Field::new("b", DataType::Utf8),
            Field::new("a", DataType::Float64),
        ])
        .unwrap();

        let expected = DataType::struct_type([
            Field::new("a", DataType::Float64),
            Field::new("b", DataType::Utf8),
            Field::new("c", DataType::Boolean),
        ])
        .unwrap();

        assert_eq!(Some(expected), supertype(&a, &b));
    }
}
