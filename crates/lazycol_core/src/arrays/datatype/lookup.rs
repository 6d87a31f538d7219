//! Resolve user supplied data type descriptors.
use std::str::FromStr;
use std::sync::LazyLock;

use hashbrown::HashMap;
use lazycol_error::{LcError, Result};

use super::{DataType, DataTypeId, Field};
use crate::functions::temporal::time_zone_offset;

/// Something a user can pass where a data type is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum DtypeDescriptor {
    /// A type name like "i64" or "list[str]".
    Name(String),
    /// A class.
    Class(DataTypeId),
    /// An already constructed data type.
    Instance(DataType),
}

impl From<&str> for DtypeDescriptor {
    fn from(value: &str) -> Self {
        DtypeDescriptor::Name(value.to_string())
    }
}

impl From<String> for DtypeDescriptor {
    fn from(value: String) -> Self {
        DtypeDescriptor::Name(value)
    }
}

impl From<DataTypeId> for DtypeDescriptor {
    fn from(value: DataTypeId) -> Self {
        DtypeDescriptor::Class(value)
    }
}

impl From<DataType> for DtypeDescriptor {
    fn from(value: DataType) -> Self {
        DtypeDescriptor::Instance(value)
    }
}

impl From<&DataType> for DtypeDescriptor {
    fn from(value: &DataType) -> Self {
        DtypeDescriptor::Instance(value.clone())
    }
}

static NAMED_DATATYPES: LazyLock<HashMap<&'static str, DataType>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    insert_names(&mut map, &["null"], DataType::Null);
    insert_names(&mut map, &["unknown"], DataType::Unknown);
    insert_names(&mut map, &["bool", "boolean"], DataType::Boolean);
    insert_names(&mut map, &["i8", "int8"], DataType::Int8);
    insert_names(&mut map, &["i16", "int16"], DataType::Int16);
    insert_names(&mut map, &["i32", "int32"], DataType::Int32);
    insert_names(&mut map, &["i64", "int64", "int"], DataType::Int64);
    insert_names(&mut map, &["u8", "uint8"], DataType::UInt8);
    insert_names(&mut map, &["u16", "uint16"], DataType::UInt16);
    insert_names(&mut map, &["u32", "uint32"], DataType::UInt32);
    insert_names(&mut map, &["u64", "uint64"], DataType::UInt64);
    insert_names(&mut map, &["f32", "float32"], DataType::Float32);
    insert_names(&mut map, &["f64", "float64", "float"], DataType::Float64);
    insert_names(&mut map, &["decimal"], DataType::Decimal(None));
    insert_names(&mut map, &["str", "utf8", "string"], DataType::Utf8);
    insert_names(&mut map, &["bin", "binary"], DataType::Binary);
    insert_names(&mut map, &["date"], DataType::Date);
    insert_names(&mut map, &["time"], DataType::Time);
    insert_names(&mut map, &["datetime"], DataType::Datetime(None));
    insert_names(&mut map, &["duration"], DataType::Duration(None));
    insert_names(&mut map, &["cat", "categorical"], DataType::Categorical);
    insert_names(&mut map, &["list"], DataType::List(None));
    insert_names(&mut map, &["array"], DataType::Array(None));
    insert_names(&mut map, &["struct"], DataType::Struct(None));
    map
});

fn insert_names(
    map: &mut HashMap<&'static str, DataType>,
    names: &[&'static str],
    datatype: DataType,
) {
    for name in names {
        if map.insert(*name, datatype.clone()).is_some() {
            panic!("Duplicate data type name: {name}");
        }
    }
}

/// Resolve a name, class, or instance into a data type.
///
/// Names are case insensitive, and may carry bracketed parameters, e.g.
/// "list[i64]", "array[f64, 3]", "datetime[ns, UTC]", "decimal[10, 2]",
/// "struct[a: i64, b: str]".
pub fn dtype_from_descriptor(descriptor: impl Into<DtypeDescriptor>) -> Result<DataType> {
    match descriptor.into() {
        DtypeDescriptor::Name(name) => parse_name(&name),
        DtypeDescriptor::Class(id) => Ok(DataType::from_id(id)),
        DtypeDescriptor::Instance(datatype) => Ok(datatype),
    }
}

fn unrecognized(descriptor: &str) -> LcError {
    LcError::argument(format!("Unrecognized data type descriptor: '{descriptor}'"))
        .with_field("argument", "dtype")
        .with_field("value", descriptor)
}

fn parse_name(descriptor: &str) -> Result<DataType> {
    let trimmed = descriptor.trim();

    let (head, args) = match trimmed.find('[') {
        Some(open) => {
            let inner = trimmed[open + 1..]
                .strip_suffix(']')
                .ok_or_else(|| unrecognized(descriptor))?;
            (&trimmed[..open], Some(inner))
        }
        None => (trimmed, None),
    };

    let head = head.trim().to_ascii_lowercase();
    let class = NAMED_DATATYPES
        .get(head.as_str())
        .ok_or_else(|| unrecognized(descriptor))?;

    let args = match args {
        Some(args) => split_args(args).ok_or_else(|| unrecognized(descriptor))?,
        None => return Ok(class.clone()),
    };

    match (class.datatype_id(), args.as_slice()) {
        (DataTypeId::List, [inner]) => Ok(DataType::list(parse_name(inner)?)),
        (DataTypeId::Array, [inner, width]) => {
            let width = parse_number(width, descriptor)?;
            DataType::array(parse_name(inner)?, width)
        }
        (DataTypeId::Datetime, [unit]) => DataType::try_datetime(unit, None),
        (DataTypeId::Datetime, [unit, tz]) => {
            time_zone_offset(tz)?;
            DataType::try_datetime(unit, Some(*tz))
        }
        (DataTypeId::Duration, [unit]) => DataType::try_duration(unit),
        (DataTypeId::Decimal, [precision, scale]) => {
            let precision = parse_number(precision, descriptor)?;
            let scale = parse_number(scale, descriptor)?;
            DataType::decimal(Some(precision), scale)
        }
        (DataTypeId::Struct, fields) => {
            let fields = fields
                .iter()
                .map(|field| {
                    let (name, datatype) =
                        field.split_once(':').ok_or_else(|| unrecognized(descriptor))?;
                    Ok(Field::new(name.trim(), parse_name(datatype)?))
                })
                .collect::<Result<Vec<_>>>()?;
            DataType::struct_type(fields)
        }
        _ => Err(unrecognized(descriptor)),
    }
}

fn parse_number<T: FromStr>(s: &str, descriptor: &str) -> Result<T> {
    s.parse::<T>().map_err(|_| unrecognized(descriptor))
}

/// Split bracket arguments on top-level commas.
///
/// Returns None on unbalanced brackets.
fn split_args(s: &str) -> Option<Vec<&str>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                args.push(s[start..idx].trim());
                start = idx + 1;
            }
            _ => (),
        }
    }

    if depth != 0 {
        return None;
    }
    args.push(s[start..].trim());

    if args.iter().any(|a| a.is_empty()) {
        return None;
    }

    Some(args)
}

#[cfg(test)]
mod tests {
    use lazycol_error::ErrorKind;

    use super::*;
    use crate::arrays::datatype::TimeUnit;

    #[test]
    fn resolve_names() {
        let cases = [
            ("i64", DataType::Int64),
            ("Int64", DataType::Int64),
            ("str", DataType::Utf8),
            ("utf8", DataType::Utf8),
            ("f64", DataType::Float64),
            ("list", DataType::List(None)),
            ("list[i64]", DataType::list(DataType::Int64)),
            ("list[unknown]", DataType::list(DataType::Unknown)),
            ("list[list[str]]", DataType::list(DataType::list(DataType::Utf8))),
            ("array[i64, 3]", DataType::array(DataType::Int64, 3).unwrap()),
            (
                "datetime[ms]",
                DataType::datetime(TimeUnit::Milliseconds, None),
            ),
            (
                "datetime[ns, UTC]",
                DataType::datetime(TimeUnit::Nanoseconds, Some("UTC".to_string())),
            ),
            ("duration[us]", DataType::duration(TimeUnit::Microseconds)),
            ("decimal[10, 2]", DataType::decimal(Some(10), 2).unwrap()),
            (
                "struct[a: i64, b: list[str]]",
                DataType::struct_type([
                    Field::new("a", DataType::Int64),
                    Field::new("b", DataType::list(DataType::Utf8)),
                ])
                .unwrap(),
            ),
        ];

        for case in cases {
            let out = dtype_from_descriptor(case.0).unwrap();
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }

    #[test]
    fn resolve_class_and_instance() {
        assert_eq!(
            DataType::Struct(None),
            dtype_from_descriptor(DataTypeId::Struct).unwrap()
        );
        let inst = DataType::list(DataType::Boolean);
        assert_eq!(inst, dtype_from_descriptor(&inst).unwrap());
    }

    #[test]
    fn unrecognized_descriptors() {
        for name in ["i65", "list[", "list[i64", "array[i64]", "array[i64, x]", "", "list[]"] {
            let err = dtype_from_descriptor(name).unwrap_err();
            assert_eq!(ErrorKind::Argument, err.kind(), "name: {name}");
        }
    }

    #[test]
    fn invalid_parameters() {
        let err = dtype_from_descriptor("array[i64, 0]").unwrap_err();
        assert_eq!(ErrorKind::TypeConstruction, err.kind());

        let err = dtype_from_descriptor("datetime[s]").unwrap_err();
        assert_eq!(ErrorKind::TypeConstruction, err.kind());
    }

    #[test]
    fn out_of_range_decimal_parameters() {
        for name in [
            "decimal[4294967306, 2]",
            "decimal[10, 4294967298]",
            "decimal[-1, 2]",
        ] {
            let err = dtype_from_descriptor(name).unwrap_err();
            assert_eq!(ErrorKind::Argument, err.kind(), "name: {name}");
        }
    }

    #[test]
    fn datetime_time_zones() {
        assert_eq!(
            DataType::datetime(TimeUnit::Microseconds, Some("+05:30".to_string())),
            dtype_from_descriptor("datetime[us, +05:30]").unwrap()
        );

        let err = dtype_from_descriptor("datetime[ns, Europe/Paris]").unwrap_err();
        assert_eq!(ErrorKind::Argument, err.kind());
        assert_eq!(Some("Europe/Paris"), err.field("value"));
    }
}
