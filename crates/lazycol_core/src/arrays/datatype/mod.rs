mod lookup;

use std::fmt;
use std::str::FromStr;

use lazycol_error::{LcError, Result};
pub use lookup::{DtypeDescriptor, dtype_from_descriptor};
use serde::{Deserialize, Serialize};

/// Identity of a data type variant, ignoring any parameters.
///
/// Every id corresponds to exactly one "class" data type, see
/// `DataType::from_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeId {
    Null,
    Unknown,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    Utf8,
    Binary,
    Date,
    Time,
    Datetime,
    Duration,
    Categorical,
    List,
    Array,
    Struct,
}

impl DataTypeId {
    /// If data types with this id carry parameters.
    pub const fn is_parameterized(&self) -> bool {
        matches!(
            self,
            Self::Decimal
                | Self::Datetime
                | Self::Duration
                | Self::List
                | Self::Array
                | Self::Struct
        )
    }
}

impl fmt::Display for DataTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Unknown => write!(f, "Unknown"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Int8 => write!(f, "Int8"),
            Self::Int16 => write!(f, "Int16"),
            Self::Int32 => write!(f, "Int32"),
            Self::Int64 => write!(f, "Int64"),
            Self::UInt8 => write!(f, "UInt8"),
            Self::UInt16 => write!(f, "UInt16"),
            Self::UInt32 => write!(f, "UInt32"),
            Self::UInt64 => write!(f, "UInt64"),
            Self::Float32 => write!(f, "Float32"),
            Self::Float64 => write!(f, "Float64"),
            Self::Decimal => write!(f, "Decimal"),
            Self::Utf8 => write!(f, "Utf8"),
            Self::Binary => write!(f, "Binary"),
            Self::Date => write!(f, "Date"),
            Self::Time => write!(f, "Time"),
            Self::Datetime => write!(f, "Datetime"),
            Self::Duration => write!(f, "Duration"),
            Self::Categorical => write!(f, "Categorical"),
            Self::List => write!(f, "List"),
            Self::Array => write!(f, "Array"),
            Self::Struct => write!(f, "Struct"),
        }
    }
}

/// Resolution of datetime and duration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "us")]
    Microseconds,
    #[serde(rename = "ns")]
    Nanoseconds,
}

impl TimeUnit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Microseconds => "us",
            Self::Nanoseconds => "ns",
        }
    }

    /// Number of ticks of this unit in one second.
    pub const fn units_per_second(&self) -> i64 {
        match self {
            Self::Milliseconds => 1_000,
            Self::Microseconds => 1_000_000,
            Self::Nanoseconds => 1_000_000_000,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = LcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ms" => Self::Milliseconds,
            "us" => Self::Microseconds,
            "ns" => Self::Nanoseconds,
            other => {
                return Err(LcError::type_construction(format!(
                    "time_unit must be one of {{'ms', 'us', 'ns'}}, got '{other}'"
                ))
                .with_field("argument", "time_unit")
                .with_field("value", other));
            }
        })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata associated with decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalTypeMeta {
    /// Total number of digits. None lets the precision be inferred.
    pub precision: Option<u32>,
    /// Digits to the right of the decimal point.
    pub scale: u32,
}

/// Metadata associated with datetimes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatetimeTypeMeta {
    pub unit: TimeUnit,
    pub time_zone: Option<String>,
}

/// Metadata associated with lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListTypeMeta {
    pub datatype: Box<DataType>,
}

/// Metadata associated with fixed-width arrays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayTypeMeta {
    pub width: usize,
    pub datatype: Box<DataType>,
}

/// Metadata associated with structs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTypeMeta {
    pub fields: Vec<Field>,
}

/// A named data type, used for struct fields and schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Field {
            name: name.into(),
            datatype,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({:?}, {})", self.name, self.datatype)
    }
}

/// Supported data types.
///
/// Parameterized variants hold an `Option` of their metadata. `None` is the
/// "class" form of the variant, which matches any parameterized instance of
/// the same variant when compared with `equals`.
///
/// The derived `PartialEq` is strict structural identity. Use `equals` for
/// the class-aware comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Type of a value that is always null.
    Null,
    /// Placeholder for an element type that couldn't be determined, e.g. the
    /// elements of an empty list.
    Unknown,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal(Option<DecimalTypeMeta>),
    Utf8,
    Binary,
    /// Days since epoch.
    Date,
    /// Nanoseconds since midnight.
    Time,
    Datetime(Option<DatetimeTypeMeta>),
    Duration(Option<TimeUnit>),
    Categorical,
    /// A variable length list of values all of the same type.
    List(Option<ListTypeMeta>),
    /// A fixed width list of values all of the same type.
    Array(Option<ArrayTypeMeta>),
    /// A struct of named fields.
    Struct(Option<StructTypeMeta>),
}

impl DataType {
    /// Get the class (unparameterized) data type for an id.
    pub const fn from_id(id: DataTypeId) -> Self {
        match id {
            DataTypeId::Null => DataType::Null,
            DataTypeId::Unknown => DataType::Unknown,
            DataTypeId::Boolean => DataType::Boolean,
            DataTypeId::Int8 => DataType::Int8,
            DataTypeId::Int16 => DataType::Int16,
            DataTypeId::Int32 => DataType::Int32,
            DataTypeId::Int64 => DataType::Int64,
            DataTypeId::UInt8 => DataType::UInt8,
            DataTypeId::UInt16 => DataType::UInt16,
            DataTypeId::UInt32 => DataType::UInt32,
            DataTypeId::UInt64 => DataType::UInt64,
            DataTypeId::Float32 => DataType::Float32,
            DataTypeId::Float64 => DataType::Float64,
            DataTypeId::Decimal => DataType::Decimal(None),
            DataTypeId::Utf8 => DataType::Utf8,
            DataTypeId::Binary => DataType::Binary,
            DataTypeId::Date => DataType::Date,
            DataTypeId::Time => DataType::Time,
            DataTypeId::Datetime => DataType::Datetime(None),
            DataTypeId::Duration => DataType::Duration(None),
            DataTypeId::Categorical => DataType::Categorical,
            DataTypeId::List => DataType::List(None),
            DataTypeId::Array => DataType::Array(None),
            DataTypeId::Struct => DataType::Struct(None),
        }
    }

    /// Create a decimal type.
    ///
    /// Errors if precision is zero or smaller than the scale.
    pub fn decimal(precision: Option<u32>, scale: u32) -> Result<Self> {
        if let Some(precision) = precision {
            if precision == 0 {
                return Err(
                    LcError::type_construction("Decimal precision must be positive")
                        .with_field("precision", precision),
                );
            }
            if scale > precision {
                return Err(LcError::type_construction(
                    "Decimal scale cannot be greater than precision",
                )
                .with_field("precision", precision)
                .with_field("scale", scale));
            }
        }

        Ok(DataType::Decimal(Some(DecimalTypeMeta { precision, scale })))
    }

    pub fn datetime(unit: TimeUnit, time_zone: Option<String>) -> Self {
        DataType::Datetime(Some(DatetimeTypeMeta { unit, time_zone }))
    }

    /// Create a datetime type from a time unit string ("ms", "us", "ns").
    pub fn try_datetime(unit: &str, time_zone: Option<&str>) -> Result<Self> {
        let unit = unit.parse::<TimeUnit>()?;
        Ok(Self::datetime(unit, time_zone.map(|tz| tz.to_string())))
    }

    pub const fn duration(unit: TimeUnit) -> Self {
        DataType::Duration(Some(unit))
    }

    /// Create a duration type from a time unit string ("ms", "us", "ns").
    pub fn try_duration(unit: &str) -> Result<Self> {
        Ok(Self::duration(unit.parse()?))
    }

    pub fn list(datatype: DataType) -> Self {
        DataType::List(Some(ListTypeMeta {
            datatype: Box::new(datatype),
        }))
    }

    /// Create a fixed width array type. Width must be positive.
    pub fn array(datatype: DataType, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(LcError::type_construction("Array width must be positive")
                .with_field("width", width));
        }

        Ok(DataType::Array(Some(ArrayTypeMeta {
            width,
            datatype: Box::new(datatype),
        })))
    }

    /// Create a struct type. Field names must be unique.
    pub fn struct_type(fields: impl IntoIterator<Item = Field>) -> Result<Self> {
        let fields: Vec<_> = fields.into_iter().collect();
        for (idx, field) in fields.iter().enumerate() {
            if fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(LcError::type_construction("Duplicate struct field name")
                    .with_field("name", &field.name));
            }
        }

        Ok(DataType::Struct(Some(StructTypeMeta { fields })))
    }

    /// Get the data type id from the data type.
    pub const fn datatype_id(&self) -> DataTypeId {
        match self {
            DataType::Null => DataTypeId::Null,
            DataType::Unknown => DataTypeId::Unknown,
            DataType::Boolean => DataTypeId::Boolean,
            DataType::Int8 => DataTypeId::Int8,
            DataType::Int16 => DataTypeId::Int16,
            DataType::Int32 => DataTypeId::Int32,
            DataType::Int64 => DataTypeId::Int64,
            DataType::UInt8 => DataTypeId::UInt8,
            DataType::UInt16 => DataTypeId::UInt16,
            DataType::UInt32 => DataTypeId::UInt32,
            DataType::UInt64 => DataTypeId::UInt64,
            DataType::Float32 => DataTypeId::Float32,
            DataType::Float64 => DataTypeId::Float64,
            DataType::Decimal(_) => DataTypeId::Decimal,
            DataType::Utf8 => DataTypeId::Utf8,
            DataType::Binary => DataTypeId::Binary,
            DataType::Date => DataTypeId::Date,
            DataType::Time => DataTypeId::Time,
            DataType::Datetime(_) => DataTypeId::Datetime,
            DataType::Duration(_) => DataTypeId::Duration,
            DataType::Categorical => DataTypeId::Categorical,
            DataType::List(_) => DataTypeId::List,
            DataType::Array(_) => DataTypeId::Array,
            DataType::Struct(_) => DataTypeId::Struct,
        }
    }

    /// Return the class form of this data type, stripping all parameters.
    pub const fn base_type(&self) -> DataType {
        Self::from_id(self.datatype_id())
    }

    /// If this is the unparameterized form of its variant.
    ///
    /// Always true for variants that don't carry parameters.
    pub const fn is_unparameterized(&self) -> bool {
        match self {
            DataType::Decimal(m) => m.is_none(),
            DataType::Datetime(m) => m.is_none(),
            DataType::Duration(m) => m.is_none(),
            DataType::List(m) => m.is_none(),
            DataType::Array(m) => m.is_none(),
            DataType::Struct(m) => m.is_none(),
            _ => true,
        }
    }

    /// If neither this type nor any type nested in it is a parameterized
    /// variant in class form.
    pub fn is_fully_parameterized(&self) -> bool {
        match self {
            DataType::Decimal(m) => m.is_some(),
            DataType::Datetime(m) => m.is_some(),
            DataType::Duration(m) => m.is_some(),
            DataType::List(m) => m.as_ref().is_some_and(|m| m.datatype.is_fully_parameterized()),
            DataType::Array(m) => m.as_ref().is_some_and(|m| m.datatype.is_fully_parameterized()),
            DataType::Struct(m) => m.as_ref().is_some_and(|m| {
                m.fields
                    .iter()
                    .all(|f| f.datatype.is_fully_parameterized())
            }),
            _ => true,
        }
    }

    pub const fn is_nested(&self) -> bool {
        matches!(
            self,
            DataType::List(_) | DataType::Array(_) | DataType::Struct(_)
        )
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    pub const fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        )
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, DataType::Decimal(_))
    }

    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Time | DataType::Datetime(_) | DataType::Duration(_)
        )
    }

    /// Bit width of integer types, None for anything else.
    pub const fn integer_bits(&self) -> Option<u32> {
        Some(match self {
            DataType::Int8 | DataType::UInt8 => 8,
            DataType::Int16 | DataType::UInt16 => 16,
            DataType::Int32 | DataType::UInt32 => 32,
            DataType::Int64 | DataType::UInt64 => 64,
            _ => return None,
        })
    }

    /// Element type of a list or array.
    pub fn inner_datatype(&self) -> Option<&DataType> {
        match self {
            DataType::List(Some(m)) => Some(&m.datatype),
            DataType::Array(Some(m)) => Some(&m.datatype),
            _ => None,
        }
    }

    pub fn struct_fields(&self) -> Option<&[Field]> {
        match self {
            DataType::Struct(Some(m)) => Some(&m.fields),
            _ => None,
        }
    }

    /// Same variant, and at least one side is the unparameterized class form.
    pub fn matches_class(&self, other: &DataType) -> bool {
        self.datatype_id() == other.datatype_id()
            && (self.is_unparameterized() || other.is_unparameterized())
    }

    /// Both sides carry parameters (or are parameterless variants) and those
    /// parameters are equal.
    ///
    /// Nested types are compared with `equals`, so a class form nested inside
    /// a list still matches any instance in the same position.
    pub fn equal_instances(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::Decimal(Some(a)), DataType::Decimal(Some(b))) => a == b,
            (DataType::Datetime(Some(a)), DataType::Datetime(Some(b))) => a == b,
            (DataType::Duration(Some(a)), DataType::Duration(Some(b))) => a == b,
            (DataType::List(Some(a)), DataType::List(Some(b))) => a.datatype.equals(&b.datatype),
            (DataType::Array(Some(a)), DataType::Array(Some(b))) => {
                a.width == b.width && a.datatype.equals(&b.datatype)
            }
            (DataType::Struct(Some(a)), DataType::Struct(Some(b))) => {
                a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|(a, b)| a.name == b.name && a.datatype.equals(&b.datatype))
            }
            (a, b) if !a.datatype_id().is_parameterized() => a.datatype_id() == b.datatype_id(),
            _ => false,
        }
    }

    /// Class-aware equality.
    ///
    /// A class form equals every instance of its variant, but two distinct
    /// instances are never equal to each other even though both equal the
    /// class. This relation is not transitive.
    pub fn equals(&self, other: &DataType) -> bool {
        self.matches_class(other) || self.equal_instances(other)
    }
}

/// Class-aware equality, see `DataType::equals`.
pub fn equals(a: &DataType, b: &DataType) -> bool {
    a.equals(b)
}

pub const fn base_type(datatype: &DataType) -> DataType {
    datatype.base_type()
}

pub const fn is_nested(datatype: &DataType) -> bool {
    datatype.is_nested()
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(Some(meta)) => match meta.precision {
                Some(precision) => write!(
                    f,
                    "Decimal(precision: {precision}, scale: {})",
                    meta.scale
                ),
                None => write!(f, "Decimal(precision: None, scale: {})", meta.scale),
            },
            Self::Datetime(Some(meta)) => match &meta.time_zone {
                Some(tz) => write!(f, "Datetime(time_unit: {:?}, time_zone: {tz:?})", meta.unit.as_str()),
                None => write!(f, "Datetime(time_unit: {:?}, time_zone: None)", meta.unit.as_str()),
            },
            Self::Duration(Some(unit)) => write!(f, "Duration(time_unit: {:?})", unit.as_str()),
            Self::List(Some(meta)) => write!(f, "List({})", meta.datatype),
            Self::Array(Some(meta)) => write!(f, "Array({}, width: {})", meta.datatype, meta.width),
            Self::Struct(Some(meta)) => {
                write!(
                    f,
                    "Struct([{}])",
                    meta.fields
                        .iter()
                        .map(|field| field.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            other => write!(f, "{}", other.datatype_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_ids() -> Vec<DataTypeId> {
        vec![
            DataTypeId::Null,
            DataTypeId::Unknown,
            DataTypeId::Boolean,
            DataTypeId::Int8,
            DataTypeId::Int16,
            DataTypeId::Int32,
            DataTypeId::Int64,
            DataTypeId::UInt8,
            DataTypeId::UInt16,
            DataTypeId::UInt32,
            DataTypeId::UInt64,
            DataTypeId::Float32,
            DataTypeId::Float64,
            DataTypeId::Decimal,
            DataTypeId::Utf8,
            DataTypeId::Binary,
            DataTypeId::Date,
            DataTypeId::Time,
            DataTypeId::Datetime,
            DataTypeId::Duration,
            DataTypeId::Categorical,
            DataTypeId::List,
            DataTypeId::Array,
            DataTypeId::Struct,
        ]
    }

    fn sample_instances() -> Vec<DataType> {
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::decimal(Some(15), 1).unwrap(),
            DataType::datetime(TimeUnit::Nanoseconds, None),
            DataType::datetime(TimeUnit::Milliseconds, Some("UTC".to_string())),
            DataType::duration(TimeUnit::Microseconds),
            DataType::list(DataType::Int64),
            DataType::list(DataType::list(DataType::Utf8)),
            DataType::array(DataType::Int64, 3).unwrap(),
            DataType::struct_type([Field::new("a", DataType::Int64)]).unwrap(),
        ]
    }

    #[test]
    fn base_type_cases() {
        assert_eq!(DataType::Int64, DataType::Int64.base_type());
        assert_eq!(DataType::List(None), DataType::List(None).base_type());
        assert_eq!(DataType::List(None), DataType::list(DataType::Int64).base_type());
        assert_eq!(
            DataType::Duration(None),
            DataType::duration(TimeUnit::Nanoseconds).base_type()
        );
    }

    #[test]
    fn base_type_idempotent() {
        for dt in sample_instances()
            .into_iter()
            .chain(all_ids().into_iter().map(DataType::from_id))
        {
            assert_eq!(dt.base_type(), dt.base_type().base_type(), "dt: {dt}");
        }
    }

    #[test]
    fn nested_only_for_list_array_struct() {
        for id in all_ids() {
            let expected = matches!(id, DataTypeId::List | DataTypeId::Array | DataTypeId::Struct);
            assert_eq!(expected, DataType::from_id(id).is_nested(), "id: {id}");
        }
        assert!(DataType::list(DataType::Int64).is_nested());
        assert!(!DataType::Int64.is_nested());
    }

    #[test]
    fn class_equals_instance_both_ways() {
        for inst in sample_instances() {
            let class = inst.base_type();
            assert!(equals(&class, &inst), "class: {class}, inst: {inst}");
            assert!(equals(&inst, &class), "class: {class}, inst: {inst}");
        }
    }

    #[test]
    fn equality_not_transitive_through_class() {
        let a = DataType::decimal(Some(15), 1).unwrap();
        let b = DataType::decimal(Some(25), 1).unwrap();
        let class = DataType::Decimal(None);

        assert!(class.equals(&a));
        assert!(class.equals(&b));
        assert!(!a.equals(&b));
    }

    #[test]
    fn distinct_instances_not_equal() {
        let cases = [
            (
                DataType::decimal(Some(15), 1).unwrap(),
                DataType::decimal(Some(15), 2).unwrap(),
            ),
            (
                DataType::datetime(TimeUnit::Nanoseconds, None),
                DataType::datetime(TimeUnit::Microseconds, None),
            ),
            (
                DataType::duration(TimeUnit::Nanoseconds),
                DataType::duration(TimeUnit::Microseconds),
            ),
            (DataType::list(DataType::Int64), DataType::list(DataType::Int32)),
            (
                DataType::array(DataType::Int64, 3).unwrap(),
                DataType::array(DataType::Int32, 3).unwrap(),
            ),
            (
                DataType::array(DataType::Int64, 3).unwrap(),
                DataType::array(DataType::Int64, 4).unwrap(),
            ),
            (
                DataType::struct_type([Field::new("a", DataType::Int64)]).unwrap(),
                DataType::struct_type([Field::new("b", DataType::Int64)]).unwrap(),
            ),
            (
                DataType::struct_type([Field::new("a", DataType::Int64)]).unwrap(),
                DataType::struct_type([Field::new("a", DataType::Int32)]).unwrap(),
            ),
            (DataType::Int64, DataType::Int32),
            (DataType::Float64, DataType::Float32),
        ];

        for (a, b) in cases {
            assert!(!a.equals(&b), "a: {a}, b: {b}");
            assert!(!b.equals(&a), "a: {a}, b: {b}");
        }
    }

    #[test]
    fn equal_instances_match() {
        for inst in sample_instances() {
            assert!(inst.equals(&inst.clone()), "inst: {inst}");
            assert!(inst.equal_instances(&inst.clone()), "inst: {inst}");
        }
    }

    #[test]
    fn predicates_independent() {
        let class = DataType::List(None);
        let inst = DataType::list(DataType::Int64);

        assert!(class.matches_class(&inst));
        assert!(!class.equal_instances(&inst));
        assert!(!inst.matches_class(&DataType::list(DataType::Int64)));
        assert!(inst.equal_instances(&DataType::list(DataType::Int64)));
    }

    #[test]
    fn nested_class_matches_inside_list() {
        let outer_class_inner = DataType::list(DataType::List(None));
        let concrete = DataType::list(DataType::list(DataType::Int64));
        assert!(outer_class_inner.equals(&concrete));
    }

    #[test]
    fn construction_validates() {
        let err = DataType::array(DataType::Int64, 0).unwrap_err();
        assert_eq!(lazycol_error::ErrorKind::TypeConstruction, err.kind());

        let err = DataType::try_datetime("s", None).unwrap_err();
        assert_eq!(lazycol_error::ErrorKind::TypeConstruction, err.kind());
        assert_eq!(Some("s"), err.field("value"));

        let err = DataType::try_duration("minutes").unwrap_err();
        assert_eq!(lazycol_error::ErrorKind::TypeConstruction, err.kind());

        let err = DataType::decimal(Some(0), 0).unwrap_err();
        assert_eq!(lazycol_error::ErrorKind::TypeConstruction, err.kind());

        let err = DataType::struct_type([
            Field::new("a", DataType::Int64),
            Field::new("a", DataType::Utf8),
        ])
        .unwrap_err();
        assert_eq!(lazycol_error::ErrorKind::TypeConstruction, err.kind());
    }

    #[test]
    fn display_cases() {
        let cases = [
            (DataType::Int64, "Int64"),
            (DataType::Decimal(None), "Decimal"),
            (
                DataType::decimal(Some(15), 1).unwrap(),
                "Decimal(precision: 15, scale: 1)",
            ),
            (
                DataType::datetime(TimeUnit::Nanoseconds, None),
                r#"Datetime(time_unit: "ns", time_zone: None)"#,
            ),
            (
                DataType::datetime(TimeUnit::Milliseconds, Some("UTC".to_string())),
                r#"Datetime(time_unit: "ms", time_zone: "UTC")"#,
            ),
            (
                DataType::duration(TimeUnit::Nanoseconds),
                r#"Duration(time_unit: "ns")"#,
            ),
            (DataType::List(None), "List"),
            (DataType::list(DataType::Int64), "List(Int64)"),
            (
                DataType::array(DataType::Int64, 3).unwrap(),
                "Array(Int64, width: 3)",
            ),
            (
                DataType::struct_type([Field::new("a", DataType::Int64)]).unwrap(),
                r#"Struct([Field("a", Int64)])"#,
            ),
            (DataType::Struct(None), "Struct"),
        ];

        for (dt, expected) in cases {
            assert_eq!(expected, dt.to_string());
        }
    }

    #[test]
    fn fully_parameterized() {
        assert!(DataType::Int64.is_fully_parameterized());
        assert!(DataType::list(DataType::Utf8).is_fully_parameterized());
        assert!(!DataType::List(None).is_fully_parameterized());
        assert!(!DataType::list(DataType::Datetime(None)).is_fully_parameterized());
    }
}
