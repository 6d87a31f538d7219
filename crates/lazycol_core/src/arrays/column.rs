use lazycol_error::{LcError, Result};

use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::infer::{InputValue, infer_column, to_scalar};

/// A named sequence of values with a single data type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    datatype: DataType,
    values: Vec<ScalarValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType, values: Vec<ScalarValue>) -> Self {
        Column {
            name: name.into(),
            datatype,
            values,
        }
    }

    pub fn from_strs<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        Self::new(
            name,
            DataType::Utf8,
            values.into_iter().map(ScalarValue::from).collect(),
        )
    }

    pub fn from_binary<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a [u8]>>,
    ) -> Self {
        Self::new(
            name,
            DataType::Binary,
            values.into_iter().map(ScalarValue::from).collect(),
        )
    }

    pub fn from_i64s(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(
            name,
            DataType::Int64,
            values.into_iter().map(ScalarValue::from).collect(),
        )
    }

    /// Create a column from untyped values, inferring its data type.
    pub fn from_input_values(name: impl Into<String>, values: &[InputValue]) -> Result<Self> {
        let name = name.into();
        let datatype = infer_column(&name, values)?;
        let values = values
            .iter()
            .map(|v| to_scalar(v, &datatype))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, datatype, values))
    }

    /// Create a column with a single value.
    pub fn from_scalar(name: impl Into<String>, value: ScalarValue) -> Self {
        let datatype = value.datatype();
        Self::new(name, datatype, vec![value])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> &DataType {
        &self.datatype
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn value(&self, idx: usize) -> Option<&ScalarValue> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_values(self) -> Vec<ScalarValue> {
        self.values
    }

    /// Repeat a single value column `len` times.
    ///
    /// Columns that already have `len` rows are returned as is.
    pub fn broadcast_to(self, len: usize) -> Result<Self> {
        if self.values.len() == len {
            return Ok(self);
        }
        if self.values.len() != 1 {
            return Err(LcError::compute("Cannot broadcast column to a different length")
                .with_field("column", self.name)
                .with_field("length", self.values.len())
                .with_field("target", len));
        }

        let value = self.values[0].clone();
        Ok(Column {
            name: self.name,
            datatype: self.datatype,
            values: vec![value; len],
        })
    }
}
