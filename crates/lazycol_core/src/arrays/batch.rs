use indexmap::IndexMap;
use lazycol_error::{LcError, Result};

use crate::arrays::column::Column;
use crate::arrays::datatype::Field;
use crate::arrays::scalar::ScalarValue;
use crate::infer::{InputValue, infer_schema, to_scalar};

/// A set of equal length, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Batch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn try_new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let columns: Vec<_> = columns.into_iter().collect();
        let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);

        for (idx, column) in columns.iter().enumerate() {
            if column.len() != num_rows {
                return Err(LcError::argument("Columns in a batch must have the same length")
                    .with_field("column", column.name())
                    .with_field("length", column.len())
                    .with_field("expected", num_rows));
            }
            if columns[..idx].iter().any(|c| c.name() == column.name()) {
                return Err(LcError::argument("Duplicate column name in batch")
                    .with_field("column", column.name()));
            }
        }

        Ok(Batch { columns, num_rows })
    }

    /// Build a batch from untyped rows, inferring the schema.
    pub fn from_rows(rows: &[IndexMap<String, InputValue>]) -> Result<Self> {
        let schema = infer_schema(rows)?;

        let columns = schema
            .into_iter()
            .map(|field| {
                let values = rows
                    .iter()
                    .map(|row| match row.get(&field.name) {
                        Some(value) => to_scalar(value, &field.datatype),
                        None => Ok(ScalarValue::Null),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Column::new(field.name, field.datatype, values))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::try_new(columns)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn schema(&self) -> Vec<Field> {
        self.columns
            .iter()
            .map(|c| Field::new(c.name(), c.datatype().clone()))
            .collect()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use lazycol_error::ErrorKind;

    use super::*;
    use crate::arrays::datatype::DataType;

    #[test]
    fn mismatched_lengths() {
        let err = Batch::try_new([
            Column::from_i64s("a", [Some(1), Some(2)]),
            Column::from_i64s("b", [Some(1)]),
        ])
        .unwrap_err();
        assert_eq!(ErrorKind::Argument, err.kind());
        assert_eq!(Some("b"), err.field("column"));
    }

    #[test]
    fn duplicate_names() {
        let err = Batch::try_new([
            Column::from_i64s("a", [Some(1)]),
            Column::from_i64s("a", [Some(2)]),
        ])
        .unwrap_err();
        assert_eq!(ErrorKind::Argument, err.kind());
    }

    #[test]
    fn from_rows_infers_and_fills_missing() {
        let rows: Vec<IndexMap<String, InputValue>> = vec![
            [("a".to_string(), InputValue::Int(1))].into_iter().collect(),
            [
                ("a".to_string(), InputValue::Float(0.5)),
                ("b".to_string(), InputValue::from("x")),
            ]
            .into_iter()
            .collect(),
        ];

        let batch = Batch::from_rows(&rows).unwrap();
        assert_eq!(2, batch.num_rows());

        let a = batch.column("a").unwrap();
        assert_eq!(&DataType::Float64, a.datatype());
        assert_eq!(
            &[ScalarValue::Float64(1.0), ScalarValue::Float64(0.5)],
            a.values()
        );

        let b = batch.column("b").unwrap();
        assert_eq!(&[ScalarValue::Null, ScalarValue::from("x")], b.values());
    }

    #[test]
    fn lookup() {
        let batch = Batch::try_new([Column::from_strs("s", [Some("x"), None])]).unwrap();
        assert_eq!(2, batch.num_rows());
        assert!(batch.column("s").is_some());
        assert!(batch.column("t").is_none());
    }
}
