//! Functions on struct values.
use lazycol_error::{LcError, Result};

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::{DataType, Field, StructTypeMeta};
use crate::arrays::scalar::ScalarValue;
use crate::engine::context::EvalContext;
use crate::functions::executor::{PhysicalStruct, UnaryExecutor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructFunction {
    Field { name: String },
    RenameFields { names: Vec<String> },
}

impl StructFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Field { .. } => "field",
            Self::RenameFields { .. } => "rename_fields",
        }
    }

    pub fn num_inputs(&self) -> usize {
        1
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Field { name } => vec![format!("{name:?}")],
            Self::RenameFields { names } => vec![format!("{names:?}")],
        }
    }

    pub fn evaluate(&self, _ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;
        let fields = input.datatype().struct_fields().ok_or_else(|| {
            LcError::compute("Expected a struct column")
                .with_field("column", input.name())
                .with_field("datatype", input.datatype())
        })?;

        match self {
            Self::Field { name } => {
                let field = fields.iter().find(|f| &f.name == name).ok_or_else(|| {
                    LcError::compute(format!("Struct has no field named '{name}'"))
                        .with_field("column", input.name())
                        .with_field("field", name)
                })?;

                let values = UnaryExecutor::execute::<PhysicalStruct, _>(input, |row, buf| {
                    match row.iter().find(|(n, _)| n == name) {
                        Some((_, v)) => buf.put(v.clone()),
                        None => buf.put_null(),
                    }
                })?;

                Ok(Column::new(input.name(), field.datatype.clone(), values))
            }
            Self::RenameFields { names } => {
                if names.len() != fields.len() {
                    return Err(LcError::compute(format!(
                        "Expected {} field names, got {}",
                        fields.len(),
                        names.len()
                    ))
                    .with_field("column", input.name()));
                }

                let datatype = DataType::Struct(Some(StructTypeMeta {
                    fields: fields
                        .iter()
                        .zip(names)
                        .map(|(field, name)| Field::new(name.clone(), field.datatype.clone()))
                        .collect(),
                }));

                let values = UnaryExecutor::execute::<PhysicalStruct, _>(input, |row, buf| {
                    buf.put(ScalarValue::Struct(
                        row.iter()
                            .zip(names)
                            .map(|((_, v), name)| (name.clone(), v.clone()))
                            .collect(),
                    ))
                })?;

                Ok(Column::new(input.name(), datatype, values))
            }
        }
    }
}
