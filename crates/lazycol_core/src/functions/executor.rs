//! Row-at-a-time helpers for executing functions over columns.
//!
//! Every executor skips null inputs, leaving a null in the output.
use lazycol_error::{LcError, Result};

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;

/// Access to the physical value inside a scalar.
pub trait ScalarStorage {
    const NAME: &'static str;
    type StorageType: ?Sized;

    /// Get the storage value, None if the scalar holds a different type.
    fn get(value: &ScalarValue) -> Option<&Self::StorageType>;
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalUtf8;

impl ScalarStorage for PhysicalUtf8 {
    const NAME: &'static str = "Utf8";
    type StorageType = str;

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        match value {
            ScalarValue::Utf8(s) | ScalarValue::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalBinary;

impl ScalarStorage for PhysicalBinary {
    const NAME: &'static str = "Binary";
    type StorageType = [u8];

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        match value {
            ScalarValue::Binary(b) => Some(b),
            ScalarValue::Utf8(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalList;

impl ScalarStorage for PhysicalList {
    const NAME: &'static str = "List";
    type StorageType = [ScalarValue];

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        match value {
            ScalarValue::List(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicalStruct;

impl ScalarStorage for PhysicalStruct {
    const NAME: &'static str = "Struct";
    type StorageType = [(String, ScalarValue)];

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        match value {
            ScalarValue::Struct(v) => Some(v),
            _ => None,
        }
    }
}

/// Dates, times and datetimes.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalTemporal;

impl ScalarStorage for PhysicalTemporal {
    const NAME: &'static str = "temporal";
    type StorageType = ScalarValue;

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        match value {
            ScalarValue::Date(_) | ScalarValue::Time(_) | ScalarValue::Datetime(_) => Some(value),
            _ => None,
        }
    }
}

/// Any non-null scalar, for operations that compare whole values.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalAny;

impl ScalarStorage for PhysicalAny {
    const NAME: &'static str = "Any";
    type StorageType = ScalarValue;

    fn get(value: &ScalarValue) -> Option<&Self::StorageType> {
        Some(value)
    }
}

/// Output slot for a single row.
#[derive(Debug)]
pub struct PutBuffer<'a> {
    slot: &'a mut ScalarValue,
}

impl PutBuffer<'_> {
    pub fn put(self, value: impl Into<ScalarValue>) {
        *self.slot = value.into();
    }

    pub fn put_null(self) {
        *self.slot = ScalarValue::Null;
    }
}

pub(crate) fn storage_mismatch<S: ScalarStorage>(column: &Column, value: &ScalarValue) -> LcError {
    LcError::compute(format!("Expected {} values", S::NAME))
        .with_field("column", column.name())
        .with_field("datatype", column.datatype())
        .with_field("value", value)
}

fn check_lengths(columns: &[&Column]) -> Result<usize> {
    let len = columns.first().map(|c| c.len()).unwrap_or(0);
    if let Some(column) = columns.iter().find(|c| c.len() != len) {
        return Err(LcError::new("Executor inputs have different lengths")
            .with_field("column", column.name())
            .with_field("length", column.len())
            .with_field("expected", len));
    }
    Ok(len)
}

#[derive(Debug, Clone)]
pub struct UnaryExecutor;

impl UnaryExecutor {
    /// Execute a unary operation on `input`, returning the output values.
    pub fn execute<S, Op>(input: &Column, mut op: Op) -> Result<Vec<ScalarValue>>
    where
        S: ScalarStorage,
        Op: FnMut(&S::StorageType, PutBuffer<'_>),
    {
        let mut out = vec![ScalarValue::Null; input.len()];

        for (value, slot) in input.values().iter().zip(out.iter_mut()) {
            if value.is_null() {
                continue;
            }
            let v = S::get(value).ok_or_else(|| storage_mismatch::<S>(input, value))?;
            op(v, PutBuffer { slot });
        }

        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExecutor;

impl BinaryExecutor {
    /// Execute a binary operation over two equal length columns.
    ///
    /// Output is null if either input is null.
    pub fn execute<S1, S2, Op>(left: &Column, right: &Column, mut op: Op) -> Result<Vec<ScalarValue>>
    where
        S1: ScalarStorage,
        S2: ScalarStorage,
        Op: FnMut(&S1::StorageType, &S2::StorageType, PutBuffer<'_>),
    {
        let len = check_lengths(&[left, right])?;
        let mut out = vec![ScalarValue::Null; len];

        for ((l, r), slot) in left
            .values()
            .iter()
            .zip(right.values())
            .zip(out.iter_mut())
        {
            if l.is_null() || r.is_null() {
                continue;
            }
            let l = S1::get(l).ok_or_else(|| storage_mismatch::<S1>(left, l))?;
            let r = S2::get(r).ok_or_else(|| storage_mismatch::<S2>(right, r))?;
            op(l, r, PutBuffer { slot });
        }

        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct TernaryExecutor;

impl TernaryExecutor {
    pub fn execute<S1, S2, S3, Op>(
        a: &Column,
        b: &Column,
        c: &Column,
        mut op: Op,
    ) -> Result<Vec<ScalarValue>>
    where
        S1: ScalarStorage,
        S2: ScalarStorage,
        S3: ScalarStorage,
        Op: FnMut(&S1::StorageType, &S2::StorageType, &S3::StorageType, PutBuffer<'_>),
    {
        let len = check_lengths(&[a, b, c])?;
        let mut out = vec![ScalarValue::Null; len];

        for (idx, slot) in out.iter_mut().enumerate() {
            let (va, vb, vc) = (&a.values()[idx], &b.values()[idx], &c.values()[idx]);
            if va.is_null() || vb.is_null() || vc.is_null() {
                continue;
            }
            let va = S1::get(va).ok_or_else(|| storage_mismatch::<S1>(a, va))?;
            let vb = S2::get(vb).ok_or_else(|| storage_mismatch::<S2>(b, vb))?;
            let vc = S3::get(vc).ok_or_else(|| storage_mismatch::<S3>(c, vc))?;
            op(va, vb, vc, PutBuffer { slot });
        }

        Ok(out)
    }
}

/// Tracks the first error hit while executing a fallible per-row operation.
///
/// In non-strict mode errors are dropped and the row is left null.
#[derive(Debug)]
pub struct ErrorState {
    strict: bool,
    error: Option<LcError>,
}

impl ErrorState {
    pub fn new(strict: bool) -> Self {
        ErrorState {
            strict,
            error: None,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Record an error. Only the first error is kept.
    pub fn set_error<F>(&mut self, error_fn: F)
    where
        F: FnOnce() -> LcError,
    {
        if self.strict && self.error.is_none() {
            self.error = Some(error_fn());
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
