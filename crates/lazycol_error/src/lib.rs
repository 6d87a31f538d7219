use std::borrow::Cow;
use std::error::Error;
use std::fmt;

pub type Result<T, E = LcError> = std::result::Result<T, E>;

/// Broad category of an error.
///
/// Construction-time failures (`Argument`, `TypeConstruction`,
/// `SchemaInference`) are raised synchronously while building expressions or
/// types. `Compute` errors are raised during evaluation and are forwarded
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// User misuse of an API.
    Argument,
    /// Invalid data type parameters.
    TypeConstruction,
    /// Column values whose types cannot be reconciled.
    SchemaInference,
    /// Failure while evaluating an expression.
    Compute,
    /// Broken invariant.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => write!(f, "ArgumentError"),
            Self::TypeConstruction => write!(f, "TypeConstructionError"),
            Self::SchemaInference => write!(f, "SchemaInferenceError"),
            Self::Compute => write!(f, "ComputeError"),
            Self::Internal => write!(f, "InternalError"),
        }
    }
}

#[derive(Debug)]
pub struct LcError {
    inner: Box<LcErrorInner>,
}

#[derive(Debug)]
struct LcErrorInner {
    kind: ErrorKind,
    msg: String,
    fields: Vec<(Cow<'static, str>, String)>,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl LcError {
    /// Create a new internal error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Internal, msg)
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Argument, msg)
    }

    pub fn type_construction(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::TypeConstruction, msg)
    }

    pub fn schema_inference(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::SchemaInference, msg)
    }

    pub fn compute(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Compute, msg)
    }

    pub fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        LcError {
            inner: Box::new(LcErrorInner {
                kind,
                msg: msg.into(),
                fields: Vec::new(),
                source: None,
            }),
        }
    }

    /// Attach a named value to the error.
    ///
    /// Fields are rendered after the message in the order they were added.
    pub fn with_field(mut self, key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        self.inner.fields.push((key.into(), value.to_string()));
        self
    }

    pub fn with_source(mut self, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn get_msg(&self) -> &str {
        &self.inner.msg
    }

    /// Get the value of a field previously attached with `with_field`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.inner
            .fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_argument(&self) -> bool {
        self.kind() == ErrorKind::Argument
    }

    pub fn is_compute(&self) -> bool {
        self.kind() == ErrorKind::Compute
    }
}

impl fmt::Display for LcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.inner.kind, self.inner.msg)?;

        if !self.inner.fields.is_empty() {
            write!(f, " (")?;
            for (idx, (key, value)) in self.inner.fields.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            write!(f, ")")?;
        }

        if let Some(source) = &self.inner.source {
            write!(f, "\nError source: {source}")?;
        }

        Ok(())
    }
}

impl Error for LcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source.as_ref().map(|e| e.as_ref() as _)
    }
}

/// Attach context to errors from other crates.
pub trait ResultExt<T, E> {
    /// Wrap the error with a message, keeping the original as the source.
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E: Error + Send + Sync + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn context(self, msg: &'static str) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(LcError::new(msg).with_source(e)),
        }
    }
}
