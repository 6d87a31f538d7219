use std::fmt;

use lazycol_error::{LcError, Result};
use serde_json::Value;

use crate::arrays::column::Column;
use crate::arrays::scalar::ScalarValue;
use crate::functions::executor::{PhysicalUtf8, UnaryExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    Key(String),
    Index(usize),
    Wildcard,
}

/// A parsed JSONPath expression.
///
/// Supports the root `$`, child access with `.name` or `['name']`, array
/// indexing with `[0]`, and wildcards `.*` / `[*]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    source: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn parse(path: &str) -> Result<Self> {
        let unsupported = |reason: &str| {
            LcError::argument(format!("Unsupported JSON path '{path}': {reason}"))
                .with_field("argument", "json_path")
                .with_field("value", path)
        };

        let rest = path
            .strip_prefix('$')
            .ok_or_else(|| unsupported("path must start with '$'"))?;
        let bytes = rest.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'.' => {
                    pos += 1;
                    if bytes.get(pos) == Some(&b'*') {
                        segments.push(PathSegment::Wildcard);
                        pos += 1;
                        continue;
                    }
                    let start = pos;
                    while pos < bytes.len() && bytes[pos] != b'.' && bytes[pos] != b'[' {
                        pos += 1;
                    }
                    if start == pos {
                        return Err(unsupported("empty key"));
                    }
                    segments.push(PathSegment::Key(rest[start..pos].to_string()));
                }
                b'[' => {
                    let close = rest[pos..]
                        .find(']')
                        .map(|idx| pos + idx)
                        .ok_or_else(|| unsupported("unclosed '['"))?;
                    let inner = &rest[pos + 1..close];
                    let segment = if inner == "*" {
                        PathSegment::Wildcard
                    } else if let Some(key) = quoted(inner) {
                        PathSegment::Key(key.to_string())
                    } else {
                        let idx = inner
                            .parse::<usize>()
                            .map_err(|_| unsupported("expected an index, quoted key or '*'"))?;
                        PathSegment::Index(idx)
                    };
                    segments.push(segment);
                    pos = close + 1;
                }
                _ => return Err(unsupported("expected '.' or '['")),
            }
        }

        Ok(JsonPath {
            source: path.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Find the first value matching this path.
    pub fn first_match<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        first_match(&self.segments, value)
    }
}

fn quoted(s: &str) -> Option<&str> {
    let inner = s
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| s.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
    if inner.is_empty() { None } else { Some(inner) }
}

fn first_match<'a>(segments: &[PathSegment], value: &'a Value) -> Option<&'a Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(value);
    };

    match (segment, value) {
        (PathSegment::Key(key), Value::Object(map)) => first_match(rest, map.get(key)?),
        (PathSegment::Index(idx), Value::Array(values)) => first_match(rest, values.get(*idx)?),
        (PathSegment::Wildcard, Value::Object(map)) => {
            map.values().find_map(|v| first_match(rest, v))
        }
        (PathSegment::Wildcard, Value::Array(values)) => {
            values.iter().find_map(|v| first_match(rest, v))
        }
        _ => None,
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Render a matched JSON value as text. Strings are unquoted.
fn match_to_scalar(value: &Value) -> ScalarValue {
    match value {
        Value::Null => ScalarValue::Null,
        Value::String(s) => ScalarValue::Utf8(s.clone()),
        other => ScalarValue::Utf8(other.to_string()),
    }
}

/// Extract the first match of `path` from each JSON string.
///
/// Strings that aren't valid JSON produce null.
pub fn eval_json_path_match(input: &Column, path: &JsonPath) -> Result<Vec<ScalarValue>> {
    UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        let matched = serde_json::from_str::<Value>(s)
            .ok()
            .and_then(|doc| path.first_match(&doc).map(match_to_scalar));
        match matched {
            Some(v) => buf.put(v),
            None => buf.put_null(),
        }
    })
}
