use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lazycol_error::{LcError, Result};

/// Text encodings for binary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryEncoding {
    Hex,
    Base64,
}

impl BinaryEncoding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }

    pub fn decode(&self, text: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Hex => hex::decode(text).map_err(|e| {
                LcError::compute("Failed to decode hex input").with_source(e)
            }),
            Self::Base64 => STANDARD.decode(text).map_err(|e| {
                LcError::compute("Failed to decode base64 input").with_source(e)
            }),
        }
    }
}

impl FromStr for BinaryEncoding {
    type Err = LcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            other => Err(LcError::argument(format!(
                "encoding must be one of {{'hex', 'base64'}}, got {other}"
            ))
            .with_field("argument", "encoding")
            .with_field("value", other)),
        }
    }
}

impl fmt::Display for BinaryEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
