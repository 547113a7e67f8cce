//! Permissive field coercion

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, LoaderResult};

/// A raw input field, numeric when it reads as a finite number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Numeric(f64),
    Raw(String),
}

impl Field {
    /// Coerce a token. Never fails; anything that is not a finite
    /// number is passed through unchanged.
    pub fn coerce(token: &str) -> Self {
        match token.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Field::Numeric(value),
            _ => Field::Raw(token.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Numeric(v) => Some(*v),
            Field::Raw(_) => None,
        }
    }

    /// The numeric value, or `NotNumeric` naming the field and line
    pub fn require_numeric(&self, line: u64, field: &str) -> LoaderResult<f64> {
        match self {
            Field::Numeric(v) => Ok(*v),
            Field::Raw(value) => Err(LoaderError::NotNumeric {
                line,
                field: field.to_string(),
                value: value.clone(),
            }),
        }
    }
}

impl From<&str> for Field {
    fn from(token: &str) -> Self {
        Field::coerce(token)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Numeric(v) => write!(f, "{}", v),
            Field::Raw(s) => f.write_str(s),
        }
    }
}
