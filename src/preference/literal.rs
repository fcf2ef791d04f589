use std::fmt;

use serde::{Deserialize, Serialize};

/// One candidate value as it appears in config or comes out of a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    /// Non-negative integers past `i64::MAX`; kept exact instead of widening to `f64`.
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Literal::Integer(value),
            Err(_) => Literal::Unsigned(value),
        }
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Unsigned(value) => write!(f, "{value}"),
            // Integral floats keep a trailing ".0" so they stay recognisable as floats.
            Literal::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Literal::Float(value) => write!(f, "{value}"),
            Literal::Text(value) => f.write_str(value),
        }
    }
}
