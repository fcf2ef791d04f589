use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Value domain of a preference. Determines both the sampling rule and the
/// element tag used when the preference is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreferenceType {
    #[default]
    String,
    Integer,
    Boolean,
    Float,
    MultiSet,
}

/// Accepted config spellings, matched case-insensitively.
const TYPE_NAMES: &[(&str, PreferenceType)] = &[
    ("string", PreferenceType::String),
    ("int", PreferenceType::Integer),
    ("integer", PreferenceType::Integer),
    ("boolean", PreferenceType::Boolean),
    ("bool", PreferenceType::Boolean),
    ("float", PreferenceType::Float),
    ("set", PreferenceType::MultiSet),
    ("multiset", PreferenceType::MultiSet),
];

impl PreferenceType {
    pub const ALL: [PreferenceType; 5] = [
        PreferenceType::String,
        PreferenceType::Integer,
        PreferenceType::Boolean,
        PreferenceType::Float,
        PreferenceType::MultiSet,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PreferenceType::String => "string",
            PreferenceType::Integer => "int",
            PreferenceType::Boolean => "boolean",
            PreferenceType::Float => "float",
            PreferenceType::MultiSet => "set",
        }
    }

    pub fn is_multi(self) -> bool {
        matches!(self, PreferenceType::MultiSet)
    }

    /// Whether the realized value is written as a `value="..."` attribute
    /// rather than as element text.
    pub fn uses_value_attribute(self) -> bool {
        matches!(
            self,
            PreferenceType::Integer | PreferenceType::Boolean | PreferenceType::Float
        )
    }
}

impl FromStr for PreferenceType {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let needle = name.trim();
        TYPE_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(needle))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownType(name.to_string()))
    }
}

impl fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
