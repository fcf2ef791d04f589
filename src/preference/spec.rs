use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ConfigError, Literal, PreferenceType};
use crate::range::parse_range;

/// Characters that would need escaping inside a double-quoted attribute.
const ATTRIBUTE_RESERVED: [char; 4] = ['"', '<', '>', '&'];

/// A preference as declared in the config file, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDecl {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Literal>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
}

/// Size bounds of a multi-valued preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub min: usize,
    pub max: usize,
    /// Draw distinct domain positions instead of sampling with replacement.
    pub distinct: bool,
}

/// A resolved preference. Immutable once built; `domain` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSpec {
    name: String,
    kind: PreferenceType,
    domain: Vec<Literal>,
    cardinality: Option<Cardinality>,
}

impl PreferenceSpec {
    pub fn from_decl(decl: &PreferenceDecl) -> Result<Self, ConfigError> {
        let kind = match decl.kind.as_deref() {
            Some(raw) => raw.parse::<PreferenceType>()?,
            None => PreferenceType::default(),
        };

        let name = decl
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingName)?
            .to_string();
        ensure_attribute_safe(&name, &name)?;

        let domain = resolve_domain(&name, kind, decl)?;
        if kind.uses_value_attribute() {
            for literal in &domain {
                ensure_attribute_safe(&name, &literal.to_string())?;
            }
        }

        let cardinality = if kind.is_multi() {
            Some(resolve_cardinality(&name, domain.len(), decl)?)
        } else {
            if decl.min.is_some() || decl.max.is_some() || decl.distinct.is_some() {
                warn!(
                    preference = %name,
                    kind = %kind,
                    "ignoring min/max/distinct on a single-valued preference"
                );
            }
            None
        };

        Ok(Self {
            name,
            kind,
            domain,
            cardinality,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PreferenceType {
        self.kind
    }

    pub fn domain(&self) -> &[Literal] {
        &self.domain
    }

    /// Present exactly when the type is [`PreferenceType::MultiSet`].
    pub fn cardinality(&self) -> Option<Cardinality> {
        self.cardinality
    }
}

/// Resolves declarations in order into a caller-owned list, stopping at the
/// first invalid one.
pub fn resolve_preferences(decls: &[PreferenceDecl]) -> Result<Vec<PreferenceSpec>, ConfigError> {
    decls
        .iter()
        .enumerate()
        .map(|(index, decl)| {
            PreferenceSpec::from_decl(decl).map_err(|error| ConfigError::InDeclaration {
                index,
                error: Box::new(error),
            })
        })
        .collect()
}

fn resolve_domain(
    name: &str,
    kind: PreferenceType,
    decl: &PreferenceDecl,
) -> Result<Vec<Literal>, ConfigError> {
    let domain = if let Some(expr) = decl.range.as_deref() {
        if decl.values.is_some() {
            warn!(preference = %name, "both `range` and `values` given; using `range`");
        }
        parse_range(expr).map_err(|error| ConfigError::Range {
            name: name.to_string(),
            error,
        })?
    } else if let Some(values) = &decl.values {
        values.clone()
    } else if kind == PreferenceType::Boolean {
        vec![Literal::Bool(true), Literal::Bool(false)]
    } else {
        return Err(ConfigError::MissingDomain {
            name: name.to_string(),
        });
    };

    if domain.is_empty() {
        return Err(ConfigError::EmptyDomain {
            name: name.to_string(),
        });
    }
    Ok(domain)
}

fn resolve_cardinality(
    name: &str,
    domain_len: usize,
    decl: &PreferenceDecl,
) -> Result<Cardinality, ConfigError> {
    let min = decl.min.unwrap_or(0);
    let max = decl.max.unwrap_or(domain_len);
    if min > max || max > domain_len {
        return Err(ConfigError::InvalidBounds {
            name: name.to_string(),
            min,
            max,
            domain_len,
        });
    }
    Ok(Cardinality {
        min,
        max,
        distinct: decl.distinct.unwrap_or(false),
    })
}

fn ensure_attribute_safe(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.contains(ATTRIBUTE_RESERVED) {
        return Err(ConfigError::UnencodableValue {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
