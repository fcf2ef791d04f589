//! Declared preferences and their resolved value domains.
//!
//! A [`PreferenceDecl`] is the raw record read from a config file. Resolving it
//! yields an immutable [`PreferenceSpec`] whose domain is never empty.

mod error;
mod kind;
mod literal;
mod spec;

pub use error::ConfigError;
pub use kind::PreferenceType;
pub use literal::Literal;
pub use spec::{Cardinality, PreferenceDecl, PreferenceSpec, resolve_preferences};
