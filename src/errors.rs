//! Error taxonomy: configuration parsing and schema decoding fail at load
//! time, geometric inconsistencies fail validation, and solid construction
//! failures carry the name of the body being built.

use thiserror::Error;

use crate::float_types::Real;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A non-comment, non-blank configuration line that is not a number.
    #[error("config line {line}: cannot parse `{token}` as a number")]
    Parse { line: usize, token: String },

    /// The value stream ended before the declared schema was satisfied.
    #[error("config stream exhausted while reading {field} (value #{index})")]
    Schema { field: &'static str, index: usize },

    /// A count field holds a value that is not the required kind of integer.
    #[error("{field} must be a {expected}, got {value}")]
    Count {
        field: &'static str,
        expected: &'static str,
        value: Real,
    },

    /// Values left over after the schema was fully decoded.
    #[error("config stream has {extra} unread trailing value(s)")]
    TrailingValues { extra: usize },

    /// Parameters that decode fine but describe impossible geometry.
    #[error("inconsistent configuration: {0}")]
    Configuration(String),

    /// A solid could not be constructed.
    #[error("cannot build `{body}`: {reason}")]
    Geometry { body: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Re-tag a geometry error with the name of the body being built, so
    /// failures deep inside a builder surface with a useful identity.
    #[must_use]
    pub fn for_body(self, body: &str) -> Self {
        match self {
            Error::Geometry { reason, .. } => Error::Geometry {
                body: body.to_string(),
                reason,
            },
            other => other,
        }
    }
}
