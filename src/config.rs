//! Flat configuration stream: one numeric value per line, with `#` and `%`
//! comment lines.
//!
//! The loader knows nothing about the schema; it only turns text into an
//! ordered value sequence. Schema interpretation happens in [`crate::params`]
//! through the sequential [`Cursor`].

use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::float_types::Real;

/// Parse the ordered value stream out of configuration text.
///
/// Blank lines and lines whose first non-whitespace character is `#` or `%`
/// are skipped; every other line must parse as a number.
pub fn parse_values(text: &str) -> Result<Vec<Real>> {
    let mut values = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let value = line.parse::<Real>().map_err(|_| Error::Parse {
            line: idx + 1,
            token: line.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Read and parse a configuration file.
pub fn read_values(path: &Path) -> Result<Vec<Real>> {
    parse_values(&fs::read_to_string(path)?)
}

/// Sequential decoder over the value stream.
///
/// The schema is positional and self-describing: the layer count read early
/// on determines where every later section begins. All consumers therefore
/// advance one shared cursor instead of computing absolute offsets by hand.
#[derive(Debug)]
pub struct Cursor<'a> {
    values: &'a [Real],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(values: &'a [Real]) -> Self {
        Self { values, pos: 0 }
    }

    /// Index of the next value to be read.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Next raw value; `field` names the schema slot for diagnostics.
    pub fn next(&mut self, field: &'static str) -> Result<Real> {
        let value = self.values.get(self.pos).copied().ok_or(Error::Schema {
            field,
            index: self.pos,
        })?;
        self.pos += 1;
        Ok(value)
    }

    /// Next value as a non-negative integer count.
    pub fn next_count(&mut self, field: &'static str) -> Result<usize> {
        let value = self.next(field)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(Error::Count {
                field,
                expected: "non-negative integer",
                value,
            });
        }
        Ok(value as usize)
    }

    /// Next value as a strictly positive integer count.
    pub fn next_positive_count(&mut self, field: &'static str) -> Result<usize> {
        let value = self.next(field)?;
        if value < 1.0 || value.fract() != 0.0 {
            return Err(Error::Count {
                field,
                expected: "positive integer",
                value,
            });
        }
        Ok(value as usize)
    }

    /// The stream must be fully consumed once the schema is satisfied;
    /// trailing values almost always mean a mis-declared layer count.
    pub fn finish(self) -> Result<()> {
        let extra = self.values.len() - self.pos;
        if extra > 0 {
            return Err(Error::TrailingValues { extra });
        }
        Ok(())
    }
}
