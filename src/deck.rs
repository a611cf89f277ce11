//! Simulation-deck line injection.
//!
//! The deck is loaded once into a line document. Each tracked cursor is an
//! insertion point that advances by one line per injected statement;
//! inserting ahead of another cursor shifts that cursor down, so record
//! groups placed at different lines keep their relative order no matter how
//! they interleave.
//!
//! Two record kinds exist: a body/material declaration and a geometry-file
//! reference. A `last` flag terminates a logical group with a blank line.

use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::float_types::Real;

/// Handle to one insertion point in a [`Deck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorId(usize);

#[derive(Debug, Clone)]
pub struct Deck {
    lines: Vec<String>,
    cursors: Vec<usize>,
}

impl Deck {
    /// Load a deck from disk.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_text(&fs::read_to_string(path)?))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            cursors: Vec::new(),
        }
    }

    /// Track an insertion point before the 1-based `line` of the document as
    /// it currently stands, clamped to the document end.
    pub fn cursor(&mut self, line: usize) -> CursorId {
        let pos = line.saturating_sub(1).min(self.lines.len());
        self.cursors.push(pos);
        CursorId(self.cursors.len() - 1)
    }

    fn insert(&mut self, cursor: CursorId, line: String) {
        let pos = self.cursors[cursor.0];
        self.lines.insert(pos, line);
        for c in &mut self.cursors {
            if *c >= pos {
                *c += 1;
            }
        }
    }

    /// Inject a body/material declaration at `cursor`.
    pub fn body(&mut self, cursor: CursorId, name: &str, material: &str) {
        self.insert(cursor, format!("body {name} {name} {material}"));
    }

    /// Inject a geometry-file declaration at `cursor`; `last` terminates the
    /// record group with a blank line.
    pub fn file(
        &mut self,
        cursor: CursorId,
        object_name: &str,
        filepath: &str,
        scale: Real,
        last: bool,
    ) {
        self.insert(
            cursor,
            format!("file {object_name} \"{filepath}\" {scale} 0 0 0"),
        );
        if last {
            self.insert(cursor, String::new());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current document text, newline-terminated.
    pub fn to_text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the document to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())?;
        Ok(())
    }
}
