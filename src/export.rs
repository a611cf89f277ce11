//! STL export of finished solids, one file per named body.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::reactor::Solid;

#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    /// Create the exporter, making sure the target directory exists.
    pub fn new(out_dir: &Path) -> Result<Self> {
        fs::create_dir_all(out_dir)?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn target(&self, name: &str) -> PathBuf {
        self.out_dir.join(name).with_extension("stl")
    }

    /// Export a solid as binary STL; returns the written path.
    pub fn write_stl(&self, solid: &Solid, name: &str) -> Result<PathBuf> {
        let path = self.target(name);
        fs::write(&path, solid.to_stl_binary(name)?)?;
        Ok(path)
    }

    /// Export a solid as ASCII STL, for tools that reject the binary
    /// flavour.
    pub fn write_stl_ascii(&self, solid: &Solid, name: &str) -> Result<PathBuf> {
        let path = self.target(name);
        fs::write(&path, solid.to_stl_ascii(name))?;
        Ok(path)
    }
}
