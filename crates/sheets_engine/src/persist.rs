use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output path {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writes a rendered sheet to `{dir}/{filename}` through a temp file in the
/// same directory and a rename. Missing directories are created.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(PersistError::NotADirectory(self.dir.clone()));
        }
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;

        let target = self.dir.join(filename);
        tmp.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
