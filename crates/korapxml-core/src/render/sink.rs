//! Atomic output files
//!
//! Content is streamed into a temporary sibling and renamed into place on
//! commit, so an abandoned file never leaves partial output behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{file_error, Result};

/// A file that only appears at its target path once committed
pub struct AtomicFile {
    target: PathBuf,
    temp: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl AtomicFile {
    /// Open a temporary sibling of `target`, creating parent directories
    pub fn create(target: &Path) -> Result<Self> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| file_error(target, e))?;
        }

        let temp = temp_path(target);
        let file = File::create(&temp).map_err(|e| file_error(target, e))?;

        Ok(Self {
            target: target.to_path_buf(),
            temp,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush the content and rename it into place
    pub fn commit(mut self) -> Result<PathBuf> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| file_error(&self.target, "file already committed"))?;
        let file = writer
            .into_inner()
            .map_err(|e| file_error(&self.target, e.error()))?;
        file.sync_all().map_err(|e| file_error(&self.target, e))?;
        drop(file);

        fs::rename(&self.temp, &self.target).map_err(|e| file_error(&self.target, e))?;
        Ok(self.target.clone())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::other("file already committed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        // Not committed: discard the temporary file
        if self.writer.take().is_some() {
            fs::remove_file(&self.temp).ok();
        }
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}
