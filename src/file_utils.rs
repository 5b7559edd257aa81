use anyhow::{Result, Context};
use log::debug;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// @module: File and scratch directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: File exists and is not empty
    pub fn file_has_content<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path.as_ref())
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }
}

/// Run-scoped scratch directory.
///
/// Created at the start of a run and removed with everything in it when the
/// handle is dropped, on success and error paths alike. Removal is
/// best-effort.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp location
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("yt-parallel-")
            .tempdir()
            .context("Failed to create temporary directory")?;

        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    /// Remove the directory now, reporting failures at debug level
    pub fn close(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                debug!("Could not remove temporary directory {}: {}", path.display(), e);
            } else {
                debug!("Removed temporary directory {}", path.display());
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.cleanup();
    }
}
