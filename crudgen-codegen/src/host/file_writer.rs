//! Persistence of generated source files

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::package_resolver::DirectoryHandle;
use crate::error::{CodegenError, Result};

/// Writes one generated source file into a resolved package directory
pub trait FileWriter {
    /// Returns the path the file was written to
    fn write_source_file(
        &mut self,
        directory: &DirectoryHandle,
        file_name: &str,
        contents: &str,
    ) -> Result<PathBuf>;

    /// Remove a file previously returned by [`FileWriter::write_source_file`]
    fn remove_source_file(&mut self, path: &Path) -> Result<()>;
}

/// Writes files to disk through a temporary file that is renamed into place
///
/// A failed write never leaves a partial file at the target path.
#[derive(Debug, Clone, Default)]
pub struct FsFileWriter {
    overwrite: bool,
}

impl FsFileWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }
}

impl FileWriter for FsFileWriter {
    fn write_source_file(
        &mut self,
        directory: &DirectoryHandle,
        file_name: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        let path = directory.path.join(file_name);
        let fail = |e: io::Error| CodegenError::write_failure(&path, e);

        if !self.overwrite && path.exists() {
            return Err(fail(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "file already exists",
            )));
        }

        let mut file = NamedTempFile::new_in(&directory.path).map_err(fail)?;
        file.write_all(contents.as_bytes()).map_err(fail)?;
        file.flush().map_err(fail)?;

        if self.overwrite {
            file.persist(&path).map_err(|e| fail(e.error))?;
        } else {
            file.persist_noclobber(&path).map_err(|e| fail(e.error))?;
        }

        debug!("Wrote {:?}", path);
        Ok(path)
    }

    fn remove_source_file(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| CodegenError::write_failure(path, e))?;
        debug!("Removed {:?}", path);
        Ok(())
    }
}

/// A file captured by [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub package: String,
    pub contents: String,
}

/// Keeps generated files in memory instead of writing them (dry runs, previews)
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: Vec<WrittenFile>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[WrittenFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<WrittenFile> {
        self.files
    }
}

impl FileWriter for MemoryWriter {
    fn write_source_file(
        &mut self,
        directory: &DirectoryHandle,
        file_name: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        let path = directory.path.join(file_name);
        info!("Would write {} ({} bytes)", path.display(), contents.len());
        self.files.push(WrittenFile {
            path: path.clone(),
            package: directory.package.clone(),
            contents: contents.to_string(),
        });
        Ok(path)
    }

    fn remove_source_file(&mut self, path: &Path) -> Result<()> {
        self.files.retain(|f| f.path != path);
        Ok(())
    }
}
