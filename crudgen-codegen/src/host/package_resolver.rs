//! Resolution of target packages inside the project source tree

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codegen::PackageKind;
use crate::config::{defaults, CodegenConfig, PackageNames};
use crate::error::{CodegenError, Result};

/// Writable location of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    pub path: PathBuf,
    /// Fully qualified package name, e.g. "com.example.demo.model"
    pub package: String,
}

/// Resolves (and creates when absent) the package an artifact belongs in
pub trait PackageResolver {
    fn ensure_package(&mut self, kind: PackageKind) -> Result<DirectoryHandle>;
}

/// Base package location the layer packages are created under
#[derive(Debug, Clone, PartialEq, Eq)]
struct BaseLocation {
    dir: PathBuf,
    package: String,
}

/// Resolves packages on the local filesystem
///
/// The base package is either configured or taken from the class annotated
/// with `@SpringBootApplication`. It is looked up once and cached.
#[derive(Debug, Clone)]
pub struct FsPackageResolver {
    source_dir: PathBuf,
    base_package: Option<String>,
    packages: PackageNames,
    create_missing: bool,
    base: Option<BaseLocation>,
}

impl FsPackageResolver {
    pub fn new(
        source_dir: impl AsRef<Path>,
        base_package: Option<String>,
        packages: PackageNames,
    ) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            base_package,
            packages,
            create_missing: true,
            base: None,
        }
    }

    /// Leave missing package directories uncreated (dry runs and previews)
    pub fn without_creating(mut self) -> Self {
        self.create_missing = false;
        self
    }

    pub fn from_config(config: &CodegenConfig) -> Self {
        let resolver = Self::new(
            config.source_dir(),
            config.base_package.clone(),
            config.packages.clone(),
        );
        if config.dry_run {
            resolver.without_creating()
        } else {
            resolver
        }
    }

    fn base(&mut self) -> Result<BaseLocation> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let base = self.locate_base()?;
        info!("Base package {:?} at {:?}", base.package, base.dir);
        self.base = Some(base.clone());
        Ok(base)
    }

    fn locate_base(&self) -> Result<BaseLocation> {
        if !self.source_dir.is_dir() {
            return Err(CodegenError::MissingHostRoot(format!(
                "source root {} does not exist",
                self.source_dir.display()
            )));
        }

        if let Some(package) = &self.base_package {
            return Ok(BaseLocation {
                dir: self.source_dir.join(package_to_path(package)),
                package: package.clone(),
            });
        }

        let (entry_point, source) = find_entry_point(&self.source_dir)
            .map_err(|e| {
                CodegenError::MissingHostRoot(format!(
                    "cannot scan {}: {}",
                    self.source_dir.display(),
                    e
                ))
            })?
            .ok_or_else(|| {
                CodegenError::MissingHostRoot(format!(
                    "cannot find a {} class under {}",
                    defaults::ENTRY_POINT_MARKER,
                    self.source_dir.display()
                ))
            })?;
        debug!("Application entry point: {:?}", entry_point);

        let dir = entry_point
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                CodegenError::MissingHostRoot(format!(
                    "entry point {} has no parent directory",
                    entry_point.display()
                ))
            })?;
        let package = read_package_declaration(&source)
            .unwrap_or_else(|| path_to_package(&self.source_dir, &dir));

        Ok(BaseLocation { dir, package })
    }
}

impl PackageResolver for FsPackageResolver {
    fn ensure_package(&mut self, kind: PackageKind) -> Result<DirectoryHandle> {
        let base = self.base()?;
        let relative = self.packages.get(kind);
        let path = base.dir.join(package_to_path(relative));

        if self.create_missing && !path.is_dir() {
            debug!("Creating package directory {:?}", path);
            fs::create_dir_all(&path).map_err(|e| {
                CodegenError::MissingHostRoot(format!(
                    "cannot create package {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        let package = if base.package.is_empty() {
            relative.to_string()
        } else {
            format!("{}.{}", base.package, relative)
        };

        Ok(DirectoryHandle { path, package })
    }
}

fn package_to_path(package: &str) -> PathBuf {
    package.split('.').collect()
}

fn path_to_package(source_dir: &Path, dir: &Path) -> String {
    dir.strip_prefix(source_dir)
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default()
}

/// Extract the name from a `package a.b.c;` declaration
fn read_package_declaration(source: &str) -> Option<String> {
    source.lines().find_map(|line| {
        line.trim()
            .strip_prefix("package ")
            .and_then(|rest| rest.split(';').next())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

/// Depth-first search for a source file carrying the entry point annotation
///
/// Entries are visited in sorted order so repeated runs pick the same file.
/// Symlinks are not followed. Returns the file with its source text; invalid
/// UTF-8 is decoded lossily.
fn find_entry_point(dir: &Path) -> io::Result<Option<(PathBuf, String)>> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        } else if file_type.is_file() && is_source_file(&entry.path()) {
            files.push(entry.path());
        }
    }
    files.sort();
    dirs.sort();

    for path in files {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping unreadable source {:?}: {}", path, e);
                continue;
            }
        };
        let source = String::from_utf8_lossy(&bytes);
        if source.contains(defaults::ENTRY_POINT_MARKER) {
            let source = source.into_owned();
            return Ok(Some((path, source)));
        }
    }

    for path in &dirs {
        if let Some(found) = find_entry_point(path)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == defaults::SOURCE_FILE_EXTENSION.trim_start_matches('.'))
}
