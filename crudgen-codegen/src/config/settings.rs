//! Configuration settings for crudgen-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::PackageKind;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the table metadata file (JSON or TOML)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Root of the target project
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Source tree relative to `project_root`
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Base package; discovered from the application entry point when absent
    #[serde(default)]
    pub base_package: Option<String>,

    /// Relative package names per artifact layer
    #[serde(default)]
    pub packages: PackageNames,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Identifier type used by service and controller operations
    #[serde(default)]
    pub id_type: IdTypePolicy,

    /// Namespace of the persistence annotations
    #[serde(default)]
    pub persistence_api: PersistenceApi,

    /// Overwrite existing files instead of failing
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Relative package names for the four artifact layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNames {
    #[serde(default = "default_model_package")]
    pub model: String,
    #[serde(default = "default_repository_package")]
    pub repository: String,
    #[serde(default = "default_service_package")]
    pub service: String,
    #[serde(default = "default_controller_package")]
    pub controller: String,
}

impl PackageNames {
    pub fn get(&self, kind: PackageKind) -> &str {
        match kind {
            PackageKind::Model => &self.model,
            PackageKind::Repository => &self.repository,
            PackageKind::Service => &self.service,
            PackageKind::Controller => &self.controller,
        }
    }
}

impl Default for PackageNames {
    fn default() -> Self {
        Self {
            model: default_model_package(),
            repository: default_repository_package(),
            service: default_service_package(),
            controller: default_controller_package(),
        }
    }
}

/// Which scalar the service and controller use for identifiers
///
/// `Fixed` always uses `Long`, even when the data-access interface is keyed
/// by `String`. `Inferred` follows the primary key of each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdTypePolicy {
    #[default]
    Fixed,
    Inferred,
}

/// Root namespace of the persistence annotations in generated records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceApi {
    #[default]
    Javax,
    Jakarta,
}

impl PersistenceApi {
    pub fn namespace(&self) -> &'static str {
        match self {
            PersistenceApi::Javax => "javax",
            PersistenceApi::Jakarta => "jakarta",
        }
    }
}

// Default value functions for serde
fn default_project_root() -> PathBuf {
    PathBuf::from(defaults::PROJECT_ROOT)
}
fn default_source_root() -> PathBuf {
    PathBuf::from(defaults::SOURCE_ROOT)
}
fn default_model_package() -> String {
    defaults::MODEL_PACKAGE.to_string()
}
fn default_repository_package() -> String {
    defaults::REPOSITORY_PACKAGE.to_string()
}
fn default_service_package() -> String {
    defaults::SERVICE_PACKAGE.to_string()
}
fn default_controller_package() -> String {
    defaults::CONTROLLER_PACKAGE.to_string()
}
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_overwrite() -> bool {
    defaults::OVERWRITE
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            project_root: default_project_root(),
            source_root: default_source_root(),
            base_package: None,
            packages: PackageNames::default(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            id_type: IdTypePolicy::default(),
            persistence_api: PersistenceApi::default(),
            overwrite: default_overwrite(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Absolute-or-relative path of the source tree
    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(&self.source_root)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("crudgen").required(false));
        }

        // Override with environment variables (CRUDGEN__SCHEMA_FILE, CRUDGEN__PACKAGES__MODEL, ...)
        builder = builder.add_source(
            Environment::with_prefix("CRUDGEN")
                .prefix_separator("__")
                .separator("__"),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        for kind in PackageKind::ALL {
            let name = self.packages.get(kind);
            if !is_valid_package_name(name) {
                return Err(CodegenError::ValidationError(format!(
                    "Invalid {} package name: {:?}",
                    kind, name
                )));
            }
        }

        if let Some(base) = &self.base_package {
            if !is_valid_package_name(base) {
                return Err(CodegenError::ValidationError(format!(
                    "Invalid base_package: {:?}",
                    base
                )));
            }
        }

        Ok(())
    }
}

/// Check a dotted Java package name such as `com.example.model`
pub fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}
