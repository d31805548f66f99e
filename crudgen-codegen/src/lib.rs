//! crudgen-codegen: Generate layered Spring Boot CRUD sources from table metadata
//!
//! Given pre-parsed table metadata (name, columns, declared types, primary
//! key), this crate emits five Java source files per table:
//!
//! - `{Name}Entity` - JPA record with one field per column
//! - `{Name}Repository` - `JpaRepository` keyed by the inferred primary key type
//! - `{Name}Service` - service interface with five CRUD operations
//! - `{Name}ServiceImpl` - `@Service` delegating to the repository
//! - `{Name}Controller` - `@RestController` exposing the operations over HTTP
//!
//! # Table metadata
//!
//! ```toml
//! [[tables]]
//! name = "order_item"
//!
//! [[tables.columns]]
//! name = "id"
//! type = "bigint"
//! primary_key = true
//!
//! [[tables.columns]]
//! name = "quantity"
//! type = "integer"
//! ```
//!
//! JSON files with the same shape (`{"tables": [...]}`) are accepted too.
//!
//! # Programmatic Usage
//!
//! ```rust,ignore
//! let result = crudgen_codegen::CodegenBuilder::new("tables.toml")
//!     .project_root("../shop-service")
//!     .generate()?;
//! println!("{} tables generated", result.succeeded);
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! crudgen-codegen --schema tables.toml --project ../shop-service generate
//! ```

pub mod batch;
pub mod codegen;
pub mod config;
pub mod error;
pub mod host;
pub mod schema;

use std::path::Path;

use tracing::{info, warn};

pub use batch::{BatchOrchestrator, BatchResult, BatchState, CancellationToken};
pub use codegen::GeneratedArtifact;
pub use config::{CodegenConfig, IdTypePolicy, PersistenceApi};
pub use error::{CodegenError, Result};

use codegen::{CodeGenerator, PackageKind, PackageLayout};
use host::{FsFileWriter, FsPackageResolver, LogNotifier, LogProgress, MemoryWriter, PackageResolver};
use schema::{FileSchemaProvider, SchemaProvider};

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig) -> Result<BatchResult> {
    info!("Loading table metadata: {:?}", config.schema_file);
    let provider = schema_provider(config);
    let generator = CodeGenerator::new(config.id_type, config.persistence_api);
    let mut resolver = FsPackageResolver::from_config(config);
    let mut progress = LogProgress;
    let mut notifier = LogNotifier;

    let result = if config.dry_run {
        let mut writer = MemoryWriter::new();
        BatchOrchestrator::new(generator, &mut resolver, &mut writer)
            .with_progress(&mut progress)
            .with_notifier(&mut notifier)
            .run(&provider)?
    } else {
        let mut writer = FsFileWriter::new(config.overwrite);
        BatchOrchestrator::new(generator, &mut resolver, &mut writer)
            .with_progress(&mut progress)
            .with_notifier(&mut notifier)
            .run(&provider)?
    };

    result.into_result()
}

/// Generate the artifacts of a single table without writing anything
///
/// Package names come from the project when it can be resolved, otherwise
/// from the configured base package.
pub fn preview_table(config: &CodegenConfig, table_name: &str) -> Result<Vec<GeneratedArtifact>> {
    let tables = schema_provider(config).selected_tables()?;
    let table = tables
        .iter()
        .find(|t| t.name == table_name)
        .ok_or_else(|| CodegenError::InvalidTableName(table_name.to_string()))?;

    let layout = match resolve_layout(config) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("{}; using configured base package", e);
            let base = config.base_package.as_deref().unwrap_or_default();
            PackageLayout::new(base, &config.packages)
        }
    };

    CodeGenerator::new(config.id_type, config.persistence_api).generate_table(table, &layout)
}

fn resolve_layout(config: &CodegenConfig) -> Result<PackageLayout> {
    let mut resolver = FsPackageResolver::from_config(config).without_creating();
    Ok(PackageLayout {
        model: resolver.ensure_package(PackageKind::Model)?.package,
        repository: resolver.ensure_package(PackageKind::Repository)?.package,
        service: resolver.ensure_package(PackageKind::Service)?.package,
        controller: resolver.ensure_package(PackageKind::Controller)?.package,
    })
}

fn schema_provider(config: &CodegenConfig) -> FileSchemaProvider {
    FileSchemaProvider::new(&config.schema_file)
        .with_filters(&config.include_tables, &config.exclude_tables)
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given table metadata file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the root directory of the target project
    pub fn project_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.project_root = dir.as_ref().to_path_buf();
        self
    }

    /// Set the source tree, relative to the project root
    pub fn source_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.source_root = dir.as_ref().to_path_buf();
        self
    }

    /// Use an explicit base package instead of discovering it
    pub fn base_package(mut self, package: &str) -> Self {
        self.config.base_package = Some(package.to_string());
        self
    }

    /// Set the relative package for one artifact layer
    pub fn package(mut self, kind: PackageKind, name: &str) -> Self {
        let slot = match kind {
            PackageKind::Model => &mut self.config.packages.model,
            PackageKind::Repository => &mut self.config.packages.repository,
            PackageKind::Service => &mut self.config.packages.service,
            PackageKind::Controller => &mut self.config.packages.controller,
        };
        *slot = name.to_string();
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Choose the identifier type of service and controller operations
    pub fn id_type(mut self, policy: IdTypePolicy) -> Self {
        self.config.id_type = policy;
        self
    }

    /// Choose `javax` or `jakarta` persistence annotations
    pub fn persistence_api(mut self, api: PersistenceApi) -> Self {
        self.config.persistence_api = api;
        self
    }

    /// Replace files that already exist
    pub fn overwrite(mut self) -> Self {
        self.config.overwrite = true;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Access the assembled configuration
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self) -> Result<BatchResult> {
        generate(&self.config)
    }
}
