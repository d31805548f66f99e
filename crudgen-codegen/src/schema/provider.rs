//! Sources of the table selection for a batch

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::metadata::{SchemaDocument, TableSchema};
use crate::config::defaults;
use crate::error::{CodegenError, Result};

/// Supplies the ordered set of tables selected for generation
pub trait SchemaProvider {
    fn selected_tables(&self) -> Result<Vec<TableSchema>>;
}

impl SchemaProvider for Vec<TableSchema> {
    fn selected_tables(&self) -> Result<Vec<TableSchema>> {
        Ok(self.clone())
    }
}

/// Reads pre-parsed table metadata from a JSON or TOML file
#[derive(Debug, Clone)]
pub struct FileSchemaProvider {
    path: PathBuf,
    include: String,
    exclude: String,
}

impl FileSchemaProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            include: defaults::INCLUDE_TABLES.to_string(),
            exclude: defaults::EXCLUDE_TABLES.to_string(),
        }
    }

    /// Restrict the selection (comma-separated table names, "*" for all)
    pub fn with_filters(mut self, include: &str, exclude: &str) -> Self {
        self.include = include.to_string();
        self.exclude = exclude.to_string();
        self
    }
}

impl SchemaProvider for FileSchemaProvider {
    fn selected_tables(&self) -> Result<Vec<TableSchema>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CodegenError::SchemaError(format!("{}: {}", self.path.display(), e))
        })?;
        let is_toml = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let tables = if is_toml {
            parse_toml_schema(&content)?
        } else {
            parse_json_schema(&content)?
        };
        debug!("Loaded {} tables from {:?}", tables.len(), self.path);

        Ok(filter_tables(tables, &self.include, &self.exclude))
    }
}

/// Parse a JSON schema document (`{"tables": [...]}` or a bare array)
pub fn parse_json_schema(content: &str) -> Result<Vec<TableSchema>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let tables = if value.is_array() {
        serde_json::from_value::<Vec<TableSchema>>(value)?
    } else {
        serde_json::from_value::<SchemaDocument>(value)?.tables
    };
    check_table_names(&tables)?;
    Ok(tables)
}

/// Parse a TOML schema document with `[[tables]]` entries
pub fn parse_toml_schema(content: &str) -> Result<Vec<TableSchema>> {
    let document: SchemaDocument = toml::from_str(content)?;
    check_table_names(&document.tables)?;
    Ok(document.tables)
}

fn check_table_names(tables: &[TableSchema]) -> Result<()> {
    for table in tables {
        if table.name.trim().is_empty() {
            return Err(CodegenError::InvalidTableName(table.name.clone()));
        }
    }
    Ok(())
}

/// Filter tables based on include/exclude patterns, keeping input order
pub fn filter_tables(tables: Vec<TableSchema>, include: &str, exclude: &str) -> Vec<TableSchema> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<&str> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(str::trim).collect()
    };
    let exclude_set: HashSet<&str> = exclude
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = t.name.as_str();
            let included = include_all || include_set.contains(name);
            included && !exclude_set.contains(name)
        })
        .collect()
}
