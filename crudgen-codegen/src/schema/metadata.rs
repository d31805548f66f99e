//! Metadata structures for pre-parsed table schemas

use serde::{Deserialize, Serialize};

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Physical table name
    pub name: String,

    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Normalized type specification (e.g. "varchar", "bigint", "timestamp")
    #[serde(rename = "type", alias = "declared_type")]
    pub declared_type: String,

    /// Whether the column is (part of) the primary key
    #[serde(default, rename = "primary_key", alias = "is_primary_key")]
    pub is_primary_key: bool,
}

/// Top-level layout of a schema metadata file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// First column flagged as primary key
    pub fn primary_key(&self) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    /// Check if the table has more than one primary key column
    pub fn has_composite_key(&self) -> bool {
        self.columns.iter().filter(|c| c.is_primary_key).count() > 1
    }
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_primary_key: false,
        }
    }

    /// Create a primary key column
    pub fn primary(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            is_primary_key: true,
            ..Self::new(name, declared_type)
        }
    }
}
