//! Generated artifacts and the conventional names they derive from

use std::fmt;

use super::naming::{escape_field_name, to_entity_name, to_getter_name, to_lower_path};
use super::type_mapper::{JavaType, TypeMapper};
use crate::config::{defaults, IdTypePolicy, PackageNames};
use crate::error::Result;
use crate::schema::TableSchema;

/// Target package of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageKind {
    Model,
    Repository,
    Service,
    Controller,
}

impl PackageKind {
    pub const ALL: [PackageKind; 4] = [
        PackageKind::Model,
        PackageKind::Repository,
        PackageKind::Service,
        PackageKind::Controller,
    ];
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PackageKind::Model => "model",
            PackageKind::Repository => "repository",
            PackageKind::Service => "service",
            PackageKind::Controller => "controller",
        })
    }
}

/// The five artifacts generated per table, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Record,
    Repository,
    ServiceInterface,
    ServiceImpl,
    Controller,
}

impl ArtifactKind {
    pub const ORDER: [ArtifactKind; 5] = [
        ArtifactKind::Record,
        ArtifactKind::Repository,
        ArtifactKind::ServiceInterface,
        ArtifactKind::ServiceImpl,
        ArtifactKind::Controller,
    ];

    pub fn package(&self) -> PackageKind {
        match self {
            ArtifactKind::Record => PackageKind::Model,
            ArtifactKind::Repository => PackageKind::Repository,
            ArtifactKind::ServiceInterface | ArtifactKind::ServiceImpl => PackageKind::Service,
            ArtifactKind::Controller => PackageKind::Controller,
        }
    }
}

/// One generated source file, handed straight to the file writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub source_text: String,
    pub target_package: PackageKind,
}

impl GeneratedArtifact {
    pub(crate) fn new(kind: ArtifactKind, class_name: &str, source_text: String) -> Self {
        Self {
            kind,
            file_name: format!("{}{}", class_name, defaults::SOURCE_FILE_EXTENSION),
            source_text,
            target_package: kind.package(),
        }
    }
}

/// Class names derived from a table name by convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub table_name: String,
    /// PascalCase table name, the stem of every class name
    pub entity_name: String,
    pub record: String,
    pub repository: String,
    pub service: String,
    pub service_impl: String,
    pub controller: String,
    /// Base path of the endpoint routes
    pub route_path: String,
}

impl ArtifactNames {
    pub fn from_table_name(table_name: &str) -> Self {
        let entity_name = to_entity_name(table_name);
        Self {
            table_name: table_name.to_string(),
            record: format!("{}Entity", entity_name),
            repository: format!("{}Repository", entity_name),
            service: format!("{}Service", entity_name),
            service_impl: format!("{}ServiceImpl", entity_name),
            controller: format!("{}Controller", entity_name),
            route_path: to_lower_path(table_name),
            entity_name,
        }
    }
}

/// Identifier used by the service and controller operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSpec {
    pub java_type: JavaType,
    /// Getter on the record returning the identifier
    pub getter: String,
}

impl IdentifierSpec {
    pub fn resolve(table: &TableSchema, policy: IdTypePolicy) -> Result<Self> {
        let field = table
            .primary_key()
            .map(|pk| escape_field_name(&pk.name))
            .unwrap_or_else(|| "id".to_string());
        let java_type = match policy {
            IdTypePolicy::Fixed => JavaType::Long,
            IdTypePolicy::Inferred => TypeMapper::infer_primary_key_type(table)?,
        };
        Ok(Self {
            java_type,
            getter: to_getter_name(&field),
        })
    }
}

/// Fully qualified package of each layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    pub model: String,
    pub repository: String,
    pub service: String,
    pub controller: String,
}

impl PackageLayout {
    /// Qualify the relative package names with a base package (may be empty)
    pub fn new(base_package: &str, names: &PackageNames) -> Self {
        let qualify = |kind| {
            let name = names.get(kind);
            if base_package.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", base_package, name)
            }
        };
        Self {
            model: qualify(PackageKind::Model),
            repository: qualify(PackageKind::Repository),
            service: qualify(PackageKind::Service),
            controller: qualify(PackageKind::Controller),
        }
    }

    pub fn get(&self, kind: PackageKind) -> &str {
        match kind {
            PackageKind::Model => &self.model,
            PackageKind::Repository => &self.repository,
            PackageKind::Service => &self.service,
            PackageKind::Controller => &self.controller,
        }
    }
}
