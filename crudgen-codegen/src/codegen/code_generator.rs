//! Per-table artifact generation

use tracing::warn;

use crate::config::{IdTypePolicy, PersistenceApi};
use crate::error::Result;
use crate::schema::TableSchema;

use super::artifact::{ArtifactNames, GeneratedArtifact, IdentifierSpec, PackageLayout};
use super::controller_generator::generate_controller;
use super::record_generator::generate_record;
use super::repository_generator::generate_repository;
use super::service_generator::generate_service_interface;
use super::service_impl_generator::generate_service_impl;

/// Runs the five generators for a table in their fixed order
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator {
    id_type: IdTypePolicy,
    persistence_api: PersistenceApi,
}

impl CodeGenerator {
    pub fn new(id_type: IdTypePolicy, persistence_api: PersistenceApi) -> Self {
        Self {
            id_type,
            persistence_api,
        }
    }

    /// Generate record, repository, service interface, service implementation
    /// and controller for one table
    ///
    /// Either all five artifacts are produced or none is.
    pub fn generate_table(
        &self,
        table: &TableSchema,
        layout: &PackageLayout,
    ) -> Result<Vec<GeneratedArtifact>> {
        if table.has_composite_key() {
            warn!(
                "Table {} has several primary key columns; only the first is used as identifier",
                table.name
            );
        }
        let names = ArtifactNames::from_table_name(&table.name);
        let id = IdentifierSpec::resolve(table, self.id_type)?;

        Ok(vec![
            generate_record(table, &names, layout, self.persistence_api),
            generate_repository(table, &names, layout)?,
            generate_service_interface(&names, &id, layout),
            generate_service_impl(&names, &id, layout),
            generate_controller(&names, &id, layout),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::ArtifactKind;
    use crate::config::PackageNames;
    use crate::error::CodegenError;
    use crate::schema::ColumnSchema;

    fn layout() -> PackageLayout {
        PackageLayout::new("com.example.demo", &PackageNames::default())
    }

    #[test]
    fn test_generate_table_order() {
        let table = TableSchema::new(
            "order_item",
            vec![
                ColumnSchema::primary("id", "bigint"),
                ColumnSchema::new("quantity", "integer"),
                ColumnSchema::new("note", "varchar"),
            ],
        );
        let artifacts = CodeGenerator::default().generate_table(&table, &layout()).unwrap();

        let kinds: Vec<ArtifactKind> = artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, ArtifactKind::ORDER.to_vec());

        let files: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "OrderItemEntity.java",
                "OrderItemRepository.java",
                "OrderItemService.java",
                "OrderItemServiceImpl.java",
                "OrderItemController.java",
            ]
        );
    }

    #[test]
    fn test_missing_primary_key_yields_no_artifacts() {
        let table = TableSchema::new("event_log", vec![ColumnSchema::new("payload", "text")]);
        let result = CodeGenerator::default().generate_table(&table, &layout());
        assert!(matches!(result, Err(CodegenError::MissingPrimaryKey { .. })));
    }

    #[test]
    fn test_composite_key_uses_first_key_column() {
        let table = TableSchema::new(
            "order_line",
            vec![
                ColumnSchema::primary("order_ref", "varchar"),
                ColumnSchema::primary("line_no", "integer"),
            ],
        );
        assert!(table.has_composite_key());

        let generator = CodeGenerator::new(IdTypePolicy::Inferred, PersistenceApi::Javax);
        let artifacts = generator.generate_table(&table, &layout()).unwrap();
        assert_eq!(artifacts.len(), 5);
        assert!(artifacts[1].source_text.contains("JpaRepository<OrderLineEntity, String>"));
        assert!(artifacts[3].source_text.contains("entity.getOrderRef()"));
    }

    #[test]
    fn test_fixed_id_policy_keeps_long_for_string_keys() {
        let table = TableSchema::new("country", vec![ColumnSchema::primary("code", "varchar")]);
        let artifacts = CodeGenerator::default().generate_table(&table, &layout()).unwrap();
        assert!(artifacts[1].source_text.contains("JpaRepository<CountryEntity, String>"));
        assert!(artifacts[2].source_text.contains("findById(Long id)"));
    }

    #[test]
    fn test_inferred_id_policy_unifies_key_type() {
        let table = TableSchema::new("country", vec![ColumnSchema::primary("code", "varchar")]);
        let generator = CodeGenerator::new(IdTypePolicy::Inferred, PersistenceApi::Javax);
        let artifacts = generator.generate_table(&table, &layout()).unwrap();
        assert!(artifacts[2].source_text.contains("findById(String id)"));
        assert!(artifacts[4].source_text.contains("@PathVariable String id"));
    }
}
