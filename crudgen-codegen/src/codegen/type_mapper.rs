//! Database type to Java type mapping

use crate::error::{CodegenError, Result};
use crate::schema::{ColumnSchema, TableSchema};

/// Java scalar types a generated field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaType {
    Integer,
    Long,
    String,
    Date,
    Timestamp,
}

impl JavaType {
    /// Get the type name for code generation
    pub fn to_type_string(&self) -> &'static str {
        match self {
            JavaType::Integer => "Integer",
            JavaType::Long => "Long",
            JavaType::String => "String",
            JavaType::Date => "Date",
            JavaType::Timestamp => "Timestamp",
        }
    }

    /// Import needed to use this type, if it is not in `java.lang`
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            JavaType::Date => Some("java.util.Date"),
            JavaType::Timestamp => Some("java.sql.Timestamp"),
            _ => None,
        }
    }
}

/// How the persistence layer assigns identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// Database-side auto increment (`GenerationType.IDENTITY`)
    Identity,
}

impl IdentityStrategy {
    pub fn annotation_value(&self) -> &'static str {
        match self {
            IdentityStrategy::Identity => "GenerationType.IDENTITY",
        }
    }
}

/// Resolved type of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeSpec {
    pub java_type: JavaType,

    /// Set only for generated primary keys
    pub identity: Option<IdentityStrategy>,

    pub is_primary_key: bool,
}

/// Map column type specifications to Java types
///
/// Matching on the declared type is exact and case-sensitive. Anything not
/// recognised becomes `String` rather than an error.
pub struct TypeMapper;

impl TypeMapper {
    /// Get the field type for a column
    pub fn map_column(column: &ColumnSchema) -> FieldTypeSpec {
        if column.is_primary_key {
            return if column.declared_type == "varchar" {
                FieldTypeSpec {
                    java_type: JavaType::String,
                    identity: None,
                    is_primary_key: true,
                }
            } else {
                FieldTypeSpec {
                    java_type: JavaType::Long,
                    identity: Some(IdentityStrategy::Identity),
                    is_primary_key: true,
                }
            };
        }

        let java_type = match column.declared_type.as_str() {
            "integer" => JavaType::Integer,
            "bigint" => JavaType::Long,
            "date" => JavaType::Date,
            "timestamp" | "timestampz" => JavaType::Timestamp,
            _ => JavaType::String,
        };

        FieldTypeSpec {
            java_type,
            identity: None,
            is_primary_key: false,
        }
    }

    /// Key type of the data-access interface: `Long` for integral keys, `String` otherwise
    pub fn infer_primary_key_type(table: &TableSchema) -> Result<JavaType> {
        let pk = table
            .primary_key()
            .ok_or_else(|| CodegenError::MissingPrimaryKey {
                table: table.name.clone(),
            })?;

        Ok(match pk.declared_type.as_str() {
            "bigint" | "integer" => JavaType::Long,
            _ => JavaType::String,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(declared_type: &str) -> FieldTypeSpec {
        TypeMapper::map_column(&ColumnSchema::new("c", declared_type))
    }

    fn map_pk(declared_type: &str) -> FieldTypeSpec {
        TypeMapper::map_column(&ColumnSchema::primary("id", declared_type))
    }

    #[test]
    fn test_non_key_mapping_table() {
        assert_eq!(map("integer").java_type, JavaType::Integer);
        assert_eq!(map("bigint").java_type, JavaType::Long);
        assert_eq!(map("date").java_type, JavaType::Date);
        assert_eq!(map("timestamp").java_type, JavaType::Timestamp);
        assert_eq!(map("timestampz").java_type, JavaType::Timestamp);

        for declared in ["integer", "bigint", "date", "timestamp", "timestampz"] {
            let spec = map(declared);
            assert!(spec.identity.is_none());
            assert!(!spec.is_primary_key);
        }
    }

    #[test]
    fn test_unknown_types_fall_back_to_string() {
        for declared in ["varchar", "text", "uuid", "jsonb", "numeric(10,2)", "", "INTEGER"] {
            assert_eq!(map(declared).java_type, JavaType::String, "{declared}");
        }
    }

    #[test]
    fn test_varchar_primary_key() {
        let spec = map_pk("varchar");
        assert_eq!(spec.java_type, JavaType::String);
        assert!(spec.identity.is_none());
        assert!(spec.is_primary_key);
    }

    #[test]
    fn test_other_primary_keys_are_generated_longs() {
        for declared in ["bigint", "integer", "uuid", "char"] {
            let spec = map_pk(declared);
            assert_eq!(spec.java_type, JavaType::Long, "{declared}");
            assert_eq!(spec.identity, Some(IdentityStrategy::Identity));
        }
    }

    #[test]
    fn test_infer_primary_key_type() {
        let table = TableSchema::new("t", vec![ColumnSchema::primary("id", "integer")]);
        assert_eq!(TypeMapper::infer_primary_key_type(&table).unwrap(), JavaType::Long);

        let table = TableSchema::new(
            "t",
            vec![
                ColumnSchema::new("name", "bigint"),
                ColumnSchema::primary("code", "varchar"),
            ],
        );
        assert_eq!(TypeMapper::infer_primary_key_type(&table).unwrap(), JavaType::String);

        let table = TableSchema::new("t", vec![ColumnSchema::primary("code", "uuid")]);
        assert_eq!(TypeMapper::infer_primary_key_type(&table).unwrap(), JavaType::String);
    }

    #[test]
    fn test_infer_primary_key_type_missing() {
        let table = TableSchema::new("audit_log", vec![ColumnSchema::new("message", "varchar")]);
        match TypeMapper::infer_primary_key_type(&table) {
            Err(CodegenError::MissingPrimaryKey { table }) => assert_eq!(table, "audit_log"),
            other => panic!("expected MissingPrimaryKey, got {:?}", other),
        }
    }

    #[test]
    fn test_type_string() {
        assert_eq!(JavaType::Long.to_type_string(), "Long");
        assert_eq!(JavaType::Timestamp.import_path(), Some("java.sql.Timestamp"));
        assert_eq!(JavaType::Integer.import_path(), None);
    }
}
