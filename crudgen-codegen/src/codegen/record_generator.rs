//! Record generator - generates the JPA entity class for a table

use std::collections::BTreeSet;

use tracing::debug;

use super::artifact::{ArtifactKind, ArtifactNames, GeneratedArtifact, PackageLayout};
use super::naming::escape_field_name;
use super::type_mapper::{FieldTypeSpec, TypeMapper};
use crate::config::PersistenceApi;
use crate::schema::{ColumnSchema, TableSchema};

/// Generate the record class, one field per column in schema order
pub fn generate_record(
    table: &TableSchema,
    names: &ArtifactNames,
    layout: &PackageLayout,
    persistence_api: PersistenceApi,
) -> GeneratedArtifact {
    debug!("Generating record {} for table {}", names.record, table.name);

    let fields: Vec<(&ColumnSchema, FieldTypeSpec)> = table
        .columns
        .iter()
        .map(|col| (col, TypeMapper::map_column(col)))
        .collect();

    let type_imports: BTreeSet<&str> = fields
        .iter()
        .filter_map(|(_, spec)| spec.java_type.import_path())
        .collect();

    let mut code = String::new();
    code.push_str(&format!("package {};\n\n", layout.model));
    code.push_str("import lombok.AllArgsConstructor;\n");
    code.push_str("import lombok.Builder;\n");
    code.push_str("import lombok.Data;\n");
    code.push_str("import lombok.NoArgsConstructor;\n\n");
    code.push_str(&format!(
        "import {}.persistence.*;\n",
        persistence_api.namespace()
    ));
    for import in &type_imports {
        code.push_str(&format!("import {};\n", import));
    }
    code.push('\n');

    code.push_str("@Data\n");
    code.push_str("@Builder\n");
    code.push_str("@NoArgsConstructor\n");
    code.push_str("@AllArgsConstructor\n");
    code.push_str("@Entity\n");
    code.push_str(&format!("@Table(name = \"{}\")\n", table.name));
    code.push_str(&format!("public class {} {{\n", names.record));

    for (col, spec) in &fields {
        code.push('\n');
        code.push_str(&generate_field(col, spec));
    }

    code.push_str("}\n");

    GeneratedArtifact::new(ArtifactKind::Record, &names.record, code)
}

/// Generate the annotations and declaration of a single field
fn generate_field(column: &ColumnSchema, spec: &FieldTypeSpec) -> String {
    let field_name = escape_field_name(&column.name);
    let java_type = spec.java_type.to_type_string();
    let mut code = String::new();

    if spec.is_primary_key {
        code.push_str("    @Id\n");
    }
    match spec.identity {
        Some(strategy) => code.push_str(&format!(
            "    @GeneratedValue(strategy = {})\n",
            strategy.annotation_value()
        )),
        None => code.push_str(&format!("    @Column(name = \"{}\")\n", column.name)),
    }
    code.push_str(&format!("    private {} {};\n", java_type, field_name));

    code
}
