//! Repository generator - generates the Spring Data interface for a record

use tracing::debug;

use super::artifact::{ArtifactKind, ArtifactNames, GeneratedArtifact, PackageLayout};
use super::type_mapper::TypeMapper;
use crate::error::Result;
use crate::schema::TableSchema;

/// Generate the data-access interface keyed by the inferred primary key type
///
/// CRUD methods come from `JpaRepository`, so the interface has no body.
pub fn generate_repository(
    table: &TableSchema,
    names: &ArtifactNames,
    layout: &PackageLayout,
) -> Result<GeneratedArtifact> {
    let key_type = TypeMapper::infer_primary_key_type(table)?;
    debug!(
        "Generating repository {}<{}, {}>",
        names.repository,
        names.record,
        key_type.to_type_string()
    );

    let code = format!(
        r#"package {package};

import {model_package}.{record};
import org.springframework.data.jpa.repository.JpaRepository;

public interface {repository} extends JpaRepository<{record}, {key_type}> {{}}
"#,
        package = layout.repository,
        model_package = layout.model,
        record = names.record,
        repository = names.repository,
        key_type = key_type.to_type_string(),
    );

    Ok(GeneratedArtifact::new(
        ArtifactKind::Repository,
        &names.repository,
        code,
    ))
}
