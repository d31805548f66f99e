//! Service generator - generates the service interface for a record

use tracing::debug;

use super::artifact::{ArtifactKind, ArtifactNames, GeneratedArtifact, IdentifierSpec, PackageLayout};

/// Generate the service interface with the five CRUD operations
pub fn generate_service_interface(
    names: &ArtifactNames,
    id: &IdentifierSpec,
    layout: &PackageLayout,
) -> GeneratedArtifact {
    debug!("Generating service interface {}", names.service);

    let code = format!(
        r#"package {package};

import {model_package}.{record};

import java.util.List;

public interface {service} {{

    List<{record}> findAll();

    {record} findById({id_type} id);

    {record} save({record} entity);

    {record} update({record} entity);

    void deleteById({id_type} id);
}}
"#,
        package = layout.service,
        model_package = layout.model,
        record = names.record,
        service = names.service,
        id_type = id.java_type.to_type_string(),
    );

    GeneratedArtifact::new(ArtifactKind::ServiceInterface, &names.service, code)
}
