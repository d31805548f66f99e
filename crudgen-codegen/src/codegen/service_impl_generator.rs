//! Service implementation generator - delegates every operation to the repository

use tracing::debug;

use super::artifact::{ArtifactKind, ArtifactNames, GeneratedArtifact, IdentifierSpec, PackageLayout};

/// Generate the `@Service` implementation of the service interface
///
/// `update` loads the stored record, maps the incoming fields onto it and
/// saves the merged result.
pub fn generate_service_impl(
    names: &ArtifactNames,
    id: &IdentifierSpec,
    layout: &PackageLayout,
) -> GeneratedArtifact {
    debug!("Generating service implementation {}", names.service_impl);

    let code = format!(
        r#"package {package};

import {model_package}.{record};
import {repository_package}.{repository};
import lombok.RequiredArgsConstructor;
import org.modelmapper.ModelMapper;
import org.springframework.stereotype.Service;
import org.springframework.transaction.annotation.Transactional;

import java.util.List;

@Service
@RequiredArgsConstructor
public class {service_impl} implements {service} {{

    private final ModelMapper modelMapper;

    private final {repository} repository;

    @Transactional(readOnly = true)
    @Override
    public List<{record}> findAll() {{
        return repository.findAll();
    }}

    @Transactional(readOnly = true)
    @Override
    public {record} findById({id_type} id) {{
        return repository.findById(id).orElseThrow();
    }}

    @Transactional
    @Override
    public {record} save({record} entity) {{
        return repository.save(entity);
    }}

    @Transactional
    @Override
    public {record} update({record} entity) {{
        {record} entityFromDb = repository.findById(entity.{getter}()).orElseThrow();
        modelMapper.map(entity, entityFromDb);
        return repository.saveAndFlush(entityFromDb);
    }}

    @Transactional
    @Override
    public void deleteById({id_type} id) {{
        repository.deleteById(id);
    }}
}}
"#,
        package = layout.service,
        model_package = layout.model,
        repository_package = layout.repository,
        record = names.record,
        repository = names.repository,
        service = names.service,
        service_impl = names.service_impl,
        id_type = id.java_type.to_type_string(),
        getter = id.getter,
    );

    GeneratedArtifact::new(ArtifactKind::ServiceImpl, &names.service_impl, code)
}
