//! Controller generator - generates the REST endpoints for a record

use tracing::debug;

use super::artifact::{ArtifactKind, ArtifactNames, GeneratedArtifact, IdentifierSpec, PackageLayout};

/// Generate the `@RestController` binding five routes to the service
pub fn generate_controller(
    names: &ArtifactNames,
    id: &IdentifierSpec,
    layout: &PackageLayout,
) -> GeneratedArtifact {
    debug!(
        "Generating controller {} at /{}",
        names.controller, names.route_path
    );

    let code = format!(
        r#"package {package};

import {model_package}.{record};
import {service_package}.{service};
import io.swagger.v3.oas.annotations.Operation;
import lombok.RequiredArgsConstructor;
import org.springframework.web.bind.annotation.*;

import java.util.List;

@CrossOrigin(origins = "*", allowedHeaders = "*")
@RequestMapping("{route_path}")
@RequiredArgsConstructor
@RestController
public class {controller} {{

    private final {service} service;

    @Operation(summary = "Find all records")
    @GetMapping
    public List<{record}> findAll() {{
        return service.findAll();
    }}

    @Operation(summary = "Find by given id")
    @GetMapping("{{id}}")
    public {record} findById(@PathVariable {id_type} id) {{
        return service.findById(id);
    }}

    @Operation(summary = "Save")
    @PostMapping
    public {record} save(@RequestBody {record} entity) {{
        return service.save(entity);
    }}

    @Operation(summary = "Update")
    @PatchMapping
    public {record} update(@RequestBody {record} entity) {{
        return service.update(entity);
    }}

    @Operation(summary = "Delete")
    @DeleteMapping("{{id}}")
    public void deleteById(@PathVariable {id_type} id) {{
        service.deleteById(id);
    }}
}}
"#,
        package = layout.controller,
        model_package = layout.model,
        service_package = layout.service,
        record = names.record,
        service = names.service,
        controller = names.controller,
        route_path = names.route_path,
        id_type = id.java_type.to_type_string(),
    );

    GeneratedArtifact::new(ArtifactKind::Controller, &names.controller, code)
}
