use std::path::Path;

const APPLICATION: &str = r#"package com.example.demo;

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class DemoApplication {
    public static void main(String[] args) {
        SpringApplication.run(DemoApplication.class, args);
    }
}
"#;

fn main() {
    // Generate a Spring Boot project tree for the integration tests
    // The tests read the generated sources back from OUT_DIR
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let project = Path::new(&out_dir).join("project");
    let app_dir = project.join("src/main/java/com/example/demo");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("DemoApplication.java"), APPLICATION).unwrap();

    // OUT_DIR survives rebuilds, so replace what a previous build wrote
    crudgen_codegen::CodegenBuilder::new("fixtures/example-schema.toml")
        .project_root(&project)
        .overwrite()
        .generate()
        .expect("codegen failed");

    println!("cargo:rerun-if-changed=fixtures/example-schema.toml");
}
