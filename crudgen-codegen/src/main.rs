//! CLI entry point for crudgen-codegen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crudgen_codegen::codegen::{to_entity_name, TypeMapper};
use crudgen_codegen::config::CodegenConfig;
use crudgen_codegen::schema::{FileSchemaProvider, SchemaProvider};

#[derive(Parser)]
#[command(name = "crudgen-codegen")]
#[command(about = "Generate Spring Boot entity, repository, service and controller classes from table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to table metadata file (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Root of the target project (overrides config)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all five classes for every selected table
    Generate,
    /// Inspect table metadata (show columns and mapped types)
    Inspect,
    /// Print the generated classes of one table
    Preview {
        /// Table name as it appears in the metadata file
        table: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(project) = cli.project {
        config.project_root = project;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    match &cli.command {
        Some(Commands::Inspect) => inspect_schema(&config),
        Some(Commands::Preview { table }) => preview(&config, table),
        Some(Commands::Generate) | None => {
            info!("Generating code from table metadata: {:?}", config.schema_file);
            let result = crudgen_codegen::generate(&config)?;
            if config.dry_run {
                println!(
                    "Dry run mode - {} table(s) would be generated into {}",
                    result.succeeded,
                    config.source_dir().display()
                );
            }
            info!("Code generation completed successfully");
            Ok(())
        }
    }
}

fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let tables = FileSchemaProvider::new(&config.schema_file)
        .with_filters(&config.include_tables, &config.exclude_tables)
        .selected_tables()?;

    println!("Selected {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {} ({})", table.name, to_entity_name(&table.name));
        println!("  Columns:");
        for col in &table.columns {
            let spec = TypeMapper::map_column(col);
            let identity = if spec.identity.is_some() {
                " IDENTITY"
            } else {
                ""
            };
            println!(
                "    - {} {} -> {}{}",
                col.name,
                col.declared_type,
                spec.java_type.to_type_string(),
                identity
            );
        }
        match TypeMapper::infer_primary_key_type(table) {
            Ok(key_type) => {
                let pk: Vec<&str> = table
                    .columns
                    .iter()
                    .filter(|c| c.is_primary_key)
                    .map(|c| c.name.as_str())
                    .collect();
                println!("  Primary Key: {:?} ({})", pk, key_type.to_type_string());
            }
            Err(e) => println!("  Primary Key: none ({})", e),
        }
        println!();
    }

    Ok(())
}

fn preview(config: &CodegenConfig, table: &str) -> Result<()> {
    for artifact in crudgen_codegen::preview_table(config, table)? {
        println!("// {}/{}", artifact.target_package, artifact.file_name);
        println!("{}", artifact.source_text);
    }
    Ok(())
}
