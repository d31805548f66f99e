//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default target project root
pub const PROJECT_ROOT: &str = ".";

/// Default source tree, relative to the project root
pub const SOURCE_ROOT: &str = "src/main/java";

/// Default package for records
pub const MODEL_PACKAGE: &str = "model";

/// Default package for data-access interfaces
pub const REPOSITORY_PACKAGE: &str = "repository";

/// Default package for service interfaces and implementations
pub const SERVICE_PACKAGE: &str = "service";

/// Default package for endpoint handlers
pub const CONTROLLER_PACKAGE: &str = "controller";

/// Extension of generated source files
pub const SOURCE_FILE_EXTENSION: &str = ".java";

/// Annotation marking the application entry point
pub const ENTRY_POINT_MARKER: &str = "@SpringBootApplication";

/// Whether existing files are overwritten by default
pub const OVERWRITE: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
