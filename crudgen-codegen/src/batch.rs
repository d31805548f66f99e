//! Batch orchestration: one generation run over the selected tables
//!
//! Tables are processed strictly one after another. For each table the four
//! target packages are resolved, the five artifacts generated and then
//! persisted in order. A table whose persistence fails midway has its already
//! written files removed again. The first failure aborts the batch; tables
//! after it are never attempted and the run reports a single failure outcome.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::codegen::{CodeGenerator, PackageKind, PackageLayout};
use crate::error::{CodegenError, Result};
use crate::host::{
    DirectoryHandle, FileWriter, Outcome, PackageResolver, ProgressSink, ResultNotifier,
};
use crate::schema::{SchemaProvider, TableSchema};

/// Lifecycle of one orchestrator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running { cursor: usize, total: usize },
    Completed,
    Failed,
}

/// A table that could not be generated
#[derive(Debug)]
pub struct TableFailure {
    pub table: String,
    pub error: CodegenError,
}

/// Aggregate result of a batch
#[derive(Debug, Default)]
pub struct BatchResult {
    pub total_requested: usize,
    pub succeeded: usize,
    pub failures: Vec<TableFailure>,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        match self.failures.first() {
            None => Outcome::Success {
                generated_tables: self.succeeded,
            },
            Some(failure) => Outcome::Failure {
                reason: failure.error.to_string(),
            },
        }
    }

    /// Turn the first failure back into an error
    pub fn into_result(mut self) -> Result<BatchResult> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(self.failures.remove(0).error)
        }
    }
}

/// Cooperative cancellation, checked before each table
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives generation and persistence for a batch of tables
pub struct BatchOrchestrator<'a> {
    generator: CodeGenerator,
    resolver: &'a mut dyn PackageResolver,
    writer: &'a mut dyn FileWriter,
    progress: Option<&'a mut dyn ProgressSink>,
    notifier: Option<&'a mut dyn ResultNotifier>,
    cancellation: CancellationToken,
    state: BatchState,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        generator: CodeGenerator,
        resolver: &'a mut dyn PackageResolver,
        writer: &'a mut dyn FileWriter,
    ) -> Self {
        Self {
            generator,
            resolver,
            writer,
            progress: None,
            notifier: None,
            cancellation: CancellationToken::new(),
            state: BatchState::Idle,
        }
    }

    pub fn with_progress(mut self, progress: &'a mut dyn ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_notifier(mut self, notifier: &'a mut dyn ResultNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Load the selection from `provider` and process it
    pub fn run(&mut self, provider: &dyn SchemaProvider) -> Result<BatchResult> {
        let tables = match provider.selected_tables() {
            Ok(tables) => tables,
            Err(e) => {
                self.state = BatchState::Failed;
                self.notify(&Outcome::Failure {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };
        Ok(self.run_tables(&tables))
    }

    /// Process tables in order, stopping at the first failure
    pub fn run_tables(&mut self, tables: &[TableSchema]) -> BatchResult {
        let total = tables.len();
        let mut result = BatchResult {
            total_requested: total,
            ..Default::default()
        };
        info!("Generating CRUD layers for {} table(s)", total);

        for (cursor, table) in tables.iter().enumerate() {
            self.state = BatchState::Running { cursor, total };

            let processed = if self.cancellation.is_cancelled() {
                Err(CodegenError::Cancelled)
            } else {
                self.process_table(table)
            };

            match processed {
                Ok(()) => {
                    result.succeeded += 1;
                    if let Some(progress) = self.progress.as_mut() {
                        progress.report(result.succeeded, total, &table.name);
                    }
                }
                Err(e) => {
                    error!("Aborting batch at table {}: {}", table.name, e);
                    result.failures.push(TableFailure {
                        table: table.name.clone(),
                        error: e,
                    });
                    break;
                }
            }
        }

        self.state = if result.is_success() {
            BatchState::Completed
        } else {
            BatchState::Failed
        };
        self.notify(&result.outcome());
        result
    }

    fn process_table(&mut self, table: &TableSchema) -> Result<()> {
        debug!("Processing table {}", table.name);

        let handles = self.resolve_packages()?;
        let layout = PackageLayout {
            model: handles[&PackageKind::Model].package.clone(),
            repository: handles[&PackageKind::Repository].package.clone(),
            service: handles[&PackageKind::Service].package.clone(),
            controller: handles[&PackageKind::Controller].package.clone(),
        };

        let artifacts = self.generator.generate_table(table, &layout)?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let directory = &handles[&artifact.target_package];
            match self
                .writer
                .write_source_file(directory, &artifact.file_name, &artifact.source_text)
            {
                Ok(path) => written.push(path),
                Err(e) => {
                    self.roll_back(&table.name, &written);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Remove what was written for a table whose persistence failed midway
    fn roll_back(&mut self, table: &str, written: &[PathBuf]) {
        for path in written.iter().rev() {
            if let Err(e) = self.writer.remove_source_file(path) {
                warn!("Could not roll back {:?} for table {}: {}", path, table, e);
            }
        }
    }

    fn resolve_packages(&mut self) -> Result<HashMap<PackageKind, DirectoryHandle>> {
        let mut handles = HashMap::new();
        for kind in PackageKind::ALL {
            handles.insert(kind, self.resolver.ensure_package(kind)?);
        }
        Ok(handles)
    }

    fn notify(&mut self, outcome: &Outcome) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryWriter;
    use crate::schema::ColumnSchema;
    use std::path::Path;

    /// Resolver that hands out fixed directories and counts calls
    #[derive(Default)]
    struct StaticResolver {
        calls: usize,
        fail: bool,
    }

    impl PackageResolver for StaticResolver {
        fn ensure_package(&mut self, kind: PackageKind) -> Result<DirectoryHandle> {
            self.calls += 1;
            if self.fail {
                return Err(CodegenError::MissingHostRoot("no entry point".into()));
            }
            Ok(DirectoryHandle {
                path: PathBuf::from("/project").join(kind.to_string()),
                package: format!("com.example.{}", kind),
            })
        }
    }

    /// Writer that fails for files whose name starts with a given prefix
    struct FailingWriter {
        inner: MemoryWriter,
        fail_prefix: &'static str,
        removed: Vec<PathBuf>,
    }

    impl FailingWriter {
        fn new(fail_prefix: &'static str) -> Self {
            Self {
                inner: MemoryWriter::new(),
                fail_prefix,
                removed: Vec::new(),
            }
        }
    }

    impl FileWriter for FailingWriter {
        fn write_source_file(
            &mut self,
            directory: &DirectoryHandle,
            file_name: &str,
            contents: &str,
        ) -> Result<PathBuf> {
            if file_name.starts_with(self.fail_prefix) {
                return Err(CodegenError::write_failure(
                    directory.path.join(file_name),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.inner.write_source_file(directory, file_name, contents)
        }

        fn remove_source_file(&mut self, path: &Path) -> Result<()> {
            self.removed.push(path.to_path_buf());
            self.inner.remove_source_file(path)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Vec<Outcome>);

    impl ResultNotifier for RecordingNotifier {
        fn notify(&mut self, outcome: &Outcome) {
            self.0.push(outcome.clone());
        }
    }

    fn keyed_table(name: &str) -> TableSchema {
        TableSchema::new(
            name,
            vec![
                ColumnSchema::primary("id", "bigint"),
                ColumnSchema::new("name", "varchar"),
            ],
        )
    }

    #[test]
    fn test_all_tables_succeed() {
        let mut resolver = StaticResolver::default();
        let mut writer = MemoryWriter::new();
        let mut notifier = RecordingNotifier::default();
        let mut progress_log = Vec::new();
        let mut progress = |done: usize, total: usize, label: &str| {
            progress_log.push((done, total, label.to_string()));
        };

        let tables = vec![keyed_table("users"), keyed_table("orders")];
        let result = {
            let mut orchestrator =
                BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
                    .with_progress(&mut progress)
                    .with_notifier(&mut notifier);
            let result = orchestrator.run(&tables).unwrap();
            assert_eq!(orchestrator.state(), BatchState::Completed);
            result
        };

        assert!(result.is_success());
        assert_eq!(result.total_requested, 2);
        assert_eq!(result.succeeded, 2);
        assert_eq!(writer.files().len(), 10);
        assert_eq!(
            writer.files()[0].path,
            PathBuf::from("/project/model/UsersEntity.java")
        );
        assert_eq!(
            writer.files()[9].path,
            PathBuf::from("/project/controller/OrdersController.java")
        );
        assert_eq!(
            progress_log,
            vec![(1, 2, "users".to_string()), (2, 2, "orders".to_string())]
        );
        assert_eq!(notifier.0, vec![Outcome::Success { generated_tables: 2 }]);
    }

    #[test]
    fn test_persistence_failure_aborts_remaining_tables() {
        let mut resolver = StaticResolver::default();
        let mut writer = FailingWriter::new("Orders");
        let mut notifier = RecordingNotifier::default();

        let tables = vec![
            keyed_table("users"),
            keyed_table("orders"),
            keyed_table("invoices"),
        ];
        let result = {
            let mut orchestrator =
                BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
                    .with_notifier(&mut notifier);
            let result = orchestrator.run_tables(&tables);
            assert_eq!(orchestrator.state(), BatchState::Failed);
            result
        };

        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].table, "orders");
        assert!(matches!(
            result.failures[0].error,
            CodegenError::WriteFailure { .. }
        ));

        let written: Vec<&PathBuf> = writer.inner.files().iter().map(|f| &f.path).collect();
        assert_eq!(written.len(), 5);
        assert!(written.iter().all(|p| p.to_string_lossy().contains("Users")));
        // Packages were resolved for users and orders only
        assert_eq!(resolver.calls, 8);
        assert!(matches!(notifier.0.as_slice(), [Outcome::Failure { .. }]));
    }

    #[test]
    fn test_failure_midway_removes_files_of_that_table() {
        let mut resolver = StaticResolver::default();
        // Third artifact of the second table
        let mut writer = FailingWriter::new("OrdersService.java");
        let tables = vec![
            keyed_table("users"),
            keyed_table("orders"),
            keyed_table("invoices"),
        ];

        let result = BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
            .run_tables(&tables);

        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failures[0].table, "orders");
        assert_eq!(
            writer.removed,
            vec![
                PathBuf::from("/project/repository/OrdersRepository.java"),
                PathBuf::from("/project/model/OrdersEntity.java"),
            ]
        );
        let written: Vec<String> = writer
            .inner
            .files()
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 5);
        assert!(written.iter().all(|p| p.contains("Users")));
    }

    #[test]
    fn test_missing_primary_key_persists_nothing_for_table() {
        let mut resolver = StaticResolver::default();
        let mut writer = MemoryWriter::new();
        let tables = vec![
            keyed_table("users"),
            TableSchema::new("event_log", vec![ColumnSchema::new("payload", "text")]),
            keyed_table("orders"),
        ];

        let result = BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
            .run_tables(&tables);

        assert_eq!(result.succeeded, 1);
        assert!(matches!(
            result.failures[0].error,
            CodegenError::MissingPrimaryKey { ref table } if table == "event_log"
        ));
        assert!(writer
            .files()
            .iter()
            .all(|f| !f.path.to_string_lossy().contains("EventLog")));
        assert_eq!(writer.files().len(), 5);
    }

    #[test]
    fn test_missing_host_root_aborts() {
        let mut resolver = StaticResolver {
            fail: true,
            ..Default::default()
        };
        let mut writer = MemoryWriter::new();
        let result = BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
            .run_tables(&[keyed_table("users"), keyed_table("orders")]);

        assert_eq!(result.succeeded, 0);
        assert!(matches!(
            result.failures[0].error,
            CodegenError::MissingHostRoot(_)
        ));
        assert_eq!(resolver.calls, 1);
        assert!(writer.files().is_empty());
        assert!(!result.outcome().is_success());
    }

    #[test]
    fn test_cancellation_checked_between_tables() {
        let mut resolver = StaticResolver::default();
        let mut writer = MemoryWriter::new();
        let token = CancellationToken::new();
        let cancel_after_first = token.clone();
        let mut progress = move |_: usize, _: usize, _: &str| cancel_after_first.cancel();

        let result = BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer)
            .with_progress(&mut progress)
            .with_cancellation(token)
            .run_tables(&[keyed_table("users"), keyed_table("orders")]);

        assert_eq!(result.succeeded, 1);
        assert!(matches!(result.failures[0].error, CodegenError::Cancelled));
        assert_eq!(writer.files().len(), 5);
    }

    #[test]
    fn test_empty_selection_completes() {
        let mut resolver = StaticResolver::default();
        let mut writer = MemoryWriter::new();
        let mut orchestrator =
            BatchOrchestrator::new(CodeGenerator::default(), &mut resolver, &mut writer);
        assert_eq!(orchestrator.state(), BatchState::Idle);

        let result = orchestrator.run_tables(&[]);
        assert!(result.is_success());
        assert_eq!(result.succeeded, 0);
        assert_eq!(orchestrator.state(), BatchState::Completed);
    }

    #[test]
    fn test_into_result_returns_first_error() {
        let result = BatchResult {
            total_requested: 2,
            succeeded: 1,
            failures: vec![TableFailure {
                table: "orders".to_string(),
                error: CodegenError::Cancelled,
            }],
        };
        assert!(matches!(result.into_result(), Err(CodegenError::Cancelled)));
    }
}
