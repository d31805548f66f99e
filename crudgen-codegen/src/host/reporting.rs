//! Progress and outcome reporting

use std::fmt;

use tracing::{error, info};

/// Receives per-table progress; purely informational
pub trait ProgressSink {
    fn report(&mut self, completed: usize, total: usize, current_label: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize, &str),
{
    fn report(&mut self, completed: usize, total: usize, current_label: &str) {
        self(completed, total, current_label)
    }
}

/// Logs progress through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, completed: usize, total: usize, current_label: &str) {
        info!("Processing table {}\t{}/{}", current_label, completed, total);
    }
}

/// Terminal result of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { generated_tables: usize },
    Failure { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { generated_tables } => write!(
                f,
                "Classes successfully generated for {} table(s)!",
                generated_tables
            ),
            Outcome::Failure { reason } => write!(f, "Generation failed: {}", reason),
        }
    }
}

/// Receives the single terminal outcome of a batch
pub trait ResultNotifier {
    fn notify(&mut self, outcome: &Outcome);
}

/// Logs the outcome through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ResultNotifier for LogNotifier {
    fn notify(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            info!("{}", outcome);
        } else {
            error!("{}", outcome);
        }
    }
}
