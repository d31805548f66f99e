//! Collaborators the generator hands persistence and reporting to

mod file_writer;
mod package_resolver;
mod reporting;

pub use file_writer::*;
pub use package_resolver::*;
pub use reporting::*;
