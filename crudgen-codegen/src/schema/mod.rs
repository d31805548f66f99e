//! Table metadata supplied by the host's schema introspection

mod metadata;
mod provider;

pub use metadata::*;
pub use provider::*;
