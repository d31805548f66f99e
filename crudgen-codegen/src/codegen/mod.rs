//! Code generation module

mod artifact;
mod code_generator;
mod controller_generator;
mod naming;
mod record_generator;
mod repository_generator;
mod service_generator;
mod service_impl_generator;
mod type_mapper;

pub use artifact::*;
pub use code_generator::*;
pub use controller_generator::generate_controller;
pub use naming::*;
pub use record_generator::generate_record;
pub use repository_generator::generate_repository;
pub use service_generator::generate_service_interface;
pub use service_impl_generator::generate_service_impl;
pub use type_mapper::*;
