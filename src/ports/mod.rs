//! Ports and adapters: capability registry, adapter seam, and resolver

pub mod adapter;
pub mod registry;
pub mod resolver;

pub use adapter::{Adapter, AdapterBinding, AdapterEntry, AdapterMap, AdapterOptions};
pub use registry::{lookup_interface, Operation, PortInterface};
pub use resolver::{resolve, resolve_or_fail, validate, ValidationError};
