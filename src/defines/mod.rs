// Mon Aug 24 2026

pub mod header;
pub mod registry;

pub use header::{scan_header, HeaderDescriptor, HeaderError};
pub use registry::{DefineRegistry, DefineScope, RegistryError};
