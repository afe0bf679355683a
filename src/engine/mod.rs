// Mon Aug 24 2026

pub mod driver;
pub mod loader;
pub mod resolver;
pub mod status;

pub use driver::{Driver, EngineError};
pub use loader::{load_tables, Tables};
pub use resolver::{Resolution, Resolver};
pub use status::Status;
