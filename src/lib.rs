// Mon Aug 24 2026

pub mod config;
pub mod defines;
pub mod engine;
pub mod ini;
pub mod operators;
pub mod raw;
pub mod report;
pub mod script;
pub mod utils;

pub use config::Config;
pub use defines::{DefineRegistry, HeaderDescriptor};
pub use engine::{load_tables, Driver, Status, Tables};
pub use ini::{IniFile, SectionReader};
pub use operators::OperatorTable;
pub use raw::RawTable;
pub use script::{ConstructParser, ScriptCode, ScriptEdit};
