// Mon Aug 24 2026

pub mod code;
pub mod edit;
pub mod parser;

pub use code::ScriptCode;
pub use edit::{apply_edits, EditCondition, EditPhase, EditResult, ScriptEdit};
pub use parser::ConstructParser;
