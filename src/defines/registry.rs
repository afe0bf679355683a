// Mon Aug 24 2026

use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Virtual type cycle through: {0}")]
    VirtualCycle(String),
    #[error("Virtual type has no aliases: {0}")]
    EmptyVirtual(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineScope {
    Regular,
    Program,
}

type DefineTable = IndexMap<String, IndexMap<i64, String>>;

/// Type-keyed tables of known constants. Regular and Program entries share
/// one shape; lookup probes Regular first, then Program, two steps exactly.
/// Later registrations overwrite earlier ones for the same (type, value).
#[derive(Debug, Default, Clone)]
pub struct DefineRegistry {
    regular: DefineTable,
    program: DefineTable,
    virtuals: IndexMap<String, Vec<String>>,
}

impl DefineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, define_type: &str, value: i64, name: &str, scope: DefineScope) {
        let table = match scope {
            DefineScope::Regular => &mut self.regular,
            DefineScope::Program => &mut self.program,
        };
        table
            .entry(define_type.to_string())
            .or_default()
            .insert(value, name.to_string());
    }

    pub fn lookup(&self, define_type: &str, value: i64) -> Option<&str> {
        if let Some(name) = self.regular.get(define_type).and_then(|t| t.get(&value)) {
            return Some(name);
        }
        self.program
            .get(define_type)
            .and_then(|t| t.get(&value))
            .map(|name| name.as_str())
    }

    pub fn is_known_type(&self, define_type: &str) -> bool {
        self.regular.contains_key(define_type) || self.program.contains_key(define_type)
    }

    pub fn is_regular_type(&self, define_type: &str) -> bool {
        self.regular.contains_key(define_type)
    }

    pub fn is_virtual_type(&self, define_type: &str) -> bool {
        self.virtuals.contains_key(define_type)
    }

    pub fn add_virtual(&mut self, virtual_type: &str, aliases: Vec<String>) {
        self.virtuals.insert(virtual_type.to_string(), aliases);
    }

    pub fn remove_virtual(&mut self, virtual_type: &str) {
        self.virtuals.shift_remove(virtual_type);
    }

    pub fn virtual_aliases(&self, virtual_type: &str) -> Option<&[String]> {
        self.virtuals.get(virtual_type).map(|v| v.as_slice())
    }

    pub fn define_count(&self) -> usize {
        let count = |table: &DefineTable| table.values().map(|t| t.len()).sum::<usize>();
        count(&self.regular) + count(&self.program)
    }

    /// Rejects empty alias lists and cycles, direct or transitive. Run once
    /// after configuration load; lookups may then recurse freely.
    pub fn validate_virtuals(&self) -> Result<(), RegistryError> {
        for (name, aliases) in &self.virtuals {
            if aliases.is_empty() {
                return Err(RegistryError::EmptyVirtual(name.clone()));
            }

            let mut visited = HashSet::new();
            let mut stack = vec![name.as_str()];

            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                if let Some(children) = self.virtuals.get(current) {
                    for child in children {
                        if child == name {
                            return Err(RegistryError::VirtualCycle(name.clone()));
                        }
                        stack.push(child);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_regular_before_program() {
        let mut registry = DefineRegistry::new();
        registry.register("Opcode", 1, "REG_ONE", DefineScope::Regular);
        registry.register("Opcode", 1, "PROG_ONE", DefineScope::Program);
        assert_eq!(registry.lookup("Opcode", 1), Some("REG_ONE"));
    }

    #[test]
    fn test_program_only_value_found() {
        let mut registry = DefineRegistry::new();
        registry.register("Opcode", 2, "PROG_TWO", DefineScope::Program);
        assert_eq!(registry.lookup("Opcode", 2), Some("PROG_TWO"));
        assert!(registry.is_known_type("Opcode"));
        assert!(!registry.is_regular_type("Opcode"));
    }

    #[test]
    fn test_last_writer_wins() {
        let mut registry = DefineRegistry::new();
        registry.register("T", 5, "FIRST", DefineScope::Regular);
        registry.register("T", 5, "SECOND", DefineScope::Regular);
        assert_eq!(registry.lookup("T", 5), Some("SECOND"));
    }

    #[test]
    fn test_missing_value_is_none() {
        let mut registry = DefineRegistry::new();
        registry.register("T", 5, "X", DefineScope::Regular);
        assert_eq!(registry.lookup("T", 6), None);
        assert_eq!(registry.lookup("U", 5), None);
    }

    #[test]
    fn test_virtual_cycle_rejected() {
        let mut registry = DefineRegistry::new();
        registry.add_virtual("A", vec!["B".to_string()]);
        registry.add_virtual("B", vec!["A".to_string()]);
        assert!(registry.validate_virtuals().is_err());
    }

    #[test]
    fn test_virtual_self_reference_rejected() {
        let mut registry = DefineRegistry::new();
        registry.add_virtual("A", vec!["A".to_string()]);
        assert!(registry.validate_virtuals().is_err());
    }

    #[test]
    fn test_virtual_chain_allowed() {
        let mut registry = DefineRegistry::new();
        registry.add_virtual("A", vec!["B".to_string()]);
        registry.add_virtual("B", vec!["Concrete".to_string()]);
        assert!(registry.validate_virtuals().is_ok());
    }
}
