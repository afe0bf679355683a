// Mon Aug 24 2026

use indexmap::IndexMap;

/// Bidirectional table of canonical operator names and their source symbols.
/// Built-in defaults cover the comparison and assignment operators of the
/// target scripting language; configuration may override or extend them.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    by_name: IndexMap<String, String>,
    by_symbol: IndexMap<String, String>,
}

const DEFAULT_OPERATORS: &[(&str, &str)] = &[
    ("equal", "=="),
    ("unequal", "!="),
    ("greaterequal", ">="),
    ("lesserequal", "<="),
    ("greater", ">"),
    ("lesser", "<"),
    ("assign", ":="),
    ("plusassign", "+="),
    ("minusassign", "-="),
    ("mulassign", "*="),
    ("divassign", "/="),
];

impl Default for OperatorTable {
    fn default() -> Self {
        let mut table = Self {
            by_name: IndexMap::new(),
            by_symbol: IndexMap::new(),
        };
        for (name, symbol) in DEFAULT_OPERATORS {
            table.set(name, symbol);
        }
        table
    }
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, symbol: &str) {
        if let Some(old) = self.by_name.insert(name.to_string(), symbol.to_string()) {
            self.by_symbol.shift_remove(&old);
        }
        self.by_symbol.insert(symbol.to_string(), name.to_string());
    }

    pub fn is_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn symbol(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    pub fn name(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(|s| s.as_str())
    }

    /// Symbols ordered longest first, for building match alternations where
    /// `>=` must win over `>`.
    pub fn symbols_longest_first(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.by_symbol.keys().map(|s| s.as_str()).collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let table = OperatorTable::new();
        assert_eq!(table.symbol("equal"), Some("=="));
        assert_eq!(table.name("!="), Some("unequal"));
        assert!(table.is_symbol(":="));
        assert!(!table.is_name("bogus"));
    }

    #[test]
    fn test_override_replaces_old_symbol() {
        let mut table = OperatorTable::new();
        table.set("assign", "=");
        assert_eq!(table.symbol("assign"), Some("="));
        assert!(!table.is_symbol(":="));
        assert_eq!(table.name("="), Some("assign"));
    }

    #[test]
    fn test_symbols_longest_first() {
        let table = OperatorTable::new();
        let symbols = table.symbols_longest_first();
        let ge = symbols.iter().position(|s| *s == ">=").unwrap();
        let gt = symbols.iter().position(|s| *s == ">").unwrap();
        assert!(ge < gt);
    }
}
