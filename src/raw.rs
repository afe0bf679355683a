// Mon Aug 24 2026

/// Ordered literal-string substitutions applied to whole lines, independent
/// of construct parsing. The escape hatch for edits the typed path cannot
/// express.
#[derive(Debug, Default, Clone)]
pub struct RawTable {
    pairs: Vec<(String, String)>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, from: &str, to: &str) {
        if !from.is_empty() {
            self.pairs.push((from.to_string(), to.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn apply(&self, line: &str) -> String {
        let mut result = line.to_string();
        for (from, to) in &self.pairs {
            if result.contains(from.as_str()) {
                result = result.replace(from.as_str(), to);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_in_order() {
        let mut raw = RawTable::new();
        raw.add("FOO", "BAR");
        raw.add("BAR", "BAZ");
        // first pair rewrites FOO, second then sees the result
        assert_eq!(raw.apply("FOO"), "BAZ");
    }

    #[test]
    fn test_applies_without_constructs() {
        let mut raw = RawTable::new();
        raw.add("FOO", "BAR");
        assert_eq!(raw.apply("plain FOO text"), "plain BAR text");
    }

    #[test]
    fn test_empty_from_ignored() {
        let mut raw = RawTable::new();
        raw.add("", "X");
        assert!(raw.is_empty());
    }
}
