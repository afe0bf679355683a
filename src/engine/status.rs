// Mon Aug 24 2026

use indexmap::IndexMap;

/// Diagnostics cursor: where processing currently stands.
#[derive(Debug, Default, Clone)]
pub struct Current {
    pub file: String,
    pub line: String,
    pub line_number: usize,
}

impl Current {
    pub fn clear(&mut self) {
        self.file.clear();
        self.line.clear();
        self.line_number = 0;
    }
}

/// Process-wide run statistics. Mutated only by the rewrite driver; change
/// counters count candidates when running read-only.
#[derive(Debug, Default, Clone)]
pub struct Status {
    pub current: Current,
    pub files: usize,
    pub lines: usize,
    pub files_changed: usize,
    pub lines_changed: usize,
    /// type -> literal -> occurrence count, for the end-of-run report.
    pub unknown: IndexMap<String, IndexMap<String, usize>>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.files = 0;
        self.lines = 0;
        self.files_changed = 0;
        self.lines_changed = 0;
        self.unknown.clear();
    }

    pub fn record_unknown(&mut self, define_type: &str, literal: &str) {
        *self
            .unknown
            .entry(define_type.to_string())
            .or_default()
            .entry(literal.to_string())
            .or_insert(0) += 1;
    }

    pub fn unknown_total(&self) -> usize {
        self.unknown.values().map(|values| values.values().sum::<usize>()).sum()
    }
}
