// Mon Aug 24 2026

use crate::defines::DefineRegistry;
use crate::utils::TextUtils;

/// Outcome of a resolution attempt. `NotNumeric` covers literals that are
/// not integers at all, typically names substituted by an earlier run; they
/// never count as unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unknown,
    NotNumeric,
}

impl Resolution {
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(name) => Some(name),
            _ => None,
        }
    }
}

/// Pure lookup over a frozen registry. Unknown accounting is the caller's
/// concern, which keeps repeated calls order-independent.
pub struct Resolver<'a> {
    registry: &'a DefineRegistry,
    guess_types: &'a [String],
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a DefineRegistry, guess_types: &'a [String]) -> Self {
        Self { registry, guess_types }
    }

    /// Resolves a literal against one declared type, following virtual
    /// aliases in declared order, first hit wins.
    pub fn resolve(&self, define_type: &str, literal: &str) -> Resolution {
        let Some(value) = TextUtils::parse_int(literal) else {
            return Resolution::NotNumeric;
        };

        match self.resolve_value(define_type, value) {
            Some(name) => Resolution::Resolved(name.to_string()),
            None => Resolution::Unknown,
        }
    }

    /// Fallback for bare variables with no declared type: tries the global
    /// guess list in order, stopping at the first type that resolves.
    pub fn resolve_guessed(&self, literal: &str) -> Resolution {
        if TextUtils::parse_int(literal).is_none() {
            return Resolution::NotNumeric;
        }

        for guess in self.guess_types {
            if let Resolution::Resolved(name) = self.resolve(guess, literal) {
                return Resolution::Resolved(name);
            }
        }
        Resolution::Unknown
    }

    fn resolve_value(&self, define_type: &str, value: i64) -> Option<&'a str> {
        if self.registry.is_known_type(define_type) {
            if let Some(name) = self.registry.lookup(define_type, value) {
                return Some(name);
            }
        }

        // Alias chains are validated acyclic at load time.
        if let Some(aliases) = self.registry.virtual_aliases(define_type) {
            for alias in aliases {
                if let Some(name) = self.resolve_value(alias, value) {
                    return Some(name);
                }
            }
        }

        None
    }
}
