// Mon Aug 24 2026

use crate::defines::registry::{DefineRegistry, DefineScope};
use crate::utils::TextUtils;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One declared header file to scan for constant declarations of a given
/// type. `prefix` and `group` are conjunctive admission filters; either may
/// be empty.
#[derive(Debug, Clone)]
pub struct HeaderDescriptor {
    pub filename: String,
    pub define_type: String,
    pub prefix: String,
    pub group: String,
}

impl HeaderDescriptor {
    pub fn new(filename: &str, define_type: &str, prefix: &str, group: &str) -> Self {
        Self {
            filename: filename.to_string(),
            define_type: define_type.to_string(),
            prefix: prefix.to_string(),
            group: group.to_string(),
        }
    }

    /// Grouped descriptors feed the Program table; ungrouped ones the
    /// Regular table.
    pub fn scope(&self) -> DefineScope {
        if self.group.is_empty() {
            DefineScope::Regular
        } else {
            DefineScope::Program
        }
    }
}

static DEFINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*#define\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s+\(?\s*(?P<value>-?(?:0[xX][0-9a-fA-F]+|[0-9]+))\s*\)?\s*(?://.*)?$",
    )
    .unwrap()
});

static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//\s*group:\s*(?P<name>\S+)").unwrap());

/// Scans one header file and registers every admitted define. A line that
/// fails a filter or is not a recognizable declaration is skipped silently.
/// Returns the number of defines registered.
pub fn scan_header(
    root: &Path,
    descriptor: &HeaderDescriptor,
    registry: &mut DefineRegistry,
) -> Result<usize, HeaderError> {
    let path: PathBuf = root.join(&descriptor.filename);
    let text = fs::read_to_string(&path)?;
    let scope = descriptor.scope();

    let mut group = String::new();
    let mut registered = 0usize;

    for line in text.lines() {
        if let Some(caps) = GROUP_RE.captures(line) {
            group = caps["name"].to_string();
            continue;
        }

        let Some(caps) = DEFINE_RE.captures(line) else { continue };
        let name = &caps["name"];

        if !descriptor.prefix.is_empty() && !name.starts_with(descriptor.prefix.as_str()) {
            trace!("skipped define (prefix): {}", name);
            continue;
        }
        if !descriptor.group.is_empty() && group != descriptor.group {
            trace!("skipped define (group): {}", name);
            continue;
        }

        let Some(value) = TextUtils::parse_int(&caps["value"]) else { continue };

        registry.register(&descriptor.define_type, value, name, scope);
        registered += 1;
    }

    debug!(
        "scanned {}: {} defines of type {}",
        descriptor.filename, registered, descriptor.define_type
    );

    Ok(registered)
}
