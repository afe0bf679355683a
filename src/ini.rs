// Mon Aug 24 2026

use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only view over named configuration sections. The engine consumes
/// sections through this trait and never sees file syntax.
pub trait SectionReader {
    /// Key/value pairs of a section, in file order. Duplicate keys are kept.
    fn section(&self, name: &str) -> Option<&[(String, String)]>;

    /// Section names in file order.
    fn section_names(&self) -> Vec<&str>;

    fn sections_with_prefix(&self, prefix: &str) -> Vec<(&str, &[(String, String)])> {
        self.section_names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .filter_map(|name| self.section(name).map(|entries| (name, entries)))
            .collect()
    }
}

/// INI-style file: `[Section]` headers, `key = value` lines, `;` or `#`
/// comments. Section and key order is preserved, duplicate keys are kept,
/// duplicate sections are merged in order.
#[derive(Debug, Default, Clone)]
pub struct IniFile {
    sections: IndexMap<String, Vec<(String, String)>>,
}

impl IniFile {
    pub fn load(path: &Path) -> Result<Self, IniError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut sections: IndexMap<String, Vec<(String, String)>> = IndexMap::new();
        let mut current: Option<String> = None;

        for raw in text.lines() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = &current else { continue };

            if let Some(eq) = line.find('=') {
                let key = line[..eq].trim().to_string();
                let value = line[eq + 1..].trim().to_string();
                if !key.is_empty() {
                    sections.get_mut(section).unwrap().push((key, value));
                }
            }
        }

        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl SectionReader for IniFile {
    fn section(&self, name: &str) -> Option<&[(String, String)]> {
        self.sections.get(name).map(|entries| entries.as_slice())
    }

    fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(|name| name.as_str()).collect()
    }
}
