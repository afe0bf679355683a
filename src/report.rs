// Mon Aug 24 2026

use crate::engine::Status;
use crate::utils::pluralize;
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct UnknownEntry {
    pub define_type: String,
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub files: usize,
    pub lines: usize,
    pub files_changed: usize,
    pub lines_changed: usize,
    pub unknown: Vec<UnknownEntry>,
}

impl RunReport {
    pub fn from_status(status: &Status) -> Self {
        let unknown = status
            .unknown
            .iter()
            .flat_map(|(define_type, values)| {
                values.iter().map(move |(value, count)| UnknownEntry {
                    define_type: define_type.clone(),
                    value: value.clone(),
                    count: *count,
                })
            })
            .sorted_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.define_type.cmp(&b.define_type))
                    .then_with(|| a.value.cmp(&b.value))
            })
            .collect();

        Self {
            files: status.files,
            lines: status.lines,
            files_changed: status.files_changed,
            lines_changed: status.lines_changed,
            unknown,
        }
    }
}

pub fn print_summary(status: &Status, read_only: bool) {
    println!("{}", "Run Summary".cyan().bold());
    println!("{}", "-".repeat(40).cyan());

    println!(
        "  Scanned: {}, {}",
        pluralize(status.files, "file", "files").green(),
        pluralize(status.lines, "line", "lines").green()
    );

    let changed_label = if read_only { "Change candidates" } else { "Changed" };
    println!(
        "  {}: {}, {}",
        changed_label,
        pluralize(status.files_changed, "file", "files").yellow(),
        pluralize(status.lines_changed, "line", "lines").yellow()
    );

    if status.unknown.is_empty() {
        println!("  Unknown values: {}", "none".green());
        return;
    }

    println!();
    println!("{}", "Unknown values (extend configuration to cover these):".yellow().bold());

    // grouped by type, values descending by occurrence count
    for (define_type, values) in &status.unknown {
        println!("  {}:", define_type.cyan());
        for (value, count) in values
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        {
            println!("    {} ({})", value, pluralize(*count, "occurrence", "occurrences"));
        }
    }
}

pub fn save_report(status: &Status, path: &Path) -> Result<(), std::io::Error> {
    let report = RunReport::from_status(status);
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sorted_descending() {
        let mut status = Status::new();
        status.record_unknown("A", "1");
        status.record_unknown("A", "2");
        status.record_unknown("A", "2");
        status.record_unknown("B", "3");

        let report = RunReport::from_status(&status);
        assert_eq!(report.unknown.len(), 3);
        assert_eq!(report.unknown[0].value, "2");
        assert_eq!(report.unknown[0].count, 2);
    }

    #[test]
    fn test_counters_copied() {
        let mut status = Status::new();
        status.files = 3;
        status.lines = 120;
        status.lines_changed = 7;
        let report = RunReport::from_status(&status);
        assert_eq!(report.files, 3);
        assert_eq!(report.lines, 120);
        assert_eq!(report.lines_changed, 7);
    }
}
