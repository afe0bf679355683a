// Mon Aug 24 2026

use crate::config::Config;
use crate::defines::scan_header;
use crate::engine::loader::Tables;
use crate::engine::resolver::{Resolution, Resolver};
use crate::engine::status::Status;
use crate::script::{apply_edits, ConstructParser, ScriptCode};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Orchestrates the run: header phase first, then script phase. All tables
/// are frozen once header scanning finishes; `status` is the only state
/// mutated while scripts are processed.
pub struct Driver {
    tables: Tables,
    parser: ConstructParser,
    pub status: Status,
    read_only: bool,
    raw_before_constructs: bool,
    extensions: Vec<String>,
}

impl Driver {
    pub fn new(tables: Tables, config: &Config) -> Self {
        let parser = ConstructParser::new(&tables.operators);
        Self {
            tables,
            parser,
            status: Status::new(),
            read_only: config.read_only,
            raw_before_constructs: config.raw_before_constructs,
            extensions: config
                .script_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Header phase: scans every declared header into the registry. Purely
    /// additive; a failed file is logged and skipped. Returns the number of
    /// defines registered.
    pub fn run_headers(&mut self, root: &Path) -> usize {
        let mut registered = 0;

        for descriptor in self.tables.headers.clone() {
            match scan_header(root, &descriptor, &mut self.tables.registry) {
                Ok(count) => registered += count,
                Err(e) => warn!("header {} skipped: {}", descriptor.filename, e),
            }
        }

        info!(
            "header phase: {} defines across {} declared headers",
            self.tables.registry.define_count(),
            self.tables.headers.len()
        );

        registered
    }

    /// Script phase: rewrites every discovered script file in a stable
    /// order. A failed file is logged and skipped; the run never aborts.
    /// `on_file` is called once per file before it is processed.
    pub fn run_scripts<F: FnMut(&Path)>(&mut self, root: &Path, mut on_file: F) {
        let files = self.collect_scripts(root);
        debug!("script phase: {} files under {}", files.len(), root.display());

        for path in files {
            on_file(&path);
            if let Err(e) = self.process_file(&path) {
                warn!("script {} skipped: {}", path.display(), e);
            }
        }

        self.status.current.clear();
    }

    /// Discovers script files recursively, sorted by name at every level,
    /// so repeated runs see the same order.
    pub fn collect_scripts(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_into(root, &self.extensions, &mut files);
        files
    }

    fn process_file(&mut self, path: &Path) -> Result<(), EngineError> {
        let content = fs::read_to_string(path)?;

        self.status.files += 1;
        self.status.current.file = path.display().to_string();

        let segments: Vec<&str> = content.split('\n').collect();
        let last = segments.len().saturating_sub(1);
        let mut output = Vec::with_capacity(segments.len());
        let mut changed_lines = 0usize;

        for (index, segment) in segments.iter().enumerate() {
            // a trailing newline leaves one empty segment at the end
            if index == last && segment.is_empty() {
                output.push(String::new());
                continue;
            }

            let (body, ending) = match segment.strip_suffix('\r') {
                Some(stripped) => (stripped, "\r"),
                None => (*segment, ""),
            };

            self.status.lines += 1;
            self.status.current.line = body.to_string();
            self.status.current.line_number = index + 1;

            let processed = self.process_line(body);
            if processed != body {
                changed_lines += 1;
            }
            output.push(format!("{}{}", processed, ending));
        }

        if changed_lines > 0 {
            self.status.lines_changed += changed_lines;
            self.status.files_changed += 1;

            if !self.read_only {
                fs::write(path, output.join("\n"))?;
            }
            debug!("{}: {} lines changed", path.display(), changed_lines);
        }

        Ok(())
    }

    /// The per-line core: raw substitution on one side, construct parsing,
    /// rule application and resolution on the other. Public so behavior can
    /// be exercised without touching the filesystem.
    pub fn process_line(&mut self, line: &str) -> String {
        let mut work = line.to_string();

        if self.raw_before_constructs {
            work = self.tables.raw.apply(&work);
        }

        let codes = self.parser.parse_line(&work);

        // replace right-to-left so earlier offsets stay valid
        for code in codes.iter().rev() {
            if let Some(rebuilt) = self.process_code(code) {
                work.replace_range(code.offset..code.offset + code.full.len(), &rebuilt);
            }
        }

        if !self.raw_before_constructs {
            work = self.tables.raw.apply(&work);
        }

        work
    }

    /// Runs one construct through Before rules, resolution, After rules.
    /// Returns the rebuilt span only when some field actually changed, so
    /// untouched constructs keep their original spacing.
    fn process_code(&mut self, code: &ScriptCode) -> Option<String> {
        let mut work = code.clone();
        let mut misses: Vec<(String, String)> = Vec::new();

        apply_edits(&self.tables.edits_before, &mut work);

        let resolver = Resolver::new(&self.tables.registry, &self.tables.guess_types);

        if work.function {
            if let Some(types) = self.tables.function_arguments.get(&work.name) {
                for (index, define_type) in types.iter().enumerate() {
                    if index >= work.arguments.len() {
                        break;
                    }
                    let argument = work.arguments[index].clone();
                    match resolver.resolve(define_type, &argument) {
                        Resolution::Resolved(name) => work.arguments[index] = name,
                        Resolution::Unknown => misses.push((define_type.clone(), argument)),
                        Resolution::NotNumeric => {}
                    }
                }
            }
        }

        if work.has_operator() {
            let operator_map = if work.function {
                &self.tables.function_operators
            } else {
                &self.tables.variable_operators
            };
            let mapped = operator_map
                .get(&work.name)
                .and_then(|ops| ops.get(&work.operator));

            match mapped {
                Some(define_type) => match resolver.resolve(define_type, &work.operator_argument) {
                    Resolution::Resolved(name) => work.operator_argument = name,
                    Resolution::Unknown => {
                        misses.push((define_type.clone(), work.operator_argument.clone()))
                    }
                    Resolution::NotNumeric => {}
                },
                // untyped bare variable: consult the guess list, silently
                None if !work.function => {
                    if let Resolution::Resolved(name) =
                        resolver.resolve_guessed(&work.operator_argument)
                    {
                        work.operator_argument = name;
                    }
                }
                None => {}
            }
        }

        apply_edits(&self.tables.edits_after, &mut work);

        for (define_type, literal) in misses {
            self.status.record_unknown(&define_type, &literal);
        }

        let unchanged = work.name == code.name
            && work.arguments == code.arguments
            && work.operator == code.operator
            && work.operator_argument == code.operator_argument;

        if unchanged {
            None
        } else {
            Some(work.rebuild_full(&self.tables.operators))
        }
    }
}

fn collect_into(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_into(&path, extensions, out);
        } else if matches_extension(&path, extensions) {
            out.push(path);
        }
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted == &ext.to_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defines::DefineScope;
    use crate::ini::IniFile;
    use indexmap::IndexMap;

    fn driver_with(tables: Tables) -> Driver {
        Driver::new(tables, &Config::default())
    }

    fn jump_tables() -> Tables {
        let mut tables = Tables::new();
        tables.registry.register("Opcode", 17, "OP_JUMP", DefineScope::Regular);
        tables
            .function_arguments
            .insert("Jump".to_string(), vec!["Opcode".to_string()]);
        tables
    }

    #[test]
    fn test_resolves_call_argument() {
        let mut driver = driver_with(jump_tables());
        assert_eq!(driver.process_line("Jump(17)"), "Jump(OP_JUMP)");
    }

    #[test]
    fn test_unknown_left_unchanged_and_recorded() {
        let mut driver = driver_with(jump_tables());
        assert_eq!(driver.process_line("Jump(99)"), "Jump(99)");
        assert_eq!(driver.status.unknown["Opcode"]["99"], 1);
    }

    #[test]
    fn test_idempotent_on_second_pass() {
        let mut driver = driver_with(jump_tables());
        let once = driver.process_line("Jump(17)");
        let twice = driver.process_line(&once);
        assert_eq!(once, twice);
        assert_eq!(driver.status.unknown_total(), 0);
    }

    #[test]
    fn test_operator_argument_resolution() {
        let mut tables = jump_tables();
        tables.registry.register("Pid", 3, "PID_RAT", DefineScope::Regular);
        let mut ops = IndexMap::new();
        ops.insert("equal".to_string(), "Pid".to_string());
        tables.function_operators.insert("obj_pid".to_string(), ops);
        let mut driver = driver_with(tables);
        assert_eq!(
            driver.process_line("if (obj_pid(target) == 3) then"),
            "if (obj_pid(target) == PID_RAT) then"
        );
    }

    #[test]
    fn test_variable_guess_list() {
        let mut tables = Tables::new();
        tables.registry.register("Mode", 2, "MODE_ON", DefineScope::Regular);
        tables.guess_types = vec!["Mode".to_string()];
        let mut driver = driver_with(tables);
        assert_eq!(driver.process_line("state == 2"), "state == MODE_ON");
        // guessing is silent on failure
        assert_eq!(driver.process_line("state == 9"), "state == 9");
        assert_eq!(driver.status.unknown_total(), 0);
    }

    #[test]
    fn test_raw_substitution_without_constructs() {
        let ini = IniFile::parse("[Raw]\nFOO = BAR\n");
        let tables = crate::engine::loader::load_tables(&ini);
        let mut driver = driver_with(tables);
        assert_eq!(driver.process_line("plain FOO line"), "plain BAR line");
    }

    #[test]
    fn test_before_rule_redirects_resolution() {
        let ini = IniFile::parse(
            "[ScriptEdit:Before:Jump]\nIf:Argument:0 = 99\nDo:Argument:0 = OP_SPECIAL\n",
        );
        let mut tables = crate::engine::loader::load_tables(&ini);
        tables.registry.register("Opcode", 17, "OP_JUMP", DefineScope::Regular);
        tables
            .function_arguments
            .insert("Jump".to_string(), vec!["Opcode".to_string()]);
        let mut driver = driver_with(tables);
        assert_eq!(driver.process_line("Jump(99)"), "Jump(OP_SPECIAL)");
        assert_eq!(driver.status.unknown_total(), 0);
    }

    #[test]
    fn test_after_rule_postprocesses_result() {
        let ini = IniFile::parse(
            "[ScriptEdit:After:Jump]\nIf:Argument:0 = OP_JUMP\nDo:Name = jump_to\n",
        );
        let mut tables = crate::engine::loader::load_tables(&ini);
        tables.registry.register("Opcode", 17, "OP_JUMP", DefineScope::Regular);
        tables
            .function_arguments
            .insert("Jump".to_string(), vec!["Opcode".to_string()]);
        let mut driver = driver_with(tables);
        assert_eq!(driver.process_line("Jump(17)"), "jump_to(OP_JUMP)");
    }

    #[test]
    fn test_multiple_constructs_on_one_line() {
        let mut tables = jump_tables();
        tables.registry.register("Opcode", 18, "OP_CALL", DefineScope::Regular);
        let mut driver = driver_with(tables);
        assert_eq!(
            driver.process_line("Jump(17) and Jump(18)"),
            "Jump(OP_JUMP) and Jump(OP_CALL)"
        );
    }

    #[test]
    fn test_unknown_counted_per_occurrence() {
        let mut driver = driver_with(jump_tables());
        driver.process_line("Jump(99)");
        driver.process_line("Jump(99)");
        driver.process_line("Jump(99)");
        assert_eq!(driver.status.unknown["Opcode"]["99"], 3);
    }
}
