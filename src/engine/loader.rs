// Mon Aug 24 2026

use crate::defines::{DefineRegistry, HeaderDescriptor, RegistryError};
use crate::ini::SectionReader;
use crate::operators::OperatorTable;
use crate::raw::RawTable;
use crate::script::{EditCondition, EditPhase, EditResult, ScriptEdit};
use crate::utils::TextUtils;
use indexmap::IndexMap;
use log::{debug, warn};

pub type OperatorTypeMap = IndexMap<String, IndexMap<String, String>>;

/// Every configuration-populated table, built once before processing and
/// read-only afterwards. A missing section leaves its feature disabled.
#[derive(Debug, Default)]
pub struct Tables {
    pub operators: OperatorTable,
    pub raw: RawTable,
    pub registry: DefineRegistry,
    pub headers: Vec<HeaderDescriptor>,
    pub function_arguments: IndexMap<String, Vec<String>>,
    pub function_operators: OperatorTypeMap,
    pub variable_operators: OperatorTypeMap,
    pub guess_types: Vec<String>,
    pub edits_before: Vec<ScriptEdit>,
    pub edits_after: Vec<ScriptEdit>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reads each recognized section exactly once. Malformed entries are warned
/// about and skipped; nothing here aborts the run.
pub fn load_tables(reader: &dyn SectionReader) -> Tables {
    let mut tables = Tables::new();

    if let Some(entries) = reader.section("Operators") {
        for (name, symbol) in entries {
            if symbol.is_empty() {
                warn!("[Operators] entry without symbol: {}", name);
                continue;
            }
            tables.operators.set(name, symbol);
        }
    }

    if let Some(entries) = reader.section("Headers") {
        for (filename, decl) in entries {
            let parts = TextUtils::split(decl, ',');
            if parts.is_empty() || parts[0].is_empty() {
                warn!("[Headers] entry without type: {}", filename);
                continue;
            }
            let prefix = parts.get(1).cloned().unwrap_or_default();
            let group = parts.get(2).cloned().unwrap_or_default();
            tables
                .headers
                .push(HeaderDescriptor::new(filename, &parts[0], &prefix, &group));
        }
    }

    if let Some(entries) = reader.section("VirtualTypes") {
        for (virtual_type, alias_list) in entries {
            let aliases: Vec<String> = TextUtils::split(alias_list, ',')
                .into_iter()
                .filter(|alias| !alias.is_empty())
                .collect();
            tables.registry.add_virtual(virtual_type, aliases);
        }
        validate_virtuals(&mut tables.registry);
    }

    if let Some(entries) = reader.section("Raw") {
        for (from, to) in entries {
            tables.raw.add(from, to);
        }
    }

    if let Some(entries) = reader.section("FunctionArguments") {
        for (name, type_list) in entries {
            let types = TextUtils::split(type_list, ',');
            tables.function_arguments.insert(name.clone(), types);
        }
    }

    tables.function_operators =
        load_operator_map(reader, "FunctionOperators", &tables.operators);
    tables.variable_operators =
        load_operator_map(reader, "VariableOperators", &tables.operators);

    if let Some(entries) = reader.section("VariableGuess") {
        for (key, type_list) in entries {
            if key != "types" {
                warn!("[VariableGuess] unrecognized key: {}", key);
                continue;
            }
            tables.guess_types = TextUtils::split(type_list, ',');
        }
    }

    tables.edits_before = load_edits(reader, EditPhase::Before);
    tables.edits_after = load_edits(reader, EditPhase::After);

    debug!(
        "configuration loaded: {} headers, {} rules before, {} rules after, {} raw pairs",
        tables.headers.len(),
        tables.edits_before.len(),
        tables.edits_after.len(),
        tables.raw.len()
    );

    tables
}

// Drops offending types one at a time so valid ones keep working.
fn validate_virtuals(registry: &mut DefineRegistry) {
    loop {
        match registry.validate_virtuals() {
            Ok(()) => break,
            Err(RegistryError::VirtualCycle(name)) | Err(RegistryError::EmptyVirtual(name)) => {
                warn!("virtual type disabled: {}", name);
                registry.remove_virtual(&name);
            }
        }
    }
}

fn load_operator_map(
    reader: &dyn SectionReader,
    section: &str,
    operators: &OperatorTable,
) -> OperatorTypeMap {
    let mut map = OperatorTypeMap::new();

    let Some(entries) = reader.section(section) else { return map };

    for (name, mapping_list) in entries {
        let mut mappings = IndexMap::new();
        for mapping in TextUtils::split(mapping_list, ',') {
            let Some((op_name, define_type)) = mapping.split_once(':') else {
                warn!("[{}] {}: expected opName:Type, got {:?}", section, name, mapping);
                continue;
            };
            let op_name = op_name.trim();
            let define_type = define_type.trim();
            if !operators.is_name(op_name) {
                warn!("[{}] {}: unknown operator name {:?}", section, name, op_name);
                continue;
            }
            mappings.insert(op_name.to_string(), define_type.to_string());
        }
        if !mappings.is_empty() {
            map.insert(name.clone(), mappings);
        }
    }

    map
}

fn load_edits(reader: &dyn SectionReader, phase: EditPhase) -> Vec<ScriptEdit> {
    let prefix = match phase {
        EditPhase::Before => "ScriptEdit:Before:",
        EditPhase::After => "ScriptEdit:After:",
    };

    let mut edits = Vec::new();

    for (section_name, entries) in reader.sections_with_prefix(prefix) {
        let rule_name = &section_name[prefix.len()..];
        if rule_name.is_empty() {
            warn!("edit rule section without a name: [{}]", section_name);
            continue;
        }

        let mut construct_name = rule_name.to_string();
        let mut conditions = Vec::new();
        let mut results = Vec::new();

        for (key, value) in entries {
            if key == "Name" {
                // several rules may target one construct under distinct
                // section labels
                construct_name = value.clone();
            } else if let Some(field) = key.strip_prefix("If:") {
                let values: Vec<String> = TextUtils::split(value, ',')
                    .into_iter()
                    .filter(|v| !v.is_empty())
                    .collect();
                conditions.push(EditCondition {
                    field: field.to_string(),
                    values,
                });
            } else if let Some(field) = key.strip_prefix("Do:") {
                results.push(EditResult {
                    field: field.to_string(),
                    value: value.clone(),
                });
            } else {
                warn!("[{}] unrecognized key: {}", section_name, key);
            }
        }

        if results.is_empty() {
            warn!("[{}] rule has no results, skipped", section_name);
            continue;
        }

        edits.push(ScriptEdit {
            name: construct_name,
            phase,
            conditions,
            results,
        });
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::IniFile;

    #[test]
    fn test_missing_sections_disable_features() {
        let tables = load_tables(&IniFile::parse(""));
        assert!(tables.headers.is_empty());
        assert!(tables.raw.is_empty());
        assert!(tables.edits_before.is_empty());
        // built-in operators still present
        assert!(tables.operators.is_symbol("=="));
    }

    #[test]
    fn test_headers_section() {
        let ini = IniFile::parse("[Headers]\ndefine.h = Opcode, OP_, core\nextra.h = Flag\n");
        let tables = load_tables(&ini);
        assert_eq!(tables.headers.len(), 2);
        assert_eq!(tables.headers[0].define_type, "Opcode");
        assert_eq!(tables.headers[0].prefix, "OP_");
        assert_eq!(tables.headers[0].group, "core");
        assert_eq!(tables.headers[1].prefix, "");
    }

    #[test]
    fn test_operator_maps() {
        let ini = IniFile::parse(
            "[FunctionOperators]\nobj_pid = equal:Pid, unequal:Pid\n[VariableOperators]\nmode = equal:Mode\n",
        );
        let tables = load_tables(&ini);
        assert_eq!(tables.function_operators["obj_pid"]["equal"], "Pid");
        assert_eq!(tables.variable_operators["mode"]["equal"], "Mode");
    }

    #[test]
    fn test_bad_operator_mapping_skipped() {
        let ini = IniFile::parse("[FunctionOperators]\nf = bogusop:T, equal:U\n");
        let tables = load_tables(&ini);
        assert_eq!(tables.function_operators["f"].len(), 1);
    }

    #[test]
    fn test_guess_list() {
        let ini = IniFile::parse("[VariableGuess]\ntypes = A, B, C\n");
        let tables = load_tables(&ini);
        assert_eq!(tables.guess_types, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_edit_rules_in_section_order() {
        let ini = IniFile::parse(
            "[ScriptEdit:Before:Jump]\nIf:Argument:0 = 1\nDo:Argument:0 = ONE\n\
             [ScriptEdit:After:Jump]\nDo:Name = jump\n\
             [ScriptEdit:Before:Walk]\nDo:Name = walk\n",
        );
        let tables = load_tables(&ini);
        assert_eq!(tables.edits_before.len(), 2);
        assert_eq!(tables.edits_before[0].name, "Jump");
        assert_eq!(tables.edits_before[1].name, "Walk");
        assert_eq!(tables.edits_after.len(), 1);
        assert_eq!(tables.edits_before[0].conditions[0].field, "Argument:0");
    }

    #[test]
    fn test_rule_name_key_overrides_section_suffix() {
        let ini = IniFile::parse("[ScriptEdit:Before:special-case]\nName = Jump\nDo:Name = Leap\n");
        let tables = load_tables(&ini);
        assert_eq!(tables.edits_before[0].name, "Jump");
    }

    #[test]
    fn test_cyclic_virtual_disabled() {
        let ini = IniFile::parse("[VirtualTypes]\nA = B\nB = A\nGood = Concrete\n");
        let tables = load_tables(&ini);
        assert!(tables.registry.validate_virtuals().is_ok());
        assert!(tables.registry.virtual_aliases("Good").is_some());
    }
}
