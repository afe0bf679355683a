// Mon Aug 24 2026

use crate::script::code::ScriptCode;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Before,
    After,
}

/// One condition: the named field must hold one of `values`. An empty value
/// list is a wildcard and matches any present field.
#[derive(Debug, Clone)]
pub struct EditCondition {
    pub field: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EditResult {
    pub field: String,
    pub value: String,
}

/// Configuration-declared rewrite applied before or after standard
/// resolution. Rules are the extensibility mechanism for constructs the
/// generic type-driven path cannot express.
#[derive(Debug, Clone)]
pub struct ScriptEdit {
    pub name: String,
    pub phase: EditPhase,
    pub conditions: Vec<EditCondition>,
    pub results: Vec<EditResult>,
}

impl ScriptEdit {
    pub fn matches(&self, code: &ScriptCode) -> bool {
        if self.name != code.name {
            return false;
        }
        self.conditions.iter().all(|condition| {
            match code.field(&condition.field) {
                Some(value) => {
                    condition.values.is_empty()
                        || condition.values.iter().any(|allowed| allowed == value)
                }
                None => false,
            }
        })
    }

    pub fn apply(&self, code: &mut ScriptCode) {
        for result in &self.results {
            code.set_field(&result.field, &result.value);
        }
    }
}

/// Evaluates rules in declaration order against one construct; the first
/// matching rule's results are applied and the rest are skipped. Returns the
/// applied rule's name.
pub fn apply_edits<'a>(edits: &'a [ScriptEdit], code: &mut ScriptCode) -> Option<&'a str> {
    for edit in edits {
        if edit.matches(code) {
            trace!("edit rule fired: {}", edit.name);
            edit.apply(code);
            return Some(edit.name.as_str());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, conditions: Vec<EditCondition>, results: Vec<EditResult>) -> ScriptEdit {
        ScriptEdit {
            name: name.to_string(),
            phase: EditPhase::Before,
            conditions,
            results,
        }
    }

    fn condition(field: &str, values: &[&str]) -> EditCondition {
        EditCondition {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn result(field: &str, value: &str) -> EditResult {
        EditResult {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_name_must_match() {
        let edits = vec![rule("Jump", vec![], vec![result("Name", "Leap")])];
        let mut code = ScriptCode::call("Walk", vec![]);
        assert!(apply_edits(&edits, &mut code).is_none());
        assert_eq!(code.name, "Walk");
    }

    #[test]
    fn test_condition_values() {
        let edits = vec![rule(
            "Jump",
            vec![condition("Argument:0", &["1", "2"])],
            vec![result("Argument:0", "MATCHED")],
        )];

        let mut code = ScriptCode::call("Jump", vec!["2".to_string()]);
        assert!(apply_edits(&edits, &mut code).is_some());
        assert_eq!(code.arguments[0], "MATCHED");

        let mut code = ScriptCode::call("Jump", vec!["3".to_string()]);
        assert!(apply_edits(&edits, &mut code).is_none());
    }

    #[test]
    fn test_wildcard_condition() {
        let edits = vec![rule(
            "Jump",
            vec![condition("Argument:0", &[])],
            vec![result("Name", "Leap")],
        )];
        let mut code = ScriptCode::call("Jump", vec!["anything".to_string()]);
        assert!(apply_edits(&edits, &mut code).is_some());
        assert_eq!(code.name, "Leap");
    }

    #[test]
    fn test_missing_field_fails_condition() {
        let edits = vec![rule(
            "Jump",
            vec![condition("Argument:2", &[])],
            vec![result("Name", "Leap")],
        )];
        let mut code = ScriptCode::call("Jump", vec!["1".to_string()]);
        assert!(apply_edits(&edits, &mut code).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let edits = vec![
            rule("Jump", vec![], vec![result("Argument:0", "FIRST")]),
            rule("Jump", vec![], vec![result("Argument:0", "SECOND")]),
        ];
        let mut code = ScriptCode::call("Jump", vec!["0".to_string()]);
        assert_eq!(apply_edits(&edits, &mut code), Some("Jump"));
        assert_eq!(code.arguments[0], "FIRST");
    }

    #[test]
    fn test_results_overwrite_multiple_fields() {
        let edits = vec![rule(
            "mode",
            vec![condition("Operator", &["equal"])],
            vec![result("Operator", "unequal"), result("OperatorArgument", "MODE_ON")],
        )];
        let mut code = ScriptCode::variable("mode").with_operator("equal", "1");
        assert!(apply_edits(&edits, &mut code).is_some());
        assert_eq!(code.operator, "unequal");
        assert_eq!(code.operator_argument, "MODE_ON");
    }
}
