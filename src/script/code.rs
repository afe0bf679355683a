// Mon Aug 24 2026

use crate::operators::OperatorTable;

/// One construct parsed out of a source line: a bare variable compared
/// against a literal, or a function call with an optional trailing
/// comparison. `full` is the exact span the construct occupies in the line
/// and `offset` its byte position, so replacement is plain substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCode {
    pub function: bool,
    pub name: String,
    pub arguments: Vec<String>,
    /// Canonical operator name, or empty when no comparison trails the
    /// construct.
    pub operator: String,
    pub operator_argument: String,
    pub full: String,
    pub offset: usize,
}

impl ScriptCode {
    pub fn variable(name: &str) -> Self {
        Self {
            function: false,
            name: name.to_string(),
            arguments: Vec::new(),
            operator: String::new(),
            operator_argument: String::new(),
            full: String::new(),
            offset: 0,
        }
    }

    pub fn call(name: &str, arguments: Vec<String>) -> Self {
        Self {
            function: true,
            name: name.to_string(),
            arguments,
            operator: String::new(),
            operator_argument: String::new(),
            full: String::new(),
            offset: 0,
        }
    }

    pub fn with_operator(mut self, operator: &str, argument: &str) -> Self {
        self.operator = operator.to_string();
        self.operator_argument = argument.to_string();
        self
    }

    pub fn has_operator(&self) -> bool {
        !self.operator.is_empty()
    }

    /// Rebuilds `full` from the fields, canonical spacing. Used after rule
    /// application or resolution has mutated the construct.
    pub fn rebuild_full(&self, operators: &OperatorTable) -> String {
        let mut out = self.name.clone();

        if self.function {
            out.push('(');
            out.push_str(&self.arguments.join(", "));
            out.push(')');
        }

        if self.has_operator() {
            let symbol = operators.symbol(&self.operator).unwrap_or(self.operator.as_str());
            out.push(' ');
            out.push_str(symbol);
            out.push(' ');
            out.push_str(&self.operator_argument);
        }

        out
    }

    /// Field access by the identifiers edit rules use: `Name`, `Operator`,
    /// `OperatorArgument`, `Argument:<index>`.
    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "Name" => Some(self.name.as_str()),
            "Operator" => Some(self.operator.as_str()),
            "OperatorArgument" => Some(self.operator_argument.as_str()),
            _ => {
                let index = field.strip_prefix("Argument:")?.parse::<usize>().ok()?;
                self.arguments.get(index).map(|arg| arg.as_str())
            }
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "Name" => self.name = value.to_string(),
            "Operator" => self.operator = value.to_string(),
            "OperatorArgument" => self.operator_argument = value.to_string(),
            _ => {
                let Some(index) = field
                    .strip_prefix("Argument:")
                    .and_then(|i| i.parse::<usize>().ok())
                else {
                    return false;
                };
                match self.arguments.get_mut(index) {
                    Some(slot) => *slot = value.to_string(),
                    None => return false,
                }
            }
        }
        true
    }
}
