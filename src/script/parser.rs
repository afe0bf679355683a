// Mon Aug 24 2026

use crate::operators::OperatorTable;
use crate::script::code::ScriptCode;
use crate::utils::TextUtils;
use regex::Regex;

/// Line-local construct extraction. Finds call-shaped constructs first, then
/// bare-variable comparisons outside the call spans; results are ordered
/// left-to-right and never overlap. Each construct's `full` is the exact
/// matched span, so write-back is plain substring replacement.
pub struct ConstructParser {
    variable_re: Regex,
    call_start_re: Regex,
    trailing_op_re: Regex,
    operators: OperatorTable,
}

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const VALUE: &str = r"-?(?:0[xX][0-9a-fA-F]+|[0-9]+)|[A-Za-z_][A-Za-z0-9_]*";

fn operator_alternation(operators: &OperatorTable) -> String {
    operators
        .symbols_longest_first()
        .iter()
        .map(|symbol| regex::escape(symbol))
        .collect::<Vec<_>>()
        .join("|")
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

impl ConstructParser {
    pub fn new(operators: &OperatorTable) -> Self {
        let ops = operator_alternation(operators);

        let variable_re = Regex::new(&format!(
            r"(?P<name>{IDENT})[ \t]*(?P<op>{ops})[ \t]*(?P<val>{VALUE})"
        ))
        .unwrap();

        // No whitespace before the paren: keyword forms like `if (...)`
        // are not calls.
        let call_start_re = Regex::new(&format!(r"(?P<name>{IDENT})\(")).unwrap();

        let trailing_op_re = Regex::new(&format!(
            r"^[ \t]*(?P<op>{ops})[ \t]*(?P<val>{VALUE})"
        ))
        .unwrap();

        Self {
            variable_re,
            call_start_re,
            trailing_op_re,
            operators: operators.clone(),
        }
    }

    pub fn parse_line(&self, line: &str) -> Vec<ScriptCode> {
        if TextUtils::is_comment(line) {
            return Vec::new();
        }

        let region = TextUtils::code_portion(line);
        let mut codes = self.extract_calls(region);

        let spans: Vec<(usize, usize)> = codes
            .iter()
            .map(|code| (code.offset, code.offset + code.full.len()))
            .collect();

        codes.extend(self.extract_variables(region, &spans));
        codes.sort_by_key(|code| code.offset);
        codes
    }

    fn extract_calls(&self, region: &str) -> Vec<ScriptCode> {
        let bytes = region.as_bytes();
        let mut codes: Vec<ScriptCode> = Vec::new();

        for caps in self.call_start_re.captures_iter(region) {
            let whole = caps.get(0).unwrap();
            let start = whole.start();

            if start > 0 && is_ident_char(bytes[start - 1]) {
                continue;
            }
            if codes
                .iter()
                .any(|code| start < code.offset + code.full.len() && whole.end() > code.offset)
            {
                continue;
            }

            let open = whole.end() - 1;
            let Some(close) = matching_paren(region, open) else { continue };

            let name = caps["name"].to_string();
            let arguments = split_arguments(&region[open + 1..close]);
            let mut end = close + 1;

            let mut code = ScriptCode::call(&name, arguments);

            if let Some(op_caps) = self.trailing_op_re.captures(&region[end..]) {
                let op_match = op_caps.get(0).unwrap();
                let after = end + op_match.end();
                // a following `(` means the comparison is against a call,
                // not a literal
                if after >= region.len() || (!is_ident_char(bytes[after]) && bytes[after] != b'(') {
                    let op_name = self.operators.name(&op_caps["op"]).unwrap().to_string();
                    code = code.with_operator(&op_name, &op_caps["val"]);
                    end = after;
                }
            }

            code.offset = start;
            code.full = region[start..end].to_string();
            codes.push(code);
        }

        codes
    }

    fn extract_variables(&self, region: &str, call_spans: &[(usize, usize)]) -> Vec<ScriptCode> {
        let bytes = region.as_bytes();
        let mut codes = Vec::new();

        for caps in self.variable_re.captures_iter(region) {
            let whole = caps.get(0).unwrap();
            let (start, end) = (whole.start(), whole.end());

            if start > 0 && is_ident_char(bytes[start - 1]) {
                continue;
            }
            if end < region.len() && (is_ident_char(bytes[end]) || bytes[end] == b'(') {
                continue;
            }
            if call_spans.iter().any(|&(s, e)| start < e && end > s) {
                continue;
            }

            let op_name = self.operators.name(&caps["op"]).unwrap().to_string();
            let mut code =
                ScriptCode::variable(&caps["name"]).with_operator(&op_name, &caps["val"]);
            code.offset = start;
            code.full = whole.as_str().to_string();
            codes.push(code);
        }

        codes
    }
}

/// Index of the parenthesis closing the one at `open`, honoring nesting and
/// double-quoted strings. None when the line ends unbalanced.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string = false;

    for i in open..bytes.len() {
        match bytes[i] {
            b'"' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a call's argument text on top-level commas, trimming each piece.
fn split_arguments(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut piece_start = 0usize;
    let bytes = text.as_bytes();

    for i in 0..bytes.len() {
        match bytes[i] {
            b'"' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => depth -= 1,
            b',' if !in_string && depth == 0 => {
                arguments.push(text[piece_start..i].trim().to_string());
                piece_start = i + 1;
            }
            _ => {}
        }
    }
    arguments.push(text[piece_start..].trim().to_string());
    arguments
}
