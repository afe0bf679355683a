// Mon Aug 24 2026

pub struct TextUtils;

impl TextUtils {
    pub fn trimmed(s: &str) -> &str {
        s.trim()
    }

    /// Collapses every whitespace run into a single space and trims the ends.
    pub fn packed(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn split(s: &str, separator: char) -> Vec<String> {
        s.split(separator).map(|part| part.trim().to_string()).collect()
    }

    pub fn joined(parts: &[String], delimiter: &str) -> String {
        parts.join(delimiter)
    }

    pub fn lower(s: &str) -> String {
        s.to_lowercase()
    }

    pub fn is_comment(s: &str) -> bool {
        let t = s.trim_start();
        t.starts_with("//") || t.starts_with("/*")
    }

    pub fn is_int(s: &str) -> bool {
        Self::parse_int(s).is_some()
    }

    /// Parses a decimal or `0x` hexadecimal integer, with an optional
    /// leading minus. Anything else is None.
    pub fn parse_int(s: &str) -> Option<i64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).ok()?
        } else {
            body.parse::<i64>().ok()?
        };

        Some(if negative { -value } else { value })
    }

    /// Returns the portion of a line before any `//` comment, ignoring
    /// slashes inside double-quoted strings.
    pub fn code_portion(line: &str) -> &str {
        let bytes = line.as_bytes();
        let mut in_string = false;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'"' => in_string = !in_string,
                b'/' if !in_string && i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                    return &line[..i];
                }
                _ => {}
            }
            i += 1;
        }

        line
    }
}
