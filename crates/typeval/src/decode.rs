//! Auto-typing decoder for raw tokens and `key=value;` records
//!
//! Monitoring probes report node state as free-form text such as
//! `ncpus=4;physmem=3922492kb;queues=["q1","q2"];state=free;`. This
//! module turns that text into typed [`Value`]s without any schema:
//! each raw token is tried as a number (with an optional binary-unit
//! suffix), then as a bracketed list, then as a boolean, and finally
//! falls back to a string.

use indexmap::IndexMap;

use crate::error::{EvalError, Result};
use crate::value::{Number, Value};

/// Binary-unit multiplier for a two-letter suffix, if it is one.
pub(crate) fn unit_multiplier(suffix: &str) -> Option<i64> {
    match suffix.to_ascii_lowercase().as_str() {
        "kb" => Some(1 << 10),
        "mb" => Some(1 << 20),
        "gb" => Some(1 << 30),
        "tb" => Some(1 << 40),
        "pb" => Some(1 << 50),
        _ => None,
    }
}

/// Try a raw token as a numeric literal, honoring a trailing
/// binary-unit suffix (`kb`..`pb`, case-insensitive).
fn parse_number(token: &str) -> Option<Number> {
    let t = token.trim();
    let (base, multiplier) = if t.len() > 2 {
        let (head, tail) = t.split_at(t.len() - 2);
        match unit_multiplier(tail) {
            Some(m) => (head, m),
            None => (t, 1),
        }
    } else {
        (t, 1)
    };

    // Prefer the exact integer representation; values beyond i64 or
    // with a fraction/exponent go through the float path and are
    // re-normalized there.
    let n = match base.parse::<i64>() {
        Ok(i) => Number::Int(i),
        Err(_) => Number::from_f64(base.parse::<f64>().ok()?),
    };
    Some(n.scale(multiplier))
}

/// Split the interior of a list literal on commas that are outside
/// double quotes and outside nested brackets.
fn split_list_items(interior: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let bytes = interior.as_bytes();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quotes => i += 1, // skip the escaped character
            b'"' => in_quotes = !in_quotes,
            b'[' if !in_quotes => depth += 1,
            b']' if !in_quotes => depth = depth.saturating_sub(1),
            b',' if !in_quotes && depth == 0 => {
                items.push(&interior[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    items.push(&interior[start..]);
    items
}

/// Remove surrounding double quotes and resolve `\"` and `\\` escapes.
fn unquote(quoted_text: &str) -> String {
    let interior = &quoted_text[1..quoted_text.len() - 1];
    let mut out = String::with_capacity(interior.len());
    let mut chars = interior.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decode a single raw token into a typed [`Value`].
///
/// Rules are tried in order, first match wins: numeric literal (with
/// optional `kb|mb|gb|tb|pb` suffix multiplying by 1024^1..5), bracketed
/// list literal (elements decoded recursively), case-insensitive
/// boolean, else string. A token wrapped in double quotes is always a
/// string with the quotes stripped.
///
/// # Example
///
/// ```
/// use typeval::{decode_value, Value};
///
/// assert_eq!(decode_value("4kb"), Value::int(4096));
/// assert_eq!(
///     decode_value("[1,\"a,b\"]"),
///     Value::list(vec![Value::int(1), Value::string("a,b")])
/// );
/// ```
pub fn decode_value(token: &str) -> Value {
    if let Some(n) = parse_number(token) {
        return Value::Num(n);
    }

    let t = token.trim();
    if t.len() >= 2 && t.starts_with('[') && t.ends_with(']') {
        let interior = &t[1..t.len() - 1];
        if interior.trim().is_empty() {
            return Value::empty_list();
        }
        let items = split_list_items(interior)
            .into_iter()
            .map(decode_value)
            .collect();
        return Value::list(items);
    }

    if t.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if t.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        return Value::string(unquote(t));
    }
    Value::string(token)
}

/// Decode a flat `key=value;key=value;...` record into a mapping of
/// identifiers to typed values.
///
/// A value is either a double-quoted string or any run of characters up
/// to the next unquoted `;`; each captured value goes through
/// [`decode_value`]. An empty value (`key=;`) decodes as the empty
/// string. Text that does not fit the `key=value;` structure is a
/// [`EvalError::MalformedRecord`].
pub fn decode_record(text: &str) -> Result<IndexMap<String, Value>> {
    let s = text.trim().trim_matches(';');
    let bytes = s.as_bytes();
    let mut vars = IndexMap::new();
    let mut i = 0;

    while i < bytes.len() {
        // key: a letter followed by letters, digits or underscores
        let key_start = i;
        if !bytes[i].is_ascii_alphabetic() {
            return Err(EvalError::MalformedRecord {
                rest: s[i..].to_string(),
            });
        }
        i += 1;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        let key = &s[key_start..i];

        if i >= bytes.len() || bytes[i] != b'=' {
            return Err(EvalError::MalformedRecord {
                rest: s[key_start..].to_string(),
            });
        }
        i += 1;

        // value: quoted strings and plain runs up to the next unquoted ';'
        let value_start = i;
        while i < bytes.len() && bytes[i] != b';' {
            if bytes[i] == b'"' {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        i += 1;
                    }
                    i += 1;
                }
                if i < bytes.len() {
                    i += 1; // closing quote
                }
            } else {
                i += 1;
            }
        }
        vars.insert(key.to_string(), decode_value(&s[value_start..i]));
        if i < bytes.len() {
            i += 1; // the separating ';'
        }
    }

    Ok(vars)
}

/// Encode a variable mapping back into `key=value;` record text.
///
/// String values are rendered quoted so the record decodes back to the
/// same values; an `Unknown` renders as an empty value (`key=;`), which
/// decodes as an empty string.
pub fn encode_record(vars: &IndexMap<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(key);
        out.push('=');
        out.push_str(&value.to_string());
        out.push(';');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_multipliers() {
        assert_eq!(unit_multiplier("kb"), Some(1024));
        assert_eq!(unit_multiplier("Mb"), Some(1024 * 1024));
        assert_eq!(unit_multiplier("PB"), Some(1i64 << 50));
        assert_eq!(unit_multiplier("xb"), None);
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(split_list_items(r#"1,"a,b",2"#), vec!["1", r#""a,b""#, "2"]);
    }

    #[test]
    fn test_split_respects_nested_brackets() {
        assert_eq!(split_list_items("[1,2],[3]"), vec!["[1,2]", "[3]"]);
    }

    #[test]
    fn test_parse_number_suffix() {
        assert_eq!(parse_number("4kb"), Some(Number::Int(4096)));
        assert_eq!(parse_number("1.5kb"), Some(Number::Int(1536)));
        assert_eq!(parse_number("2e3"), Some(Number::Int(2000)));
        assert_eq!(parse_number("akb"), None);
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote(r#""a\"b""#), "a\"b");
        assert_eq!(unquote(r#""a\\b""#), "a\\b");
    }
}
