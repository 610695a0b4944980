//! Bounded rendering of offending values.
//!
//! Error messages embed the value that failed validation. Values can be
//! arbitrarily large, so rendering is cut off by nesting depth, container size
//! and string length. Elided parts render as `...`.

use serde_json::Value;

/// Containers nested deeper than this render as `[...]` / `{...}`.
pub const MAX_DEPTH: usize = 4;
/// Members rendered per array or object.
pub const MAX_ITEMS: usize = 32;
/// Characters rendered per string.
pub const MAX_STRING_CHARS: usize = 256;

/// Renders a value for inclusion in an error message.
///
/// Strings are quoted and escaped, scalars are printed plainly and containers
/// are printed as compact JSON.
///
/// # Example
///
/// ```rust
/// use fieldcheck::error::value_repr::repr;
/// use serde_json::json;
///
/// assert_eq!(repr(&json!("bar")), r#""bar""#);
/// assert_eq!(repr(&json!(42)), "42");
/// assert_eq!(repr(&json!(null)), "null");
/// assert_eq!(repr(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
/// ```
pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => out.push_str(&value.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            if depth >= MAX_DEPTH {
                out.push_str("[...]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().take(MAX_ITEMS).enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, depth + 1);
            }
            if items.len() > MAX_ITEMS {
                out.push_str(",...");
            }
            out.push(']');
        }
        Value::Object(map) => {
            if depth >= MAX_DEPTH {
                out.push_str("{...}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in map.iter().take(MAX_ITEMS).enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item, depth + 1);
            }
            if map.len() > MAX_ITEMS {
                out.push_str(",...");
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    match s.char_indices().nth(MAX_STRING_CHARS) {
        Some((cut, _)) => {
            out.push_str(&Value::String(s[..cut].to_string()).to_string());
            out.push_str("...");
        }
        None => out.push_str(&Value::String(s.to_string()).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(repr(&json!(true)), "true");
        assert_eq!(repr(&json!(1.5)), "1.5");
        assert_eq!(repr(&json!(-7)), "-7");
    }

    #[test]
    fn test_string_is_escaped() {
        assert_eq!(repr(&json!("a\"b\n")), r#""a\"b\n""#);
    }

    #[test]
    fn test_long_string_is_truncated() {
        let long = "x".repeat(MAX_STRING_CHARS + 10);
        let rendered = repr(&json!(long));
        assert!(rendered.ends_with("\"..."));
        assert_eq!(rendered.len(), MAX_STRING_CHARS + 2 + 3);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "日".repeat(MAX_STRING_CHARS + 1);
        let rendered = repr(&json!(long));
        assert_eq!(rendered.chars().filter(|c| *c == '日').count(), MAX_STRING_CHARS);
    }

    #[test]
    fn test_nested_structure() {
        let value = json!({
            "Baz": 1,
            "Qux": "aoeu",
            "Inner": {"Qux": "asdf"},
            "KV": {"Billy": 2}
        });
        let rendered = repr(&value);
        for part in ["Baz", "Qux", "Inner", "KV", "1", "aoeu", "asdf", "Billy", "2"] {
            assert!(rendered.contains(part), "missing {part} in {rendered}");
        }
    }

    #[test]
    fn test_depth_bound() {
        let value = json!([[[[["deep"]]]]]);
        assert_eq!(repr(&value), "[[[[[...]]]]]");
    }

    #[test]
    fn test_item_bound() {
        let value = Value::Array((0..100).map(Value::from).collect());
        let rendered = repr(&value);
        assert!(rendered.ends_with(",...]"));
        assert!(!rendered.contains("99"));
    }
}
