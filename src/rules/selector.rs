//! Field selectors.
//!
//! A selector addresses one or more fields of a target value:
//!
//! - `name`: an object member
//! - `a.b`: nested members
//! - `items[2]`: one element of an array
//! - `items[*]`: every element of an array, or every value of an object
//!
//! Resolution never fails. A member or element that does not exist resolves
//! to a missing value; `[*]` over anything but an array or an object
//! resolves to nothing.

use std::fmt::{self, Display};

use serde_json::Value;

use super::RuleError;
use crate::path::Path;

/// One part of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    Field(String),
    Index(usize),
    Each,
}

/// A parsed field selector.
///
/// # Example
///
/// ```rust
/// use fieldcheck::rules::Selector;
/// use serde_json::json;
///
/// let selector = Selector::parse("servers[*].port").unwrap();
/// let target = json!({"servers": [{"port": 80}, {"port": 443}]});
///
/// let resolved: Vec<String> = selector
///     .resolve(&target)
///     .into_iter()
///     .map(|(path, _)| path.to_string())
///     .collect();
/// assert_eq!(resolved, vec!["servers[0].port", "servers[1].port"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    text: String,
    parts: Vec<SelectorPart>,
}

impl Selector {
    /// Parses a selector.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidSelector` for empty names, unbalanced
    /// brackets or bracket contents other than an index or `*`.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let invalid = |reason: &str| RuleError::InvalidSelector {
            selector: text.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        for (i, segment) in text.split('.').enumerate() {
            let (name, mut rest) = match segment.find('[') {
                Some(pos) => segment.split_at(pos),
                None => (segment, ""),
            };
            if name.is_empty() {
                return Err(invalid(if i == 0 {
                    "selector must start with a field name"
                } else {
                    "empty field name"
                }));
            }
            if name.contains(']') {
                return Err(invalid("unbalanced ']'"));
            }
            parts.push(SelectorPart::Field(name.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| invalid("unbalanced '['"))?;
                let inner = &rest[1..close];
                let part = match inner {
                    "*" => SelectorPart::Each,
                    digits => SelectorPart::Index(
                        digits
                            .parse()
                            .map_err(|_| invalid("brackets must hold an index or '*'"))?,
                    ),
                };
                parts.push(part);
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid("unexpected text after ']'"));
                }
            }
        }
        Ok(Self {
            text: text.to_string(),
            parts,
        })
    }

    /// The parts of this selector.
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// Resolves the selector against `root`.
    ///
    /// Returns every addressed path with its value, `None` where the value is
    /// missing, in document order.
    pub fn resolve<'v>(&self, root: &'v Value) -> Vec<(Path, Option<&'v Value>)> {
        let mut current = vec![(Path::root(), Some(root))];
        for part in &self.parts {
            current = match part {
                SelectorPart::Field(name) => current
                    .into_iter()
                    .map(|(path, value)| (path.child(name.as_str()), value.and_then(|v| v.get(name))))
                    .collect(),
                SelectorPart::Index(index) => current
                    .into_iter()
                    .map(|(path, value)| (path.index(*index), value.and_then(|v| v.get(*index))))
                    .collect(),
                SelectorPart::Each => current
                    .into_iter()
                    .flat_map(|(path, value)| expand(&path, value))
                    .collect(),
            };
        }
        current
    }
}

fn expand<'v>(path: &Path, value: Option<&'v Value>) -> Vec<(Path, Option<&'v Value>)> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (path.index(i), Some(item)))
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, item)| (path.key(key.as_str()), Some(item)))
            .collect(),
        _ => Vec::new(),
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
