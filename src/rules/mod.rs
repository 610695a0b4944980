//! Declarative rule evaluation.
//!
//! Rules are named predicates over JSON values, looked up in a
//! [`RuleRegistry`]. Callers attach rules to fields with a tag string such as
//! `required,min=1,max=65535` and address fields with a [`Selector`] such as
//! `servers[*].port`.
//!
//! # Tag grammar
//!
//! - rules are separated by `,` and evaluated left to right; evaluation stops
//!   at the first failing rule
//! - a rule is `name` or `name=param`
//! - `a|b` passes when any alternative passes
//! - `omitempty` stops evaluation when the value is empty
//!
//! A value is empty when it is missing, `null`, `""`, `0`, `false`, `[]` or
//! `{}`.

mod builtin;
mod registry;
mod selector;
mod tag;

use std::fmt::{self, Display};

use serde_json::Value;

use crate::path::Path;

pub use registry::{ParamKind, Predicate, Rule, RuleRegistry};
pub use selector::{Selector, SelectorPart};
pub use tag::{RuleCall, RuleGroup, Step, TagChain};

/// The JSON kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns the lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if `value` is the zero value of its kind.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// The field a predicate is asked about.
#[derive(Debug, Clone, Copy)]
pub struct FieldLevel<'a> {
    value: &'a Value,
    path: &'a Path,
    param: &'a str,
}

impl<'a> FieldLevel<'a> {
    /// Creates a field level for `value` at `path`, with the rule parameter.
    pub fn new(value: &'a Value, path: &'a Path, param: &'a str) -> Self {
        Self { value, path, param }
    }

    /// The value under test; `null` when the field is missing.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Where the value sits in the target.
    pub fn path(&self) -> &'a Path {
        self.path
    }

    /// The rule parameter, empty when none was given.
    pub fn param(&self) -> &'a str {
        self.param
    }

    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    /// The kind of the value under test.
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self.value)
    }
}

/// Errors in rule registration, tags or selectors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A tag names a rule that is not registered.
    #[error("undefined validation rule '{rule}' in tag '{tag}'")]
    UnknownRule { rule: String, tag: String },

    /// A rule name is registered twice.
    #[error("rule '{0}' already registered")]
    DuplicateRule(String),

    /// A rule name contains tag syntax or is reserved.
    #[error("invalid rule name '{0}'")]
    InvalidRuleName(String),

    /// A rule parameter is missing, unexpected or malformed.
    #[error("invalid parameter '{param}' for rule '{rule}': {reason}")]
    InvalidParam {
        rule: String,
        param: String,
        reason: String,
    },

    /// A selector cannot be parsed.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A tag contains an empty rule.
    #[error("empty rule in tag '{0}'")]
    EmptyTag(String),
}
