//! Rule registry for named predicate storage.
//!
//! This module provides the [`RuleRegistry`] that maps rule names used in tags
//! to predicates. A registry is filled while a validator is being built and is
//! read-only afterwards.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{builtin, FieldLevel, RuleError};

/// Type alias for a rule predicate.
pub type Predicate = Arc<dyn Fn(&FieldLevel<'_>) -> bool + Send + Sync>;

/// What a rule accepts as its `=param` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// The rule takes no parameter.
    None,
    /// The parameter may be given or omitted.
    Optional,
    /// A parameter must be given.
    Required,
    /// A numeric parameter must be given.
    Number,
}

/// A named predicate and its parameter contract.
#[derive(Clone)]
pub struct Rule {
    predicate: Predicate,
    param: ParamKind,
}

impl Rule {
    /// Creates a rule that accepts an optional parameter.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            param: ParamKind::Optional,
        }
    }

    /// Sets the parameter contract.
    pub fn with_param(mut self, param: ParamKind) -> Self {
        self.param = param;
        self
    }

    /// Returns the parameter contract.
    pub fn param_kind(&self) -> ParamKind {
        self.param
    }

    /// Runs the predicate.
    pub fn test(&self, field: &FieldLevel<'_>) -> bool {
        (self.predicate)(field)
    }

    pub(crate) fn check_param(&self, rule: &str, param: Option<&str>) -> Result<(), RuleError> {
        let invalid = |reason: &str| RuleError::InvalidParam {
            rule: rule.to_string(),
            param: param.unwrap_or_default().to_string(),
            reason: reason.to_string(),
        };
        match (self.param, param) {
            (ParamKind::None, Some(_)) => Err(invalid("rule takes no parameter")),
            (ParamKind::Required | ParamKind::Number, None) => {
                Err(invalid("rule requires a parameter"))
            }
            (ParamKind::Number, Some(p)) if !p.parse::<f64>().is_ok_and(f64::is_finite) => {
                Err(invalid("parameter must be a finite number"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("param", &self.param).finish_non_exhaustive()
    }
}

/// A registry of named rules.
///
/// # Example
///
/// ```rust
/// use fieldcheck::rules::{Rule, RuleRegistry};
///
/// let mut registry = RuleRegistry::with_builtins();
/// registry
///     .register("even", Rule::new(|fl| fl.value().as_i64().is_some_and(|n| n % 2 == 0)))
///     .unwrap();
///
/// assert!(registry.contains("required"));
/// assert!(registry.contains("even"));
/// // Duplicate registration fails
/// assert!(registry.register("even", Rule::new(|_| true)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Rule>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, rule) in builtin::rules() {
            registry.insert(name, rule);
        }
        registry
    }

    /// Inserts a rule whose name is known to be valid and free.
    pub(crate) fn insert(&mut self, name: &str, rule: Rule) {
        self.rules.insert(name.to_string(), rule);
    }

    /// Registers a rule under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::DuplicateRule` if the name is taken and
    /// `RuleError::InvalidRuleName` if the name is empty, reserved or contains
    /// tag syntax.
    pub fn register(&mut self, name: impl Into<String>, rule: Rule) -> Result<(), RuleError> {
        let name = name.into();
        if name.is_empty()
            || name == super::tag::OMIT_EMPTY
            || name.contains([',', '|', '=', ' '])
        {
            return Err(RuleError::InvalidRuleName(name));
        }
        if self.rules.contains_key(&name) {
            return Err(RuleError::DuplicateRule(name));
        }
        self.rules.insert(name, rule);
        Ok(())
    }

    /// Retrieves a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns true if a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
