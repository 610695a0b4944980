//! The validation engine.
//!
//! A [`Validator`] pairs a target value with [`FieldRules`] and reports every
//! failing field as an [`ErrorList`]. Targets are any `Serialize` value; they
//! are converted to JSON once, at construction.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::validator::{FieldRules, Validator};
//! use serde_json::json;
//!
//! let config = json!({"name": "", "port": 0});
//! let rules = FieldRules::new()
//!     .field("name", "required")
//!     .field("port", "required,min=1,max=65535");
//!
//! let validator = Validator::new(&config, rules).unwrap();
//! let errors = validator.validate();
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!(
//!     errors.as_slice()[0].to_string(),
//!     r#"name: Invalid value: "": name is a required field"#
//! );
//! ```

use std::fmt;
use std::fs;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{value_repr, ErrorList, FieldError};
use crate::format::is_qualified_name;
use crate::path::Path;
use crate::rules::{
    FieldLevel, ParamKind, Rule, RuleError, RuleRegistry, Selector, TagChain, ValueKind,
};
use crate::translate::{RuleFailure, Translate, Translator};

/// Maximum length, in characters, accepted by the `description` rule.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

static NULL: Value = Value::Null;

/// An ordered list of `(selector, tag)` pairs.
///
/// Fields are validated in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    entries: Vec<(String, String)>,
}

impl FieldRules {
    /// Creates an empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `tag` to the fields addressed by `selector`.
    pub fn field(mut self, selector: impl Into<String>, tag: impl Into<String>) -> Self {
        self.entries.push((selector.into(), tag.into()));
        self
    }

    /// Iterates over the `(selector, tag)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(selector, tag)| (selector.as_str(), tag.as_str()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pairs were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A type that declares its own validation rules.
///
/// # Example
///
/// ```rust
/// use fieldcheck::validator::{FieldRules, Tagged, Validator};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Tagged for Server {
///     fn field_rules() -> FieldRules {
///         FieldRules::new()
///             .field("host", "required,hostname|ip")
///             .field("port", "min=1")
///     }
/// }
///
/// let server = Server { host: "localhost".into(), port: 8080 };
/// assert!(Validator::from_tagged(&server).unwrap().validate().is_empty());
/// ```
pub trait Tagged: Serialize {
    /// The rules for values of this type.
    fn field_rules() -> FieldRules;
}

/// Builds a [`Validator`] with custom rules and translations.
///
/// # Example
///
/// ```rust
/// use fieldcheck::validator::{FieldRules, ValidatorBuilder};
/// use serde_json::json;
///
/// let validator = ValidatorBuilder::new()
///     .rule(
///         "even",
///         |fl| fl.value().as_i64().is_some_and(|n| n % 2 == 0),
///         "{field} must be even, got {value}",
///     )
///     .unwrap()
///     .build(&json!({"replicas": 3}), FieldRules::new().field("replicas", "even"))
///     .unwrap();
///
/// let errors = validator.validate();
/// assert_eq!(errors.as_slice()[0].detail, "replicas must be even, got 3");
/// ```
pub struct ValidatorBuilder {
    registry: RuleRegistry,
    translator: Translator,
    custom_translator: Option<Arc<dyn Translate>>,
}

impl ValidatorBuilder {
    /// Creates a builder with the built-in rules, the `dir`, `file`,
    /// `description` and `name` rules, and English translations.
    pub fn new() -> Self {
        let mut registry = RuleRegistry::with_builtins();
        let mut translator = Translator::english();
        for (name, rule, template) in custom_rules() {
            registry.insert(name, rule);
            translator.add(name, template);
        }
        Self {
            registry,
            translator,
            custom_translator: None,
        }
    }

    /// Registers a custom rule and its translation template.
    ///
    /// The template may use `{field}`, `{value}` and `{param}`.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::DuplicateRule` if `name` is taken and
    /// `RuleError::InvalidRuleName` if it is not a usable rule name.
    pub fn rule<F>(
        mut self,
        name: impl Into<String>,
        predicate: F,
        template: impl Into<String>,
    ) -> Result<Self, RuleError>
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        self.registry.register(name.clone(), Rule::new(predicate))?;
        self.translator.add(name, template);
        Ok(self)
    }

    /// Adds or replaces the translation template for `tag`.
    pub fn translation(mut self, tag: impl Into<String>, template: impl Into<String>) -> Self {
        self.translator.add(tag, template);
        self
    }

    /// Replaces the template translator.
    ///
    /// Templates registered with [`rule`](Self::rule) or
    /// [`translation`](Self::translation) are not consulted afterwards.
    pub fn translator(mut self, translator: impl Translate + 'static) -> Self {
        self.custom_translator = Some(Arc::new(translator));
        self
    }

    /// Freezes the builder into a validator for `data`.
    ///
    /// A target that cannot be serialized, or that does not serialize to an
    /// object, is kept as a diagnostic and reported by
    /// [`Validator::validate`].
    ///
    /// # Errors
    ///
    /// Returns a `RuleError` for a malformed selector, an unknown rule or a
    /// malformed rule parameter.
    pub fn build<T>(self, data: &T, rules: FieldRules) -> Result<Validator, RuleError>
    where
        T: Serialize + ?Sized,
    {
        let fields = rules
            .iter()
            .map(|(selector, tag)| {
                Ok(CompiledField {
                    selector: Selector::parse(selector)?,
                    chain: TagChain::compile(tag, &self.registry)?,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        let target = match serde_json::to_value(data) {
            Ok(value @ Value::Object(_)) => Target::Usable(value),
            Ok(other) => Target::Unusable(format!(
                "validation target must be a struct or map, found {}",
                ValueKind::of(&other)
            )),
            Err(err) => Target::Unusable(format!("validation target cannot be serialized: {err}")),
        };

        let translator = match self.custom_translator {
            Some(custom) => custom,
            None => Arc::new(self.translator),
        };

        Ok(Validator {
            target,
            fields,
            registry: Arc::new(self.registry),
            translator,
        })
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum Target {
    Usable(Value),
    Unusable(String),
}

#[derive(Debug)]
struct CompiledField {
    selector: Selector,
    chain: TagChain,
}

/// A frozen validator bound to one target.
///
/// `validate` borrows the validator immutably and can be called any number
/// of times, from any thread.
pub struct Validator {
    target: Target,
    fields: Vec<CompiledField>,
    registry: Arc<RuleRegistry>,
    translator: Arc<dyn Translate>,
}

impl Validator {
    /// Creates a validator with the default rules and translations.
    ///
    /// Equivalent to `ValidatorBuilder::new().build(data, rules)`.
    pub fn new<T>(data: &T, rules: FieldRules) -> Result<Self, RuleError>
    where
        T: Serialize + ?Sized,
    {
        ValidatorBuilder::new().build(data, rules)
    }

    /// Creates a validator using the rules declared by `T`.
    pub fn from_tagged<T: Tagged>(data: &T) -> Result<Self, RuleError> {
        Self::new(data, T::field_rules())
    }

    /// The rules available to tags.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates the target.
    ///
    /// Returns one `Invalid` error per failing field, in rule order, or a
    /// single root error if the target is not usable.
    pub fn validate(&self) -> ErrorList {
        let Some(root) = self.usable_target() else {
            return self.unusable_errors();
        };
        let resolved = self.resolve(root);
        debug!(fields = resolved.len(), "validating");
        let errors: ErrorList = resolved
            .iter()
            .filter_map(|(field, path, value)| self.check(field, path, value))
            .collect();
        debug!(failures = errors.len(), "validation finished");
        errors
    }

    /// Validates the target on the rayon thread pool.
    ///
    /// Produces the same errors in the same order as
    /// [`validate`](Self::validate).
    pub fn validate_parallel(&self) -> ErrorList {
        let Some(root) = self.usable_target() else {
            return self.unusable_errors();
        };
        let resolved = self.resolve(root);
        debug!(fields = resolved.len(), "validating in parallel");
        let errors: Vec<FieldError> = resolved
            .par_iter()
            .filter_map(|(field, path, value)| self.check(field, path, value))
            .collect();
        debug!(failures = errors.len(), "validation finished");
        ErrorList::from(errors)
    }

    fn usable_target(&self) -> Option<&Value> {
        match &self.target {
            Target::Usable(value) => Some(value),
            Target::Unusable(_) => None,
        }
    }

    fn unusable_errors(&self) -> ErrorList {
        let diagnostic = match &self.target {
            Target::Unusable(diagnostic) => diagnostic.as_str(),
            Target::Usable(_) => "",
        };
        warn!(%diagnostic, "validation target is unusable");
        ErrorList::from(vec![FieldError::invalid(
            Path::root(),
            Value::Null,
            diagnostic,
        )])
    }

    fn resolve<'a>(&'a self, root: &'a Value) -> Vec<(&'a CompiledField, Path, &'a Value)> {
        self.fields
            .iter()
            .flat_map(|field| {
                field
                    .selector
                    .resolve(root)
                    .into_iter()
                    .map(move |(path, value)| (field, path, value.unwrap_or(&NULL)))
            })
            .collect()
    }

    fn check(&self, field: &CompiledField, path: &Path, value: &Value) -> Option<FieldError> {
        let group = field.chain.first_failure(value, path)?;
        trace!(field = %path, tag = group.tag(), "rule failed");
        let failure = RuleFailure {
            tag: group.tag().to_string(),
            field: path.field_name(),
            namespace: path.to_string(),
            value: value_text(value),
            param: group.param().to_string(),
            kind: ValueKind::of(value),
        };
        let message = self
            .translator
            .translate(&failure)
            .unwrap_or_else(|| failure.fallback_message());
        Some(FieldError::invalid(path.clone(), value.clone(), message))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("target", &self.target)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};

/// Strings are used as-is, `null` is empty, anything else is rendered.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => value_repr::repr(other),
    }
}

fn custom_rules() -> [(&'static str, Rule, &'static str); 4] {
    [
        (
            "dir",
            Rule::new(is_dir).with_param(ParamKind::None),
            "{field} must point to an existing directory, but found '{value}'",
        ),
        (
            "file",
            Rule::new(is_file).with_param(ParamKind::None),
            "{field} must point to an existing file, but found '{value}'",
        ),
        (
            "description",
            Rule::new(is_description).with_param(ParamKind::None),
            "{field} must be no more than 255 characters",
        ),
        (
            "name",
            Rule::new(is_name).with_param(ParamKind::None),
            "{field} is not a valid qualified name",
        ),
    ]
}

fn is_dir(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .and_then(|s| fs::metadata(s).ok())
        .is_some_and(|meta| meta.is_dir())
}

fn is_file(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .and_then(|s| fs::metadata(s).ok())
        .is_some_and(|meta| !meta.is_dir())
}

fn is_description(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .is_some_and(|s| s.chars().count() <= MAX_DESCRIPTION_LENGTH)
}

fn is_name(fl: &FieldLevel<'_>) -> bool {
    fl.as_str().is_some_and(|s| is_qualified_name(s).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use serde_json::json;

    fn validate(data: Value, rules: FieldRules) -> ErrorList {
        Validator::new(&data, rules).unwrap().validate()
    }

    fn details(errors: &ErrorList) -> Vec<String> {
        errors.iter().map(|e| e.detail.clone()).collect()
    }

    #[test]
    fn test_valid_target_has_no_errors() {
        let errors = validate(
            json!({"name": "api", "port": 8080, "host": "10.0.0.1"}),
            FieldRules::new()
                .field("name", "required,name")
                .field("port", "required,min=1,max=65535")
                .field("host", "hostname|ip"),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_one_error_per_field() {
        let errors = validate(
            json!({"port": 0}),
            FieldRules::new().field("port", "required,min=1,max=65535"),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(details(&errors), vec!["port is a required field"]);
    }

    #[test]
    fn test_missing_field_is_null() {
        let errors = validate(json!({}), FieldRules::new().field("name", "required"));
        let error = &errors.as_slice()[0];
        assert_eq!(error.error_type, ErrorType::Invalid);
        assert_eq!(error.field.to_string(), "name");
        assert_eq!(error.bad_value, Value::Null);
        assert_eq!(error.to_string(), "name: Invalid value: null: name is a required field");
    }

    #[test]
    fn test_kind_specific_messages() {
        let errors = validate(
            json!({"name": "ab", "replicas": 0, "tags": []}),
            FieldRules::new()
                .field("name", "min=3")
                .field("replicas", "min=1")
                .field("tags", "min=1"),
        );
        assert_eq!(
            details(&errors),
            vec![
                "name must be at least 3 characters in length",
                "replicas must be 1 or greater",
                "tags must contain at least 1 items",
            ]
        );
    }

    #[test]
    fn test_nested_field_names() {
        let errors = validate(
            json!({"servers": [{"port": 80}, {"port": 0}]}),
            FieldRules::new().field("servers[*].port", "min=1"),
        );
        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert_eq!(error.field.to_string(), "servers[1].port");
        assert_eq!(error.detail, "port must be 1 or greater");
    }

    #[test]
    fn test_fallback_message_for_alternatives() {
        let errors = validate(
            json!({"host": "bad host!"}),
            FieldRules::new().field("host", "hostname|ip"),
        );
        assert_eq!(
            details(&errors),
            vec!["Key: 'host' Error:Field validation for 'host' failed on the 'hostname|ip' tag"]
        );
    }

    #[test]
    fn test_omitempty() {
        let rules = FieldRules::new().field("addr", "omitempty,ip");
        assert!(validate(json!({}), rules.clone()).is_empty());
        assert!(validate(json!({"addr": ""}), rules.clone()).is_empty());
        assert_eq!(validate(json!({"addr": "x"}), rules).len(), 1);
    }

    #[test]
    fn test_dir_and_file_rules() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cert.pem");
        fs::write(&file, "pem").unwrap();
        let dir_path = dir.path().to_str().unwrap();
        let file_path = file.to_str().unwrap();

        let rules = FieldRules::new().field("data", "dir").field("cert", "file");
        assert!(validate(json!({"data": dir_path, "cert": file_path}), rules.clone()).is_empty());

        let errors = validate(json!({"data": file_path, "cert": dir_path}), rules);
        assert_eq!(
            details(&errors),
            vec![
                format!("data must point to an existing directory, but found '{file_path}'"),
                format!("cert must point to an existing file, but found '{dir_path}'"),
            ]
        );
    }

    #[test]
    fn test_description_and_name_rules() {
        let rules = FieldRules::new()
            .field("description", "description")
            .field("name", "name");
        let long = "é".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(validate(json!({"description": long, "name": "example.com/app"}), rules.clone()).is_empty());

        let errors = validate(
            json!({"description": "x".repeat(256), "name": "a/b/c"}),
            rules,
        );
        assert_eq!(
            details(&errors),
            vec![
                "description must be no more than 255 characters",
                "name is not a valid qualified name",
            ]
        );
    }

    #[test]
    fn test_unusable_targets() {
        let rules = FieldRules::new().field("name", "required");
        let errors = Validator::new(&json!([1, 2]), rules.clone()).unwrap().validate();
        assert_eq!(errors.len(), 1);
        let error = &errors.as_slice()[0];
        assert!(error.field.is_root());
        assert_eq!(error.bad_value, Value::Null);
        assert_eq!(error.detail, "validation target must be a struct or map, found array");

        let errors = Validator::new("text", rules).unwrap().validate();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unserializable_target() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        let errors = Validator::new(&map, FieldRules::new()).unwrap().validate();
        assert_eq!(errors.len(), 1);
        assert!(errors.as_slice()[0]
            .detail
            .starts_with("validation target cannot be serialized"));
    }

    #[test]
    fn test_construction_errors() {
        let data = json!({});
        assert!(matches!(
            Validator::new(&data, FieldRules::new().field("a", "bogus")),
            Err(RuleError::UnknownRule { .. })
        ));
        assert!(matches!(
            Validator::new(&data, FieldRules::new().field("a[", "required")),
            Err(RuleError::InvalidSelector { .. })
        ));
        assert!(matches!(
            Validator::new(&data, FieldRules::new().field("a", "dir=/tmp")),
            Err(RuleError::InvalidParam { .. })
        ));
        assert!(matches!(
            ValidatorBuilder::new().rule("dir", |_| true, "{field}"),
            Err(RuleError::DuplicateRule(_))
        ));
    }

    #[test]
    fn test_custom_translator() {
        let validator = ValidatorBuilder::new()
            .translator(|f: &RuleFailure| (f.tag == "required").then(|| format!("{} fehlt", f.field)))
            .build(
                &json!({}),
                FieldRules::new().field("name", "required").field("port", "min=1"),
            )
            .unwrap();
        assert_eq!(
            details(&validator.validate()),
            vec![
                "name fehlt".to_string(),
                "Key: 'port' Error:Field validation for 'port' failed on the 'min' tag".to_string(),
            ]
        );
    }

    #[test]
    fn test_translation_override() {
        let validator = ValidatorBuilder::new()
            .translation("required", "{field} must be set")
            .build(&json!({}), FieldRules::new().field("name", "required"))
            .unwrap();
        assert_eq!(details(&validator.validate()), vec!["name must be set"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<Value> = (0..64).map(|i| json!({"n": i % 3})).collect();
        let validator = Validator::new(
            &json!({"items": items}),
            FieldRules::new().field("items[*].n", "min=1"),
        )
        .unwrap();
        let sequential = validator.validate();
        assert!(!sequential.is_empty());
        assert_eq!(sequential, validator.validate_parallel());
    }

    #[test]
    fn test_validate_is_repeatable() {
        let validator = Validator::new(&json!({}), FieldRules::new().field("a", "required")).unwrap();
        assert_eq!(validator.validate(), validator.validate());
    }
}
