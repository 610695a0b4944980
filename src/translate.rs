//! Translation of rule failures into human-readable messages.
//!
//! A [`Translate`] implementation turns a [`RuleFailure`] into a sentence.
//! [`Translator`] is the template-based default: templates are registered per
//! rule tag, optionally specialized by the kind of the failing value, and may
//! use the placeholders `{field}`, `{value}` and `{param}`.

use indexmap::IndexMap;

use crate::rules::ValueKind;

/// Everything known about one failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// The failing tag, e.g. `min` or `hostname|ip`.
    pub tag: String,
    /// The human-facing field name, e.g. `port`.
    pub field: String,
    /// The full path of the field, e.g. `servers[0].port`.
    pub namespace: String,
    /// The failing value as text.
    pub value: String,
    /// The rule parameter, empty when none was given.
    pub param: String,
    /// The kind of the failing value.
    pub kind: ValueKind,
}

impl RuleFailure {
    /// The message used when no translation exists.
    pub fn fallback_message(&self) -> String {
        format!(
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.namespace, self.field, self.tag
        )
    }
}

/// Turns rule failures into messages.
///
/// Returning `None` means "no translation"; the caller then uses
/// [`RuleFailure::fallback_message`]. Any `Fn(&RuleFailure) -> Option<String>`
/// is a `Translate`.
pub trait Translate: Send + Sync {
    /// Translates one failure.
    fn translate(&self, failure: &RuleFailure) -> Option<String>;
}

impl<F> Translate for F
where
    F: Fn(&RuleFailure) -> Option<String> + Send + Sync,
{
    fn translate(&self, failure: &RuleFailure) -> Option<String> {
        self(failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TemplateKey {
    tag: String,
    kind: Option<ValueKind>,
}

/// Template-based translator.
///
/// # Example
///
/// ```rust
/// use fieldcheck::rules::ValueKind;
/// use fieldcheck::translate::{RuleFailure, Translate, Translator};
///
/// let translator = Translator::english();
/// let failure = RuleFailure {
///     tag: "min".to_string(),
///     field: "port".to_string(),
///     namespace: "server.port".to_string(),
///     value: "0".to_string(),
///     param: "1".to_string(),
///     kind: ValueKind::Number,
/// };
/// assert_eq!(
///     translator.translate(&failure).as_deref(),
///     Some("port must be 1 or greater")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    templates: IndexMap<TemplateKey, String>,
}

impl Translator {
    /// Creates a translator with no templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a translator with the English templates for the built-in rules.
    pub fn english() -> Self {
        use ValueKind::{Array, Number, Object, String as Str};

        let mut translator = Self::new();
        translator.add("required", "{field} is a required field");

        translator.add("min", "{field} must be {param} or greater");
        translator.add_for_kind("min", Str, "{field} must be at least {param} characters in length");
        translator.add_for_kind("min", Array, "{field} must contain at least {param} items");
        translator.add_for_kind("min", Object, "{field} must contain at least {param} items");

        translator.add("max", "{field} must be {param} or less");
        translator.add_for_kind("max", Str, "{field} must be a maximum of {param} characters in length");
        translator.add_for_kind("max", Array, "{field} must contain at maximum {param} items");
        translator.add_for_kind("max", Object, "{field} must contain at maximum {param} items");

        translator.add("len", "{field} must be {param} characters in length");
        translator.add_for_kind("len", Number, "{field} must be equal to {param}");
        translator.add_for_kind("len", Array, "{field} must contain {param} items");
        translator.add_for_kind("len", Object, "{field} must contain {param} items");

        translator.add("eq", "{field} is not equal to {param}");
        translator.add("ne", "{field} should not be equal to {param}");
        translator.add("oneof", "{field} must be one of [{param}]");
        translator.add("hostname", "{field} must be a valid hostname");
        translator.add("ip", "{field} must be a valid IP address");
        translator.add("ipv4", "{field} must be a valid IPv4 address");
        translator.add("ipv6", "{field} must be a valid IPv6 address");
        translator
    }

    /// Adds or replaces the template for `tag`.
    pub fn add(&mut self, tag: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(
            TemplateKey {
                tag: tag.into(),
                kind: None,
            },
            template.into(),
        );
    }

    /// Adds or replaces the template for `tag` when the value is of `kind`.
    pub fn add_for_kind(
        &mut self,
        tag: impl Into<String>,
        kind: ValueKind,
        template: impl Into<String>,
    ) {
        self.templates.insert(
            TemplateKey {
                tag: tag.into(),
                kind: Some(kind),
            },
            template.into(),
        );
    }

    /// Returns true if a template exists for `tag`, for any kind.
    pub fn has(&self, tag: &str) -> bool {
        self.templates.keys().any(|key| key.tag == tag)
    }

    fn template(&self, tag: &str, kind: ValueKind) -> Option<&str> {
        let specific = TemplateKey {
            tag: tag.to_string(),
            kind: Some(kind),
        };
        let general = TemplateKey {
            tag: tag.to_string(),
            kind: None,
        };
        self.templates
            .get(&specific)
            .or_else(|| self.templates.get(&general))
            .map(String::as_str)
    }
}

impl Translate for Translator {
    fn translate(&self, failure: &RuleFailure) -> Option<String> {
        self.template(&failure.tag, failure.kind)
            .map(|template| render(template, failure))
    }
}

/// Substitutes placeholders in a single pass, so substituted text is never
/// re-scanned.
fn render(template: &str, failure: &RuleFailure) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        let replacement = [
            ("{field}", failure.field.as_str()),
            ("{value}", failure.value.as_str()),
            ("{param}", failure.param.as_str()),
        ]
        .into_iter()
        .find(|(placeholder, _)| after.starts_with(placeholder));
        match replacement {
            Some((placeholder, text)) => {
                out.push_str(text);
                rest = &after[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
