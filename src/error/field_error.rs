//! Single field errors and the closed error taxonomy.
//!
//! This module provides [`ErrorType`] and [`FieldError`], together with one
//! constructor per taxonomy member.

use std::fmt::{self, Display};

use serde_json::Value;

use super::value_repr::repr;
use crate::path::Path;

/// The kind of a field error.
///
/// The taxonomy is closed: every [`FieldError`] carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The value is syntactically or semantically wrong.
    Invalid,
    /// The value is not one of a fixed set of supported values.
    NotSupported,
    /// The value duplicates another one that must be unique.
    Duplicate,
    /// The value refers to something that does not exist.
    NotFound,
    /// A required value is missing.
    Required,
    /// Validation itself failed, independent of the input.
    Internal,
}

impl ErrorType {
    /// Every member of the taxonomy, in declaration order.
    pub const ALL: [ErrorType; 6] = [
        ErrorType::Invalid,
        ErrorType::NotSupported,
        ErrorType::Duplicate,
        ErrorType::NotFound,
        ErrorType::Required,
        ErrorType::Internal,
    ];

    /// Returns the human-readable label used when rendering messages.
    pub fn label(self) -> &'static str {
        match self {
            ErrorType::Invalid => "Invalid value",
            ErrorType::NotSupported => "Unsupported value",
            ErrorType::Duplicate => "Duplicate value",
            ErrorType::NotFound => "Not found",
            ErrorType::Required => "Required value",
            ErrorType::Internal => "Internal error",
        }
    }

    fn shows_value(self) -> bool {
        match self {
            ErrorType::Required | ErrorType::Internal => false,
            ErrorType::Invalid
            | ErrorType::NotSupported
            | ErrorType::Duplicate
            | ErrorType::NotFound => true,
        }
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single validation error at a specific location.
///
/// - **error_type**: which member of the taxonomy this is
/// - **field**: where in the data structure the error occurred
/// - **bad_value**: the offending value (`Value::Null` when absent)
/// - **detail**: free-form explanation
///
/// # Example
///
/// ```rust
/// use fieldcheck::{ErrorType, FieldError, Path};
///
/// let error = FieldError::invalid(Path::new("foo"), "bar", "deet");
///
/// assert_eq!(error.error_type, ErrorType::Invalid);
/// assert_eq!(error.to_string(), r#"foo: Invalid value: "bar": deet"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The kind of error.
    pub error_type: ErrorType,
    /// The path to the value that failed validation.
    pub field: Path,
    /// The value that failed validation.
    pub bad_value: Value,
    /// Additional human-readable detail, possibly empty.
    pub detail: String,
}

impl FieldError {
    fn new(error_type: ErrorType, field: Path, bad_value: Value, detail: String) -> Self {
        Self {
            error_type,
            field,
            bad_value,
            detail,
        }
    }

    /// The value is invalid; `detail` says why.
    pub fn invalid(field: Path, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Invalid, field, value.into(), detail.into())
    }

    /// The value is not supported.
    ///
    /// When `valid_values` is given, the detail lists them, each quoted.
    ///
    /// ```rust
    /// use fieldcheck::{FieldError, Path};
    ///
    /// let error = FieldError::not_supported(Path::new("f"), "v", Some(&["a", "b", "c"]));
    /// assert_eq!(
    ///     error.error_body(),
    ///     r#"Unsupported value: "v": supported values: "a", "b", "c""#
    /// );
    /// ```
    pub fn not_supported<S: AsRef<str>>(
        field: Path,
        value: impl Into<Value>,
        valid_values: Option<&[S]>,
    ) -> Self {
        let detail = match valid_values {
            Some(values) => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("{:?}", v.as_ref()))
                    .collect();
                format!("supported values: {}", quoted.join(", "))
            }
            None => String::new(),
        };
        Self::new(ErrorType::NotSupported, field, value.into(), detail)
    }

    /// The value duplicates another one.
    pub fn duplicate(field: Path, value: impl Into<Value>) -> Self {
        Self::new(ErrorType::Duplicate, field, value.into(), String::new())
    }

    /// The value refers to something that was not found.
    pub fn not_found(field: Path, value: impl Into<Value>) -> Self {
        Self::new(ErrorType::NotFound, field, value.into(), String::new())
    }

    /// A required value is missing.
    pub fn required(field: Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Required, field, Value::Null, detail.into())
    }

    /// Validation failed for a reason unrelated to the input.
    pub fn internal(field: Path, cause: &dyn std::error::Error) -> Self {
        Self::new(ErrorType::Internal, field, Value::Null, cause.to_string())
    }

    /// Renders the message without the field prefix.
    pub fn error_body(&self) -> String {
        let mut body = if self.error_type.shows_value() {
            format!("{}: {}", self.error_type, repr(&self.bad_value))
        } else {
            self.error_type.label().to_string()
        };
        if !self.detail.is_empty() {
            body.push_str(": ");
            body.push_str(&self.detail);
        }
        body
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error_body())
    }
}

impl std::error::Error for FieldError {}

// FieldError crosses thread boundaries inside ErrorList and Aggregate.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};
