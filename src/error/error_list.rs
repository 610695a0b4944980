//! Ordered error collections and their deduplicated aggregate view.
//!
//! [`ErrorList`] accumulates [`FieldError`]s in insertion order. Converting it
//! with [`ErrorList::to_aggregate`] yields an [`Aggregate`]: a non-empty,
//! message-deduplicated view suitable for reporting.

use std::fmt::{self, Display};

use indexmap::IndexSet;
use stillwater::prelude::*;
use stillwater::Validation;

use super::field_error::{ErrorType, FieldError};
use crate::path::Path;

/// A predicate over error types used by [`ErrorList::filter`].
pub trait Matcher {
    /// Returns true if errors of this type should be selected.
    fn matches(&self, error_type: ErrorType) -> bool;
}

/// Selects exactly one error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTypeMatcher(ErrorType);

impl ErrorTypeMatcher {
    /// Creates a matcher selecting errors of type `error_type`.
    pub fn new(error_type: ErrorType) -> Self {
        Self(error_type)
    }
}

impl Matcher for ErrorTypeMatcher {
    fn matches(&self, error_type: ErrorType) -> bool {
        self.0 == error_type
    }
}

impl<F> Matcher for F
where
    F: Fn(ErrorType) -> bool,
{
    fn matches(&self, error_type: ErrorType) -> bool {
        self(error_type)
    }
}

/// An ordered list of field errors.
///
/// Insertion order is significant and preserved by every operation.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{ErrorList, ErrorType, ErrorTypeMatcher, FieldError, Path};
///
/// let mut errors = ErrorList::new();
/// errors.push(FieldError::invalid(Path::new("name"), "", "must be non-empty"));
/// errors.push(FieldError::duplicate(Path::new("id"), 7));
///
/// let invalid_only = errors.filter(&[ErrorTypeMatcher::new(ErrorType::Duplicate)]);
/// assert_eq!(invalid_only.len(), 1);
///
/// let aggregate = errors.to_aggregate().unwrap();
/// assert_eq!(
///     aggregate.to_string(),
///     r#"[name: Invalid value: "": must be non-empty, id: Duplicate value: 7]"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns the errors as a slice.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &Path) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.field == path).collect()
    }

    /// Returns all errors of the specified type.
    pub fn of_type(&self, error_type: ErrorType) -> Vec<&FieldError> {
        self.0
            .iter()
            .filter(|e| e.error_type == error_type)
            .collect()
    }

    /// Returns a new list without the errors selected by any matcher.
    pub fn filter<M: Matcher>(&self, matchers: &[M]) -> ErrorList {
        self.0
            .iter()
            .filter(|e| !matchers.iter().any(|m| m.matches(e.error_type)))
            .cloned()
            .collect()
    }

    /// Returns the deduplicated aggregate, or None when the list is empty.
    ///
    /// Errors are deduplicated by their rendered message; the first
    /// occurrence wins.
    pub fn to_aggregate(&self) -> Option<Aggregate> {
        Aggregate::from_errors(self.0.iter().cloned())
    }

    /// Converts the list into a `Result`, failing with the aggregate.
    pub fn into_result(self) -> Result<(), Aggregate> {
        match self.to_aggregate() {
            Some(aggregate) => Err(aggregate),
            None => Ok(()),
        }
    }

    /// Converts the list into a `Validation` carrying `value` on success.
    pub fn into_validation<T>(self, value: T) -> Validation<T, Aggregate> {
        match self.to_aggregate() {
            Some(aggregate) => Validation::Failure(aggregate),
            None => Validation::Success(value),
        }
    }

    /// Converts this list into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl Semigroup for ErrorList {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A non-empty, message-deduplicated set of field errors.
///
/// `Display` prints a single message as-is and several messages as
/// `[first, second, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate(NonEmptyVec<FieldError>);

impl Aggregate {
    fn from_errors(errors: impl IntoIterator<Item = FieldError>) -> Option<Self> {
        let mut seen = IndexSet::new();
        let unique: Vec<FieldError> = errors
            .into_iter()
            .filter(|e| seen.insert(e.to_string()))
            .collect();
        NonEmptyVec::from_vec(unique).map(Self)
    }

    /// Returns the unique errors, in first-occurrence order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the number of unique errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an aggregate holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first error.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Converts the aggregate back into an [`ErrorList`].
    pub fn into_error_list(self) -> ErrorList {
        ErrorList(self.0.into_vec())
    }
}

impl Semigroup for Aggregate {
    fn combine(self, other: Self) -> Self {
        let merged = self.0.combine(other.0);
        let head = Self(NonEmptyVec::singleton(merged.head().clone()));
        Self::from_errors(merged.into_vec()).unwrap_or(head)
    }
}

impl Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            return write!(f, "{}", self.0.head());
        }
        f.write_str("[")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", error)?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for Aggregate {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorList>();
    assert_sync::<ErrorList>();
    assert_send::<Aggregate>();
    assert_sync::<Aggregate>();
};
