//! Error types for validation failures.
//!
//! This module provides the path-addressed error model: a closed
//! [`ErrorType`] taxonomy, single [`FieldError`]s, ordered [`ErrorList`]s and
//! their deduplicated [`Aggregate`] view.

mod error_list;
mod field_error;
pub mod value_repr;

pub use error_list::{Aggregate, ErrorList, ErrorTypeMatcher, Matcher};
pub use field_error::{ErrorType, FieldError};
