//! # Fieldcheck
//!
//! Structured validation with path-addressed errors.
//!
//! ## Overview
//!
//! Fieldcheck reports every problem with a value, each one pinned to the
//! location it was found at. Errors belong to a small closed taxonomy
//! ([`ErrorType`]) and collect into an ordered [`ErrorList`], which can be
//! turned into a deduplicated [`Aggregate`] for display or into a stillwater
//! `Validation` for further composition.
//!
//! ## Core Types
//!
//! - [`Path`]: an immutable location such as `servers[0].tls.cert_file`
//! - [`FieldError`]: one failure with its path, offending value and detail
//! - [`ErrorList`]: ordered failures; [`Aggregate`]: their deduplicated view
//! - [`Validator`]: evaluates declarative field rules against any
//!   `Serialize` value
//! - [`format`]: pure validators for names, DNS labels, addresses and
//!   passwords
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck::{FieldRules, Validator};
//! use serde_json::json;
//!
//! let config = json!({
//!     "name": "gateway",
//!     "servers": [{"host": "10.0.0.1", "port": 443}, {"host": "bad host", "port": 0}]
//! });
//!
//! let rules = FieldRules::new()
//!     .field("name", "required,name")
//!     .field("servers[*].host", "required,hostname|ip")
//!     .field("servers[*].port", "required,min=1,max=65535");
//!
//! let errors = Validator::new(&config, rules).unwrap().validate();
//! assert_eq!(errors.len(), 2);
//!
//! let aggregate = errors.to_aggregate().unwrap();
//! assert!(aggregate.to_string().contains("servers[1].port"));
//! ```

pub mod error;
pub mod format;
pub mod path;
pub mod rules;
pub mod translate;
pub mod validator;

pub use error::{Aggregate, ErrorList, ErrorType, ErrorTypeMatcher, FieldError, Matcher};
pub use path::{Path, PathSegment};
pub use rules::{FieldLevel, Rule, RuleError, RuleRegistry, ValueKind};
pub use translate::{RuleFailure, Translate, Translator};
pub use validator::{FieldRules, Tagged, Validator, ValidatorBuilder};

/// Type alias for validation results using Aggregate
pub type ValidationResult<T> = stillwater::Validation<T, Aggregate>;
