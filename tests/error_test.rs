//! Integration tests for FieldError, ErrorList and Aggregate.

use fieldcheck::{
    Aggregate, ErrorList, ErrorType, ErrorTypeMatcher, FieldError, Path, ValidationResult,
};
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;

fn sample() -> ErrorList {
    vec![
        FieldError::invalid(Path::new("name"), "", "must be non-empty"),
        FieldError::required(Path::new("port"), ""),
        FieldError::duplicate(Path::new("ids").index(1), 7),
        FieldError::not_found(Path::new("ref"), "missing"),
        FieldError::required(Path::new("host"), "host or ip is required"),
    ]
    .into()
}

#[test]
fn test_constructors_yield_their_type() {
    let io = std::io::Error::other("disk on fire");
    let cases = [
        (FieldError::invalid(Path::new("f"), 1, "d"), ErrorType::Invalid),
        (
            FieldError::not_supported(Path::new("f"), "x", Some(&["a"])),
            ErrorType::NotSupported,
        ),
        (FieldError::duplicate(Path::new("f"), 1), ErrorType::Duplicate),
        (FieldError::not_found(Path::new("f"), 1), ErrorType::NotFound),
        (FieldError::required(Path::new("f"), ""), ErrorType::Required),
        (FieldError::internal(Path::new("f"), &io), ErrorType::Internal),
    ];
    for (error, expected) in cases {
        assert_eq!(error.error_type, expected);
        assert!(error.to_string().starts_with("f: "));
    }
}

#[test]
fn test_rendering() {
    let error = FieldError::invalid(Path::new("spec").child("replicas"), -1, "must be positive");
    assert_eq!(error.to_string(), "spec.replicas: Invalid value: -1: must be positive");

    let error = FieldError::not_supported(Path::new("mode"), "fast", None::<&[&str]>);
    assert_eq!(error.to_string(), r#"mode: Unsupported value: "fast""#);

    let error = FieldError::required(Path::new("name"), "");
    assert_eq!(error.to_string(), "name: Required value");

    let error = FieldError::required(Path::new("name"), "name or alias must be set");
    assert_eq!(error.error_body(), "Required value: name or alias must be set");

    let error = FieldError::invalid(Path::new("meta"), json!({"a": [1, 2]}), "bad");
    assert_eq!(error.error_body(), r#"Invalid value: {"a":[1,2]}: bad"#);

    let io = std::io::Error::other("disk on fire");
    assert_eq!(
        FieldError::internal(Path::root(), &io).to_string(),
        "<nil>: Internal error: disk on fire"
    );
}

#[test]
fn test_error_type_labels() {
    let labels: Vec<&str> = ErrorType::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Invalid value",
            "Unsupported value",
            "Duplicate value",
            "Not found",
            "Required value",
            "Internal error",
        ]
    );
}

#[test]
fn test_filter_partitions_list() {
    let errors = sample();
    let matchers = [ErrorTypeMatcher::new(ErrorType::Required)];
    let kept = errors.filter(&matchers);

    assert_eq!(kept.len(), 3);
    assert!(kept.iter().all(|e| e.error_type != ErrorType::Required));
    assert_eq!(kept.len() + errors.of_type(ErrorType::Required).len(), errors.len());
    // order preserved
    let fields: Vec<String> = kept.iter().map(|e| e.field.to_string()).collect();
    assert_eq!(fields, vec!["name", "ids[1]", "ref"]);
}

#[test]
fn test_filter_with_closure_matchers() {
    let errors = sample();
    let matchers: [fn(ErrorType) -> bool; 2] = [
        |t| t == ErrorType::Duplicate,
        |t| t == ErrorType::NotFound,
    ];
    let kept = errors.filter(&matchers);
    assert_eq!(kept.len(), 3);

    let nothing: [ErrorTypeMatcher; 0] = [];
    assert_eq!(errors.filter(&nothing), errors);
}

#[test]
fn test_to_aggregate() {
    assert!(ErrorList::new().to_aggregate().is_none());

    let twice: ErrorList = vec![
        FieldError::invalid(Path::new("a"), "x", "bad"),
        FieldError::invalid(Path::new("a"), "x", "bad"),
    ]
    .into();
    let aggregate = twice.to_aggregate().unwrap();
    assert_eq!(aggregate.len(), 1);
    assert_eq!(aggregate.to_string(), r#"a: Invalid value: "x": bad"#);

    let aggregate = sample().to_aggregate().unwrap();
    assert_eq!(aggregate.len(), 5);
    assert!(aggregate.to_string().starts_with('['));
    assert!(aggregate.to_string().ends_with(']'));
    assert_eq!(aggregate.first().field, Path::new("name"));
}

#[test]
fn test_aggregate_is_std_error() {
    fn check(errors: ErrorList) -> Result<(), Box<dyn std::error::Error>> {
        errors.into_result()?;
        Ok(())
    }
    assert!(check(ErrorList::new()).is_ok());
    let err = check(sample()).unwrap_err();
    assert!(err.to_string().contains("ids[1]: Duplicate value: 7"));
}

#[test]
fn test_semigroup_combination() {
    let left: ErrorList = vec![FieldError::required(Path::new("a"), "")].into();
    let right: ErrorList = vec![FieldError::required(Path::new("b"), "")].into();
    let combined = left.clone().combine(right);
    assert_eq!(combined.len(), 2);

    let agg_left = left.to_aggregate().unwrap();
    let merged: Aggregate = agg_left.clone().combine(agg_left);
    assert_eq!(merged.len(), 1);
}

#[test]
fn test_into_validation() {
    let ok: ValidationResult<u16> = ErrorList::new().into_validation(8080);
    assert!(matches!(ok, Validation::Success(8080)));

    let failed: ValidationResult<u16> = sample().into_validation(0);
    match failed {
        Validation::Failure(aggregate) => assert_eq!(aggregate.len(), 5),
        Validation::Success(_) => panic!("expected failure"),
    }
}

#[test]
fn test_collecting_and_extending() {
    let mut errors: ErrorList = (0..3)
        .map(|i| FieldError::invalid(Path::new("items").index(i), i as i64, "odd"))
        .collect();
    errors.extend(vec![FieldError::not_found(Path::new("x"), "y")]);
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.at_path(&Path::new("items").index(2)).len(), 1);

    let owned: Vec<FieldError> = errors.into_iter().collect();
    assert_eq!(owned.len(), 4);
}
