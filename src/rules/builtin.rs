//! Built-in rules.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::registry::{ParamKind, Rule};
use super::{is_empty_value, FieldLevel};
use crate::format::{is_valid_ip, is_valid_ipv4_address, is_valid_ipv6_address};

const HOSTNAME_MAX_LENGTH: usize = 253;

// RFC 1123 host names: labels of letters, digits and '-', optional trailing dot.
static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([-a-zA-Z0-9]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([-a-zA-Z0-9]{0,61}[a-zA-Z0-9])?)*\.?$",
    )
    .expect("hostname regex must compile")
});

pub(super) fn rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("required", Rule::new(required).with_param(ParamKind::None)),
        ("min", Rule::new(min).with_param(ParamKind::Number)),
        ("max", Rule::new(max).with_param(ParamKind::Number)),
        ("len", Rule::new(len).with_param(ParamKind::Number)),
        ("eq", Rule::new(eq).with_param(ParamKind::Optional)),
        ("ne", Rule::new(|fl| !eq(fl)).with_param(ParamKind::Optional)),
        ("oneof", Rule::new(one_of).with_param(ParamKind::Required)),
        ("hostname", Rule::new(hostname).with_param(ParamKind::None)),
        ("ip", Rule::new(ip).with_param(ParamKind::None)),
        ("ipv4", Rule::new(ipv4).with_param(ParamKind::None)),
        ("ipv6", Rule::new(ipv6).with_param(ParamKind::None)),
    ]
}

fn required(fl: &FieldLevel<'_>) -> bool {
    !is_empty_value(fl.value())
}

/// Numbers are compared by value, strings by character count and containers
/// by member count.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

fn compare(fl: &FieldLevel<'_>, accept: impl Fn(f64, f64) -> bool) -> bool {
    match (measure(fl.value()), fl.param().parse::<f64>()) {
        (Some(actual), Ok(bound)) => accept(actual, bound),
        _ => false,
    }
}

fn min(fl: &FieldLevel<'_>) -> bool {
    compare(fl, |actual, bound| actual >= bound)
}

fn max(fl: &FieldLevel<'_>) -> bool {
    compare(fl, |actual, bound| actual <= bound)
}

fn len(fl: &FieldLevel<'_>) -> bool {
    compare(fl, |actual, bound| actual == bound)
}

fn eq(fl: &FieldLevel<'_>) -> bool {
    let param = fl.param();
    match fl.value() {
        Value::String(s) => s == param,
        Value::Bool(b) => param.parse::<bool>() == Ok(*b),
        Value::Null => param.is_empty(),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            compare(fl, |actual, bound| actual == bound)
        }
    }
}

fn one_of(fl: &FieldLevel<'_>) -> bool {
    let candidate = match fl.value() {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    fl.param().split_whitespace().any(|word| word == candidate)
}

fn hostname(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .is_some_and(|s| s.len() <= HOSTNAME_MAX_LENGTH && HOSTNAME_RE.is_match(s))
}

fn ip(fl: &FieldLevel<'_>) -> bool {
    fl.as_str().is_some_and(|s| is_valid_ip(s).is_empty())
}

fn ipv4(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .is_some_and(|s| is_valid_ipv4_address(fl.path(), s).is_empty())
}

fn ipv6(fl: &FieldLevel<'_>) -> bool {
    fl.as_str()
        .is_some_and(|s| is_valid_ipv6_address(fl.path(), s).is_empty())
}
