//! Port, range and IP address validators.

use std::net::IpAddr;

use super::messages::inclusive_range_error;
use crate::error::{ErrorList, FieldError};
use crate::path::Path;

/// Lowest valid port number.
pub const MIN_PORT: i64 = 1;
/// Highest valid port number.
pub const MAX_PORT: i64 = 65535;

/// Tests that `port` is a valid, non-zero port number.
pub fn is_valid_port_num(port: i64) -> Vec<String> {
    is_in_range(port, MIN_PORT, MAX_PORT)
}

/// Tests that `value` lies in the inclusive range `[min, max]`.
pub fn is_in_range(value: i64, min: i64, max: i64) -> Vec<String> {
    if (min..=max).contains(&value) {
        Vec::new()
    } else {
        vec![inclusive_range_error(min, max)]
    }
}

/// Tests that `value` is an IPv4 or IPv6 address.
pub fn is_valid_ip(value: &str) -> Vec<String> {
    match value.parse::<IpAddr>() {
        Ok(_) => Vec::new(),
        Err(_) => vec!["must be a valid IP address, (e.g. 10.9.8.7)".to_string()],
    }
}

/// Tests that `value` is an IPv4 address.
///
/// IPv4-mapped IPv6 addresses (`::ffff:10.0.0.1`) have a 4-byte form and are
/// accepted.
///
/// ```rust
/// use fieldcheck::format::is_valid_ipv4_address;
/// use fieldcheck::Path;
///
/// assert!(is_valid_ipv4_address(&Path::new("ip"), "10.0.0.1").is_empty());
/// assert_eq!(is_valid_ipv4_address(&Path::new("ip"), "::1").len(), 1);
/// ```
pub fn is_valid_ipv4_address(path: &Path, value: &str) -> ErrorList {
    let mut errors = ErrorList::new();
    if four_byte_form(value) != Some(true) {
        errors.push(FieldError::invalid(
            path.clone(),
            value,
            "must be a valid IPv4 address",
        ));
    }
    errors
}

/// Tests that `value` is an IPv6 address with no 4-byte form.
pub fn is_valid_ipv6_address(path: &Path, value: &str) -> ErrorList {
    let mut errors = ErrorList::new();
    if four_byte_form(value) != Some(false) {
        errors.push(FieldError::invalid(
            path.clone(),
            value,
            "must be a valid IPv6 address",
        ));
    }
    errors
}

/// Parses `value` and reports whether it has a 4-byte form; None if it is not
/// an address at all.
fn four_byte_form(value: &str) -> Option<bool> {
    match value.parse::<IpAddr>().ok()? {
        IpAddr::V4(_) => Some(true),
        IpAddr::V6(v6) => Some(v6.to_ipv4_mapped().is_some()),
    }
}
