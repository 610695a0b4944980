//! Pure format validators.
//!
//! These functions validate strings and integers against naming and format
//! rules. They hold no state and may be called from any thread. Most return
//! the list of violation messages, empty when the value is valid; the IP
//! address checks return an [`ErrorList`](crate::ErrorList) addressed at the
//! given path, and the password check returns a [`PasswordError`].

mod messages;
mod names;
mod network;
mod password;

pub use messages::{empty_error, inclusive_range_error, max_len_error, regex_error};
pub use names::{
    is_dns1123_label, is_dns1123_subdomain, is_qualified_name, is_valid_label_value,
    is_valid_percent, DNS1123_LABEL_MAX_LENGTH, DNS1123_SUBDOMAIN_MAX_LENGTH,
    LABEL_VALUE_MAX_LENGTH, QUALIFIED_NAME_MAX_LENGTH,
};
pub use network::{
    is_in_range, is_valid_ip, is_valid_ipv4_address, is_valid_ipv6_address, is_valid_port_num,
    MAX_PORT, MIN_PORT,
};
pub use password::{
    is_valid_password, PasswordError, PasswordViolation, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
