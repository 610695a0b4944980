//! Name and label format validators.
//!
//! Each function returns the list of violations; an empty list means the
//! value is valid. Lengths are measured in bytes, as in DNS.

use std::sync::LazyLock;

use regex::Regex;

use super::messages::{empty_error, max_len_error, prefix_each, regex_error};

const QNAME_CHAR_FMT: &str = "[A-Za-z0-9]";
const QNAME_EXT_CHAR_FMT: &str = "[-A-Za-z0-9_.]";
const QUALIFIED_NAME_FMT: &str = "([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]";
const QUALIFIED_NAME_ERR_MSG: &str = "must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character";

/// Maximum length of the name part of a qualified name.
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;

static QUALIFIED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("({QNAME_CHAR_FMT}{QNAME_EXT_CHAR_FMT}*)?{QNAME_CHAR_FMT}")));

/// Tests whether `value` is a qualified name: a name part optionally preceded
/// by a DNS-1123 subdomain prefix and a `/`.
///
/// # Example
///
/// ```rust
/// use fieldcheck::format::is_qualified_name;
///
/// assert!(is_qualified_name("MyName").is_empty());
/// assert!(is_qualified_name("example.com/MyName").is_empty());
/// assert!(!is_qualified_name("a/b/c").is_empty());
/// ```
pub fn is_qualified_name(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                errs.push(format!("prefix part {}", empty_error()));
            } else {
                errs.extend(prefix_each(is_dns1123_subdomain(prefix), "prefix part "));
            }
            *name
        }
        _ => {
            return vec![format!(
                "a qualified name {} with an optional DNS subdomain prefix and '/' (e.g. 'example.com/MyName')",
                qualified_name_regex_error()
            )];
        }
    };

    if name.is_empty() {
        errs.push(format!("name part {}", empty_error()));
    } else if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errs.push(format!("name part {}", max_len_error(QUALIFIED_NAME_MAX_LENGTH)));
    }
    if !QUALIFIED_NAME_RE.is_match(name) {
        errs.push(format!("name part {}", qualified_name_regex_error()));
    }
    errs
}

fn qualified_name_regex_error() -> String {
    regex_error(
        QUALIFIED_NAME_ERR_MSG,
        QUALIFIED_NAME_FMT,
        &["MyName", "my.name", "123-abc"],
    )
}

const LABEL_VALUE_FMT: &str = "(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])?";
const LABEL_VALUE_ERR_MSG: &str = "a valid label must be an empty string or consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character";

/// Maximum length of a label value.
pub const LABEL_VALUE_MAX_LENGTH: usize = 63;

static LABEL_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| anchored(LABEL_VALUE_FMT));

/// Tests whether `value` is a valid label value. The empty string is valid.
pub fn is_valid_label_value(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        errs.push(max_len_error(LABEL_VALUE_MAX_LENGTH));
    }
    if !LABEL_VALUE_RE.is_match(value) {
        errs.push(regex_error(
            LABEL_VALUE_ERR_MSG,
            LABEL_VALUE_FMT,
            &["MyValue", "my_value", "12345"],
        ));
    }
    errs
}

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const DNS1123_LABEL_ERR_MSG: &str = "a DNS-1123 label must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character";

/// Maximum length of a DNS (RFC 1123) label.
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

static DNS1123_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| anchored(DNS1123_LABEL_FMT));

/// Tests whether `value` is a DNS (RFC 1123) label.
pub fn is_dns1123_label(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        errs.push(max_len_error(DNS1123_LABEL_MAX_LENGTH));
    }
    if !DNS1123_LABEL_RE.is_match(value) {
        errs.push(regex_error(
            DNS1123_LABEL_ERR_MSG,
            DNS1123_LABEL_FMT,
            &["my-name", "123-abc"],
        ));
    }
    errs
}

const DNS1123_SUBDOMAIN_FMT: &str =
    r"[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*";
const DNS1123_SUBDOMAIN_ERR_MSG: &str = "a DNS-1123 subdomain must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character";

/// Maximum length of a DNS (RFC 1123) subdomain.
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

static DNS1123_SUBDOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(DNS1123_SUBDOMAIN_FMT));

/// Tests whether `value` is a DNS (RFC 1123) subdomain.
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errs = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errs.push(max_len_error(DNS1123_SUBDOMAIN_MAX_LENGTH));
    }
    if !DNS1123_SUBDOMAIN_RE.is_match(value) {
        errs.push(regex_error(
            DNS1123_SUBDOMAIN_ERR_MSG,
            DNS1123_SUBDOMAIN_FMT,
            &["example.com"],
        ));
    }
    errs
}

const PERCENT_FMT: &str = "[0-9]+%";
const PERCENT_ERR_MSG: &str =
    "a valid percent string must be a numeric string followed by an ending '%'";

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| anchored(PERCENT_FMT));

/// Tests whether `value` is a percentage such as `93%`.
pub fn is_valid_percent(value: &str) -> Vec<String> {
    if PERCENT_RE.is_match(value) {
        Vec::new()
    } else {
        vec![regex_error(PERCENT_ERR_MSG, PERCENT_FMT, &["1%", "93%"])]
    }
}

// Patterns are compile-time constants; a failure here is a programming error.
fn anchored(fmt: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", fmt)).expect("format validator regex must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_accepts() {
        for value in [
            "simple",
            "now-with-dashes",
            "1-starts-with-num",
            "1234",
            "simple/simple",
            "now-with-dashes/simple",
            "now-with-dashes/now-with-dashes",
            "now.with.dots/simple",
            "now-with.dashes-and.dots/simple",
            "1-num.2-num/3-num",
            "1234/5678",
            "1.2.3.4/5678",
            "Uppercase_Is_OK_123",
            "example.com/Uppercase_Is_OK_123",
            "requests.storage-foo",
        ] {
            assert!(is_qualified_name(value).is_empty(), "expected valid: {value}");
        }
        let long = "a".repeat(QUALIFIED_NAME_MAX_LENGTH);
        assert!(is_qualified_name(&long).is_empty());
    }

    #[test]
    fn test_qualified_name_rejects() {
        for value in [
            "nospecialchars%^=@",
            "cantendwithadash-",
            "-cantstartwithadash-",
            "only/one/slash",
            "Example.com/abc",
            "example_com/abc",
            "example.com/",
            "/simple",
            "",
        ] {
            assert!(!is_qualified_name(value).is_empty(), "expected invalid: {value}");
        }
        let long = "a".repeat(QUALIFIED_NAME_MAX_LENGTH + 1);
        assert!(!is_qualified_name(&long).is_empty());
    }

    #[test]
    fn test_qualified_name_messages_name_their_part() {
        let errs = is_qualified_name("/x");
        assert_eq!(errs, vec!["prefix part must be non-empty".to_string()]);

        let errs = is_qualified_name("Bad_Prefix/x");
        assert!(errs.iter().all(|e| e.starts_with("prefix part ")));

        let errs = is_qualified_name("example.com/");
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0], "name part must be non-empty");
        assert!(errs[1].starts_with("name part must consist of"));
    }

    #[test]
    fn test_too_many_slashes_is_single_message() {
        let errs = is_qualified_name("a/b/c");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].starts_with("a qualified name must consist of"));
        assert!(errs[0].ends_with("(e.g. 'example.com/MyName')"));
    }

    #[test]
    fn test_label_value() {
        for value in ["", "simple", "now-with-dashes", "1-starts-with-num", "end-with-num-1", "1234", "a_b.c-D"] {
            assert!(is_valid_label_value(value).is_empty(), "expected valid: {value}");
        }
        for value in ["nospecialchars%^=@", "Tama-nui-te-rā.is.Māori.sun", "\\backslashes\\are\\bad", "-starts-with-dash", "ends-with-dash-", ".starts.with.dot", "ends.with.dot."] {
            assert!(!is_valid_label_value(value).is_empty(), "expected invalid: {value}");
        }
        let long = "a".repeat(LABEL_VALUE_MAX_LENGTH + 1);
        assert_eq!(is_valid_label_value(&long), vec![max_len_error(LABEL_VALUE_MAX_LENGTH)]);
    }

    #[test]
    fn test_dns1123_label() {
        for value in ["a", "ab", "abc", "a1", "a-1", "a--1--2--b", "0", "01", "012", "1a", "1-a"] {
            assert!(is_dns1123_label(value).is_empty(), "expected valid: {value}");
        }
        for value in ["", "A", "ABC", "aBc", "A1", "A-1", "1-A", "-", "a-", "-a", "1-", "-1", "_", "a_", "_a", "a_b", "1_", "_1", "1_2", ".", "a.", ".a", "a.b", "1.", ".1", "1.2", " ", "a ", " a", "a b", "1 ", " 1", "1 2"] {
            assert!(!is_dns1123_label(value).is_empty(), "expected invalid: {value:?}");
        }
        let long = "a".repeat(DNS1123_LABEL_MAX_LENGTH + 1);
        assert!(!is_dns1123_label(&long).is_empty());
    }

    #[test]
    fn test_dns1123_subdomain() {
        for value in ["a", "ab", "a1", "a-1", "a--1--2--b", "0", "1-a", "a.a", "ab.a", "a1.a", "a-1.a", "0.a", "a.0", "a.b.c.d"] {
            assert!(is_dns1123_subdomain(value).is_empty(), "expected valid: {value}");
        }
        for value in ["", "A", "aBc", "-", "a-", "-a", "_", "a_b", ".", "a.", ".a", "a..b", "a.-b", "a-.b", " ", "a b"] {
            assert!(!is_dns1123_subdomain(value).is_empty(), "expected invalid: {value:?}");
        }
        let long = format!("{}.{}", "a".repeat(200), "b".repeat(60));
        assert_eq!(is_dns1123_subdomain(&long), vec![max_len_error(DNS1123_SUBDOMAIN_MAX_LENGTH)]);
    }

    #[test]
    fn test_percent() {
        for value in ["0%", "00000%", "93%", "100%"] {
            assert!(is_valid_percent(value).is_empty(), "expected valid: {value}");
        }
        for value in ["", "0", "100", "0.0%", "99.9%", "hundred", " 1%", "1% ", "-0%", "-1%", "+1%"] {
            assert_eq!(is_valid_percent(value).len(), 1, "expected invalid: {value:?}");
        }
    }
}
