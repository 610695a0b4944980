//! Message builders shared by the format validators.

/// Explains a "string too long" failure.
pub fn max_len_error(length: usize) -> String {
    format!("must be no more than {} characters", length)
}

/// Explains a regex mismatch, optionally with examples of valid values.
///
/// ```rust
/// use fieldcheck::format::regex_error;
///
/// assert_eq!(
///     regex_error("must be digits", "[0-9]+", &["1", "42"]),
///     "must be digits (e.g. '1',  or '42', regex used for validation is '[0-9]+')"
/// );
/// ```
pub fn regex_error(msg: &str, fmt: &str, examples: &[&str]) -> String {
    if examples.is_empty() {
        return format!("{} (regex used for validation is '{}')", msg, fmt);
    }
    let mut out = format!("{} (e.g. ", msg);
    for (i, example) in examples.iter().enumerate() {
        if i > 0 {
            out.push_str(" or ");
        }
        out.push('\'');
        out.push_str(example);
        out.push_str("', ");
    }
    out.push_str("regex used for validation is '");
    out.push_str(fmt);
    out.push_str("')");
    out
}

/// Explains a "must not be empty" failure.
pub fn empty_error() -> String {
    "must be non-empty".to_string()
}

/// Explains a numeric "must be between" failure.
pub fn inclusive_range_error(lo: i64, hi: i64) -> String {
    format!("must be between {} and {}, inclusive", lo, hi)
}

pub(crate) fn prefix_each(msgs: Vec<String>, prefix: &str) -> Vec<String> {
    msgs.into_iter().map(|m| format!("{}{}", prefix, m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_error_without_examples() {
        assert_eq!(
            regex_error("bad", "x+", &[]),
            "bad (regex used for validation is 'x+')"
        );
    }

    #[test]
    fn test_regex_error_with_one_example() {
        assert_eq!(
            regex_error("bad", "x+", &["xx"]),
            "bad (e.g. 'xx', regex used for validation is 'x+')"
        );
    }

    #[test]
    fn test_range_and_length() {
        assert_eq!(inclusive_range_error(1, 65535), "must be between 1 and 65535, inclusive");
        assert_eq!(max_len_error(63), "must be no more than 63 characters");
        assert_eq!(empty_error(), "must be non-empty");
    }
}
