//! Password complexity check.
//!
//! Characters are classified by Unicode general category as number (`N*`),
//! uppercase (`Lu`), lowercase (`Ll`), special (`P*` or `S*`) or the ASCII
//! space. Anything else, such as tabs, control characters, combining marks or
//! format characters, is neither classified nor counted toward the length, so
//! a long password made of such characters can still be reported as too short.

use std::fmt::{self, Display};

use unicode_general_category::{get_general_category, GeneralCategory};

/// Minimum number of counted characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum number of counted characters.
pub const MAX_PASSWORD_LENGTH: usize = 16;

/// One unmet password requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    /// No lowercase letter.
    MissingLowercase,
    /// No uppercase letter.
    MissingUppercase,
    /// No numeric character.
    MissingNumber,
    /// No punctuation or symbol.
    MissingSpecial,
    /// Too few or too many counted characters.
    Length,
}

impl Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordViolation::MissingLowercase => f.write_str("lowercase letter missing"),
            PasswordViolation::MissingUppercase => f.write_str("uppercase letter missing"),
            PasswordViolation::MissingNumber => {
                f.write_str("at least one numeric character required")
            }
            PasswordViolation::MissingSpecial => f.write_str("special character missing"),
            PasswordViolation::Length => write!(
                f,
                "password length must be between {} to {} characters long",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            ),
        }
    }
}

/// A password that fails one or more requirements.
///
/// The message lists every violation, comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.violations))]
pub struct PasswordError {
    /// Unmet requirements, in reporting order.
    pub violations: Vec<PasswordViolation>,
}

fn join(violations: &[PasswordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Default)]
struct Classes {
    upper: bool,
    lower: bool,
    number: bool,
    special: bool,
    counted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Number,
    Upper,
    Lower,
    Special,
    Space,
}

fn classify(ch: char) -> Option<CharClass> {
    use GeneralCategory::*;

    match get_general_category(ch) {
        DecimalNumber | LetterNumber | OtherNumber => Some(CharClass::Number),
        UppercaseLetter => Some(CharClass::Upper),
        LowercaseLetter => Some(CharClass::Lower),
        ConnectorPunctuation | DashPunctuation | OpenPunctuation | ClosePunctuation
        | InitialPunctuation | FinalPunctuation | OtherPunctuation | MathSymbol
        | CurrencySymbol | ModifierSymbol | OtherSymbol => Some(CharClass::Special),
        _ if ch == ' ' => Some(CharClass::Space),
        _ => None,
    }
}

/// Checks that `password` has an uppercase letter, a lowercase letter, a
/// number and a special character, and a counted length in
/// `MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH`.
///
/// ```rust
/// use fieldcheck::format::is_valid_password;
///
/// assert!(is_valid_password("Abc12345!").is_ok());
///
/// let err = is_valid_password("abcdefgh").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "uppercase letter missing, at least one numeric character required, special character missing"
/// );
/// ```
pub fn is_valid_password(password: &str) -> Result<(), PasswordError> {
    let mut classes = Classes::default();
    for class in password.chars().filter_map(classify) {
        match class {
            CharClass::Number => classes.number = true,
            CharClass::Upper => classes.upper = true,
            CharClass::Lower => classes.lower = true,
            CharClass::Special => classes.special = true,
            CharClass::Space => {}
        }
        classes.counted += 1;
    }

    let checks = [
        (classes.lower, PasswordViolation::MissingLowercase),
        (classes.upper, PasswordViolation::MissingUppercase),
        (classes.number, PasswordViolation::MissingNumber),
        (classes.special, PasswordViolation::MissingSpecial),
        (
            (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&classes.counted),
            PasswordViolation::Length,
        ),
    ];
    let violations: Vec<PasswordViolation> = checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, violation)| violation)
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(PasswordError { violations })
    }
}
