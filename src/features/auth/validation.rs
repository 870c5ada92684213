//! Local registration checks.
//!
//! Form-level rules run in a fixed order and stop at the first failure:
//! length, required fields, then confirmation. Field-level rules are evaluated
//! on their own and reported next to the form error. Any failure rejects the
//! submission before the identity service is contacted.

use super::types::RegistrationInput;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length, counted in UTF-16 code units the way browser form
/// fields count it.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Both password rules only look at the text before the first line terminator.
static CAPITAL_LETTER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\n\r\x{2028}\x{2029}]*[A-Z]"));
static SPECIAL_CHARACTER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\n\r\x{2028}\x{2029}]*[!@#$%\^&*]"));

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please fill in all the fields")]
    MissingFields,
    #[error("Password and Confirm Password do not match")]
    PasswordMismatch,
    #[error("Password must contain at least one capital letter")]
    MissingCapitalLetter,
    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
}

/// Everything wrong with one submission: the first failing form rule plus
/// the per-field messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub form: Option<ValidationError>,
    pub name: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Errors in display order: form first, then fields top to bottom.
    pub fn errors(&self) -> impl Iterator<Item = ValidationError> + '_ {
        [self.form, self.name, self.email, self.password]
            .into_iter()
            .flatten()
    }

    #[must_use]
    pub fn contains(&self, error: ValidationError) -> bool {
        self.errors().any(|candidate| candidate == error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors().map(|error| error.to_string()).collect();
        write!(formatter, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[must_use]
pub fn has_capital_letter(password: &str) -> bool {
    CAPITAL_LETTER
        .as_ref()
        .is_ok_and(|re| re.is_match(password))
}

#[must_use]
pub fn has_special_character(password: &str) -> bool {
    SPECIAL_CHARACTER
        .as_ref()
        .is_ok_and(|re| re.is_match(password))
}

/// Ordered form checks; the first failing rule wins.
///
/// # Errors
/// Returns the first violated rule.
pub fn check_form(input: &RegistrationInput) -> Result<(), ValidationError> {
    if input.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    if input.name.is_empty() || input.email.is_empty() || input.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if input.password != input.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Pattern rules on the password field. The capital-letter rule is reported
/// before the special-character rule.
#[must_use]
pub fn check_password_field(password: &str) -> Option<ValidationError> {
    if !has_capital_letter(password) {
        Some(ValidationError::MissingCapitalLetter)
    } else if !has_special_character(password) {
        Some(ValidationError::MissingSpecialCharacter)
    } else {
        None
    }
}

/// Runs every check and collects the results.
///
/// # Errors
/// Returns the collected errors when any rule fails.
pub fn validate(input: &RegistrationInput) -> Result<(), ValidationErrors> {
    let errors = ValidationErrors {
        form: check_form(input).err(),
        name: input
            .name
            .is_empty()
            .then_some(ValidationError::NameRequired),
        email: input
            .email
            .is_empty()
            .then_some(ValidationError::EmailRequired),
        password: check_password_field(&input.password),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(password: &str, confirm: &str) -> RegistrationInput {
        RegistrationInput::new("Ada", "ada@x.com", password, confirm)
    }

    #[test]
    fn short_password_wins_over_everything() {
        for password in ["", "a", "Ab!", "Ab!de"] {
            let empty = RegistrationInput::new("", "", password, "different");
            assert_eq!(check_form(&empty), Err(ValidationError::PasswordTooShort));
            assert_eq!(
                check_form(&input(password, password)),
                Err(ValidationError::PasswordTooShort)
            );
        }
    }

    #[test]
    fn length_counts_utf16_units_not_bytes() {
        // multi-byte but single-unit characters: six units, more bytes
        let password = "ÄÖÜß!1";
        assert_eq!(check_form(&input(password, password)), Ok(()));
        assert_eq!(
            check_form(&input("ÄÖÜ!1", "ÄÖÜ!1")),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        // five characters, seven UTF-16 units
        let password = "Ab!\u{1F600}\u{1F600}";
        assert_eq!(password.chars().count(), 5);
        assert_eq!(check_form(&input(password, password)), Ok(()));

        // two characters, four units
        let short = "\u{1F600}\u{1F600}";
        assert_eq!(check_form(&input(short, short)), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn password_rules_stop_at_first_line() {
        assert_eq!(check_password_field("Secret!1\nmore"), None);
        assert_eq!(
            check_password_field("secret!1\nSecret"),
            Some(ValidationError::MissingCapitalLetter)
        );
        assert_eq!(
            check_password_field("Secret11\r\n!"),
            Some(ValidationError::MissingSpecialCharacter)
        );
        assert_eq!(
            check_password_field("secret!1\u{2028}A"),
            Some(ValidationError::MissingCapitalLetter)
        );
    }

    #[test]
    fn missing_fields_after_length() {
        let missing_name = RegistrationInput::new("", "ada@x.com", "Secret!1", "Other!11");
        assert_eq!(check_form(&missing_name), Err(ValidationError::MissingFields));

        let missing_email = RegistrationInput::new("Ada", "", "Secret!1", "Secret!1");
        assert_eq!(check_form(&missing_email), Err(ValidationError::MissingFields));
    }

    #[test]
    fn mismatch_is_last_form_rule() {
        assert_eq!(
            check_form(&input("Secret!1", "Secret!2")),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(check_form(&input("Secret!1", "Secret!1")), Ok(()));
    }

    #[test]
    fn password_field_reports_capital_letter() {
        assert_eq!(
            check_password_field("secret!1"),
            Some(ValidationError::MissingCapitalLetter)
        );
        // both missing: capital letter first
        assert_eq!(
            check_password_field("secret11"),
            Some(ValidationError::MissingCapitalLetter)
        );
    }

    #[test]
    fn password_field_reports_special_character() {
        assert_eq!(
            check_password_field("Secret11"),
            Some(ValidationError::MissingSpecialCharacter)
        );
        for special in ['!', '@', '#', '$', '%', '^', '&', '*'] {
            let password = format!("Secret1{special}");
            assert_eq!(check_password_field(&password), None, "{password}");
        }
        // characters outside the set do not count
        assert_eq!(
            check_password_field("Secret1?"),
            Some(ValidationError::MissingSpecialCharacter)
        );
    }

    #[test]
    fn validate_collects_form_and_field_errors() {
        let result = validate(&input("secret1", "other11"));
        let Err(errors) = result else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.form, Some(ValidationError::PasswordMismatch));
        assert_eq!(errors.password, Some(ValidationError::MissingCapitalLetter));
        assert_eq!(
            errors.to_string(),
            "Password and Confirm Password do not match; Password must contain at least one capital letter"
        );
    }

    #[test]
    fn validate_reports_field_rules_without_form_error() {
        let Err(errors) = validate(&input("Secret11", "Secret11")) else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.form, None);
        assert!(errors.contains(ValidationError::MissingSpecialCharacter));
    }

    #[test]
    fn validate_reports_required_fields() {
        let blank = RegistrationInput::new("", "", "Secret!1", "Secret!1");
        let Err(errors) = validate(&blank) else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.form, Some(ValidationError::MissingFields));
        assert_eq!(errors.name, Some(ValidationError::NameRequired));
        assert_eq!(errors.email, Some(ValidationError::EmailRequired));
        assert_eq!(errors.password, None);
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert_eq!(validate(&input("Secret!1", "Secret!1")), Ok(()));
    }
}
