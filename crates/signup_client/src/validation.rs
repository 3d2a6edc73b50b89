use std::sync::LazyLock;

use regex::Regex;
use shared::domain::RegistrationInput;

use crate::{error::ValidationError, NotificationKind, Notifier};

// ASCII classes on purpose: `\w` and `\d` are Unicode-aware in `regex`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn check(input: &RegistrationInput) -> Result<(), ValidationError> {
    if input.first_empty_field().is_some() {
        return Err(ValidationError::EmptyField);
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Like [`check`], but reports a failure through `notifier` exactly once.
pub fn validate(input: &RegistrationInput, notifier: &dyn Notifier) -> bool {
    match check(input) {
        Ok(()) => true,
        Err(err) => {
            notifier.notify(NotificationKind::Error, &err.to_string());
            false
        }
    }
}
