use std::time::Duration;

use thiserror::Error;

use crate::{FILL_ALL_FIELDS_MESSAGE, INVALID_EMAIL_MESSAGE};

// `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", FILL_ALL_FIELDS_MESSAGE)]
    EmptyField,
    #[error("{}", INVALID_EMAIL_MESSAGE)]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("signup request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("signup rejected with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("signup request timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed signup response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_user_text() {
        assert_eq!(
            ValidationError::EmptyField.to_string(),
            "Please fill all the fields."
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Invalid email address."
        );
    }

    #[test]
    fn status_is_exposed_for_rejections_only() {
        let err = TransportError::Status {
            status: 409,
            detail: "taken".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            TransportError::MalformedResponse("eof".to_string()).status(),
            None
        );
    }
}
