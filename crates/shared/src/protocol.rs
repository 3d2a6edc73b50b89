use serde::{Deserialize, Serialize};

use crate::domain::RegistrationInput;

pub const SIGNUP_PATH: &str = "/api/users/signup";
pub const LOGIN_PAGE_PATH: &str = "/login";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<&RegistrationInput> for SignupRequest {
    fn from(input: &RegistrationInput) -> Self {
        Self {
            username: input.username.clone(),
            email: input.email.clone(),
            password: input.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_requires_message() {
        let parsed: SignupResponse =
            serde_json::from_str(r#"{"message":"Account created","success":true}"#)
                .expect("parse");
        assert_eq!(parsed.message, "Account created");

        assert!(serde_json::from_str::<SignupResponse>(r#"{"error":"nope"}"#).is_err());
    }
}
