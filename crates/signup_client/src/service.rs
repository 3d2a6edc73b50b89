use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::RegistrationInput,
    error::ApiError,
    protocol::{SignupRequest, SignupResponse},
};
use url::Url;

use crate::{
    config::ClientSettings,
    error::{SettingsError, TransportError},
};

#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn register(&self, input: &RegistrationInput) -> Result<SignupResponse, TransportError>;
}

pub struct HttpRegistrationService {
    http: Client,
    endpoint: Url,
}

impl HttpRegistrationService {
    pub fn new(server_url: &str, signup_path: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            http: Client::new(),
            endpoint: signup_endpoint(server_url, signup_path)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, SettingsError> {
        Self::new(&settings.server_url, &settings.signup_path)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationService for HttpRegistrationService {
    async fn register(&self, input: &RegistrationInput) -> Result<SignupResponse, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&SignupRequest::from(input))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = match serde_json::from_slice::<ApiError>(&body) {
                Ok(api_error) => api_error.to_string(),
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice::<SignupResponse>(&body)
            .map_err(|err| TransportError::MalformedResponse(err.to_string()))
    }
}

pub(crate) fn signup_endpoint(server_url: &str, signup_path: &str) -> Result<Url, SettingsError> {
    let invalid = |source| SettingsError::InvalidServerUrl {
        url: server_url.to_string(),
        source,
    };
    Url::parse(server_url.trim())
        .and_then(|base| base.join(signup_path))
        .map_err(invalid)
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
