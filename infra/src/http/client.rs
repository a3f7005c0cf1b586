//! reqwest-based client for the REST backend

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use eq_shared::BackendConfig;

use super::dto::ErrorBody;
use crate::InfrastructureError;

/// Default connection timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the signup REST endpoints.
///
/// Cloning shares the underlying connection pool. Non-2xx answers become
/// [`InfrastructureError::Api`] carrying the status and the backend's message.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl ApiClient {
    /// Create a client for the configured base URL and timeout
    pub fn new(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "backend base_url must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// `POST` a JSON body and decode the JSON answer
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, InfrastructureError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(method = "POST", url = %url, "Sending request");
        let response = self.http.post(&url).json(body).send().await?;
        decode(check(response).await?).await
    }

    /// `POST` a JSON body and ignore the answer's content
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), InfrastructureError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(method = "POST", url = %url, "Sending request");
        let response = self.http.post(&url).json(body).send().await?;
        check(response).await?;
        Ok(())
    }

    /// `GET` with query parameters and decode the JSON answer
    pub async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, InfrastructureError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(method = "GET", url = %url, "Sending request");
        let response = self.http.get(&url).query(query).send().await?;
        decode(check(response).await?).await
    }
}

async fn check(response: Response) -> Result<Response, InfrastructureError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_from_response(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, InfrastructureError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Turn a non-2xx answer into an error, preferring the backend's own message
pub fn error_from_response(status: StatusCode, body: &str) -> InfrastructureError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    tracing::warn!(
        status = status.as_u16(),
        message = %message,
        event = "api_error",
        "Backend answered with an error"
    );

    InfrastructureError::Api {
        status: status.as_u16(),
        message,
    }
}
