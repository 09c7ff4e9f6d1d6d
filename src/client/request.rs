use crate::models::{ActionRequest, ApiResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::instrument;

/// Shown when a failed request carries no usable `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("http client error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected http status: {status}")]
    Status {
        status: StatusCode,
        payload: Option<ApiResponse>,
    },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    /// The server-supplied error text, or the fixed fallback.
    pub fn message(&self) -> &str {
        match self {
            RequestError::Status {
                payload: Some(payload),
                ..
            } => &payload.message,
            _ => FALLBACK_ERROR_MESSAGE,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &ActionRequest) -> Result<ApiResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RequestError> {
        let http = Client::builder()
            .user_agent(concat!("queue-courier/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for ApiClient {
    #[instrument(skip(self, payload), fields(action = %payload.action))]
    async fn send(&self, payload: &ActionRequest) -> Result<ApiResponse, RequestError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(RequestError::Status {
                status,
                payload: serde_json::from_slice(&body).ok(),
            })
        }
    }
}
