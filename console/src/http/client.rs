//! HTTP client implementation

use async_trait::async_trait;
use http::Method;
use mamabear_models::ErrorResponse;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::ConsoleError;
use crate::storage::settings::ApiSettings;

/// One request against the API, relative to its base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Transport trait for testability
///
/// Returns the decoded JSON body, or `Value::Null` for an empty body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ConsoleError>;
}

/// HTTP client for the mamabear API
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(settings: &ApiSettings) -> Result<Self, ConsoleError> {
        let base_url = settings.url()?;
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ConsoleError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::NOT_FOUND {
            debug!("HTTP {} {} not found: {}", request.method, url, text);
            return Err(ConsoleError::NotFound(request.path));
        }

        if !status.is_success() {
            error!("HTTP {} failed: {} - {}", request.method, status, text);
            return Err(ConsoleError::ApiError {
                status: status.as_u16(),
                body: error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// The `error` field of an error body, or the raw body when it has none
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|response| response.error)
        .unwrap_or_else(|_| body.to_string())
}
