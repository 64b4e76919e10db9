//! Typed access to the mamabear API over any [`Transport`]

use std::sync::Arc;

use http::Method;
use mamabear_models::WriteAck;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::ConsoleError;
use crate::http::client::{ApiRequest, HttpClient, Transport};
use crate::storage::settings::ApiSettings;

/// API client shared by every entity handle
///
/// Cheap to clone; all clones share one transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build a client backed by a real HTTP connection
    pub fn connect(settings: &ApiSettings) -> Result<Self, ConsoleError> {
        Ok(Self::new(Arc::new(HttpClient::new(settings)?)))
    }

    /// Make a GET request and decode a non-empty body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ConsoleError> {
        let request = ApiRequest::new(Method::GET, path).with_query(query);
        let value = self.transport.send(request).await?;
        decode(path, value)
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<WriteAck, ConsoleError> {
        self.write(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<WriteAck, ConsoleError> {
        self.write(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<WriteAck, ConsoleError> {
        self.write(Method::DELETE, path, None).await
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<WriteAck, ConsoleError> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let value = self.transport.send(request).await?;
        if value.is_null() {
            return Ok(WriteAck::default());
        }

        let ack: WriteAck = serde_json::from_value(value)?;
        if let Some(error) = &ack.error {
            return Err(ConsoleError::ApiError {
                status: 200,
                body: error.clone(),
            });
        }
        Ok(ack)
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ConsoleError> {
    if value.is_null() {
        return Err(ConsoleError::EmptyPayload(path.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Escape one path segment
pub(crate) fn segment(value: &str) -> String {
    let Ok(mut url) = url::Url::parse("http://segment.invalid/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().trim_start_matches('/').to_string()
}
