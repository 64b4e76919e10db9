//! Scripted transport for driving handles without a server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use mamabear_console::errors::ConsoleError;
use mamabear_console::http::api::ApiClient;
use mamabear_console::http::client::{ApiRequest, Transport};
use serde_json::Value;

/// Canned answer for one route
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Reply::Json(value)
    }

    pub fn after(self, millis: u64) -> Self {
        Reply::Delayed(Duration::from_millis(millis), Box::new(self))
    }
}

/// Answers requests from a table and records every request it sees
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_with(&self, method: Method) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ConsoleError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method.clone(), request.path.clone()))
            .cloned();

        let mut reply = match reply {
            Some(reply) => reply,
            None => return Err(ConsoleError::NotFound(request.path)),
        };

        loop {
            match reply {
                Reply::Json(value) => return Ok(value),
                Reply::Status(404) => return Err(ConsoleError::NotFound(request.path)),
                Reply::Status(status) => {
                    return Err(ConsoleError::ApiError {
                        status,
                        body: "scripted failure".to_string(),
                    })
                }
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

/// A client over a fresh scripted transport
pub fn client() -> (ApiClient, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    (ApiClient::new(transport.clone()), transport)
}
