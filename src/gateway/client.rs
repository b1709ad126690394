use super::types::{Endpoint, GatewayRequest};
use crate::{Error, Result, session::SessionStore};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issues one request and returns the decoded JSON body of a successful
    /// response. Never touches the session store.
    async fn call(&self, request: GatewayRequest) -> Result<Value>;
}

/// Calls the gateway and decodes the body into a closed record type.
///
/// A body that doesn't fit `T` is a server fault, reported with the
/// endpoint's default message.
pub async fn call_json<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    request: GatewayRequest,
) -> Result<T> {
    let endpoint = request.endpoint;
    let value = gateway.call(request).await?;

    serde_json::from_value(value).map_err(|e| {
        warn!("Unexpected response shape from {}: {}", endpoint, e);
        Error::Server {
            status: StatusCode::OK.as_u16(),
            message: endpoint.default_error_message().to_string(),
        }
    })
}

pub struct ReqwestGateway {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ReqwestGateway {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!("Creating HTTP gateway for: {}", base_url);

        Self {
            client: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl Gateway for ReqwestGateway {
    async fn call(&self, request: GatewayRequest) -> Result<Value> {
        let endpoint = request.endpoint;
        let url = self.url_for(endpoint);

        debug!("Dispatching {} {}", request.method, url);

        let mut req_builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if request.requires_auth {
            // The server decides whether a missing token is acceptable.
            match self.session.get().token {
                Some(token) => {
                    req_builder = req_builder.header(AUTHORIZATION, format!("Token {token}"));
                }
                None => debug!("No session token for authenticated call to {}", endpoint),
            }
        }

        if let Some(ref body) = request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read response from {}: {}", url, e)))?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| {
                Error::network(format!("Non-JSON response from {}: {}", url, e))
            });
        }

        let message = failure_message(&bytes)
            .unwrap_or_else(|| endpoint.default_error_message().to_string());

        warn!("{} {} failed with status {}", request.method, endpoint, status);

        if request.requires_auth
            && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        {
            return Err(Error::Auth {
                status: status.as_u16(),
                message,
            });
        }

        Err(Error::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pulls a human-readable message out of a failure body.
///
/// Looks at `detail`, then `error`, then form-validation payloads such as
/// `{"username": ["A user with that username already exists."]}`.
pub(crate) fn failure_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    for key in ["detail", "error"] {
        if let Some(message) = object.get(key).and_then(first_text) {
            return Some(message);
        }
    }

    if let Some(message) = object.get("non_field_errors").and_then(first_text) {
        return Some(message);
    }

    object.values().find_map(first_text)
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}
