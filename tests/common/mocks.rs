use async_trait::async_trait;
use house_price_client::{
    Error, Result,
    gateway::{Endpoint, Gateway, GatewayRequest},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock gateway for testing
///
/// Answers each endpoint from a queue of scripted responses and records
/// every request it sees.
#[derive(Debug, Default)]
pub struct MockGateway {
    pub responses: Arc<Mutex<HashMap<Endpoint, Vec<Result<Value>>>>>,
    pub requests: Arc<Mutex<Vec<GatewayRequest>>>,
    pub gates: Arc<Mutex<HashMap<Endpoint, Arc<Notify>>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, endpoint: Endpoint, body: Value) -> Self {
        self.push(endpoint, Ok(body));
        self
    }

    pub fn with_error(self, endpoint: Endpoint, error: Error) -> Self {
        self.push(endpoint, Err(error));
        self
    }

    /// Holds calls to `endpoint` until the returned handle is notified.
    pub fn gate(&self, endpoint: Endpoint) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(endpoint, notify.clone());
        notify
    }

    pub fn push(&self, endpoint: Endpoint, response: Result<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push(response);
    }

    pub fn get_requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<GatewayRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn call(&self, request: GatewayRequest) -> Result<Value> {
        let endpoint = request.endpoint;
        self.requests.lock().unwrap().push(request);

        let gate = self.gates.lock().unwrap().get(&endpoint).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&endpoint) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => Err(Error::network(format!(
                "No more mock responses available for {}",
                endpoint
            ))),
        }
    }
}

/// Body of a successful login/signup
pub fn auth_body(token: &str, username: &str) -> Value {
    json!({
        "token": token,
        "user": {
            "id": 1,
            "username": username,
            "email": format!("{}@example.com", username)
        }
    })
}

pub fn locations_body(locations: &[&str]) -> Value {
    json!({ "locations": locations })
}

pub fn server_error(status: u16, message: &str) -> Error {
    Error::Server {
        status,
        message: message.to_string(),
    }
}

pub fn auth_error(message: &str) -> Error {
    Error::Auth {
        status: 401,
        message: message.to_string(),
    }
}
