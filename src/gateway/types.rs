use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// Backend endpoints, relative to the configured API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Locations,
    Login,
    Signup,
    GoogleLogin,
    Logout,
    Predict,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Locations => "/get_location_names/",
            Self::Login => "/auth/login/",
            Self::Signup => "/auth/signup/",
            Self::GoogleLogin => "/auth/google/",
            Self::Logout => "/auth/logout/",
            Self::Predict => "/predict_home_price/",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Locations => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Logout | Self::Predict)
    }

    /// Message used when a failed call carries no usable server message.
    pub fn default_error_message(&self) -> &'static str {
        match self {
            Self::Locations => "Failed to fetch locations",
            Self::Login => "Login failed",
            Self::Signup => "Signup failed",
            Self::GoogleLogin => "Google login failed",
            Self::Logout => "Logout failed",
            Self::Predict => "Failed to predict price",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub body: Option<Value>,
    pub requires_auth: bool,
}

impl GatewayRequest {
    /// Request with the endpoint's standard method and auth requirement.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            method: endpoint.method(),
            body: None,
            requires_auth: endpoint.requires_auth(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
