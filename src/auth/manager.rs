use super::types::{AuthResponse, Credentials, SignupRequest, ThirdPartyLoginRequest};
use crate::{
    Error, Result,
    gateway::{Endpoint, Gateway, GatewayRequest, call_json},
    session::{Session, SessionStore},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Sole writer of the session store.
#[derive(Clone)]
pub struct AuthSessionManager {
    gateway: Arc<dyn Gateway>,
    session: SessionStore,
}

impl AuthSessionManager {
    pub fn new(gateway: Arc<dyn Gateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<Session> {
        credentials.validate()?;
        info!("Logging in as {}", credentials.username);
        self.establish(Endpoint::Login, &credentials).await
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<Session> {
        request.validate()?;
        info!("Signing up as {}", request.username);
        self.establish(Endpoint::Signup, &request).await
    }

    /// Exchanges an identity-provider access token for a session.
    pub async fn third_party_login(&self, provider_token: &str) -> Result<Session> {
        let request = ThirdPartyLoginRequest::new(provider_token);
        request.validate()?;
        info!("Logging in with third-party identity");
        self.establish(Endpoint::GoogleLogin, &request).await
    }

    /// Ends the session. The local session is cleared whatever happens on
    /// the server.
    pub async fn logout(&self) {
        if self.session.get().token.is_some() {
            let request = GatewayRequest::new(Endpoint::Logout);
            if let Err(e) = self.gateway.call(request).await {
                warn!("Logout failed on server: {}", e);
            }
        }

        self.session.clear().await;
        info!("Session ended");
    }

    /// Drops a session the server no longer accepts.
    pub(crate) async fn invalidate(&self) {
        warn!("Server rejected the session token, signing out locally");
        self.session.clear().await;
    }

    async fn establish<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Session> {
        let request = GatewayRequest::new(endpoint).with_body(serde_json::to_value(body)?);
        let response: AuthResponse = call_json(self.gateway.as_ref(), request).await?;

        if response.token.trim().is_empty() {
            return Err(Error::Server {
                status: 200,
                message: endpoint.default_error_message().to_string(),
            });
        }

        self.session
            .set(&response.token, response.user.as_ref())
            .await?;
        info!(
            "Session established for {}",
            response
                .user
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or("<unknown user>")
        );

        Ok(self.session.get())
    }
}
