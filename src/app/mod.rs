use crate::{
    Error, Result,
    auth::AuthSessionManager,
    config::Config,
    gateway::{Endpoint, Gateway, GatewayRequest, ReqwestGateway, call_json},
    guard::{Navigation, Route, RouteGuard},
    prediction::{LocationsResponse, PredictionWorkflow},
    session::{FileStorage, KeyValueStorage, SessionStore},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Wires the session store, gateway, auth manager and route guard together.
#[derive(Clone)]
pub struct App {
    session: SessionStore,
    gateway: Arc<dyn Gateway>,
    auth: AuthSessionManager,
    guard: RouteGuard,
}

impl App {
    pub async fn from_config(config: &Config) -> Result<Self> {
        info!("Using session file {}", config.session.path.display());
        let storage = FileStorage::open(&config.session.path).await?;
        let session = SessionStore::new(Arc::new(storage));
        let gateway = Arc::new(ReqwestGateway::new(config.api.base_url.clone(), session.clone()));
        Ok(Self::with_parts(session, gateway))
    }

    /// Assembles the app over an existing storage backend and gateway.
    pub fn with_storage(storage: Arc<dyn KeyValueStorage>, gateway: Arc<dyn Gateway>) -> Self {
        Self::with_parts(SessionStore::new(storage), gateway)
    }

    fn with_parts(session: SessionStore, gateway: Arc<dyn Gateway>) -> Self {
        let auth = AuthSessionManager::new(gateway.clone(), session.clone());
        let guard = RouteGuard::new(session.clone());
        Self {
            session,
            gateway,
            auth,
            guard,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth(&self) -> &AuthSessionManager {
        &self.auth
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// The public location catalog, without opening the protected surface.
    pub async fn locations(&self) -> Result<Vec<String>> {
        let request = GatewayRequest::new(Endpoint::Locations);
        let response: LocationsResponse = call_json(self.gateway.as_ref(), request).await?;
        Ok(response.locations)
    }

    /// Opens the protected prediction surface and loads its catalog.
    ///
    /// Without a session this is the redirect to login:
    /// [`Error::Unauthenticated`].
    pub async fn prediction_workflow(&self) -> Result<PredictionWorkflow> {
        match self.guard.navigate(Route::Home) {
            Navigation::Allow(_) => {
                let workflow = PredictionWorkflow::new(self.gateway.clone(), self.auth.clone());
                workflow.activate().await;
                Ok(workflow)
            }
            Navigation::Redirect(to) => {
                debug!("Prediction surface requires a session, redirecting to {}", to);
                Err(Error::Unauthenticated)
            }
        }
    }
}
