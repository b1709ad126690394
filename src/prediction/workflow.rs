use super::types::{
    LocationsResponse, PredictionDraft, PredictionRequest, PredictionResponse, WorkflowResult,
};
use crate::{
    Error, Result,
    auth::AuthSessionManager,
    gateway::{Endpoint, Gateway, GatewayRequest, call_json},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Point-in-time copy of the workflow state.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub locations: Vec<String>,
    pub form: PredictionDraft,
    pub result: WorkflowResult,
}

#[derive(Debug, Default)]
struct WorkflowState {
    locations: Vec<String>,
    form: PredictionDraft,
    result: WorkflowResult,
    // Bumped on every dispatch; only the latest dispatch may write a result.
    dispatch_seq: u64,
}

/// Location catalog, form capture and the prediction request lifecycle.
///
/// Cheap to clone; clones share state, so a submit issued from one handle
/// while another is in flight is rejected.
#[derive(Clone)]
pub struct PredictionWorkflow {
    gateway: Arc<dyn Gateway>,
    auth: AuthSessionManager,
    state: Arc<Mutex<WorkflowState>>,
}

impl PredictionWorkflow {
    pub fn new(gateway: Arc<dyn Gateway>, auth: AuthSessionManager) -> Self {
        Self {
            gateway,
            auth,
            state: Arc::new(Mutex::new(WorkflowState::default())),
        }
    }

    /// Fetches the location catalog and preselects its first entry.
    ///
    /// A failed fetch leaves the catalog empty and records the failure as
    /// the current result; the form stays usable.
    pub async fn activate(&self) {
        debug!("Loading location catalog");

        let request = GatewayRequest::new(Endpoint::Locations);
        match call_json::<LocationsResponse>(self.gateway.as_ref(), request).await {
            Ok(response) => {
                info!("Loaded {} locations", response.locations.len());
                let mut state = self.lock();
                if let Some(first) = response.locations.first() {
                    state.form.location = first.clone();
                }
                state.locations = response.locations;
            }
            Err(e) => {
                warn!("Failed to load locations: {}", e);
                let mut state = self.lock();
                state.locations.clear();
                state.result = WorkflowResult::Failure(e.user_message());
            }
        }
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.lock();
        WorkflowSnapshot {
            locations: state.locations.clone(),
            form: state.form.clone(),
            result: state.result.clone(),
        }
    }

    pub fn locations(&self) -> Vec<String> {
        self.lock().locations.clone()
    }

    pub fn form(&self) -> PredictionDraft {
        self.lock().form.clone()
    }

    pub fn result(&self) -> WorkflowResult {
        self.lock().result.clone()
    }

    pub fn set_total_sqft(&self, total_sqft: f64) {
        self.lock().form.total_sqft = total_sqft;
    }

    pub fn set_bhk(&self, bhk: i64) {
        self.lock().form.bhk = bhk;
    }

    pub fn set_bath(&self, bath: i64) {
        self.lock().form.bath = bath;
    }

    pub fn select_location(&self, location: impl Into<String>) {
        self.lock().form.location = location.into();
    }

    /// Validates the form and requests an estimate.
    ///
    /// Returns the terminal result. Failures of the request itself become
    /// `WorkflowResult::Failure`; the only error is
    /// [`Error::SubmitInProgress`] for a submit made while another is loading.
    pub async fn submit(&self) -> Result<WorkflowResult> {
        let (seq, draft, catalog) = {
            let mut state = self.lock();
            if state.result.is_loading() {
                debug!("Rejecting submit while a prediction is in flight");
                return Err(Error::SubmitInProgress);
            }
            state.dispatch_seq += 1;
            state.result = WorkflowResult::Loading;
            (state.dispatch_seq, state.form.clone(), state.locations.clone())
        };

        let request = match draft.validate(&catalog) {
            Ok(request) => request,
            Err(e) => {
                debug!("Prediction input rejected: {}", e);
                return Ok(self.finish(seq, WorkflowResult::Failure(e.user_message())));
            }
        };

        let result = match self.predict(request).await {
            Ok(price) => WorkflowResult::Success(price),
            Err(e) => {
                if e.is_auth() {
                    self.auth.invalidate().await;
                }
                WorkflowResult::Failure(e.user_message())
            }
        };

        Ok(self.finish(seq, result))
    }

    async fn predict(&self, request: PredictionRequest) -> Result<f64> {
        debug!(
            "Requesting estimate for {} sqft, {} bhk, {} bath in {}",
            request.total_sqft, request.bhk, request.bath, request.location
        );

        let request =
            GatewayRequest::new(Endpoint::Predict).with_body(serde_json::to_value(&request)?);
        let response: PredictionResponse = call_json(self.gateway.as_ref(), request).await?;

        info!("Estimated price: {:.2} Lakh", response.estimated_price);
        Ok(response.estimated_price)
    }

    fn finish(&self, seq: u64, result: WorkflowResult) -> WorkflowResult {
        let mut state = self.lock();
        if state.dispatch_seq != seq {
            debug!("Discarding result of superseded dispatch {}", seq);
            return state.result.clone();
        }
        state.result = result.clone();
        result
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        // State is plain data; a panic mid-update can't leave it unusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
