mod types;
mod workflow;

pub use types::{
    LocationsResponse, PredictionDraft, PredictionRequest, PredictionResponse, WorkflowResult,
    format_price,
};
pub use workflow::{PredictionWorkflow, WorkflowSnapshot};
