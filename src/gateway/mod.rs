mod client;
mod types;

pub use client::{Gateway, ReqwestGateway, call_json};
pub use types::{Endpoint, GatewayRequest};
