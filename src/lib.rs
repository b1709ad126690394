pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod prediction;
pub mod session;

pub use error::{Error, GatewayError, Result};
