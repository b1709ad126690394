mod manager;
mod types;

pub use manager::AuthSessionManager;
pub use types::{AuthResponse, Credentials, SignupRequest, ThirdPartyLoginRequest};
