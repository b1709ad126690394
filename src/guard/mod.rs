mod route_guard;
mod types;

pub use route_guard::RouteGuard;
pub use types::{AuthState, Navigation, Route};
