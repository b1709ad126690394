use house_price_client::{
    app::App,
    config::{ApiConfig, Config, LogsConfig, SessionConfig},
    gateway::Gateway,
    session::{KeyValueStorage, MemoryStorage},
};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test configuration pointing at `base_url` with a session file
/// inside `dir`
pub fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        session: SessionConfig {
            path: dir.path().join("session.json"),
        },
        logs: LogsConfig {
            level: "debug".to_string(),
        },
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// App over in-memory storage; the storage handle is returned so tests can
/// inspect or seed it the way a browser profile would be.
pub fn create_memory_app(gateway: Arc<dyn Gateway>) -> (Arc<MemoryStorage>, App) {
    let storage = Arc::new(MemoryStorage::new());
    let app = App::with_storage(storage.clone(), gateway);
    (storage, app)
}

/// Seed a stored session directly in the backing storage
pub async fn seed_session(storage: &dyn KeyValueStorage, token: &str, username: &str) {
    storage.set_item("token", token).await.unwrap();
    storage
        .set_item("user", &format!(r#"{{"username":"{}"}}"#, username))
        .await
        .unwrap();
}

pub const ELECTRONIC_CITY: &str = "Electronic City";
pub const WHITEFIELD: &str = "Whitefield";
