mod storage;
mod store;
mod types;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::SessionStore;
pub use types::{Session, User};
