// Adapters layer: concrete implementations for external systems (http, storage, providers).

pub mod http;
pub mod providers;
pub mod storage;

pub use storage::LocalStorage;
