pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use app::{build_router, AppState};
pub use config::{AppConfig, CliArgs};
pub use core::resolver::Resolver;
pub use domain::model::{Attempt, ErrorKind, LookupOutcome, ProviderResult};
pub use utils::error::{AppError, Result};
