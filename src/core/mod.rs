pub mod barcode;
pub mod describe;
pub mod resolver;

pub use crate::domain::model::{Attempt, ErrorKind, LookupOutcome, ProviderResult};
pub use crate::domain::ports::{Provider, Storage};
pub use crate::utils::error::Result;
