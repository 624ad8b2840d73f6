pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod resource;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use provider::Provider;
