//! aprovatec-client — backend access for aprovatec.
//!
//! Implements the `AuthBackend` and `GradesBackend` traits over HTTP and in
//! memory, and owns the configuration and session files the CLI relies on.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod session;

pub use config::{load_config, load_config_from, AprovatecConfig};
pub use error::ApiError;
pub use http::ApiClient;
pub use session::Session;
