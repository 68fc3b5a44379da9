//! Error types for the CAA checker service.

use thiserror::Error;

/// Errors that can occur in caa-srv operations.
#[derive(Error, Debug)]
pub enum SrvError {
    /// Configuration is invalid or missing required fields.
    #[error("config error: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// RPC listener failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),
}
