//! caa-srv: CAA issuance authorization service.
//!
//! Exposes [`caa_core::CaaChecker`] as a single remote operation,
//! `ValidForIssuance`, for the certificate issuance pipeline.
//!
//! # Architecture
//!
//! - [`config`] - TOML service configuration (listen address, resolver
//!   endpoint and transport, timeouts, issuer identity)
//! - [`dns`] - `hickory-resolver` implementation of [`caa_core::CaaLookup`]
//! - [`rpc`] - HTTP/JSON router for `ValidForIssuance`
//! - [`server`] - bootstrap and serve loop

pub mod config;
pub mod dns;
pub mod error;
pub mod rpc;
pub mod server;

// Re-exports for convenience.
pub use config::ServerConfig;
pub use error::SrvError;

/// Result type for caa-srv operations.
pub type Result<T> = std::result::Result<T, SrvError>;
