//! Service runner: builds the checker and serves the RPC surface.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use caa_core::CaaChecker;

use crate::config::ServerConfig;
use crate::dns::HickoryCaaLookup;
use crate::rpc;

/// Build the decision engine described by `config`.
pub fn build_checker(config: &ServerConfig) -> CaaChecker {
    let lookup = HickoryCaaLookup::from_config(config);
    let checker = CaaChecker::new(config.issuer_domain.trim(), Arc::new(lookup));
    match config.check_timeout() {
        Some(deadline) => checker.with_deadline(deadline),
        None => checker,
    }
}

/// Start the service and run until Ctrl-C.
pub async fn run(config: &ServerConfig) -> crate::Result<()> {
    let checker = build_checker(config);
    let app = rpc::router(checker);

    let listener = TcpListener::bind(config.address)
        .await
        .map_err(|e| crate::SrvError::Server(format!("TCP bind {}: {e}", config.address)))?;
    info!(addr = %config.address, "RPC listener bound");

    info!(
        addr = %config.address,
        issuer = %config.issuer_domain,
        resolver = %config.dns_resolver,
        "caa-checker running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::SrvError::Server(format!("serve: {e}")))?;

    info!("caa-checker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_build_checker() {
        let mut config = ServerConfig::new(" ca.example.net ");
        config.check_timeout_secs = 0;
        let checker = build_checker(&config);
        assert_eq!(checker.issuer(), "ca.example.net");
        assert_eq!(checker.deadline(), None);

        config.check_timeout_secs = 5;
        let checker = build_checker(&config);
        assert_eq!(checker.deadline(), Some(Duration::from_secs(5)));
    }
}
