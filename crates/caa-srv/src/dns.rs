//! CAA lookups through `hickory-resolver`.

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::rdata::caa::{Value, CAA};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::TokioResolver;
use tracing::debug;

use caa_core::{BoxError, CaaLookup, CaaRecord};

use crate::config::{DnsNetwork, ServerConfig};

/// [`CaaLookup`] backed by a single upstream resolver.
pub struct HickoryCaaLookup {
    resolver: TokioResolver,
}

impl HickoryCaaLookup {
    /// Wrap an existing resolver.
    pub const fn new(resolver: TokioResolver) -> Self {
        Self { resolver }
    }

    /// Build a resolver that only talks to the configured endpoint.
    pub fn from_config(config: &ServerConfig) -> Self {
        let protocol = match config.dns_network {
            DnsNetwork::Udp => Protocol::Udp,
            DnsNetwork::Tcp => Protocol::Tcp,
        };

        let mut resolver_config = ResolverConfig::new();
        resolver_config.add_name_server(NameServerConfig::new(config.dns_resolver, protocol));

        let mut opts = ResolverOpts::default();
        opts.timeout = config.dns_timeout();
        opts.attempts = config.dns_attempts;

        let resolver =
            TokioResolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
                .with_options(opts)
                .build();

        debug!(
            resolver = %config.dns_resolver,
            network = ?config.dns_network,
            timeout_secs = config.dns_timeout_secs,
            attempts = config.dns_attempts,
            "built CAA resolver"
        );
        Self::new(resolver)
    }
}

#[async_trait]
impl CaaLookup for HickoryCaaLookup {
    async fn lookup_caa(&self, name: &str) -> Result<Vec<CaaRecord>, BoxError> {
        // Fully qualified so no search domain is ever appended.
        let fqdn = format!("{name}.");

        match self.resolver.lookup(fqdn.as_str(), RecordType::CAA).await {
            Ok(lookup) => {
                let records: Vec<CaaRecord> = lookup
                    .iter()
                    .filter_map(|rdata| match rdata {
                        RData::CAA(caa) => Some(caa_record(caa)),
                        _ => None,
                    })
                    .collect();
                debug!(name, records = records.len(), "CAA lookup answered");
                Ok(records)
            }
            Err(e) if e.is_no_records_found() => {
                debug!(name, "no CAA records");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Convert hickory's parsed rdata back to the flag/tag/value triple.
///
/// The flags byte is passed through whole so the core sees the bit-1 alias.
/// Known tags arrive lower-cased: hickory matches them case-insensitively
/// (RFC 8659 section 4.1), unknown tags keep their wire spelling.
fn caa_record(caa: &CAA) -> CaaRecord {
    CaaRecord::new(caa.flags(), caa.tag().as_str(), render_value(caa.value()))
}

/// Render a value in its presentation grammar, without quotes.
fn render_value(value: &Value) -> String {
    match value {
        Value::Issuer(name, params) => {
            let mut out = name
                .as_ref()
                .map(|n| n.to_string().trim_end_matches('.').to_string())
                .unwrap_or_default();
            for param in params {
                out.push_str("; ");
                out.push_str(&param.to_string());
            }
            if out.is_empty() {
                out.push(';');
            }
            out
        }
        Value::Url(url) => url.to_string(),
        Value::Unknown(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
