//! The DNS capability consumed by the checker.

#[cfg(any(test, feature = "test-util"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "test-util"))]
use std::sync::Mutex;

use async_trait::async_trait;

use crate::record::CaaRecord;

/// Opaque error type returned by a lookup capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fetches the CAA records published at exactly one name.
///
/// Implementations must tolerate concurrent calls. An empty list means the
/// name has no CAA records; network, timeout and protocol problems are
/// errors. CNAME/DNAME chasing and any retry policy belong to the
/// implementation.
#[async_trait]
pub trait CaaLookup: Send + Sync {
    async fn lookup_caa(&self, name: &str) -> Result<Vec<CaaRecord>, BoxError>;
}

/// In-memory lookup table for tests.
///
/// Names absent from the table have no records. Every query is appended to
/// [`StaticLookup::queried`], so one instance should live for a single test.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct StaticLookup {
    records: HashMap<String, Vec<CaaRecord>>,
    failures: HashMap<String, String>,
    queried: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-util"))]
impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish records at `name`
    #[must_use]
    pub fn with_records(mut self, name: &str, records: Vec<CaaRecord>) -> Self {
        self.records.insert(name.to_string(), records);
        self
    }

    /// Make lookups of `name` fail with `message`
    #[must_use]
    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    /// Names queried so far, in call order
    pub fn queried(&self) -> Vec<String> {
        self.queried
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl CaaLookup for StaticLookup {
    async fn lookup_caa(&self, name: &str) -> Result<Vec<CaaRecord>, BoxError> {
        if let Ok(mut names) = self.queried.lock() {
            names.push(name.to_string());
        }
        if let Some(message) = self.failures.get(name) {
            return Err(message.clone().into());
        }
        Ok(self.records.get(name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup() {
        let lookup = StaticLookup::new()
            .with_records("example.com", vec![CaaRecord::issue("ca.example.net")])
            .with_failure("broken.example", "SERVFAIL");

        let records = lookup.lookup_caa("example.com").await.unwrap();
        assert_eq!(records, vec![CaaRecord::issue("ca.example.net")]);
        assert!(lookup.lookup_caa("other.example").await.unwrap().is_empty());

        let err = lookup.lookup_caa("broken.example").await.unwrap_err();
        assert_eq!(err.to_string(), "SERVFAIL");

        assert_eq!(
            lookup.queried(),
            vec!["example.com", "other.example", "broken.example"]
        );
    }
}
