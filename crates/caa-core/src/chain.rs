//! Ancestor chain resolution (RFC 6844 section 4, "Certification Authority
//! Processing").
//!
//! The effective CAA set of a name is the record set of the name itself or,
//! failing that, of its closest ancestor that publishes CAA records. All
//! candidates are queried concurrently, then scanned most specific first.

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::error::{CaaError, Result};
use crate::lookup::CaaLookup;
use crate::set::CaaSet;

/// The name followed by every ancestor, most specific first.
///
/// `"www.example.com"` yields `["www.example.com", "example.com", "com"]`:
/// one entry per label, each with one label fewer than the previous.
pub fn candidate_names(name: &str) -> Vec<String> {
    std::iter::successors(Some(name), |&n| n.split_once('.').map(|(_, parent)| parent))
        .map(str::to_string)
        .collect()
}

/// Find the effective CAA set for `name`.
///
/// `name` must already be lower-cased without a trailing dot. Returns
/// `Ok(None)` when no candidate publishes CAA records.
///
/// Every lookup runs to completion before the scan starts, so the outcome
/// does not depend on completion order: a failure on a candidate at or above
/// the first non-empty one is returned, failures below it are ignored.
pub async fn resolve_caa_set(lookup: &dyn CaaLookup, name: &str) -> Result<Option<CaaSet>> {
    let candidates = candidate_names(name);
    debug!(name, candidates = candidates.len(), "looking up CAA ancestor chain");

    let results = join_all(candidates.iter().map(|candidate| lookup.lookup_caa(candidate))).await;

    for (candidate, result) in candidates.into_iter().zip(results) {
        match result {
            Err(source) => {
                warn!(name, candidate = %candidate, error = %source, "CAA lookup failed");
                return Err(CaaError::Lookup {
                    name: candidate,
                    source,
                });
            }
            Ok(records) if !records.is_empty() => {
                debug!(
                    name,
                    candidate = %candidate,
                    records = records.len(),
                    "selected CAA record set"
                );
                return Ok(Some(CaaSet::from_records(records)));
            }
            Ok(_) => {}
        }
    }

    debug!(name, "no CAA records in ancestor chain");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::lookup::{BoxError, StaticLookup};
    use crate::record::CaaRecord;

    #[test]
    fn test_candidate_names() {
        assert_eq!(
            candidate_names("www.example.com"),
            vec!["www.example.com", "example.com", "com"]
        );
        assert_eq!(
            candidate_names("a.b.c.example.org"),
            vec!["a.b.c.example.org", "b.c.example.org", "c.example.org", "example.org", "org"]
        );
    }

    #[test]
    fn test_candidate_names_single_label() {
        assert_eq!(candidate_names("localhost"), vec!["localhost"]);
    }

    #[test]
    fn test_candidate_names_drop_one_label_each() {
        let names = candidate_names("x.y.z.example.net");
        assert_eq!(names.len(), 5);
        for pair in names.windows(2) {
            assert!(pair[0].ends_with(&format!(".{}", pair[1])));
        }
    }

    #[tokio::test]
    async fn test_queries_each_ancestor() {
        let lookup = StaticLookup::new();
        let set = resolve_caa_set(&lookup, "www.example.com").await.unwrap();
        assert!(set.is_none());

        let mut queried = lookup.queried();
        queried.sort();
        assert_eq!(queried, vec!["com", "example.com", "www.example.com"]);
    }

    #[tokio::test]
    async fn test_ancestor_records_used() {
        let lookup = StaticLookup::new()
            .with_records("example.com", vec![CaaRecord::issue("cax.com")]);
        let set = resolve_caa_set(&lookup, "www.example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(set.issue(), &[CaaRecord::issue("cax.com")]);
    }

    #[tokio::test]
    async fn test_most_specific_wins() {
        let lookup = StaticLookup::new()
            .with_records("www.example.com", vec![CaaRecord::issue("near.example")])
            .with_records("example.com", vec![CaaRecord::issue("far.example")]);
        let set = resolve_caa_set(&lookup, "www.example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(set.issue(), &[CaaRecord::issue("near.example")]);
    }

    #[tokio::test]
    async fn test_error_before_match_surfaces() {
        let lookup = StaticLookup::new()
            .with_failure("www.example.com", "SERVFAIL")
            .with_records("example.com", vec![CaaRecord::issue("cax.com")]);
        let err = resolve_caa_set(&lookup, "www.example.com").await.unwrap_err();
        match err {
            CaaError::Lookup { name, source } => {
                assert_eq!(name, "www.example.com");
                assert_eq!(source.to_string(), "SERVFAIL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_error_between_empty_and_match_surfaces() {
        let lookup = StaticLookup::new()
            .with_failure("example.com", "REFUSED")
            .with_records("com", vec![CaaRecord::issue("cax.com")]);
        let err = resolve_caa_set(&lookup, "www.example.com").await.unwrap_err();
        assert!(matches!(err, CaaError::Lookup { ref name, .. } if name == "example.com"));
    }

    #[tokio::test]
    async fn test_error_after_match_ignored() {
        let lookup = StaticLookup::new()
            .with_records("example.com", vec![CaaRecord::issue("cax.com")])
            .with_failure("com", "timed out");
        let set = resolve_caa_set(&lookup, "www.example.com").await.unwrap();
        assert!(set.is_some());
        // The failing sibling was still queried.
        assert!(lookup.queried().contains(&"com".to_string()));
    }

    /// Holds every lookup until all candidates are in flight.
    struct BarrierLookup {
        barrier: Barrier,
        inner: StaticLookup,
    }

    #[async_trait]
    impl CaaLookup for BarrierLookup {
        async fn lookup_caa(&self, name: &str) -> std::result::Result<Vec<CaaRecord>, BoxError> {
            self.barrier.wait().await;
            self.inner.lookup_caa(name).await
        }
    }

    #[tokio::test]
    async fn test_lookups_run_concurrently() {
        let lookup = BarrierLookup {
            barrier: Barrier::new(4),
            inner: StaticLookup::new().with_records("b.example.org", vec![CaaRecord::issue("ca")]),
        };
        let set = tokio::time::timeout(
            Duration::from_secs(5),
            resolve_caa_set(&lookup, "a.b.example.org"),
        )
        .await
        .expect("lookups were serialized")
        .unwrap()
        .unwrap();
        assert_eq!(set.issue().len(), 1);
    }

    /// Most specific candidate fails slowly, the parent answers at once.
    struct SlowFailureLookup;

    #[async_trait]
    impl CaaLookup for SlowFailureLookup {
        async fn lookup_caa(&self, name: &str) -> std::result::Result<Vec<CaaRecord>, BoxError> {
            if name == "www.example.com" {
                tokio::time::sleep(Duration::from_millis(50)).await;
                return Err("network unreachable".into());
            }
            Ok(vec![CaaRecord::issue("cax.com")])
        }
    }

    #[tokio::test]
    async fn test_precedence_independent_of_completion_order() {
        let result = resolve_caa_set(&SlowFailureLookup, "www.example.com").await;
        tokio_test::assert_err!(result);
    }
}
