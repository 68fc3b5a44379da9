//! Authorization decision engine.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chain::resolve_caa_set;
use crate::error::{CaaError, Result};
use crate::lookup::CaaLookup;
use crate::record::CaaRecord;

/// Decides whether one issuer identity may issue for a domain name.
///
/// The issuer identity and lookup capability are fixed at construction.
/// A checker is cheap to clone and safe to share across tasks; every
/// decision builds its own candidate list and record set.
#[derive(Clone)]
pub struct CaaChecker {
    issuer: String,
    lookup: Arc<dyn CaaLookup>,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for CaaChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaaChecker")
            .field("issuer", &self.issuer)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl CaaChecker {
    /// Create a checker for `issuer` (the domain it uses in CAA `issue` values)
    pub fn new(issuer: impl Into<String>, lookup: Arc<dyn CaaLookup>) -> Self {
        Self {
            issuer: issuer.into(),
            lookup,
            deadline: None,
        }
    }

    /// Bound every decision by `deadline`.
    ///
    /// When it elapses, outstanding lookups are dropped and the decision
    /// fails with [`CaaError::DeadlineExceeded`].
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Configured issuer identity
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Decide whether the issuer may issue for `name`.
    ///
    /// `Ok(true)` when no CAA records apply or the issuer is listed,
    /// `Ok(false)` when issuance is restricted to others or a critical
    /// unknown property is present. An `Err` is indeterminate.
    pub async fn check_caa(&self, name: &str) -> Result<bool> {
        let Some(deadline) = self.deadline else {
            return self.decide(name).await;
        };
        tokio::time::timeout(deadline, self.decide(name))
            .await
            .unwrap_or_else(|_| {
                warn!(name, ?deadline, "CAA check deadline exceeded");
                Err(CaaError::DeadlineExceeded(deadline))
            })
    }

    async fn decide(&self, name: &str) -> Result<bool> {
        let name = normalize_name(name)?;

        let Some(set) = resolve_caa_set(self.lookup.as_ref(), &name).await? else {
            debug!(name = %name, "no CAA records, issuance unrestricted");
            return Ok(true);
        };

        if set.has_critical_unknown() {
            info!(name = %name, "CAA set has critical unknown property, refusing");
            return Ok(false);
        }

        // Only `issue` is consulted; wildcard names are not treated specially.
        if set.issue().is_empty() {
            debug!(name = %name, "no issue records in CAA set, issuance unrestricted");
            return Ok(true);
        }

        // A ";" value extracts to "" and never matches, denying every issuer.
        let authorized = set
            .issue()
            .iter()
            .map(CaaRecord::issuer_domain)
            .any(|domain| domain == self.issuer);

        info!(
            name = %name,
            issuer = %self.issuer,
            authorized,
            "CAA decision"
        );
        Ok(authorized)
    }
}

/// Lower-case and strip trailing dots.
fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(CaaError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_lowercase())
}
