use std::time::Duration;

use thiserror::Error;

use crate::lookup::BoxError;

/// Result type alias for CAA decisions
pub type Result<T> = std::result::Result<T, CaaError>;

/// Errors that prevent a definite authorization decision.
///
/// None of these mean "authorized" or "not authorized": the caller must treat
/// them as indeterminate.
#[derive(Error, Debug)]
pub enum CaaError {
    /// The DNS capability failed for one of the candidate names
    #[error("CAA lookup failed for {name}: {source}")]
    Lookup {
        /// Candidate name whose lookup failed
        name: String,
        /// Error reported by the lookup capability, unchanged
        #[source]
        source: BoxError,
    },

    /// The decision deadline elapsed before all lookups completed
    #[error("CAA check exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    /// The domain name cannot be checked
    #[error("invalid domain name: {0:?}")]
    InvalidName(String),
}
