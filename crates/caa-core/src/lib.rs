//! CAA issuance authorization decisions.
//!
//! Answers one question for a certificate issuance pipeline: may the
//! configured issuer issue for this domain name, according to the CAA
//! records (RFC 6844) published on the name or its closest ancestor?
//!
//! # Architecture
//!
//! ```text
//! CaaChecker::check_caa(name)
//!   -> chain::resolve_caa_set()       one concurrent lookup per ancestor
//!        -> CaaLookup::lookup_caa()   external DNS capability
//!   -> CaaSet::from_records()         bucket by tag
//!   -> CaaSet::has_critical_unknown() veto
//!   -> issuer::extract_issuer_domain() on each `issue` record
//! ```
//!
//! A decision is a definite `bool` or an error; lookup failures are never
//! turned into `true` or `false`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use caa_core::CaaChecker;
//!
//! let checker = CaaChecker::new("letsencrypt.org", Arc::new(resolver));
//! if checker.check_caa("www.example.com").await? {
//!     // proceed with issuance
//! }
//! ```

pub mod chain;
pub mod checker;
mod error;
pub mod issuer;
pub mod lookup;
pub mod record;
pub mod set;

pub use checker::CaaChecker;
pub use error::{CaaError, Result};
pub use lookup::{BoxError, CaaLookup};
pub use record::CaaRecord;
pub use set::CaaSet;
