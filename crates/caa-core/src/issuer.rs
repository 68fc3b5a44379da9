//! Issuer domain extraction from `issue`/`issuewild` values.
//!
//! The value grammar is a domain name followed by zero or more `;`-separated
//! `key=value` parameters, e.g. `"ca.example.net; account=230123"`.

use crate::record::CaaRecord;

const BLANKS: &[char] = &[' ', '\t'];

/// Extract the issuer domain from an issuer-grammar value.
///
/// Returns `""` for an unsatisfiable value such as `";"`. Parameters are
/// discarded: none are treated as critical.
pub fn extract_issuer_domain(value: &str) -> &str {
    let value = value.trim_matches(BLANKS);
    match value.split_once(';') {
        Some((domain, _params)) => domain.trim_matches(BLANKS),
        None => value,
    }
}

impl CaaRecord {
    /// Issuer domain of this record's value, see [`extract_issuer_domain`]
    pub fn issuer_domain(&self) -> &str {
        extract_issuer_domain(self.value())
    }
}
