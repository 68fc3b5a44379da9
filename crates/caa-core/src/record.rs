//! CAA resource record values.

/// The IETF critical flag (bit with significance 128).
pub const FLAG_CRITICAL: u8 = 0b1000_0000;

/// Bit with significance 1, widely misused as the critical flag.
///
/// Enough CAA publishers set this bit meaning "critical" that it must be
/// honoured as an alias.
pub const FLAG_CRITICAL_ALIAS: u8 = 0b0000_0001;

/// Property tag authorizing an issuer for non-wildcard names.
pub const TAG_ISSUE: &str = "issue";

/// Property tag authorizing an issuer for wildcard names.
pub const TAG_ISSUEWILD: &str = "issuewild";

/// Property tag naming an incident report URL.
pub const TAG_IODEF: &str = "iodef";

/// A single CAA record as returned by the DNS capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaaRecord {
    flag: u8,
    tag: String,
    value: String,
}

impl CaaRecord {
    /// Create a record from its raw parts
    pub fn new(flag: u8, tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag,
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Non-critical `issue` record
    pub fn issue(value: impl Into<String>) -> Self {
        Self::new(0, TAG_ISSUE, value)
    }

    /// Non-critical `issuewild` record
    pub fn issuewild(value: impl Into<String>) -> Self {
        Self::new(0, TAG_ISSUEWILD, value)
    }

    /// Non-critical `iodef` record
    pub fn iodef(value: impl Into<String>) -> Self {
        Self::new(0, TAG_IODEF, value)
    }

    /// Flags byte
    pub const fn flag(&self) -> u8 {
        self.flag
    }

    /// Property tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Property value, grammar depends on the tag
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the critical bit, or its common alias, is set.
    ///
    /// All other flag bits are reserved and ignored.
    pub const fn is_critical(&self) -> bool {
        self.flag & (FLAG_CRITICAL | FLAG_CRITICAL_ALIAS) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_bits() {
        assert!(CaaRecord::new(128, "tbs", "x").is_critical());
        assert!(CaaRecord::new(1, "tbs", "x").is_critical());
        assert!(CaaRecord::new(129, "tbs", "x").is_critical());
        assert!(!CaaRecord::new(0, "tbs", "x").is_critical());
        // Reserved bits are not critical.
        assert!(!CaaRecord::new(0b0111_1110, "tbs", "x").is_critical());
    }

    #[test]
    fn test_constructors() {
        let record = CaaRecord::issue("ca.example.net");
        assert_eq!(record.tag(), "issue");
        assert_eq!(record.value(), "ca.example.net");
        assert_eq!(record.flag(), 0);
        assert_eq!(CaaRecord::issuewild(";").tag(), "issuewild");
        assert_eq!(CaaRecord::iodef("mailto:x@example.com").tag(), "iodef");
    }
}
