//! Classification of CAA records by property tag.

use crate::record::{CaaRecord, TAG_IODEF, TAG_ISSUE, TAG_ISSUEWILD};

/// CAA records of one name, grouped by property tag.
///
/// Every input record lands in exactly one bucket, and each bucket keeps the
/// order of the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaaSet {
    issue: Vec<CaaRecord>,
    issuewild: Vec<CaaRecord>,
    iodef: Vec<CaaRecord>,
    unknown: Vec<CaaRecord>,
}

impl CaaSet {
    /// Partition records by tag. Tags match case-sensitively.
    pub fn from_records(records: impl IntoIterator<Item = CaaRecord>) -> Self {
        let mut set = Self::default();
        for record in records {
            let bucket = match record.tag() {
                TAG_ISSUE => &mut set.issue,
                TAG_ISSUEWILD => &mut set.issuewild,
                TAG_IODEF => &mut set.iodef,
                _ => &mut set.unknown,
            };
            bucket.push(record);
        }
        set
    }

    /// `issue` records
    pub fn issue(&self) -> &[CaaRecord] {
        &self.issue
    }

    /// `issuewild` records
    pub fn issuewild(&self) -> &[CaaRecord] {
        &self.issuewild
    }

    /// `iodef` records
    pub fn iodef(&self) -> &[CaaRecord] {
        &self.iodef
    }

    /// Records with any other tag
    pub fn unknown(&self) -> &[CaaRecord] {
        &self.unknown
    }

    /// Total number of records across all buckets
    pub fn len(&self) -> usize {
        self.issue.len() + self.issuewild.len() + self.iodef.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an unrecognized property is flagged critical.
    ///
    /// An issuer that does not understand a critical property must refuse
    /// to issue.
    pub fn has_critical_unknown(&self) -> bool {
        self.unknown.iter().any(CaaRecord::is_critical)
    }
}

impl FromIterator<CaaRecord> for CaaSet {
    fn from_iter<I: IntoIterator<Item = CaaRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
