use super::AuditFinding;
use crate::model::trip::TripRecord;

/// tagged per-row audit result. modeling the "flag, don't raise" rule as
/// a value keeps the auditor a pure map over rows.
#[derive(Clone, Debug)]
pub enum RowOutcome {
    Clean(TripRecord),
    Flagged(TripRecord, Vec<AuditFinding>),
}

impl RowOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, RowOutcome::Clean(_))
    }
}

/// partition of an audited batch. flagged records are excluded from all
/// downstream aggregates but retained alongside their findings.
#[derive(Clone, Debug, Default)]
pub struct AuditPartition {
    pub clean: Vec<TripRecord>,
    pub flagged: Vec<TripRecord>,
    pub findings: Vec<AuditFinding>,
}
