mod auditor;
mod compliance;
mod finding;
mod outcome;

pub use auditor::Auditor;
pub use compliance::{ComplianceReport, MissingSurchargePickup};
pub use finding::{AuditFinding, FindingReason};
pub use outcome::{AuditPartition, RowOutcome};
