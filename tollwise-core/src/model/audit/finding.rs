use crate::model::trip::{TripId, TripRecord};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// why a trip record was flagged as a ghost. rules are independently
/// evaluable; one record may carry several findings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FindingReason {
    NegativeDuration,
    ZeroDistanceNonzeroFare,
    ImplausibleSpeed,
    SurchargeMismatch,
    OutOfBoundsZone,
}

impl Display for FindingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FindingReason::NegativeDuration => "negative_duration",
            FindingReason::ZeroDistanceNonzeroFare => "zero_distance_nonzero_fare",
            FindingReason::ImplausibleSpeed => "implausible_speed",
            FindingReason::SurchargeMismatch => "surcharge_mismatch",
            FindingReason::OutOfBoundsZone => "out_of_bounds_zone",
        };
        write!(f, "{label}")
    }
}

/// one audit log entry. append-only: never mutated after creation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuditFinding {
    pub trip_id: TripId,
    pub reason: FindingReason,
    /// the triggering record as it looked when flagged, kept for inspection
    pub raw_snapshot: serde_json::Value,
}

impl AuditFinding {
    pub fn new(record: &TripRecord, reason: FindingReason) -> AuditFinding {
        AuditFinding {
            trip_id: record.trip_id,
            reason,
            raw_snapshot: serde_json::to_value(record).unwrap_or(serde_json::Value::Null),
        }
    }
}
