use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// why a raw row was dropped during normalization. only mandatory fields
/// can cause a drop; everything else is coerced and left for the auditor.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    UnparseablePickupTimestamp,
    UnparseableDropoffTimestamp,
    UnparseablePickupZone,
    UnparseableDropoffZone,
}

impl Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DropReason::UnparseablePickupTimestamp => "unparseable_pickup_timestamp",
            DropReason::UnparseableDropoffTimestamp => "unparseable_dropoff_timestamp",
            DropReason::UnparseablePickupZone => "unparseable_pickup_zone",
            DropReason::UnparseableDropoffZone => "unparseable_dropoff_zone",
        };
        write!(f, "{label}")
    }
}
