use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// synthetic trip identifier assigned during normalization. composed from
/// the monthly file sequence and the row index within that file, so the
/// same input always yields the same identifiers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripId(pub u64);

impl TripId {
    const ROW_BITS: u64 = 40;

    pub fn from_parts(file_seq: u32, row_index: u64) -> TripId {
        TripId(((file_seq as u64) << Self::ROW_BITS) | (row_index & ((1 << Self::ROW_BITS) - 1)))
    }
}

impl Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
