use super::DropReason;
use crate::model::trip::TripRecord;

/// per-row normalization result. inconsistent-but-parseable rows are not
/// decided here; they flow through as Parsed and meet the auditor next.
#[derive(Clone, Debug)]
pub enum RowParse {
    Parsed(TripRecord),
    Dropped(DropReason),
}

impl RowParse {
    pub fn is_parsed(&self) -> bool {
        matches!(self, RowParse::Parsed(_))
    }
}
