use super::DropReason;
use indexmap::IndexMap;
use serde::Serialize;

/// drop accounting for one normalization pass. drops are counted per
/// reason and reported, never silently discarded.
#[derive(Serialize, Clone, Debug, Default)]
pub struct NormalizationSummary {
    pub rows_in: u64,
    pub rows_parsed: u64,
    pub rows_dropped: u64,
    pub drops_by_reason: IndexMap<String, u64>,
}

impl NormalizationSummary {
    pub fn record_parsed(&mut self) {
        self.rows_in += 1;
        self.rows_parsed += 1;
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        self.rows_in += 1;
        self.rows_dropped += 1;
        *self.drops_by_reason.entry(reason.to_string()).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &NormalizationSummary) {
        self.rows_in += other.rows_in;
        self.rows_parsed += other.rows_parsed;
        self.rows_dropped += other.rows_dropped;
        for (reason, count) in other.drops_by_reason.iter() {
            *self.drops_by_reason.entry(reason.clone()).or_insert(0) += count;
        }
    }
}
