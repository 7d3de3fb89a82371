use crate::model::audit::FindingReason;
use crate::model::normalize::NormalizationSummary;
use crate::model::trip::Period;
use indexmap::IndexMap;
use serde::Serialize;

/// run-level accounting emitted at the end of every pipeline run, partial
/// or not. counters only ever increase; nothing here is load-bearing for
/// the analysis itself.
#[derive(Serialize, Clone, Debug, Default)]
pub struct RunSummary {
    pub rows_in: u64,
    pub rows_dropped: u64,
    pub drops_by_reason: IndexMap<String, u64>,
    pub rows_flagged: u64,
    pub findings_by_reason: IndexMap<String, u64>,
    pub refund_rows: u64,
    pub clean_rows: u64,
    pub velocity_aggregates: u64,
    pub velocity_comparisons: u64,
    pub weather_rows: u64,
    pub weather_gap_days: u64,
    /// "{period}-{year}-{month}" labels for months filled by the imputer
    pub months_imputed: Vec<String>,
    /// periods whose ingest failed structurally; the run continued without them
    pub periods_failed: Vec<String>,
}

impl RunSummary {
    pub fn absorb_normalization(&mut self, summary: &NormalizationSummary) {
        self.rows_in += summary.rows_in;
        self.rows_dropped += summary.rows_dropped;
        for (reason, count) in summary.drops_by_reason.iter() {
            *self.drops_by_reason.entry(reason.clone()).or_insert(0) += count;
        }
    }

    pub fn record_finding(&mut self, reason: FindingReason) {
        *self
            .findings_by_reason
            .entry(reason.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_flagged_rows(&mut self, count: u64) {
        self.rows_flagged += count;
    }

    pub fn record_imputed_month(&mut self, period: Period, year: i32, month: u32) {
        self.months_imputed
            .push(format!("{period}-{year}-{month:02}"));
    }

    pub fn record_period_failure(&mut self, period: Period) {
        self.periods_failed.push(period.to_string());
    }
}
