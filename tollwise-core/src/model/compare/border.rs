use crate::model::trip::TripRecord;
use crate::model::zone::ZoneId;
use serde::Serialize;
use std::collections::BTreeMap;

/// change in drop-off demand at one zone bordering the toll boundary.
#[derive(Serialize, Clone, Debug)]
pub struct BorderZoneEffect {
    pub zone_id: ZoneId,
    pub baseline_dropoffs: u64,
    pub treatment_dropoffs: u64,
    /// None when the baseline count is too small for a stable percentage
    pub dropoff_change_pct: Option<f64>,
}

const MIN_STABLE_BASE: u64 = 10;
const CHANGE_PCT_FLOOR: f64 = -100.0;
const CHANGE_PCT_CEILING: f64 = 500.0;

fn dropoff_counts(records: &[TripRecord], zone_ids: &[ZoneId]) -> BTreeMap<ZoneId, u64> {
    let mut counts: BTreeMap<ZoneId, u64> = zone_ids.iter().map(|z| (*z, 0)).collect();
    for record in records {
        if record.is_refund() {
            continue;
        }
        if let Some(count) = counts.get_mut(&record.dropoff_zone_id) {
            *count += 1;
        }
    }
    counts
}

/// drop-off count change per border zone, baseline vs treatment. small
/// baselines produce no percentage; large swings are clamped so a handful
/// of trips cannot dominate the table.
pub fn border_effect(
    border_zone_ids: &[u32],
    baseline: &[TripRecord],
    treatment: &[TripRecord],
) -> Vec<BorderZoneEffect> {
    let zone_ids: Vec<ZoneId> = border_zone_ids.iter().map(|id| ZoneId(*id)).collect();
    let baseline_counts = dropoff_counts(baseline, &zone_ids);
    let treatment_counts = dropoff_counts(treatment, &zone_ids);

    zone_ids
        .iter()
        .map(|zone_id| {
            let base = baseline_counts.get(zone_id).copied().unwrap_or(0);
            let after = treatment_counts.get(zone_id).copied().unwrap_or(0);
            let change = if base > MIN_STABLE_BASE {
                let pct = (after as f64 - base as f64) / base as f64 * 100.0;
                Some(pct.clamp(CHANGE_PCT_FLOOR, CHANGE_PCT_CEILING))
            } else {
                None
            };
            BorderZoneEffect {
                zone_id: *zone_id,
                baseline_dropoffs: base,
                treatment_dropoffs: after,
                dropoff_change_pct: change,
            }
        })
        .collect()
}
