use super::{TimeBucket, VelocityAggregate};
use crate::model::trip::Period;
use crate::model::zone::ZoneId;
use serde::Serialize;
use std::collections::BTreeMap;

/// before/after speed change for one zone-pair cell. rows exist only for
/// cells that met the minimum trip count in both periods, which keeps the
/// comparison well-defined.
#[derive(Serialize, Clone, Debug)]
pub struct VelocityComparison {
    pub origin_zone_id: ZoneId,
    pub dest_zone_id: ZoneId,
    pub time_bucket: TimeBucket,
    pub baseline_mean_mph: f64,
    pub treatment_mean_mph: f64,
    pub mean_change_pct: f64,
}

/// pairs baseline and treatment aggregates on (origin, dest, hour).
/// inputs are already threshold-filtered per period; the intersection
/// here enforces the both-periods requirement.
pub fn paired_comparison(
    baseline: &[VelocityAggregate],
    treatment: &[VelocityAggregate],
) -> Vec<VelocityComparison> {
    let index: BTreeMap<(ZoneId, ZoneId, TimeBucket), &VelocityAggregate> = baseline
        .iter()
        .filter(|a| a.period == Period::Baseline)
        .map(|a| ((a.origin_zone_id, a.dest_zone_id, a.time_bucket), a))
        .collect();

    treatment
        .iter()
        .filter(|a| a.period == Period::Treatment)
        .filter_map(|t| {
            let b = index.get(&(t.origin_zone_id, t.dest_zone_id, t.time_bucket))?;
            let change = if b.mean_speed_mph != 0.0 {
                (t.mean_speed_mph - b.mean_speed_mph) / b.mean_speed_mph * 100.0
            } else {
                0.0
            };
            Some(VelocityComparison {
                origin_zone_id: t.origin_zone_id,
                dest_zone_id: t.dest_zone_id,
                time_bucket: t.time_bucket,
                baseline_mean_mph: b.mean_speed_mph,
                treatment_mean_mph: t.mean_speed_mph,
                mean_change_pct: change,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn aggregate(
        origin: u32,
        dest: u32,
        hour: u8,
        period: Period,
        mean: f64,
    ) -> VelocityAggregate {
        VelocityAggregate {
            origin_zone_id: ZoneId(origin),
            dest_zone_id: ZoneId(dest),
            period,
            time_bucket: TimeBucket(hour),
            trip_count: 50,
            mean_speed_mph: mean,
            median_speed_mph: mean,
        }
    }

    #[test]
    fn test_only_cells_present_in_both_periods() {
        let baseline = vec![
            aggregate(1, 2, 8, Period::Baseline, 10.0),
            aggregate(1, 3, 8, Period::Baseline, 12.0),
        ];
        let treatment = vec![
            aggregate(1, 2, 8, Period::Treatment, 12.0),
            aggregate(4, 5, 8, Period::Treatment, 20.0),
        ];
        let comparisons = paired_comparison(&baseline, &treatment);
        assert_eq!(comparisons.len(), 1);
        let c = &comparisons[0];
        assert_eq!(c.origin_zone_id, ZoneId(1));
        assert!((c.mean_change_pct - 20.0).abs() < 1e-9);
    }
}
