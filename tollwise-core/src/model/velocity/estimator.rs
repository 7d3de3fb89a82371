use super::{TimeBucket, VelocityAggregate};
use crate::model::trip::TripRecord;
use crate::model::zone::ZoneId;
use crate::util::stats;
use std::collections::BTreeMap;
use uom::si::velocity::mile_per_hour;

/// derives per zone-pair speed distributions from audit-clean records.
/// cells with fewer trips than the minimum count are suppressed rather
/// than reported as high-variance estimates.
pub struct VelocityEstimator {
    min_trip_count: u64,
}

impl VelocityEstimator {
    pub fn new(min_trip_count: u64) -> VelocityEstimator {
        VelocityEstimator { min_trip_count }
    }

    /// groups by (origin, dest, hour) and aggregates derived speeds.
    /// refund records and records without a defined speed are skipped;
    /// clean input should contain neither, this only guards the contract.
    /// the BTreeMap grouping fixes the output ordering.
    pub fn estimate(&self, records: &[TripRecord]) -> Vec<VelocityAggregate> {
        let mut groups: BTreeMap<(ZoneId, ZoneId, TimeBucket), Vec<f64>> = BTreeMap::new();
        let mut period = None;
        for record in records {
            if record.is_refund() {
                continue;
            }
            let speed = match record.derived_speed() {
                Some(s) => s.get::<mile_per_hour>(),
                None => continue,
            };
            period.get_or_insert(record.period);
            groups
                .entry((
                    record.pickup_zone_id,
                    record.dropoff_zone_id,
                    TimeBucket::of(&record.pickup_ts),
                ))
                .or_default()
                .push(speed);
        }
        let period = match period {
            Some(p) => p,
            None => return Vec::new(),
        };

        groups
            .into_iter()
            .filter(|(_, speeds)| speeds.len() as u64 >= self.min_trip_count)
            .filter_map(|((origin, dest, bucket), speeds)| {
                let mean = stats::mean(&speeds)?;
                let median = stats::median(&speeds)?;
                Some(VelocityAggregate {
                    origin_zone_id: origin,
                    dest_zone_id: dest,
                    period,
                    time_bucket: bucket,
                    trip_count: speeds.len() as u64,
                    mean_speed_mph: mean,
                    median_speed_mph: median,
                })
            })
            .collect()
    }
}
