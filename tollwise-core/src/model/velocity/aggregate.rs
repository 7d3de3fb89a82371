use super::TimeBucket;
use crate::model::trip::Period;
use crate::model::zone::ZoneId;
use serde::Serialize;

/// per zone-pair, per-period, per-hour speed aggregate. derived data,
/// recomputed from the clean dataset on every run.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct VelocityAggregate {
    pub origin_zone_id: ZoneId,
    pub dest_zone_id: ZoneId,
    pub period: Period,
    pub time_bucket: TimeBucket,
    pub trip_count: u64,
    pub mean_speed_mph: f64,
    pub median_speed_mph: f64,
}
