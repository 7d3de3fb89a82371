use super::{Period, TripId};
use crate::model::zone::ZoneId;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uom::si::f64::Velocity;

/// canonical trip record produced by the normalizer. timestamps are
/// UTC-normalized upstream; zone identifiers are foreign keys into the
/// zone registry and may be unresolvable (surfaced later as an
/// out-of-bounds audit finding, never as a failure here).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TripRecord {
    /// synthetic identifier assigned during normalization
    pub trip_id: TripId,
    pub pickup_ts: NaiveDateTime,
    pub dropoff_ts: NaiveDateTime,
    pub pickup_zone_id: ZoneId,
    pub dropoff_zone_id: ZoneId,
    pub passenger_count: u32,
    pub trip_distance_mi: f64,
    pub fare_amount: f64,
    pub tip_amount: f64,
    pub congestion_surcharge: f64,
    pub period: Period,
    /// true only for rows synthesized by the period imputer
    pub is_imputed: bool,
}

impl TripRecord {
    pub fn duration(&self) -> TimeDelta {
        self.dropoff_ts - self.pickup_ts
    }

    /// average speed over the trip, derived from distance and duration.
    /// None when the duration is non-positive, where a speed is undefined.
    pub fn derived_speed(&self) -> Option<Velocity> {
        let seconds = self.duration().num_seconds();
        if seconds <= 0 {
            return None;
        }
        let hours = seconds as f64 / 3600.0;
        Some(Velocity::new::<uom::si::velocity::mile_per_hour>(
            self.trip_distance_mi / hours,
        ))
    }

    /// tip as a percentage of the fare. None when the fare is non-positive.
    pub fn tip_pct(&self) -> Option<f64> {
        if self.fare_amount <= 0.0 {
            return None;
        }
        Some(self.tip_amount / self.fare_amount * 100.0)
    }

    /// surcharge as a percentage of the fare. None when the fare is
    /// non-positive.
    pub fn surcharge_pct(&self) -> Option<f64> {
        if self.fare_amount <= 0.0 {
            return None;
        }
        Some(self.congestion_surcharge / self.fare_amount * 100.0)
    }

    /// refund records carry negative monetary fields. they are retained in
    /// the normalized table but excluded from every aggregate.
    pub fn is_refund(&self) -> bool {
        self.fare_amount < 0.0 || self.tip_amount < 0.0 || self.congestion_surcharge < 0.0
    }
}
