use crate::model::trip::TripRecord;
use crate::util::stats;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// per-day demand figures from audit-clean records, keyed by pickup date.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyTripAggregate {
    pub date: NaiveDate,
    pub trip_count: u64,
    pub mean_tip_pct: f64,
    pub mean_surcharge_pct: f64,
}

#[derive(Default)]
struct DayBucket {
    trips: u64,
    tip_pcts: Vec<f64>,
    surcharge_pcts: Vec<f64>,
}

/// groups clean records by pickup date. refund records are excluded.
pub fn daily_aggregates(records: &[TripRecord]) -> Vec<DailyTripAggregate> {
    let mut groups: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for record in records {
        if record.is_refund() {
            continue;
        }
        let bucket = groups.entry(record.pickup_ts.date()).or_default();
        bucket.trips += 1;
        if let Some(tip_pct) = record.tip_pct() {
            bucket.tip_pcts.push(tip_pct);
        }
        if let Some(surcharge_pct) = record.surcharge_pct() {
            bucket.surcharge_pcts.push(surcharge_pct);
        }
    }
    groups
        .into_iter()
        .map(|(date, bucket)| DailyTripAggregate {
            date,
            trip_count: bucket.trips,
            mean_tip_pct: stats::mean(&bucket.tip_pcts).unwrap_or(0.0),
            mean_surcharge_pct: stats::mean(&bucket.surcharge_pcts).unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::trip::{Period, TripId, TripRecord};
    use crate::model::zone::ZoneId;
    use crate::util::date_ops::parse_datetime;

    fn trip(ts: &str, fare: f64, tip: f64) -> TripRecord {
        let pickup = parse_datetime(ts).unwrap();
        TripRecord {
            trip_id: TripId::from_parts(0, 0),
            pickup_ts: pickup,
            dropoff_ts: pickup + chrono::TimeDelta::minutes(20),
            pickup_zone_id: ZoneId(1),
            dropoff_zone_id: ZoneId(2),
            passenger_count: 1,
            trip_distance_mi: 3.0,
            fare_amount: fare,
            tip_amount: tip,
            congestion_surcharge: 0.0,
            period: Period::Baseline,
            is_imputed: false,
        }
    }

    #[test]
    fn test_daily_grouping() {
        let records = vec![
            trip("2024-03-01 08:00:00", 10.0, 2.0),
            trip("2024-03-01 19:00:00", 20.0, 2.0),
            trip("2024-03-02 08:00:00", 10.0, 1.0),
        ];
        let days = daily_aggregates(&records);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].trip_count, 2);
        // tip pcts: 20% and 10%
        assert!((days[0].mean_tip_pct - 15.0).abs() < 1e-9);
        assert_eq!(days[1].trip_count, 1);
    }

    #[test]
    fn test_refunds_do_not_count_toward_demand() {
        let mut refund = trip("2024-03-01 08:00:00", -10.0, 0.0);
        refund.fare_amount = -10.0;
        let records = vec![trip("2024-03-01 08:00:00", 10.0, 1.0), refund];
        let days = daily_aggregates(&records);
        assert_eq!(days[0].trip_count, 1);
    }
}
