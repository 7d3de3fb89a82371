use crate::model::trip::TripRecord;
use crate::util::stats;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::trip::Period;

/// one calendar month of demand for a period. imputed rows are synthetic
/// and marked as such wherever they are written out.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MonthlyAggregate {
    pub period: Period,
    pub year: i32,
    pub month: u32,
    pub trip_count: u64,
    pub mean_fare: f64,
    pub mean_tip_pct: f64,
    pub mean_surcharge: f64,
    pub is_imputed: bool,
}

#[derive(Default)]
struct MonthBucket {
    fares: Vec<f64>,
    tip_pcts: Vec<f64>,
    surcharges: Vec<f64>,
}

/// groups clean records into calendar months by pickup timestamp.
/// refund records are excluded. output is sorted by (year, month).
pub fn monthly_aggregates(period: Period, records: &[TripRecord]) -> Vec<MonthlyAggregate> {
    let mut groups: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for record in records {
        if record.is_refund() {
            continue;
        }
        let key = (record.pickup_ts.year(), record.pickup_ts.month());
        let bucket = groups.entry(key).or_default();
        bucket.fares.push(record.fare_amount);
        if let Some(tip_pct) = record.tip_pct() {
            bucket.tip_pcts.push(tip_pct);
        }
        bucket.surcharges.push(record.congestion_surcharge);
    }
    groups
        .into_iter()
        .map(|((year, month), bucket)| MonthlyAggregate {
            period,
            year,
            month,
            trip_count: bucket.fares.len() as u64,
            mean_fare: stats::mean(&bucket.fares).unwrap_or(0.0),
            mean_tip_pct: stats::mean(&bucket.tip_pcts).unwrap_or(0.0),
            mean_surcharge: stats::mean(&bucket.surcharges).unwrap_or(0.0),
            is_imputed: false,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::trip::TripId;
    use crate::model::zone::ZoneId;
    use crate::util::date_ops::parse_datetime;

    fn trip(ts: &str, fare: f64) -> TripRecord {
        let pickup = parse_datetime(ts).unwrap();
        TripRecord {
            trip_id: TripId::from_parts(0, 0),
            pickup_ts: pickup,
            dropoff_ts: pickup + chrono::TimeDelta::minutes(15),
            pickup_zone_id: ZoneId(1),
            dropoff_zone_id: ZoneId(2),
            passenger_count: 1,
            trip_distance_mi: 2.0,
            fare_amount: fare,
            tip_amount: 2.0,
            congestion_surcharge: 0.75,
            period: Period::Baseline,
            is_imputed: false,
        }
    }

    #[test]
    fn test_monthly_grouping_sorted() {
        let records = vec![
            trip("2024-03-15 08:00:00", 10.0),
            trip("2024-01-02 08:00:00", 20.0),
            trip("2024-03-20 08:00:00", 30.0),
        ];
        let months = monthly_aggregates(Period::Baseline, &records);
        assert_eq!(months.len(), 2);
        assert_eq!((months[0].year, months[0].month), (2024, 1));
        assert_eq!((months[1].year, months[1].month), (2024, 3));
        assert_eq!(months[1].trip_count, 2);
        assert!((months[1].mean_fare - 20.0).abs() < 1e-9);
        assert!(!months[1].is_imputed);
    }
}
