use crate::model::trip::TripRecord;
use crate::model::zone::ZoneRegistry;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// toll-zone trip volume for one calendar quarter, baseline vs treatment.
#[derive(Serialize, Clone, Debug)]
pub struct QuarterlyVolume {
    pub quarter: u32,
    pub baseline_trips: u64,
    pub treatment_trips: u64,
    pub change_pct: Option<f64>,
}

fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// counts trips with a toll-zone endpoint per quarter. unresolvable zone
/// ids cannot occur in clean input (the auditor flags them); any that do
/// appear are skipped.
fn toll_zone_counts(registry: &ZoneRegistry, records: &[TripRecord]) -> BTreeMap<u32, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if record.is_refund() {
            continue;
        }
        let touches = registry.in_toll_zone(record.pickup_zone_id).unwrap_or(false)
            || registry
                .in_toll_zone(record.dropoff_zone_id)
                .unwrap_or(false);
        if touches {
            *counts.entry(quarter_of(record.pickup_ts.month())).or_insert(0) += 1;
        }
    }
    counts
}

/// per-quarter toll-zone volume change. all four quarters are listed even
/// when one period has no trips in a quarter.
pub fn quarterly_volumes(
    registry: &ZoneRegistry,
    baseline: &[TripRecord],
    treatment: &[TripRecord],
) -> Vec<QuarterlyVolume> {
    let baseline_counts = toll_zone_counts(registry, baseline);
    let treatment_counts = toll_zone_counts(registry, treatment);

    (1..=4)
        .map(|quarter| {
            let base = baseline_counts.get(&quarter).copied().unwrap_or(0);
            let after = treatment_counts.get(&quarter).copied().unwrap_or(0);
            let change_pct = if base > 0 {
                Some((after as f64 - base as f64) / base as f64 * 100.0)
            } else {
                None
            };
            QuarterlyVolume {
                quarter,
                baseline_trips: base,
                treatment_trips: after,
                change_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::trip::{Period, TripId};
    use crate::model::zone::{Zone, ZoneId};
    use crate::util::date_ops::parse_datetime;
    use geo_types::polygon;

    fn registry() -> ZoneRegistry {
        let inside = polygon![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)
        ];
        let outside = polygon![
            (x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0), (x: 5.0, y: 6.0)
        ];
        ZoneRegistry::from_zones(vec![
            Zone {
                zone_id: ZoneId(1),
                name: "Inside".to_string(),
                borough: "Manhattan".to_string(),
                polygon: inside.into(),
                in_toll_zone: true,
            },
            Zone {
                zone_id: ZoneId(2),
                name: "Outside".to_string(),
                borough: "Queens".to_string(),
                polygon: outside.into(),
                in_toll_zone: false,
            },
        ])
    }

    fn trip(ts: &str, pickup: u32, dropoff: u32, period: Period) -> TripRecord {
        let pickup_ts = parse_datetime(ts).unwrap();
        TripRecord {
            trip_id: TripId::from_parts(0, 0),
            pickup_ts,
            dropoff_ts: pickup_ts + chrono::TimeDelta::minutes(12),
            pickup_zone_id: ZoneId(pickup),
            dropoff_zone_id: ZoneId(dropoff),
            passenger_count: 1,
            trip_distance_mi: 2.0,
            fare_amount: 10.0,
            tip_amount: 1.0,
            congestion_surcharge: 0.0,
            period,
            is_imputed: false,
        }
    }

    #[test]
    fn test_quarterly_change() {
        let registry = registry();
        let baseline = vec![
            trip("2024-02-01 08:00:00", 1, 2, Period::Baseline),
            trip("2024-02-10 08:00:00", 2, 1, Period::Baseline),
            // fully outside the zone, never counted
            trip("2024-02-15 08:00:00", 2, 2, Period::Baseline),
        ];
        let treatment = vec![trip("2025-03-01 08:00:00", 1, 2, Period::Treatment)];
        let volumes = quarterly_volumes(&registry, &baseline, &treatment);
        assert_eq!(volumes.len(), 4);
        let q1 = &volumes[0];
        assert_eq!(q1.quarter, 1);
        assert_eq!(q1.baseline_trips, 2);
        assert_eq!(q1.treatment_trips, 1);
        assert!((q1.change_pct.unwrap() - (-50.0)).abs() < 1e-9);
        // no baseline trips in q2, so no percentage
        assert_eq!(volumes[1].change_pct, None);
    }
}
