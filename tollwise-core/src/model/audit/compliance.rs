use crate::model::run::AnalysisConfig;
use crate::model::trip::TripRecord;
use crate::model::zone::{ZoneId, ZoneRegistry};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// surcharge compliance over treatment-period crossings into the toll
/// zone: of the clean trips that began outside and ended inside after the
/// toll start, how many carried a surcharge, and where do the misses
/// cluster.
#[derive(Serialize, Clone, Debug)]
pub struct ComplianceReport {
    pub total_crossings: u64,
    pub with_surcharge: u64,
    pub without_surcharge: u64,
    pub compliance_rate_pct: f64,
    pub top_missing_pickups: Vec<MissingSurchargePickup>,
}

#[derive(Serialize, Clone, Debug)]
pub struct MissingSurchargePickup {
    pub pickup_zone_id: ZoneId,
    pub missing_count: u64,
}

impl ComplianceReport {
    /// computes the report from audit-clean records. unresolvable zone ids
    /// cannot occur in clean input (the auditor flags them); any that do
    /// appear are skipped.
    pub fn from_clean_records(
        records: &[TripRecord],
        registry: &ZoneRegistry,
        config: &AnalysisConfig,
        top_n: usize,
    ) -> ComplianceReport {
        let mut total = 0u64;
        let mut with_surcharge = 0u64;
        let mut missing_by_pickup: BTreeMap<ZoneId, u64> = BTreeMap::new();

        for record in records {
            if record.is_refund() || record.pickup_ts.date() < config.toll_start_date {
                continue;
            }
            let (pickup_in, dropoff_in) = match (
                registry.in_toll_zone(record.pickup_zone_id),
                registry.in_toll_zone(record.dropoff_zone_id),
            ) {
                (Ok(p), Ok(d)) => (p, d),
                _ => continue,
            };
            if pickup_in || !dropoff_in {
                continue;
            }
            total += 1;
            if record.congestion_surcharge > 0.0 {
                with_surcharge += 1;
            } else {
                *missing_by_pickup.entry(record.pickup_zone_id).or_insert(0) += 1;
            }
        }

        let without_surcharge = total - with_surcharge;
        let compliance_rate_pct = if total > 0 {
            with_surcharge as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let top_missing_pickups = missing_by_pickup
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .take(top_n)
            .map(|(pickup_zone_id, missing_count)| MissingSurchargePickup {
                pickup_zone_id,
                missing_count,
            })
            .collect();

        ComplianceReport {
            total_crossings: total,
            with_surcharge,
            without_surcharge,
            compliance_rate_pct,
            top_missing_pickups,
        }
    }
}
