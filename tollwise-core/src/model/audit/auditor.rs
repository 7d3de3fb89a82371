use super::{AuditFinding, AuditPartition, FindingReason, RowOutcome};
use crate::model::run::AnalysisConfig;
use crate::model::trip::{Period, TripRecord};
use crate::model::zone::ZoneRegistry;
use rayon::prelude::*;
use uom::si::velocity::mile_per_hour;

/// ghost-trip detector. catches records whose combination of fields is
/// implausible even though each field parsed on its own. pure and
/// deterministic: identical input always yields identical findings.
pub struct Auditor<'a> {
    registry: &'a ZoneRegistry,
    config: &'a AnalysisConfig,
}

impl<'a> Auditor<'a> {
    pub fn new(registry: &'a ZoneRegistry, config: &'a AnalysisConfig) -> Auditor<'a> {
        Auditor { registry, config }
    }

    pub fn audit(&self, record: &TripRecord) -> RowOutcome {
        let mut findings: Vec<AuditFinding> = Vec::new();

        if record.dropoff_ts <= record.pickup_ts {
            findings.push(AuditFinding::new(record, FindingReason::NegativeDuration));
        }

        if record.trip_distance_mi == 0.0 && record.fare_amount > self.config.minimum_base_fare {
            findings.push(AuditFinding::new(
                record,
                FindingReason::ZeroDistanceNonzeroFare,
            ));
        }

        if self.implausible_speed(record) {
            findings.push(AuditFinding::new(record, FindingReason::ImplausibleSpeed));
        }

        // unknown zone ids recover locally as findings, never as failures
        let pickup_in = self.registry.in_toll_zone(record.pickup_zone_id);
        let dropoff_in = self.registry.in_toll_zone(record.dropoff_zone_id);
        if pickup_in.is_err() || dropoff_in.is_err() {
            findings.push(AuditFinding::new(record, FindingReason::OutOfBoundsZone));
        }

        if let (Ok(pickup_in), Ok(dropoff_in)) = (pickup_in, dropoff_in) {
            if self.surcharge_mismatch(record, pickup_in, dropoff_in) {
                findings.push(AuditFinding::new(record, FindingReason::SurchargeMismatch));
            }
        }

        if findings.is_empty() {
            RowOutcome::Clean(record.clone())
        } else {
            RowOutcome::Flagged(record.clone(), findings)
        }
    }

    /// audits a batch in parallel. the order-preserving collect keeps the
    /// partition byte-identical across runs and thread counts.
    pub fn audit_all(&self, records: &[TripRecord]) -> AuditPartition {
        let outcomes: Vec<RowOutcome> = records.par_iter().map(|r| self.audit(r)).collect();
        let mut partition = AuditPartition::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Clean(record) => partition.clean.push(record),
                RowOutcome::Flagged(record, findings) => {
                    partition.flagged.push(record);
                    partition.findings.extend(findings);
                }
            }
        }
        partition
    }

    fn implausible_speed(&self, record: &TripRecord) -> bool {
        match record.derived_speed() {
            Some(speed) => speed.get::<mile_per_hour>() > self.config.speed_ceiling_mph,
            // non-positive duration with nonzero distance has no defined speed
            None => record.trip_distance_mi > 0.0,
        }
    }

    /// surcharge presence must agree with toll zone involvement. only
    /// meaningful for treatment-period trips on or after the toll start.
    fn surcharge_mismatch(&self, record: &TripRecord, pickup_in: bool, dropoff_in: bool) -> bool {
        if record.period != Period::Treatment
            || record.pickup_ts.date() < self.config.toll_start_date
        {
            return false;
        }
        let expected = pickup_in || dropoff_in;
        let present = record.congestion_surcharge > 0.0;
        expected != present
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::trip::TripId;
    use crate::model::zone::{Zone, ZoneId};
    use crate::util::date_ops::parse_datetime;
    use geo::MultiPolygon;
    use geo_types::polygon;

    fn registry() -> ZoneRegistry {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let zone = |id: u32, in_toll: bool| Zone {
            zone_id: ZoneId(id),
            name: format!("zone {id}"),
            borough: String::from("Manhattan"),
            polygon: MultiPolygon(vec![square.clone()]),
            in_toll_zone: in_toll,
        };
        ZoneRegistry::from_zones(vec![zone(100, true), zone(200, false), zone(201, false)])
    }

    fn record(pickup: &str, dropoff: &str) -> TripRecord {
        TripRecord {
            trip_id: TripId::from_parts(0, 0),
            pickup_ts: parse_datetime(pickup).unwrap(),
            dropoff_ts: parse_datetime(dropoff).unwrap(),
            pickup_zone_id: ZoneId(200),
            dropoff_zone_id: ZoneId(201),
            passenger_count: 1,
            trip_distance_mi: 2.0,
            fare_amount: 10.0,
            tip_amount: 1.0,
            congestion_surcharge: 0.0,
            period: Period::Treatment,
            is_imputed: false,
        }
    }

    fn reasons(outcome: &RowOutcome) -> Vec<FindingReason> {
        match outcome {
            RowOutcome::Clean(_) => vec![],
            RowOutcome::Flagged(_, findings) => findings.iter().map(|f| f.reason).collect(),
        }
    }

    #[test]
    fn test_negative_duration_flagged() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let r = record("2025-01-05 08:00:00", "2025-01-05 07:50:00");
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::NegativeDuration));
    }

    #[test]
    fn test_zero_distance_nonzero_fare() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let mut r = record("2025-01-05 08:00:00", "2025-01-05 08:10:00");
        r.trip_distance_mi = 0.0;
        r.fare_amount = 45.0;
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::ZeroDistanceNonzeroFare));
    }

    #[test]
    fn test_implausible_speed() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        // 50 miles in 10 minutes is 300 mph
        let mut r = record("2025-01-05 08:00:00", "2025-01-05 08:10:00");
        r.trip_distance_mi = 50.0;
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::ImplausibleSpeed));
    }

    #[test]
    fn test_surcharge_mismatch_absent_when_expected() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        // dropoff inside the zone after toll start, but no surcharge
        let mut r = record("2025-02-01 08:00:00", "2025-02-01 08:20:00");
        r.dropoff_zone_id = ZoneId(100);
        r.congestion_surcharge = 0.0;
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::SurchargeMismatch));
    }

    #[test]
    fn test_surcharge_mismatch_present_when_unexpected() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let mut r = record("2025-02-01 08:00:00", "2025-02-01 08:20:00");
        r.congestion_surcharge = 2.5;
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::SurchargeMismatch));
    }

    #[test]
    fn test_no_surcharge_rule_before_toll_start() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        // january 2nd precedes the toll start date
        let mut r = record("2025-01-02 08:00:00", "2025-01-02 08:20:00");
        r.dropoff_zone_id = ZoneId(100);
        let outcome = auditor.audit(&r);
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_out_of_bounds_zone() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let mut r = record("2025-02-01 08:00:00", "2025-02-01 08:20:00");
        r.pickup_zone_id = ZoneId(999);
        let outcome = auditor.audit(&r);
        assert!(reasons(&outcome).contains(&FindingReason::OutOfBoundsZone));
    }

    #[test]
    fn test_multiple_rules_on_one_record() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let mut r = record("2025-02-01 08:00:00", "2025-02-01 07:50:00");
        r.trip_distance_mi = 0.0;
        r.fare_amount = 45.0;
        let found = reasons(&auditor.audit(&r));
        assert!(found.contains(&FindingReason::NegativeDuration));
        assert!(found.contains(&FindingReason::ZeroDistanceNonzeroFare));
    }

    #[test]
    fn test_audit_all_is_deterministic() {
        let registry = registry();
        let config = AnalysisConfig::default();
        let auditor = Auditor::new(&registry, &config);
        let mut records = Vec::new();
        for i in 0..200u64 {
            let mut r = record("2025-02-01 08:00:00", "2025-02-01 08:20:00");
            r.trip_id = TripId::from_parts(0, i);
            if i % 3 == 0 {
                r.trip_distance_mi = 0.0;
                r.fare_amount = 45.0;
            }
            records.push(r);
        }
        let first = auditor.audit_all(&records);
        let second = auditor.audit_all(&records);
        assert_eq!(first.clean, second.clean);
        assert_eq!(
            serde_json::to_string(&first.findings).unwrap(),
            serde_json::to_string(&second.findings).unwrap()
        );
    }
}
