use super::{CanonicalField, DropReason, NormalizationSummary, RowParse, SchemaBinding};
use crate::model::trip::{Period, TripId, TripRecord};
use crate::model::zone::ZoneId;
use crate::util::date_ops;

/// converts raw monthly rows into canonical trip records. a row is
/// dropped only when a mandatory field is null or unparseable; optional
/// fields coerce to defaults and any remaining inconsistency is the
/// auditor's concern.
pub struct Normalizer {
    binding: SchemaBinding,
    period: Period,
    file_seq: u32,
}

impl Normalizer {
    pub fn new(binding: SchemaBinding, period: Period, file_seq: u32) -> Normalizer {
        Normalizer {
            binding,
            period,
            file_seq,
        }
    }

    pub fn normalize(&self, row_index: u64, row: &csv::StringRecord) -> RowParse {
        let pickup_ts = match self
            .binding
            .get(CanonicalField::PickupTs, row)
            .and_then(|s| date_ops::parse_datetime(s).ok())
        {
            Some(ts) => ts,
            None => return RowParse::Dropped(DropReason::UnparseablePickupTimestamp),
        };
        let dropoff_ts = match self
            .binding
            .get(CanonicalField::DropoffTs, row)
            .and_then(|s| date_ops::parse_datetime(s).ok())
        {
            Some(ts) => ts,
            None => return RowParse::Dropped(DropReason::UnparseableDropoffTimestamp),
        };
        let pickup_zone_id = match self.parse_zone(CanonicalField::PickupZone, row) {
            Some(id) => id,
            None => return RowParse::Dropped(DropReason::UnparseablePickupZone),
        };
        let dropoff_zone_id = match self.parse_zone(CanonicalField::DropoffZone, row) {
            Some(id) => id,
            None => return RowParse::Dropped(DropReason::UnparseableDropoffZone),
        };

        // optional numeric fields: coerce with range checks. negative
        // distance violates the schema range and floors to zero; negative
        // money is retained as a refund marker.
        let passenger_count = self
            .parse_f64(CanonicalField::PassengerCount, row)
            .map(|v| if v < 0.0 { 0 } else { v as u32 })
            .unwrap_or(0);
        let trip_distance_mi = self
            .parse_f64(CanonicalField::TripDistance, row)
            .map(|v| v.max(0.0))
            .unwrap_or(0.0);
        let fare_amount = self.parse_f64(CanonicalField::FareAmount, row).unwrap_or(0.0);
        let tip_amount = self.parse_f64(CanonicalField::TipAmount, row).unwrap_or(0.0);
        let congestion_surcharge = self
            .parse_f64(CanonicalField::CongestionSurcharge, row)
            .unwrap_or(0.0);

        RowParse::Parsed(TripRecord {
            trip_id: TripId::from_parts(self.file_seq, row_index),
            pickup_ts,
            dropoff_ts,
            pickup_zone_id,
            dropoff_zone_id,
            passenger_count,
            trip_distance_mi,
            fare_amount,
            tip_amount,
            congestion_surcharge,
            period: self.period,
            is_imputed: false,
        })
    }

    /// normalizes a whole file worth of rows, accumulating drop counts.
    pub fn normalize_all(
        &self,
        rows: &[csv::StringRecord],
    ) -> (Vec<TripRecord>, NormalizationSummary) {
        let mut records = Vec::with_capacity(rows.len());
        let mut summary = NormalizationSummary::default();
        for (row_index, row) in rows.iter().enumerate() {
            match self.normalize(row_index as u64, row) {
                RowParse::Parsed(record) => {
                    summary.record_parsed();
                    records.push(record);
                }
                RowParse::Dropped(reason) => {
                    summary.record_drop(reason);
                }
            }
        }
        (records, summary)
    }

    /// zone ids appear as integers or as float-formatted integers ("132.0")
    /// depending on the extract vintage.
    fn parse_zone(&self, field: CanonicalField, row: &csv::StringRecord) -> Option<ZoneId> {
        let raw = self.binding.get(field, row)?;
        if let Ok(id) = raw.parse::<u32>() {
            return Some(ZoneId(id));
        }
        let as_float = raw.parse::<f64>().ok()?;
        if as_float < 0.0 || as_float.fract() != 0.0 {
            return None;
        }
        Some(ZoneId(as_float as u32))
    }

    fn parse_f64(&self, field: CanonicalField, row: &csv::StringRecord) -> Option<f64> {
        self.binding.get(field, row)?.parse::<f64>().ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::normalize::SchemaMap;

    fn normalizer() -> Normalizer {
        let headers = csv::StringRecord::from(vec![
            "tpep_pickup_datetime",
            "tpep_dropoff_datetime",
            "PULocationID",
            "DOLocationID",
            "passenger_count",
            "trip_distance",
            "fare_amount",
            "tip_amount",
            "congestion_surcharge",
        ]);
        let binding = SchemaMap::new().bind(&headers).unwrap();
        Normalizer::new(binding, Period::Treatment, 1)
    }

    fn row(cells: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cells.to_vec())
    }

    #[test]
    fn test_parses_well_formed_row() {
        let n = normalizer();
        let parsed = n.normalize(
            0,
            &row(&[
                "2025-01-05 08:00:00",
                "2025-01-05 08:20:00",
                "100",
                "200",
                "2",
                "3.2",
                "15.0",
                "3.0",
                "2.5",
            ]),
        );
        match parsed {
            RowParse::Parsed(record) => {
                assert_eq!(record.pickup_zone_id, ZoneId(100));
                assert_eq!(record.passenger_count, 2);
                assert_eq!(record.period, Period::Treatment);
                assert!(!record.is_imputed);
            }
            RowParse::Dropped(reason) => panic!("unexpected drop: {reason}"),
        }
    }

    #[test]
    fn test_drops_unparseable_mandatory_fields() {
        let n = normalizer();
        let dropped = n.normalize(
            0,
            &row(&[
                "garbage", "2025-01-05 08:20:00", "100", "200", "", "", "", "", "",
            ]),
        );
        assert!(matches!(
            dropped,
            RowParse::Dropped(DropReason::UnparseablePickupTimestamp)
        ));

        let dropped = n.normalize(
            0,
            &row(&[
                "2025-01-05 08:00:00",
                "2025-01-05 08:20:00",
                "not-a-zone",
                "200",
                "",
                "",
                "",
                "",
                "",
            ]),
        );
        assert!(matches!(
            dropped,
            RowParse::Dropped(DropReason::UnparseablePickupZone)
        ));
    }

    #[test]
    fn test_optional_fields_coerce_to_defaults() {
        let n = normalizer();
        let parsed = n.normalize(
            0,
            &row(&[
                "2025-01-05 08:00:00",
                "2025-01-05 08:20:00",
                "100",
                "200.0",
                "",
                "-1.0",
                "",
                "",
                "",
            ]),
        );
        match parsed {
            RowParse::Parsed(record) => {
                assert_eq!(record.dropoff_zone_id, ZoneId(200));
                assert_eq!(record.passenger_count, 0);
                // negative distance floors to the schema minimum
                assert_eq!(record.trip_distance_mi, 0.0);
                assert_eq!(record.fare_amount, 0.0);
            }
            RowParse::Dropped(reason) => panic!("unexpected drop: {reason}"),
        }
    }

    #[test]
    fn test_refund_row_is_parsed_not_dropped() {
        let n = normalizer();
        let parsed = n.normalize(
            0,
            &row(&[
                "2025-01-05 08:00:00",
                "2025-01-05 08:20:00",
                "100",
                "200",
                "1",
                "2.0",
                "-12.5",
                "0.0",
                "0.0",
            ]),
        );
        match parsed {
            RowParse::Parsed(record) => assert!(record.is_refund()),
            RowParse::Dropped(reason) => panic!("unexpected drop: {reason}"),
        }
    }

    #[test]
    fn test_normalize_all_counts_drops_per_reason() {
        let n = normalizer();
        let rows = vec![
            row(&[
                "2025-01-05 08:00:00",
                "2025-01-05 08:20:00",
                "100",
                "200",
                "1",
                "2.0",
                "10.0",
                "1.0",
                "0.0",
            ]),
            row(&["", "2025-01-05 08:20:00", "100", "200", "", "", "", "", ""]),
            row(&["", "2025-01-05 08:20:00", "100", "200", "", "", "", "", ""]),
        ];
        let (records, summary) = n.normalize_all(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(summary.rows_in, 3);
        assert_eq!(summary.rows_dropped, 2);
        assert_eq!(
            summary.drops_by_reason.get("unparseable_pickup_timestamp"),
            Some(&2)
        );
    }
}
