/// canonical trip fields recognized by the schema map. each field carries
/// the ordered list of source column names it may appear under across
/// monthly extract vintages (yellow `tpep_*`, green `lpep_*`, and the 2025
/// `cbd_congestion_fee` rename).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    PickupTs,
    DropoffTs,
    PickupZone,
    DropoffZone,
    PassengerCount,
    TripDistance,
    FareAmount,
    TipAmount,
    CongestionSurcharge,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::PickupTs,
        CanonicalField::DropoffTs,
        CanonicalField::PickupZone,
        CanonicalField::DropoffZone,
        CanonicalField::PassengerCount,
        CanonicalField::TripDistance,
        CanonicalField::FareAmount,
        CanonicalField::TipAmount,
        CanonicalField::CongestionSurcharge,
    ];

    /// source column names this field may appear under, in match order.
    /// matching is case-insensitive.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::PickupTs => &[
                "pickup_time",
                "tpep_pickup_datetime",
                "lpep_pickup_datetime",
                "pickup_datetime",
            ],
            CanonicalField::DropoffTs => &[
                "dropoff_time",
                "tpep_dropoff_datetime",
                "lpep_dropoff_datetime",
                "dropoff_datetime",
            ],
            CanonicalField::PickupZone => &["pickup_loc", "pulocationid", "pickup_location_id"],
            CanonicalField::DropoffZone => &["dropoff_loc", "dolocationid", "dropoff_location_id"],
            CanonicalField::PassengerCount => &["passenger_count"],
            CanonicalField::TripDistance => &["trip_distance", "trip_distance_mi"],
            CanonicalField::FareAmount => &["fare", "fare_amount"],
            CanonicalField::TipAmount => &["tip_amount"],
            CanonicalField::CongestionSurcharge => &["congestion_surcharge", "cbd_congestion_fee"],
        }
    }

    /// a record missing a mandatory field is dropped rather than flagged
    pub fn is_mandatory(&self) -> bool {
        matches!(
            self,
            CanonicalField::PickupTs
                | CanonicalField::DropoffTs
                | CanonicalField::PickupZone
                | CanonicalField::DropoffZone
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::PickupTs => "pickup_ts",
            CanonicalField::DropoffTs => "dropoff_ts",
            CanonicalField::PickupZone => "pickup_zone_id",
            CanonicalField::DropoffZone => "dropoff_zone_id",
            CanonicalField::PassengerCount => "passenger_count",
            CanonicalField::TripDistance => "trip_distance_mi",
            CanonicalField::FareAmount => "fare_amount",
            CanonicalField::TipAmount => "tip_amount",
            CanonicalField::CongestionSurcharge => "congestion_surcharge",
        }
    }
}
