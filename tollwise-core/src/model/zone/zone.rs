use super::ZoneId;
use geo::MultiPolygon;

/// immutable taxi zone reference data, loaded once per run and owned
/// exclusively by the registry. all other components refer to zones by id.
#[derive(Clone, Debug)]
pub struct Zone {
    pub zone_id: ZoneId,
    pub name: String,
    pub borough: String,
    pub polygon: MultiPolygon<f64>,
    /// precomputed once at load time by a containment test against the
    /// toll boundary polygon, never recomputed per trip
    pub in_toll_zone: bool,
}
