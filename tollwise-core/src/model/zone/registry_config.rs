use serde::{Deserialize, Serialize};

/// file locations and property names for building the zone registry.
/// zone geometries and the toll boundary are GeoJSON, as produced by the
/// downloader collaborator from the published TLC shapefile.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ZoneRegistryConfig {
    /// GeoJSON FeatureCollection of taxi zone polygons
    pub zone_geometry_path: String,
    /// GeoJSON polygon describing the Congestion Relief Zone boundary
    pub toll_boundary_polygon_path: String,
    #[serde(default = "default_zone_id_property")]
    pub zone_id_property: String,
    #[serde(default = "default_zone_name_property")]
    pub zone_name_property: String,
    #[serde(default = "default_borough_property")]
    pub borough_property: String,
}

fn default_zone_id_property() -> String {
    String::from("location_id")
}

fn default_zone_name_property() -> String {
    String::from("zone")
}

fn default_borough_property() -> String {
    String::from("borough")
}
