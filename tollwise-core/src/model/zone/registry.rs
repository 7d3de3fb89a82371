use super::{Zone, ZoneError, ZoneId, ZoneRegistryConfig};
use geo::{Centroid, Contains};
use geo_types::{Geometry, MultiPolygon};
use std::collections::HashMap;
use std::path::Path;

/// in-memory index over the taxi zone reference data. read-only after
/// construction; `in_toll_zone` is decided once per zone at build time.
pub struct ZoneRegistry {
    zones: HashMap<ZoneId, Zone>,
}

impl ZoneRegistry {
    pub fn from_config(config: &ZoneRegistryConfig) -> Result<ZoneRegistry, ZoneError> {
        let zones_str = read_file(&config.zone_geometry_path)?;
        let boundary_str = read_file(&config.toll_boundary_polygon_path)?;
        ZoneRegistry::from_geojson_str(&zones_str, &boundary_str, config)
    }

    /// builds the registry from in-memory GeoJSON documents. file loading
    /// lives in `from_config`; this entry point keeps construction testable
    /// without fixtures on disk.
    pub fn from_geojson_str(
        zones_geojson: &str,
        boundary_geojson: &str,
        config: &ZoneRegistryConfig,
    ) -> Result<ZoneRegistry, ZoneError> {
        let boundary = read_boundary(boundary_geojson, &config.toll_boundary_polygon_path)?;
        let features = read_zone_features(zones_geojson, config)?;
        let mut zones: HashMap<ZoneId, Zone> = HashMap::with_capacity(features.len());
        for (zone_id, name, borough, polygon) in features {
            let in_toll_zone = polygon
                .centroid()
                .map(|c| boundary.contains(&c))
                .unwrap_or(false);
            let zone = Zone {
                zone_id,
                name,
                borough,
                polygon,
                in_toll_zone,
            };
            if zones.insert(zone_id, zone).is_some() {
                return Err(ZoneError::Build(format!(
                    "duplicate zone id {zone_id} in zone geometry file"
                )));
            }
        }
        if zones.is_empty() {
            return Err(ZoneError::Build(String::from(
                "zone geometry file contains no zones",
            )));
        }
        Ok(ZoneRegistry { zones })
    }

    /// constructs a registry directly from zones. used by tests and by
    /// callers that materialize reference data some other way.
    pub fn from_zones(zones: Vec<Zone>) -> ZoneRegistry {
        ZoneRegistry {
            zones: zones.into_iter().map(|z| (z.zone_id, z)).collect(),
        }
    }

    pub fn resolve(&self, zone_id: ZoneId) -> Result<&Zone, ZoneError> {
        self.zones
            .get(&zone_id)
            .ok_or(ZoneError::UnknownZone { zone_id })
    }

    pub fn in_toll_zone(&self, zone_id: ZoneId) -> Result<bool, ZoneError> {
        self.resolve(zone_id).map(|z| z.in_toll_zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn read_file(path: &str) -> Result<String, ZoneError> {
    std::fs::read_to_string(Path::new(path)).map_err(|e| ZoneError::Read {
        path: Path::new(path).to_path_buf(),
        source: e,
    })
}

type ZoneFeature = (ZoneId, String, String, MultiPolygon<f64>);

fn read_zone_features(
    zones_geojson: &str,
    config: &ZoneRegistryConfig,
) -> Result<Vec<ZoneFeature>, ZoneError> {
    let path = Path::new(&config.zone_geometry_path).to_path_buf();
    let geojson_value = zones_geojson
        .parse::<geojson::GeoJson>()
        .map_err(|e| ZoneError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
    let feature_collection = match geojson_value {
        geojson::GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(ZoneError::Parse {
                path,
                message: String::from("zone geometry file must be a GeoJSON FeatureCollection"),
            })
        }
    };

    let mut zone_features = Vec::with_capacity(feature_collection.features.len());
    for (n, feature) in feature_collection.features.iter().enumerate() {
        let zone_id = read_zone_id(feature, &config.zone_id_property, &path)?;
        let name = read_string_property(feature, &config.zone_name_property).unwrap_or_default();
        let borough = read_string_property(feature, &config.borough_property).unwrap_or_default();
        let geom_json = feature
            .geometry
            .clone()
            .ok_or_else(|| ZoneError::Deserialize {
                property: String::from("geometry"),
                path: path.clone(),
                message: format!("no geometry in feature {n}"),
            })?;
        let geometry: Geometry<f64> = geom_json.try_into().map_err(|e| ZoneError::Deserialize {
            property: String::from("geometry"),
            path: path.clone(),
            message: format!("failure decoding GeoJSON geometry for zone {zone_id}: {e}"),
        })?;
        let polygon = match geometry {
            Geometry::Polygon(p) => MultiPolygon(vec![p]),
            Geometry::MultiPolygon(mp) => mp,
            other => {
                return Err(ZoneError::Deserialize {
                    property: String::from("geometry"),
                    path,
                    message: format!(
                        "zone {zone_id} has non-polygonal geometry {}",
                        geometry_name(&other)
                    ),
                })
            }
        };
        zone_features.push((zone_id, name, borough, polygon));
    }
    Ok(zone_features)
}

/// the TLC export writes location ids as strings in some vintages and as
/// numbers in others; accept both.
fn read_zone_id(
    feature: &geojson::Feature,
    property: &str,
    path: &Path,
) -> Result<ZoneId, ZoneError> {
    let value = feature
        .property(property)
        .ok_or_else(|| ZoneError::Deserialize {
            property: property.to_string(),
            path: path.to_path_buf(),
            message: String::from("property missing"),
        })?;
    let id = match value {
        serde_json::Value::Number(n) => n.as_u64().map(|v| v as u32),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    id.map(ZoneId).ok_or_else(|| ZoneError::Deserialize {
        property: property.to_string(),
        path: path.to_path_buf(),
        message: format!("cannot read '{value}' as a zone id"),
    })
}

fn read_string_property(feature: &geojson::Feature, property: &str) -> Option<String> {
    feature
        .property(property)
        .and_then(|v| v.as_str())
        .map(String::from)
}

/// accepts the boundary as a bare geometry, a single feature, or a
/// feature collection holding one polygonal feature.
fn read_boundary(boundary_geojson: &str, path_str: &str) -> Result<MultiPolygon<f64>, ZoneError> {
    let path = Path::new(path_str).to_path_buf();
    let geojson_value = boundary_geojson
        .parse::<geojson::GeoJson>()
        .map_err(|e| ZoneError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
    let geom_json = match geojson_value {
        geojson::GeoJson::Geometry(g) => g,
        geojson::GeoJson::Feature(f) => f.geometry.ok_or_else(|| ZoneError::Parse {
            path: path.clone(),
            message: String::from("boundary feature has no geometry"),
        })?,
        geojson::GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .find_map(|f| f.geometry)
            .ok_or_else(|| ZoneError::Parse {
                path: path.clone(),
                message: String::from("boundary feature collection has no geometry"),
            })?,
    };
    let geometry: Geometry<f64> = geom_json.try_into().map_err(|e| ZoneError::Parse {
        path: path.clone(),
        message: format!("failure decoding boundary geometry: {e}"),
    })?;
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        other => Err(ZoneError::Parse {
            path,
            message: format!(
                "toll boundary must be polygonal, found {}",
                geometry_name(&other)
            ),
        }),
    }
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
