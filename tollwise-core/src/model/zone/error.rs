use super::ZoneId;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ZoneError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to deserialize property {property} in '{path}' due to: {message}")]
    Deserialize {
        property: String,
        path: PathBuf,
        message: String,
    },
    #[error("failure building zone registry: {0}")]
    Build(String),
    #[error("zone id {zone_id} not present in the zone registry")]
    UnknownZone { zone_id: ZoneId },
}
