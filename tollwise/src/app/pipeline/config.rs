use serde::Deserialize;
use std::path::{Path, PathBuf};
use tollwise_core::model::run::AnalysisConfig;
use tollwise_core::model::zone::ZoneRegistryConfig;

use super::PipelineError;

/// top-level TOML configuration for one pipeline run. every analytical
/// threshold lives in [`AnalysisConfig`]; this layer only adds file
/// locations and I/O policy.
#[derive(Deserialize, Clone, Debug)]
pub struct PipelineConfig {
    /// directory holding the downloaded monthly trip CSVs
    pub input_directory: PathBuf,
    /// directory receiving all artifacts
    pub output_directory: PathBuf,
    /// daily precipitation series CSV
    pub weather_path: PathBuf,
    /// service prefixes to ingest, in filename order
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    pub zones: ZoneRegistryConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub io: IoPolicy,
}

/// retry policy for reading input files the downloader may still be
/// writing.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct IoPolicy {
    #[serde(default = "default_max_read_attempts")]
    pub max_read_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<PipelineConfig, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&raw).map_err(|e| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("{e}"),
        })
    }
}

impl Default for IoPolicy {
    fn default() -> Self {
        IoPolicy {
            max_read_attempts: default_max_read_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

fn default_services() -> Vec<String> {
    vec![String::from("yellow"), String::from("green")]
}

fn default_max_read_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    250
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let raw = r#"
            input_directory = "data/in"
            output_directory = "data/out"
            weather_path = "data/weather.csv"

            [zones]
            zone_geometry_path = "data/taxi_zones.geojson"
            toll_boundary_polygon_path = "data/cbd_boundary.geojson"
        "#;
        let config: PipelineConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.services, vec!["yellow", "green"]);
        assert_eq!(config.io.max_read_attempts, 3);
        assert_eq!(config.io.retry_backoff_ms, 250);
        assert_eq!(config.analysis.baseline_year, 2024);
    }

    #[test]
    fn test_thresholds_override() {
        let raw = r#"
            input_directory = "in"
            output_directory = "out"
            weather_path = "weather.csv"
            services = ["yellow"]

            [zones]
            zone_geometry_path = "zones.geojson"
            toll_boundary_polygon_path = "boundary.geojson"

            [analysis]
            speed_ceiling_mph = 55.0
            imputation_policy = "day_scaled"

            [io]
            max_read_attempts = 5
        "#;
        let config: PipelineConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.analysis.speed_ceiling_mph, 55.0);
        assert_eq!(config.io.max_read_attempts, 5);
        assert_eq!(config.services, vec!["yellow"]);
    }
}
