use super::IngestError;
use crate::app::output::OutputError;
use std::path::PathBuf;
use tollwise_core::model::impute::ImputeError;
use tollwise_core::model::weather::WeatherError;
use tollwise_core::model::zone::ZoneError;

/// umbrella error for structural pipeline failures. row-level issues never
/// surface here; they are counted and logged instead.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("failure reading config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure parsing config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
    #[error(transparent)]
    Zone(#[from] ZoneError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error(transparent)]
    Impute(#[from] ImputeError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
