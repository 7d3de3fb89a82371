use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(
        "precipitation series covers {covered_start:?}..{covered_end:?} but the analysis \
         window is {requested_start}..{requested_end}; re-run with reduced-window \
         confirmation to proceed on the intersection"
    )]
    MissingWeatherData {
        requested_start: NaiveDate,
        requested_end: NaiveDate,
        covered_start: Option<NaiveDate>,
        covered_end: Option<NaiveDate>,
    },
}
