use super::IoPolicy;
use kdam::tqdm;
use regex::Regex;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tollwise_core::model::normalize::{
    NormalizationSummary, NormalizeError, Normalizer, SchemaMap,
};
use tollwise_core::model::trip::{Period, TripRecord};
use tollwise_core::util::fs_ops;

/// one discovered monthly trip extract.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyFile {
    pub path: PathBuf,
    pub service: String,
    pub year: i32,
    pub month: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("failure scanning input directory {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure building filename pattern for services {services:?}: {message}")]
    Pattern { services: Vec<String>, message: String },
    #[error("{period} input unavailable at {path}: {message}")]
    DataUnavailable {
        period: Period,
        path: PathBuf,
        message: String,
    },
    #[error("failure reading rows from {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("schema error in {path}: {source}")]
    Schema {
        path: PathBuf,
        source: NormalizeError,
    },
}

/// scans the input directory for `{service}_tripdata_{YYYY}-{MM}.csv`
/// files of the given year. output order is fixed by (month, service) so
/// synthetic trip ids are stable across runs over the same input set.
pub fn discover_monthly_files(
    input_directory: &Path,
    services: &[String],
    year: i32,
) -> Result<Vec<MonthlyFile>, IngestError> {
    let alternation = services
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"^(?P<service>{alternation})_tripdata_(?P<year>\d{{4}})-(?P<month>\d{{2}})\.csv$");
    let matcher = Regex::new(&pattern).map_err(|e| IngestError::Pattern {
        services: services.to_vec(),
        message: format!("{e}"),
    })?;

    let entries = std::fs::read_dir(input_directory).map_err(|e| IngestError::Scan {
        path: input_directory.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::Scan {
            path: input_directory.to_path_buf(),
            source: e,
        })?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(captures) = matcher.captures(&file_name) else {
            continue;
        };
        let (Some(file_year), Some(month)) = (
            captures["year"].parse::<i32>().ok(),
            captures["month"].parse::<u32>().ok(),
        ) else {
            continue;
        };
        if file_year != year || !(1..=12).contains(&month) {
            continue;
        }
        files.push(MonthlyFile {
            path: entry.path(),
            service: captures["service"].to_string(),
            year: file_year,
            month,
        });
    }
    files.sort_by(|a, b| (a.month, &a.service).cmp(&(b.month, &b.service)));
    Ok(files)
}

/// reads and normalizes one monthly file. the open is retried with backoff
/// since the upstream downloader may still be writing the file.
pub fn read_monthly_file(
    file: &MonthlyFile,
    period: Period,
    file_seq: u32,
    io: &IoPolicy,
) -> Result<(Vec<TripRecord>, NormalizationSummary), IngestError> {
    let handle = fs_ops::open_with_retry(&file.path, io.max_read_attempts, io.retry_backoff_ms)
        .map_err(|e| IngestError::DataUnavailable {
            period,
            path: file.path.clone(),
            message: format!("{e}"),
        })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(handle));

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Parse {
            path: file.path.clone(),
            message: format!("failure reading header row: {e}"),
        })?
        .clone();
    let binding = SchemaMap::new().bind(&headers).map_err(|e| IngestError::Schema {
        path: file.path.clone(),
        source: e,
    })?;

    let mut rows = Vec::new();
    let desc = format!("read {}_{}-{:02}", file.service, file.year, file.month);
    for row in tqdm!(reader.records(), desc = desc) {
        let record = row.map_err(|e| IngestError::Parse {
            path: file.path.clone(),
            message: format!("failure reading row {}: {e}", rows.len()),
        })?;
        rows.push(record);
    }

    let normalizer = Normalizer::new(binding, period, file_seq);
    Ok(normalizer.normalize_all(&rows))
}

/// ingests every monthly file of one period's year into a single
/// normalized snapshot. a period without any matching input files is a
/// structural failure for that period.
pub fn ingest_period(
    input_directory: &Path,
    services: &[String],
    period: Period,
    year: i32,
    io: &IoPolicy,
) -> Result<(Vec<TripRecord>, NormalizationSummary), IngestError> {
    let files = discover_monthly_files(input_directory, services, year)?;
    if files.is_empty() {
        return Err(IngestError::DataUnavailable {
            period,
            path: input_directory.to_path_buf(),
            message: format!("no monthly trip files found for year {year}"),
        });
    }

    let mut records = Vec::new();
    let mut summary = NormalizationSummary::default();
    for (file_seq, file) in files.iter().enumerate() {
        log::info!(
            "ingesting {period} file {} ({}/{})",
            file.path.display(),
            file_seq + 1,
            files.len()
        );
        let (file_records, file_summary) = read_monthly_file(file, period, file_seq as u32, io)?;
        records.extend(file_records);
        summary.merge(&file_summary);
    }
    Ok((records, summary))
}
