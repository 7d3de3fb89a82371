use super::WeatherError;
use crate::util::date_ops;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// daily precipitation reference series from the external weather feed.
/// read-only once loaded.
#[derive(Clone, Debug, Default)]
pub struct PrecipitationSeries {
    by_date: BTreeMap<NaiveDate, f64>,
}

impl PrecipitationSeries {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> PrecipitationSeries {
        PrecipitationSeries {
            by_date: pairs.into_iter().collect(),
        }
    }

    /// reads a `date,precipitation_mm` CSV.
    pub fn from_csv_path(path: &Path) -> Result<PrecipitationSeries, WeatherError> {
        let file = std::fs::File::open(path).map_err(|e| WeatherError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        PrecipitationSeries::from_reader(file, path)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        path: &Path,
    ) -> Result<PrecipitationSeries, WeatherError> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut by_date = BTreeMap::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let record = row.map_err(|e| WeatherError::Parse {
                path: path.to_path_buf(),
                message: format!("failure reading row {idx}: {e}"),
            })?;
            let date_str = record.get(0).unwrap_or("").trim();
            let date = date_ops::parse_date(date_str).map_err(|e| WeatherError::Parse {
                path: path.to_path_buf(),
                message: format!("failure parsing date '{date_str}' in row {idx}: {e}"),
            })?;
            // the feed reports null precipitation for unavailable days;
            // those dates count as gaps, not as zero rainfall
            let precip_str = record.get(1).unwrap_or("").trim();
            if precip_str.is_empty() {
                continue;
            }
            let precipitation_mm =
                precip_str
                    .parse::<f64>()
                    .map_err(|e| WeatherError::Parse {
                        path: path.to_path_buf(),
                        message: format!(
                            "failure parsing precipitation '{precip_str}' in row {idx}: {e}"
                        ),
                    })?;
            by_date.insert(date, precipitation_mm);
        }
        Ok(PrecipitationSeries { by_date })
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.by_date.get(date).copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_reader() {
        let csv = "date,precipitation_mm\n2025-06-01,0.0\n2025-06-02,12.5\n2025-06-03,\n";
        let series =
            PrecipitationSeries::from_reader(csv.as_bytes(), Path::new("weather.csv")).unwrap();
        assert_eq!(series.len(), 2);
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(series.get(&date), Some(12.5));
        // empty precipitation cell is a gap, not zero
        let gap = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        assert_eq!(series.get(&gap), None);
    }

    #[test]
    fn test_bad_date_is_a_parse_error() {
        let csv = "date,precipitation_mm\nnot-a-date,1.0\n";
        let result = PrecipitationSeries::from_reader(csv.as_bytes(), Path::new("weather.csv"));
        assert!(matches!(result, Err(WeatherError::Parse { .. })));
    }
}
