use chrono::NaiveDate;
use serde::Serialize;

/// one joined day of demand and precipitation.
#[derive(Serialize, Clone, Debug)]
pub struct WeatherElasticityRow {
    pub date: NaiveDate,
    pub trip_count: u64,
    pub mean_tip_pct: f64,
    pub mean_surcharge_pct: f64,
    pub precipitation_mm: f64,
    pub is_rain_day: bool,
}

/// rain-vs-dry contrast over the joined window.
#[derive(Serialize, Clone, Debug)]
pub struct ElasticitySummary {
    pub rain_days: u64,
    pub dry_days: u64,
    pub mean_trips_rain: f64,
    pub mean_trips_dry: f64,
    pub trip_count_delta_pct: Option<f64>,
    pub mean_tip_pct_rain: f64,
    pub mean_tip_pct_dry: f64,
    pub precipitation_trip_correlation: Option<f64>,
    pub trips_per_mm_slope: Option<f64>,
}

#[derive(Serialize, Clone, Debug)]
pub struct WeatherReport {
    pub rows: Vec<WeatherElasticityRow>,
    pub summary: ElasticitySummary,
    /// analysis-window dates with trips but no precipitation reading.
    pub uncovered_dates: Vec<NaiveDate>,
}
