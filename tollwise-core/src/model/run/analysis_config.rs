use crate::model::impute::ImputationPolicy;
use crate::model::trip::Period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uom::si::f64::Velocity;

/// analytical thresholds and period definitions. these directly affect
/// audit findings and aggregate outcomes, so none of them are hard-coded;
/// the defaults here are documented starting points.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnalysisConfig {
    /// pre-toll observation year
    #[serde(default = "default_baseline_year")]
    pub baseline_year: i32,
    /// post-toll observation year
    #[serde(default = "default_treatment_year")]
    pub treatment_year: i32,
    /// date the congestion toll took effect
    #[serde(default = "default_toll_start_date")]
    pub toll_start_date: NaiveDate,
    /// sustained speeds above this ceiling mark a trip as a ghost
    #[serde(default = "default_speed_ceiling_mph")]
    pub speed_ceiling_mph: f64,
    /// zero-distance trips with fares above this threshold are ghosts
    #[serde(default = "default_minimum_base_fare")]
    pub minimum_base_fare: f64,
    /// zone-pair cells with fewer clean trips than this are suppressed
    #[serde(default = "default_min_trip_count_threshold")]
    pub min_trip_count_threshold: u64,
    /// daily precipitation at or above this value counts as a rain day
    #[serde(default = "default_rain_threshold_mm")]
    pub rain_threshold_mm: f64,
    #[serde(default)]
    pub imputation_policy: ImputationPolicy,
    /// permit single-neighbor imputation at the edge of a period window
    #[serde(default)]
    pub allow_single_neighbor: bool,
    /// zones adjacent to the toll boundary, used for the border effect table
    #[serde(default = "default_border_zone_ids")]
    pub border_zone_ids: Vec<u32>,
}

impl AnalysisConfig {
    pub fn speed_ceiling(&self) -> Velocity {
        Velocity::new::<uom::si::velocity::mile_per_hour>(self.speed_ceiling_mph)
    }

    pub fn year_of(&self, period: Period) -> i32 {
        match period {
            Period::Baseline => self.baseline_year,
            Period::Treatment => self.treatment_year,
        }
    }

    /// full-year analysis window for a period
    pub fn window_of(&self, period: Period) -> PeriodWindow {
        let year = self.year_of(period);
        PeriodWindow {
            period,
            // constructed from a valid (year, 1, 1) and (year, 12, 31)
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(self.toll_start_date),
            end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(self.toll_start_date),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            baseline_year: default_baseline_year(),
            treatment_year: default_treatment_year(),
            toll_start_date: default_toll_start_date(),
            speed_ceiling_mph: default_speed_ceiling_mph(),
            minimum_base_fare: default_minimum_base_fare(),
            min_trip_count_threshold: default_min_trip_count_threshold(),
            rain_threshold_mm: default_rain_threshold_mm(),
            imputation_policy: ImputationPolicy::default(),
            allow_single_neighbor: false,
            border_zone_ids: default_border_zone_ids(),
        }
    }
}

/// calendar range covered by one observation period.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn default_baseline_year() -> i32 {
    2024
}

fn default_treatment_year() -> i32 {
    2025
}

fn default_toll_start_date() -> NaiveDate {
    // the CBD toll took effect january 5, 2025
    NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid constant date")
}

fn default_speed_ceiling_mph() -> f64 {
    65.0
}

fn default_minimum_base_fare() -> f64 {
    3.0
}

fn default_min_trip_count_threshold() -> u64 {
    10
}

fn default_rain_threshold_mm() -> f64 {
    0.1
}

fn default_border_zone_ids() -> Vec<u32> {
    // zones straddling the 60th st boundary
    vec![68, 74, 75, 79, 87, 88, 90, 100, 107, 113, 114, 116, 120, 125]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: AnalysisConfig = toml::from_str("").unwrap();
        assert_eq!(config.baseline_year, 2024);
        assert_eq!(config.treatment_year, 2025);
        assert_eq!(config.min_trip_count_threshold, 10);
        assert!(!config.allow_single_neighbor);
    }

    #[test]
    fn test_window_of_period() {
        let config = AnalysisConfig::default();
        let window = config.window_of(Period::Treatment);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
