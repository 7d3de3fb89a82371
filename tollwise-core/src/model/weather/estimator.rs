use super::{
    DailyTripAggregate, ElasticitySummary, PrecipitationSeries, WeatherElasticityRow, WeatherError,
    WeatherReport,
};
use crate::util::stats;

/// joins daily demand against the precipitation series and contrasts
/// rain days with dry days.
pub struct WeatherEstimator {
    rain_threshold_mm: f64,
    allow_reduced_window: bool,
}

impl WeatherEstimator {
    pub fn new(rain_threshold_mm: f64, allow_reduced_window: bool) -> WeatherEstimator {
        WeatherEstimator {
            rain_threshold_mm,
            allow_reduced_window,
        }
    }

    /// the precipitation series must span the daily demand window. a
    /// series that starts late or ends early fails the run unless the
    /// caller confirmed a reduced window. interior gap days are dropped
    /// from the join and reported in the output either way.
    pub fn estimate(
        &self,
        daily: &[DailyTripAggregate],
        series: &PrecipitationSeries,
    ) -> Result<WeatherReport, WeatherError> {
        if let (Some(first), Some(last)) = (daily.first(), daily.last()) {
            let covered_start = series.first_date();
            let covered_end = series.last_date();
            let spans = covered_start.is_some_and(|d| d <= first.date)
                && covered_end.is_some_and(|d| d >= last.date);
            if !spans && !self.allow_reduced_window {
                return Err(WeatherError::MissingWeatherData {
                    requested_start: first.date,
                    requested_end: last.date,
                    covered_start,
                    covered_end,
                });
            }
        }
        let uncovered_dates: Vec<_> = daily
            .iter()
            .filter(|day| series.get(&day.date).is_none())
            .map(|day| day.date)
            .collect();

        let rows: Vec<WeatherElasticityRow> = daily
            .iter()
            .filter_map(|day| {
                let precipitation_mm = series.get(&day.date)?;
                Some(WeatherElasticityRow {
                    date: day.date,
                    trip_count: day.trip_count,
                    mean_tip_pct: day.mean_tip_pct,
                    mean_surcharge_pct: day.mean_surcharge_pct,
                    precipitation_mm,
                    is_rain_day: precipitation_mm >= self.rain_threshold_mm,
                })
            })
            .collect();

        let summary = self.summarize(&rows);
        Ok(WeatherReport {
            rows,
            summary,
            uncovered_dates,
        })
    }

    fn summarize(&self, rows: &[WeatherElasticityRow]) -> ElasticitySummary {
        let (rain, dry): (Vec<_>, Vec<_>) = rows.iter().partition(|r| r.is_rain_day);
        let rain_trips: Vec<f64> = rain.iter().map(|r| r.trip_count as f64).collect();
        let dry_trips: Vec<f64> = dry.iter().map(|r| r.trip_count as f64).collect();
        let rain_tips: Vec<f64> = rain.iter().map(|r| r.mean_tip_pct).collect();
        let dry_tips: Vec<f64> = dry.iter().map(|r| r.mean_tip_pct).collect();

        let mean_trips_rain = stats::mean(&rain_trips).unwrap_or(0.0);
        let mean_trips_dry = stats::mean(&dry_trips).unwrap_or(0.0);
        let trip_count_delta_pct = if !rain.is_empty() && !dry.is_empty() && mean_trips_dry != 0.0 {
            Some((mean_trips_rain - mean_trips_dry) / mean_trips_dry * 100.0)
        } else {
            None
        };

        let precipitation: Vec<f64> = rows.iter().map(|r| r.precipitation_mm).collect();
        let trip_counts: Vec<f64> = rows.iter().map(|r| r.trip_count as f64).collect();

        ElasticitySummary {
            rain_days: rain.len() as u64,
            dry_days: dry.len() as u64,
            mean_trips_rain,
            mean_trips_dry,
            trip_count_delta_pct,
            mean_tip_pct_rain: stats::mean(&rain_tips).unwrap_or(0.0),
            mean_tip_pct_dry: stats::mean(&dry_tips).unwrap_or(0.0),
            precipitation_trip_correlation: stats::pearson(&precipitation, &trip_counts),
            trips_per_mm_slope: stats::ols_slope(&precipitation, &trip_counts),
        }
    }
}
