use super::{ImputationPolicy, ImputeError, MonthlyAggregate};
use crate::model::run::PeriodWindow;
use crate::model::trip::Period;
use crate::util::date_ops;
use chrono::Datelike;
use std::collections::BTreeMap;

/// fills calendar months missing from a period's monthly aggregates using
/// the nearest observed months on either side.
pub struct PeriodImputer {
    policy: ImputationPolicy,
    allow_single_neighbor: bool,
}

/// months on a single axis, so gaps across a year boundary still count
/// as adjacent.
fn month_index(year: i32, month: u32) -> i64 {
    year as i64 * 12 + (month as i64 - 1)
}

impl PeriodImputer {
    pub fn new(policy: ImputationPolicy, allow_single_neighbor: bool) -> PeriodImputer {
        PeriodImputer {
            policy,
            allow_single_neighbor,
        }
    }

    /// completes the observed series over every calendar month of the
    /// period window, so a month missing at the edge of the window is
    /// imputed or rejected, never skipped. output is sorted by
    /// (year, month); each imputed row carries `is_imputed = true`.
    pub fn fill_gaps(
        &self,
        window: &PeriodWindow,
        observed: &[MonthlyAggregate],
    ) -> Result<Vec<MonthlyAggregate>, ImputeError> {
        if observed.is_empty() {
            return Ok(Vec::new());
        }
        let by_index: BTreeMap<i64, &MonthlyAggregate> = observed
            .iter()
            .map(|m| (month_index(m.year, m.month), m))
            .collect();
        let first = month_index(window.start.year(), window.start.month());
        let last = month_index(window.end.year(), window.end.month());

        let mut completed = Vec::with_capacity((last - first + 1).max(0) as usize);
        for index in first..=last {
            match by_index.get(&index) {
                Some(month) => completed.push((*month).clone()),
                None => {
                    let year = (index.div_euclid(12)) as i32;
                    let month = (index.rem_euclid(12) + 1) as u32;
                    completed.push(self.impute_month(window.period, year, month, observed)?);
                }
            }
        }
        Ok(completed)
    }

    /// synthesizes one month from its nearest observed neighbors.
    pub fn impute_month(
        &self,
        period: Period,
        year: i32,
        month: u32,
        observed: &[MonthlyAggregate],
    ) -> Result<MonthlyAggregate, ImputeError> {
        let by_index: BTreeMap<i64, &MonthlyAggregate> = observed
            .iter()
            .map(|m| (month_index(m.year, m.month), m))
            .collect();
        let target = month_index(year, month);
        let before = by_index.range(..target).next_back().map(|(_, m)| *m);
        let after = by_index.range(target + 1..).next().map(|(_, m)| *m);

        let neighbors: Vec<&MonthlyAggregate> = match (before, after) {
            (Some(b), Some(a)) => vec![b, a],
            (Some(only), None) | (None, Some(only)) if self.allow_single_neighbor => vec![only],
            _ => {
                return Err(ImputeError::InsufficientData {
                    period,
                    year,
                    month,
                })
            }
        };

        let trip_count = match self.policy {
            ImputationPolicy::LinearAverage => {
                let sum: u64 = neighbors.iter().map(|m| m.trip_count).sum();
                (sum as f64 / neighbors.len() as f64).round() as u64
            }
            ImputationPolicy::DayScaled => {
                let target_days = date_ops::days_in_month(year, month)
                    .ok_or(ImputeError::InvalidMonth { year, month })?;
                let mut rates = Vec::with_capacity(neighbors.len());
                for m in &neighbors {
                    let days = date_ops::days_in_month(m.year, m.month).ok_or(
                        ImputeError::InvalidMonth {
                            year: m.year,
                            month: m.month,
                        },
                    )?;
                    rates.push(m.trip_count as f64 / days as f64);
                }
                let rate = rates.iter().sum::<f64>() / rates.len() as f64;
                (rate * target_days as f64).round() as u64
            }
        };

        // per-trip means are averaged under either policy
        let mean_of = |f: fn(&MonthlyAggregate) -> f64| {
            neighbors.iter().map(|m| f(m)).sum::<f64>() / neighbors.len() as f64
        };

        Ok(MonthlyAggregate {
            period,
            year,
            month,
            trip_count,
            mean_fare: mean_of(|m| m.mean_fare),
            mean_tip_pct: mean_of(|m| m.mean_tip_pct),
            mean_surcharge: mean_of(|m| m.mean_surcharge),
            is_imputed: true,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn observed(year: i32, month: u32, trips: u64, mean_fare: f64) -> MonthlyAggregate {
        MonthlyAggregate {
            period: Period::Baseline,
            year,
            month,
            trip_count: trips,
            mean_fare,
            mean_tip_pct: 20.0,
            mean_surcharge: 0.5,
            is_imputed: false,
        }
    }

    fn window(start: (i32, u32), end: (i32, u32)) -> PeriodWindow {
        PeriodWindow {
            period: Period::Baseline,
            start: NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, 28).unwrap(),
        }
    }

    #[test]
    fn test_linear_average_across_year_boundary() {
        // november 1000 and january 1200 bracket a missing december
        let months = vec![observed(2024, 11, 1000, 14.0), observed(2025, 1, 1200, 16.0)];
        let imputer = PeriodImputer::new(ImputationPolicy::LinearAverage, false);
        let completed = imputer
            .fill_gaps(&window((2024, 11), (2025, 1)), &months)
            .unwrap();
        assert_eq!(completed.len(), 3);
        let december = &completed[1];
        assert_eq!((december.year, december.month), (2024, 12));
        assert_eq!(december.trip_count, 1100);
        assert!((december.mean_fare - 15.0).abs() < 1e-9);
        assert!(december.is_imputed);
        assert!(!completed[0].is_imputed);
    }

    #[test]
    fn test_day_scaled_uses_per_day_rates() {
        // november: 3000 / 30 days, january: 3100 / 31 days, both 100/day.
        // december has 31 days, so the imputed count is 3100.
        let months = vec![observed(2024, 11, 3000, 14.0), observed(2025, 1, 3100, 16.0)];
        let imputer = PeriodImputer::new(ImputationPolicy::DayScaled, false);
        let completed = imputer
            .fill_gaps(&window((2024, 11), (2025, 1)), &months)
            .unwrap();
        assert_eq!(completed[1].trip_count, 3100);
    }

    #[test]
    fn test_trailing_month_filled_from_single_neighbor() {
        // january through november observed; december is missing at the
        // trailing edge of a full-year window and must still appear
        let months: Vec<MonthlyAggregate> =
            (1..=11).map(|m| observed(2025, m, 1000 + m as u64, 15.0)).collect();
        let imputer = PeriodImputer::new(ImputationPolicy::LinearAverage, true);
        let completed = imputer
            .fill_gaps(&window((2025, 1), (2025, 12)), &months)
            .unwrap();
        assert_eq!(completed.len(), 12);
        let december = &completed[11];
        assert_eq!((december.year, december.month), (2025, 12));
        assert!(december.is_imputed);
        // only november is available on one side of the gap
        assert_eq!(december.trip_count, 1011);
    }

    #[test]
    fn test_trailing_month_without_confirmation_is_an_error() {
        let months: Vec<MonthlyAggregate> =
            (1..=11).map(|m| observed(2025, m, 1000, 15.0)).collect();
        let imputer = PeriodImputer::new(ImputationPolicy::LinearAverage, false);
        let result = imputer.fill_gaps(&window((2025, 1), (2025, 12)), &months);
        assert!(matches!(
            result,
            Err(ImputeError::InsufficientData {
                year: 2025,
                month: 12,
                ..
            })
        ));
    }

    #[test]
    fn test_single_neighbor_requires_confirmation() {
        let months = vec![observed(2024, 11, 1000, 14.0), observed(2025, 1, 1200, 16.0)];

        let strict = PeriodImputer::new(ImputationPolicy::LinearAverage, false);
        let result = strict.impute_month(Period::Baseline, 2025, 2, &months);
        assert!(matches!(result, Err(ImputeError::InsufficientData { .. })));

        let relaxed = PeriodImputer::new(ImputationPolicy::LinearAverage, true);
        let february = relaxed
            .impute_month(Period::Baseline, 2025, 2, &months)
            .unwrap();
        assert_eq!(february.trip_count, 1200);
        assert!(february.is_imputed);
    }

    #[test]
    fn test_no_observed_months_yields_empty() {
        let imputer = PeriodImputer::new(ImputationPolicy::LinearAverage, false);
        let completed = imputer
            .fill_gaps(&window((2025, 1), (2025, 12)), &[])
            .unwrap();
        assert!(completed.is_empty());
    }
}
