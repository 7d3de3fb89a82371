mod daily;
mod error;
mod estimator;
mod report;
mod series;

pub use daily::{daily_aggregates, DailyTripAggregate};
pub use error::WeatherError;
pub use estimator::WeatherEstimator;
pub use report::{ElasticitySummary, WeatherElasticityRow, WeatherReport};
pub use series::PrecipitationSeries;
