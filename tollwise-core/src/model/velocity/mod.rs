mod aggregate;
mod comparison;
mod estimator;
mod time_bucket;

pub use aggregate::VelocityAggregate;
pub use comparison::{paired_comparison, VelocityComparison};
pub use estimator::VelocityEstimator;
pub use time_bucket::TimeBucket;
