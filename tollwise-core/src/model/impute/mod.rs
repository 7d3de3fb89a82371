mod error;
mod imputer;
mod monthly;
mod policy;

pub use error::ImputeError;
pub use imputer::PeriodImputer;
pub use monthly::{monthly_aggregates, MonthlyAggregate};
pub use policy::ImputationPolicy;
