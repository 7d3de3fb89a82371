mod analysis_config;
mod context;
mod summary;

pub use analysis_config::{AnalysisConfig, PeriodWindow};
pub use context::RunContext;
pub use summary::RunSummary;
