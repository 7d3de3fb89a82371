mod config;
mod error;
mod ingest;
mod run;

pub use config::{IoPolicy, PipelineConfig};
pub use error::PipelineError;
pub use ingest::{IngestError, MonthlyFile};
pub use run::run_pipeline;
