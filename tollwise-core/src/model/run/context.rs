use super::{AnalysisConfig, RunSummary};

/// explicit per-run state threaded through every stage: the shared
/// analytical configuration plus the run-level counters. stages never
/// consult ambient process-wide state, which keeps them independently
/// testable.
#[derive(Debug, Default)]
pub struct RunContext {
    pub config: AnalysisConfig,
    pub summary: RunSummary,
}

impl RunContext {
    pub fn new(config: AnalysisConfig) -> RunContext {
        RunContext {
            config,
            summary: RunSummary::default(),
        }
    }
}
