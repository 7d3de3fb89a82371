use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// observation window relative to the congestion toll activation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// pre-toll window used as the comparison base
    Baseline,
    /// post-toll window under analysis
    Treatment,
}

impl Period {
    pub fn all() -> [Period; 2] {
        [Period::Baseline, Period::Treatment]
    }

    /// directory-safe label used for output partitioning
    pub fn label(&self) -> &'static str {
        match self {
            Period::Baseline => "baseline",
            Period::Treatment => "treatment",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(Period::Baseline),
            "treatment" => Ok(Period::Treatment),
            other => Err(format!(
                "unknown period '{other}', expected 'baseline' or 'treatment'"
            )),
        }
    }
}
