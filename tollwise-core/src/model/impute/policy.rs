use serde::{Deserialize, Serialize};

/// how a missing month's aggregates are synthesized from its neighbors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImputationPolicy {
    /// plain mean of the adjacent months' metrics
    #[default]
    LinearAverage,
    /// mean of the adjacent months' per-day rates, scaled by the missing
    /// month's day count
    DayScaled,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ImputationPolicy::DayScaled).unwrap();
        assert_eq!(json, "\"day_scaled\"");
        let parsed: ImputationPolicy = serde_json::from_str("\"linear_average\"").unwrap();
        assert_eq!(parsed, ImputationPolicy::LinearAverage);
    }
}
