use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier label stored on the `subscriptions.plan` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Standard,
    Pro,
    StandardTrial,
    ProTrial,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown plan: {0}")]
pub struct PlanParseError(pub String);

impl Plan {
    pub const ALL: [Plan; 5] = [
        Plan::Free,
        Plan::Standard,
        Plan::Pro,
        Plan::StandardTrial,
        Plan::ProTrial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Standard => "standard",
            Plan::Pro => "pro",
            Plan::StandardTrial => "standard_trial",
            Plan::ProTrial => "pro_trial",
        }
    }

    /// Trial variants expire once `trial_ends_at` passes
    pub fn is_trial(&self) -> bool {
        matches!(self, Plan::StandardTrial | Plan::ProTrial)
    }

    pub fn is_pro_tier(&self) -> bool {
        matches!(self, Plan::Pro | Plan::ProTrial)
    }

    pub fn is_paid_tier(&self) -> bool {
        !matches!(self, Plan::Free)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| PlanParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stored_label() {
        for plan in Plan::ALL {
            assert_eq!(plan.as_str().parse::<Plan>(), Ok(plan));
        }
    }

    #[test]
    fn rejects_unknown_label() {
        assert_eq!(
            "enterprise".parse::<Plan>(),
            Err(PlanParseError("enterprise".to_string()))
        );
        // labels are stored lowercase
        assert!("Pro".parse::<Plan>().is_err());
    }

    #[test]
    fn only_suffixed_plans_are_trials() {
        let trials: Vec<Plan> = Plan::ALL.into_iter().filter(Plan::is_trial).collect();
        assert_eq!(trials, vec![Plan::StandardTrial, Plan::ProTrial]);
    }

    #[test]
    fn serializes_as_snake_case() {
        let value = serde_json::to_value(Plan::ProTrial).unwrap();
        assert_eq!(value, serde_json::json!("pro_trial"));
    }
}
