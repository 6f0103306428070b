//! Plan tier definitions.
//!
//! Represents the subscription levels a study account can hold.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription plan tier.
///
/// Determines every quota ceiling the admission engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - 3 study guides per month, small token budget.
    Free,

    /// Starter subscription.
    Starter,

    /// Pro subscription - the most generous ceilings.
    Pro,
}

impl PlanTier {
    /// Every tier, ordered from least to most generous.
    pub const ALL: [PlanTier; 3] = [PlanTier::Free, PlanTier::Starter, PlanTier::Pro];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Starter => "Starter",
            PlanTier::Pro => "Pro",
        }
    }

    /// Returns the monthly price label shown on the plans page.
    pub fn price_label(&self) -> &'static str {
        match self {
            PlanTier::Free => "R$ 0",
            PlanTier::Starter => "R$ 29,90",
            PlanTier::Pro => "R$ 59,90",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more generous limits.
    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Starter => 1,
            PlanTier::Pro => 2,
        }
    }

    /// Returns the identifier used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Starter => "starter",
            PlanTier::Pro => "pro",
        }
    }

    /// Maps a raw subscription status from the user backend to a tier.
    ///
    /// Legacy `premium` accounts are Pro. Missing or unrecognized statuses
    /// (cancelled, past due, never subscribed) fall back to Free.
    pub fn from_subscription_status(status: Option<&str>) -> Self {
        match status.map(str::trim) {
            Some("starter") => PlanTier::Starter,
            Some("pro") | Some("premium") => PlanTier::Pro,
            _ => PlanTier::Free,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PlanTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "starter" => Ok(PlanTier::Starter),
            "pro" => Ok(PlanTier::Pro),
            other => Err(ValidationError::invalid_format(
                "tier",
                format!("unknown plan '{}'", other),
            )),
        }
    }
}
