//! Plan catalog - the tier to limits table.
//!
//! The catalog is a value handed to the admission engine rather than a
//! global, so alternate pricing tables can be loaded from configuration or
//! built in tests.

use serde::{Deserialize, Serialize};

use super::{PlanLimits, PlanTier};

/// Limits for every plan tier.
///
/// One field per tier keeps [`PlanCatalog::limits_for`] total: there is no
/// tier without limits and no lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCatalog {
    pub free: PlanLimits,
    pub starter: PlanLimits,
    pub pro: PlanLimits,
}

impl PlanCatalog {
    /// Creates a catalog from explicit limits.
    pub fn new(free: PlanLimits, starter: PlanLimits, pro: PlanLimits) -> Self {
        Self { free, starter, pro }
    }

    /// The published pricing table.
    pub fn standard() -> Self {
        Self::new(PlanLimits::free(), PlanLimits::starter(), PlanLimits::pro())
    }

    /// Parses a catalog from YAML with `free`, `starter` and `pro` sections.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Returns the limits for a tier.
    pub fn limits_for(&self, tier: PlanTier) -> &PlanLimits {
        match tier {
            PlanTier::Free => &self.free,
            PlanTier::Starter => &self.starter,
            PlanTier::Pro => &self.pro,
        }
    }

    /// Returns a copy of this catalog with one tier's limits replaced.
    pub fn with_limits(mut self, tier: PlanTier, limits: PlanLimits) -> Self {
        match tier {
            PlanTier::Free => self.free = limits,
            PlanTier::Starter => self.starter = limits,
            PlanTier::Pro => self.pro = limits,
        }
        self
    }

    /// Returns true if each tier covers the one ranked below it.
    ///
    /// Not enforced: a catalog violating this still works, but a subscriber
    /// could be denied after upgrading.
    pub fn is_monotonic(&self) -> bool {
        PlanTier::ALL
            .windows(2)
            .all(|pair| self.limits_for(pair[1]).covers(self.limits_for(pair[0])))
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
