//! Qualitative banding of burnout totals.
//!
//! Two granularities over the same 0..=132 metric: six ordered bands for member
//! feedback and three coarse risk tiers for cohort reporting. Totals above the
//! instrument maximum saturate into the top band and tier.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnoutBand {
    Thriving,
    Balanced,
    Strained,
    Overloaded,
    Exhausted,
    Critical,
}

impl BurnoutBand {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Thriving,
            Self::Balanced,
            Self::Strained,
            Self::Overloaded,
            Self::Exhausted,
            Self::Critical,
        ]
    }

    pub const fn range(self) -> RangeInclusive<u16> {
        match self {
            Self::Thriving => 0..=22,
            Self::Balanced => 23..=44,
            Self::Strained => 45..=66,
            Self::Overloaded => 67..=88,
            Self::Exhausted => 89..=110,
            Self::Critical => 111..=132,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Thriving => "Thriving",
            Self::Balanced => "Balanced",
            Self::Strained => "Strained",
            Self::Overloaded => "Overloaded",
            Self::Exhausted => "Exhausted",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Moderate, Self::High]
    }

    pub const fn range(self) -> RangeInclusive<u16> {
        match self {
            Self::Low => 0..=44,
            Self::Moderate => 45..=88,
            Self::High => 89..=132,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Six-level band for a burnout total.
pub fn classify_band(total: u16) -> BurnoutBand {
    classify(BurnoutBand::ordered(), BurnoutBand::range, total)
}

/// Coarse cohort risk tier for a burnout total.
pub fn classify_tier(total: u16) -> RiskTier {
    classify(RiskTier::ordered(), RiskTier::range, total)
}

/// First level whose range holds `total`; anything past the table falls into
/// the last level.
fn classify<T: Copy, const N: usize>(
    levels: [T; N],
    range: fn(T) -> RangeInclusive<u16>,
    total: u16,
) -> T {
    let top = levels[N - 1];
    levels
        .into_iter()
        .find(|level| range(*level).contains(&total))
        .unwrap_or(top)
}
