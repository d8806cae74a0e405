use serde::Serialize;

use super::super::banding::{BurnoutBand, RiskTier};
use super::super::domain::Instrument;
use super::super::selection::DominantChannel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerInstrument<T> {
    pub burnout: T,
    pub perception: T,
    pub preference: T,
}

impl<T: Copy> PerInstrument<T> {
    pub fn get(&self, instrument: Instrument) -> T {
        match instrument {
            Instrument::Burnout => self.burnout,
            Instrument::Perception => self.perception,
            Instrument::Preference => self.preference,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskTierCounts {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

impl RiskTierCounts {
    pub fn get(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Moderate => self.moderate,
            RiskTier::High => self.high,
        }
    }

    pub(super) fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Low => self.low += 1,
            RiskTier::Moderate => self.moderate += 1,
            RiskTier::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RiskTierShares {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandCount {
    pub band: BurnoutBand,
    pub band_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelCount {
    pub dominant: DominantChannel,
    pub label: &'static str,
    pub count: usize,
    pub share: f64,
}

/// Ephemeral group statistics; recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSnapshot {
    pub total_members: usize,
    pub per_instrument_completed: PerInstrument<usize>,
    pub completion_rates: PerInstrument<f64>,
    pub all_three_completed: usize,
    pub members_at_full_progress: usize,
    pub average_burnout_total: f64,
    pub risk_tiers: RiskTierCounts,
    pub risk_tier_shares: RiskTierShares,
    pub band_distribution: Vec<BandCount>,
    pub channel_distribution: Vec<ChannelCount>,
}

impl CohortSnapshot {
    pub fn completion_rate(&self, instrument: Instrument) -> f64 {
        self.completion_rates.get(instrument)
    }
}
