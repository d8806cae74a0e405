mod views;

pub use views::{
    BandCount, ChannelCount, CohortSnapshot, PerInstrument, RiskTierCounts, RiskTierShares,
};

use std::collections::BTreeMap;

use super::banding::{classify_band, classify_tier, BurnoutBand};
use super::domain::{Instrument, MemberCompletionRecord, MemberId};
use super::results::MemberResults;
use super::scoring::Channel;
use super::selection::DominantChannel;

/// Folds a group's completion records into a [`CohortSnapshot`].
///
/// The record set may be an eventually consistent read; whatever it contains
/// is what the snapshot reflects. Members are keyed in a `BTreeMap` so the fold
/// order is fixed for a given input.
pub struct CohortAggregator;

impl CohortAggregator {
    /// Aggregates records for `roster`. Members that only appear in `records`
    /// still count towards the group.
    pub fn aggregate(roster: &[MemberId], records: &[MemberCompletionRecord]) -> CohortSnapshot {
        let members = group_by_member(roster, records);
        fold(&members)
    }

    pub fn aggregate_records(records: &[MemberCompletionRecord]) -> CohortSnapshot {
        Self::aggregate(&[], records)
    }
}

pub(crate) fn group_by_member(
    roster: &[MemberId],
    records: &[MemberCompletionRecord],
) -> BTreeMap<MemberId, MemberResults> {
    let mut members: BTreeMap<MemberId, MemberResults> = roster
        .iter()
        .map(|member| (member.clone(), MemberResults::default()))
        .collect();

    for record in records {
        members
            .entry(record.member_id.clone())
            .or_default()
            .apply(record);
    }

    members
}

fn fold(members: &BTreeMap<MemberId, MemberResults>) -> CohortSnapshot {
    let total_members = members.len();
    let mut completed = PerInstrument::<usize>::default();
    let mut all_three_completed = 0;
    let mut members_at_full_progress = 0;
    let mut burnout_sum: u64 = 0;
    let mut risk_tiers = RiskTierCounts::default();
    let mut bands: BTreeMap<BurnoutBand, usize> = BTreeMap::new();
    let mut channels: BTreeMap<DominantChannel, usize> = BTreeMap::new();

    for results in members.values() {
        if let Some(total) = results.burnout_total() {
            completed.burnout += 1;
            burnout_sum += u64::from(total);
            risk_tiers.record(classify_tier(total));
            *bands.entry(classify_band(total)).or_default() += 1;
        }

        if let Some(dominant) = results.dominant_channel() {
            completed.perception += 1;
            *channels.entry(dominant).or_default() += 1;
        }

        if results.is_completed(Instrument::Preference) {
            completed.preference += 1;
        }

        if results.completed_count() == Instrument::ordered().len() {
            all_three_completed += 1;
        }

        if results.progress().is_complete() {
            members_at_full_progress += 1;
        }
    }

    let completion_rates = PerInstrument {
        burnout: ratio(completed.burnout, total_members),
        perception: ratio(completed.perception, total_members),
        preference: ratio(completed.preference, total_members),
    };

    let risk_tier_shares = RiskTierShares {
        low: ratio(risk_tiers.low, completed.burnout),
        moderate: ratio(risk_tiers.moderate, completed.burnout),
        high: ratio(risk_tiers.high, completed.burnout),
    };

    let band_distribution = BurnoutBand::ordered()
        .into_iter()
        .map(|band| BandCount {
            band,
            band_label: band.label(),
            count: bands.get(&band).copied().unwrap_or_default(),
        })
        .collect();

    let channel_distribution = Channel::ordered()
        .into_iter()
        .map(|channel| DominantChannel::Single { channel })
        .chain(std::iter::once(DominantChannel::Balanced))
        .map(|dominant| {
            let count = channels.get(&dominant).copied().unwrap_or_default();
            ChannelCount {
                dominant,
                label: dominant.label(),
                count,
                share: ratio(count, completed.perception),
            }
        })
        .collect();

    CohortSnapshot {
        total_members,
        per_instrument_completed: completed,
        completion_rates,
        all_three_completed,
        members_at_full_progress,
        average_burnout_total: if completed.burnout == 0 {
            0.0
        } else {
            burnout_sum as f64 / completed.burnout as f64
        },
        risk_tiers,
        risk_tier_shares,
        band_distribution,
        channel_distribution,
    }
}

/// `numerator / denominator`, or 0 for an empty denominator.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
