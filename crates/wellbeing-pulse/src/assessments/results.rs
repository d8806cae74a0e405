use chrono::{DateTime, Utc};
use serde::Serialize;

use super::banding::{classify_band, classify_tier, BurnoutBand, RiskTier};
use super::domain::{Instrument, MemberCompletionRecord, MemberId};
use super::scoring::{BurnoutScore, PerceptionScore, PreferenceScore, ScoreObject};
use super::selection::{dominant_channel, DominantChannel, PreferenceProfile};
use super::unlock::{ProgressState, UnlockGate};

/// A score together with the moment it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completed<T> {
    pub score: T,
    pub completed_at: DateTime<Utc>,
}

/// The canonical per-instrument results of one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberResults {
    pub burnout: Option<Completed<BurnoutScore>>,
    pub perception: Option<Completed<PerceptionScore>>,
    pub preference: Option<Completed<PreferenceScore>>,
}

impl MemberResults {
    /// Folds records into one result per instrument, latest `completed_at` winning.
    /// Records with equal timestamps resolve to the one given last.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a MemberCompletionRecord>,
    {
        let mut results = Self::default();
        for record in records {
            results.apply(record);
        }
        results
    }

    pub fn apply(&mut self, record: &MemberCompletionRecord) {
        let completed_at = record.completed_at;
        match &record.score {
            ScoreObject::Burnout(score) => keep_latest(&mut self.burnout, *score, completed_at),
            ScoreObject::Perception(score) => {
                keep_latest(&mut self.perception, *score, completed_at)
            }
            ScoreObject::Preference(score) => {
                keep_latest(&mut self.preference, *score, completed_at)
            }
        }
    }

    /// Overwrites the instrument's slot the way a store upsert does, whatever
    /// the timestamps.
    pub fn replace(&mut self, record: &MemberCompletionRecord) {
        let completed_at = record.completed_at;
        match &record.score {
            ScoreObject::Burnout(score) => {
                self.burnout = Some(Completed {
                    score: *score,
                    completed_at,
                })
            }
            ScoreObject::Perception(score) => {
                self.perception = Some(Completed {
                    score: *score,
                    completed_at,
                })
            }
            ScoreObject::Preference(score) => {
                self.preference = Some(Completed {
                    score: *score,
                    completed_at,
                })
            }
        }
    }

    pub fn is_completed(&self, instrument: Instrument) -> bool {
        match instrument {
            Instrument::Burnout => self.burnout.is_some(),
            Instrument::Perception => self.perception.is_some(),
            Instrument::Preference => self.preference.is_some(),
        }
    }

    pub fn completed_count(&self) -> usize {
        Instrument::ordered()
            .into_iter()
            .filter(|instrument| self.is_completed(*instrument))
            .count()
    }

    pub fn burnout_total(&self) -> Option<u16> {
        self.burnout.map(|completed| completed.score.total)
    }

    pub fn burnout_band(&self) -> Option<BurnoutBand> {
        self.burnout_total().map(classify_band)
    }

    pub fn risk_tier(&self) -> Option<RiskTier> {
        self.burnout_total().map(classify_tier)
    }

    pub fn dominant_channel(&self) -> Option<DominantChannel> {
        self.perception
            .as_ref()
            .map(|completed| dominant_channel(&completed.score))
    }

    pub fn preference_profile(&self) -> Option<PreferenceProfile> {
        self.preference
            .as_ref()
            .map(|completed| PreferenceProfile::from_score(&completed.score))
    }

    pub fn progress(&self) -> ProgressState {
        UnlockGate::evaluate(self)
    }

    pub fn view(&self, member_id: &MemberId) -> MemberResultsView {
        MemberResultsView {
            member_id: member_id.clone(),
            completed: self.completed_count(),
            burnout: self.burnout.map(|completed| BurnoutView {
                score: completed.score,
                band: classify_band(completed.score.total),
                band_label: classify_band(completed.score.total).label(),
                tier: classify_tier(completed.score.total),
                tier_label: classify_tier(completed.score.total).label(),
                completed_at: completed.completed_at,
            }),
            perception: self.perception.map(|completed| {
                let dominant = dominant_channel(&completed.score);
                PerceptionView {
                    score: completed.score,
                    dominant,
                    dominant_label: dominant.label(),
                    completed_at: completed.completed_at,
                }
            }),
            preference: self.preference.map(|completed| {
                let profile = PreferenceProfile::from_score(&completed.score);
                PreferenceView {
                    score: completed.score,
                    summary: profile.summary(),
                    profile,
                    completed_at: completed.completed_at,
                }
            }),
            progress: self.progress(),
        }
    }
}

fn keep_latest<T>(slot: &mut Option<Completed<T>>, score: T, completed_at: DateTime<Utc>) {
    let newer = slot
        .as_ref()
        .map(|current| completed_at >= current.completed_at)
        .unwrap_or(true);
    if newer {
        *slot = Some(Completed {
            score,
            completed_at,
        });
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BurnoutView {
    pub score: BurnoutScore,
    pub band: BurnoutBand,
    pub band_label: &'static str,
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerceptionView {
    pub score: PerceptionScore,
    pub dominant: DominantChannel,
    pub dominant_label: &'static str,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceView {
    pub score: PreferenceScore,
    pub profile: PreferenceProfile,
    pub summary: String,
    pub completed_at: DateTime<Utc>,
}

/// Labelled results for presentation surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResultsView {
    pub member_id: MemberId,
    pub completed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnout: Option<BurnoutView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perception: Option<PerceptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<PreferenceView>,
    pub progress: ProgressState,
}
