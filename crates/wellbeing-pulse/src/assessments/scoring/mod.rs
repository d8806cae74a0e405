mod burnout;
mod perception;
mod preference;

pub use burnout::{BurnoutScore, ItemScale, Subscale};
pub use perception::{channel_for, option_for, Channel, PerceptionScore};
pub use preference::{Archetype, Axis, PreferenceItem, PreferenceScore};

use super::domain::{AnswerSet, Instrument, ScoringError};
use serde::{Deserialize, Serialize};

/// Stateless calculator turning a complete answer set into a score object.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        instrument: Instrument,
        answers: &AnswerSet,
    ) -> Result<ScoreObject, ScoringError> {
        answers.require_complete(instrument)?;

        let score = match instrument {
            Instrument::Burnout => ScoreObject::Burnout(burnout::score(answers)),
            Instrument::Perception => ScoreObject::Perception(perception::score(answers)?),
            Instrument::Preference => ScoreObject::Preference(preference::score(answers)),
        };

        Ok(score)
    }

    /// Same as [`ScoreCalculator::score`] for callers holding a raw identifier.
    pub fn score_by_key(
        &self,
        instrument: &str,
        answers: &AnswerSet,
    ) -> Result<ScoreObject, ScoringError> {
        let instrument = instrument.parse::<Instrument>()?;
        self.score(instrument, answers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "instrument", rename_all = "snake_case")]
pub enum ScoreObject {
    Burnout(BurnoutScore),
    Perception(PerceptionScore),
    Preference(PreferenceScore),
}

impl ScoreObject {
    pub fn instrument(&self) -> Instrument {
        match self {
            Self::Burnout(_) => Instrument::Burnout,
            Self::Perception(_) => Instrument::Perception,
            Self::Preference(_) => Instrument::Preference,
        }
    }

    /// Whether the numeric fields satisfy the invariants of a scored answer set.
    pub fn is_consistent(&self) -> bool {
        match self {
            Self::Burnout(score) => score.is_consistent(),
            Self::Perception(score) => score.is_consistent(),
            Self::Preference(score) => score.is_consistent(),
        }
    }

    pub fn as_burnout(&self) -> Option<&BurnoutScore> {
        match self {
            Self::Burnout(score) => Some(score),
            _ => None,
        }
    }

    pub fn as_perception(&self) -> Option<&PerceptionScore> {
        match self {
            Self::Perception(score) => Some(score),
            _ => None,
        }
    }

    pub fn as_preference(&self) -> Option<&PreferenceScore> {
        match self {
            Self::Preference(score) => Some(score),
            _ => None,
        }
    }
}
