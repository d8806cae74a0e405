use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::ScoreObject;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Burnout,
    Perception,
    Preference,
}

impl Instrument {
    pub const fn ordered() -> [Self; 3] {
        [Self::Burnout, Self::Perception, Self::Preference]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Burnout => "burnout",
            Self::Perception => "perception",
            Self::Preference => "preference",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Burnout => "Burnout Inventory",
            Self::Perception => "Perception Channels",
            Self::Preference => "Work Preferences",
        }
    }

    pub const fn question_count(self) -> usize {
        match self {
            Self::Burnout => 22,
            Self::Perception => 10,
            Self::Preference => 8,
        }
    }

    /// Expected response domain. [`AnswerSet::require_in_range`] checks it; scoring alone does not.
    pub const fn response_range(self) -> RangeInclusive<u8> {
        match self {
            Self::Burnout => 0..=6,
            Self::Perception => 0..=3,
            Self::Preference => 1..=5,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Instrument {
    type Err = ScoringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "burnout" => Ok(Self::Burnout),
            "perception" => Ok(Self::Perception),
            "preference" => Ok(Self::Preference),
            _ => Err(ScoringError::UnknownInstrument(value.to_string())),
        }
    }
}

/// Responses keyed by zero-based question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<usize, u8>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self(responses.into_iter().enumerate().collect())
    }

    pub fn insert(&mut self, question: usize, response: u8) -> Option<u8> {
        self.0.insert(question, response)
    }

    pub fn remove(&mut self, question: usize) -> Option<u8> {
        self.0.remove(&question)
    }

    pub fn get(&self, question: usize) -> Option<u8> {
        self.0.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn missing(&self, instrument: Instrument) -> Vec<usize> {
        (0..instrument.question_count())
            .filter(|question| !self.0.contains_key(question))
            .collect()
    }

    pub fn require_complete(&self, instrument: Instrument) -> Result<(), ScoringError> {
        let missing = self.missing(instrument);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScoringError::IncompleteAnswerSet {
                instrument,
                missing,
            })
        }
    }

    /// Rejects the first scored question whose response lies outside the
    /// instrument's response range. Entries past the question count are ignored.
    pub fn require_in_range(&self, instrument: Instrument) -> Result<(), ScoringError> {
        let range = instrument.response_range();
        match self
            .0
            .range(..instrument.question_count())
            .find(|(_, response)| !range.contains(*response))
        {
            Some((&question, &response)) => Err(ScoringError::ResponseOutOfRange {
                instrument,
                question,
                response,
            }),
            None => Ok(()),
        }
    }

    /// Response for a question already known to be present.
    pub(crate) fn response(&self, question: usize) -> u8 {
        self.0.get(&question).copied().unwrap_or_default()
    }
}

impl FromIterator<(usize, u8)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (usize, u8)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One stored result for a (member, instrument) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberCompletionRecord {
    pub member_id: MemberId,
    pub score: ScoreObject,
    pub completed_at: DateTime<Utc>,
}

impl MemberCompletionRecord {
    pub fn new(member_id: MemberId, score: ScoreObject, completed_at: DateTime<Utc>) -> Self {
        Self {
            member_id,
            score,
            completed_at,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.score.instrument()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Employee,
    Manager,
    Administrator,
}

impl MemberRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
            Self::Administrator => "Administrator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub member_id: MemberId,
    pub group_id: GroupId,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: MemberRole,
}

/// Contract violations raised by the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("{instrument} answer set is missing questions {missing:?}")]
    IncompleteAnswerSet {
        instrument: Instrument,
        missing: Vec<usize>,
    },
    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),
    #[error("perception question {question} has no channel for option {option}")]
    UnmappedOption { question: usize, option: u8 },
    #[error("{instrument} question {question} has out of range response {response}")]
    ResponseOutOfRange {
        instrument: Instrument,
        question: usize,
        response: u8,
    },
    #[error("{0} score violates its invariants")]
    InconsistentScore(Instrument),
}
