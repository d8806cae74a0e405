use super::super::domain::{AnswerSet, Instrument, ScoringError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Visual,
    Auditory,
    Kinesthetic,
    Digital,
}

impl Channel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Visual, Self::Auditory, Self::Kinesthetic, Self::Digital]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Auditory => "Auditory",
            Self::Kinesthetic => "Kinesthetic",
            Self::Digital => "Digital",
        }
    }
}

use self::Channel::{Auditory as A, Digital as D, Kinesthetic as K, Visual as V};

// Option order is shuffled per question on the form.
const OPTIONS: [[Channel; 4]; 10] = [
    [V, A, K, D],
    [A, V, D, K],
    [K, D, V, A],
    [D, K, A, V],
    [V, K, A, D],
    [A, D, V, K],
    [K, V, D, A],
    [D, A, K, V],
    [V, D, K, A],
    [A, K, D, V],
];

/// Channel counted when `option` is chosen on `question`.
pub fn channel_for(question: usize, option: u8) -> Option<Channel> {
    OPTIONS
        .get(question)
        .and_then(|options| options.get(option as usize))
        .copied()
}

/// Option index that selects `channel` on `question`.
pub fn option_for(question: usize, channel: Channel) -> Option<u8> {
    OPTIONS
        .get(question)?
        .iter()
        .position(|candidate| *candidate == channel)
        .map(|index| index as u8)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptionScore {
    pub visual: u8,
    pub auditory: u8,
    pub kinesthetic: u8,
    pub digital: u8,
}

impl PerceptionScore {
    pub fn count(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Visual => self.visual,
            Channel::Auditory => self.auditory,
            Channel::Kinesthetic => self.kinesthetic,
            Channel::Digital => self.digital,
        }
    }

    pub fn total(&self) -> usize {
        Channel::ordered()
            .into_iter()
            .map(|channel| self.count(channel) as usize)
            .sum()
    }

    fn increment(&mut self, channel: Channel) {
        let slot = match channel {
            Channel::Visual => &mut self.visual,
            Channel::Auditory => &mut self.auditory,
            Channel::Kinesthetic => &mut self.kinesthetic,
            Channel::Digital => &mut self.digital,
        };
        *slot += 1;
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.total() == Instrument::Perception.question_count()
    }
}

pub(super) fn score(answers: &AnswerSet) -> Result<PerceptionScore, ScoringError> {
    let mut score = PerceptionScore::default();

    for question in 0..Instrument::Perception.question_count() {
        let option = answers.response(question);
        let channel =
            channel_for(question, option).ok_or(ScoringError::UnmappedOption { question, option })?;
        score.increment(channel);
    }

    Ok(score)
}
