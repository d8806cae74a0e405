use super::super::domain::AnswerSet;
use serde::{Deserialize, Serialize};

pub(crate) const MAX_RESPONSE: u8 = 6;
pub(crate) const MAX_TOTAL: u16 = 132;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscale {
    Exhaustion,
    Detachment,
    Accomplishment,
}

impl Subscale {
    pub const fn ordered() -> [Self; 3] {
        [Self::Exhaustion, Self::Detachment, Self::Accomplishment]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Exhaustion => "Emotional Exhaustion",
            Self::Detachment => "Detachment",
            Self::Accomplishment => "Personal Accomplishment",
        }
    }

    /// Zero-based question indices belonging to the sub-scale.
    pub fn items(self) -> Vec<usize> {
        ITEMS
            .iter()
            .enumerate()
            .filter(|(_, item)| **item == self)
            .map(|(index, _)| index)
            .collect()
    }

    /// Accomplishment items are answered on the inverted frequency scale.
    pub const fn scale(self) -> ItemScale {
        match self {
            Self::Exhaustion | Self::Detachment => ItemScale::Frequency,
            Self::Accomplishment => ItemScale::InvertedFrequency,
        }
    }
}

/// How a raw 0..=6 frequency response turns into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemScale {
    /// 0 = never ... 6 = every day.
    Frequency,
    /// 0 = every day ... 6 = never.
    InvertedFrequency,
}

impl ItemScale {
    pub const fn points(self, raw: u8) -> u16 {
        match self {
            Self::Frequency => raw as u16,
            Self::InvertedFrequency => MAX_RESPONSE.saturating_sub(raw) as u16,
        }
    }
}

const ITEMS: [Subscale; 22] = [
    Subscale::Exhaustion,
    Subscale::Exhaustion,
    Subscale::Exhaustion,
    Subscale::Accomplishment,
    Subscale::Detachment,
    Subscale::Exhaustion,
    Subscale::Accomplishment,
    Subscale::Exhaustion,
    Subscale::Accomplishment,
    Subscale::Detachment,
    Subscale::Detachment,
    Subscale::Accomplishment,
    Subscale::Exhaustion,
    Subscale::Exhaustion,
    Subscale::Detachment,
    Subscale::Exhaustion,
    Subscale::Accomplishment,
    Subscale::Accomplishment,
    Subscale::Accomplishment,
    Subscale::Exhaustion,
    Subscale::Accomplishment,
    Subscale::Detachment,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnoutScore {
    pub exhaustion: u16,
    pub detachment: u16,
    pub accomplishment: u16,
    pub total: u16,
}

impl BurnoutScore {
    pub fn from_subscales(exhaustion: u16, detachment: u16, accomplishment: u16) -> Self {
        Self {
            exhaustion,
            detachment,
            accomplishment,
            total: exhaustion + detachment + accomplishment,
        }
    }

    pub fn subscale(&self, subscale: Subscale) -> u16 {
        match subscale {
            Subscale::Exhaustion => self.exhaustion,
            Subscale::Detachment => self.detachment,
            Subscale::Accomplishment => self.accomplishment,
        }
    }

    /// Highest attainable total for a sub-scale given its item count.
    pub fn subscale_max(subscale: Subscale) -> u16 {
        subscale.items().len() as u16 * MAX_RESPONSE as u16
    }

    pub(crate) fn is_consistent(&self) -> bool {
        let sum = self
            .exhaustion
            .checked_add(self.detachment)
            .and_then(|partial| partial.checked_add(self.accomplishment));
        sum == Some(self.total) && self.total <= MAX_TOTAL
    }
}

pub(super) fn score(answers: &AnswerSet) -> BurnoutScore {
    let mut totals = [0u16; 3];

    for (question, subscale) in ITEMS.iter().enumerate() {
        let points = subscale.scale().points(answers.response(question));
        let slot = match subscale {
            Subscale::Exhaustion => 0,
            Subscale::Detachment => 1,
            Subscale::Accomplishment => 2,
        };
        totals[slot] += points;
    }

    BurnoutScore::from_subscales(totals[0], totals[1], totals[2])
}
