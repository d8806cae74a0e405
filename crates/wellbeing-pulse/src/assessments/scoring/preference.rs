use super::super::domain::AnswerSet;
use serde::{Deserialize, Serialize};

pub(crate) const AXIS_MIN: u8 = 2;
pub(crate) const AXIS_MAX: u8 = 10;
const REVERSE_PIVOT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Energy,
    Focus,
    Decisions,
    Structure,
}

impl Axis {
    pub const fn ordered() -> [Self; 4] {
        [Self::Energy, Self::Focus, Self::Decisions, Self::Structure]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Focus => "Focus",
            Self::Decisions => "Decisions",
            Self::Structure => "Structure",
        }
    }

    /// The two archetypes of the axis, high end first.
    pub const fn archetypes(self) -> (Archetype, Archetype) {
        match self {
            Self::Energy => (Archetype::Collaborative, Archetype::Independent),
            Self::Focus => (Archetype::Visionary, Archetype::Practical),
            Self::Decisions => (Archetype::Analytical, Archetype::Empathetic),
            Self::Structure => (Archetype::Planner, Archetype::Adaptive),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Collaborative,
    Independent,
    Visionary,
    Practical,
    Analytical,
    Empathetic,
    Planner,
    Adaptive,
}

impl Archetype {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Collaborative => "Collaborative",
            Self::Independent => "Independent",
            Self::Visionary => "Visionary",
            Self::Practical => "Practical",
            Self::Analytical => "Analytical",
            Self::Empathetic => "Empathetic",
            Self::Planner => "Planner",
            Self::Adaptive => "Adaptive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceItem {
    pub axis: Axis,
    pub reverse: bool,
}

impl PreferenceItem {
    const fn direct(axis: Axis) -> Self {
        Self {
            axis,
            reverse: false,
        }
    }

    const fn reversed(axis: Axis) -> Self {
        Self {
            axis,
            reverse: true,
        }
    }

    pub const fn points(self, raw: u8) -> u8 {
        if self.reverse {
            REVERSE_PIVOT.saturating_sub(raw)
        } else {
            raw
        }
    }
}

pub(crate) const ITEMS: [PreferenceItem; 8] = [
    PreferenceItem::direct(Axis::Energy),
    PreferenceItem::reversed(Axis::Focus),
    PreferenceItem::direct(Axis::Decisions),
    PreferenceItem::reversed(Axis::Structure),
    PreferenceItem::reversed(Axis::Energy),
    PreferenceItem::direct(Axis::Focus),
    PreferenceItem::reversed(Axis::Decisions),
    PreferenceItem::direct(Axis::Structure),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceScore {
    pub energy: u8,
    pub focus: u8,
    pub decisions: u8,
    pub structure: u8,
}

impl PreferenceScore {
    pub fn total(&self, axis: Axis) -> u8 {
        match axis {
            Axis::Energy => self.energy,
            Axis::Focus => self.focus,
            Axis::Decisions => self.decisions,
            Axis::Structure => self.structure,
        }
    }

    fn add(&mut self, axis: Axis, points: u8) {
        let slot = match axis {
            Axis::Energy => &mut self.energy,
            Axis::Focus => &mut self.focus,
            Axis::Decisions => &mut self.decisions,
            Axis::Structure => &mut self.structure,
        };
        *slot = slot.saturating_add(points);
    }

    pub(crate) fn is_consistent(&self) -> bool {
        Axis::ordered()
            .into_iter()
            .all(|axis| (AXIS_MIN..=AXIS_MAX).contains(&self.total(axis)))
    }
}

pub(super) fn score(answers: &AnswerSet) -> PreferenceScore {
    let mut score = PreferenceScore::default();

    for (question, item) in ITEMS.iter().enumerate() {
        score.add(item.axis, item.points(answers.response(question)));
    }

    score
}
