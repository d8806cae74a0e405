use serde::{Deserialize, Serialize};

use super::scoring::{Archetype, Axis, Channel, PerceptionScore, PreferenceScore};

/// Axis totals at or above this value resolve to the axis' first archetype.
pub const ARCHETYPE_THRESHOLD: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DominantChannel {
    Single { channel: Channel },
    Balanced,
}

impl DominantChannel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single { channel } => channel.label(),
            Self::Balanced => "Balanced",
        }
    }
}

/// Picks the channel with the strictly highest count; any shared maximum is balanced.
pub fn dominant_channel(score: &PerceptionScore) -> DominantChannel {
    let highest = Channel::ordered()
        .into_iter()
        .map(|channel| score.count(channel))
        .max()
        .unwrap_or_default();

    let mut leaders = Channel::ordered()
        .into_iter()
        .filter(|channel| score.count(*channel) == highest);

    match (leaders.next(), leaders.next()) {
        (Some(channel), None) => DominantChannel::Single { channel },
        _ => DominantChannel::Balanced,
    }
}

pub fn archetype_for(axis: Axis, total: u8) -> Archetype {
    let (high, low) = axis.archetypes();
    if total >= ARCHETYPE_THRESHOLD {
        high
    } else {
        low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisReading {
    pub axis: Axis,
    pub total: u8,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub readings: Vec<AxisReading>,
}

impl PreferenceProfile {
    pub fn from_score(score: &PreferenceScore) -> Self {
        let readings = Axis::ordered()
            .into_iter()
            .map(|axis| {
                let total = score.total(axis);
                AxisReading {
                    axis,
                    total,
                    archetype: archetype_for(axis, total),
                }
            })
            .collect();

        Self { readings }
    }

    pub fn archetype(&self, axis: Axis) -> Option<Archetype> {
        self.readings
            .iter()
            .find(|reading| reading.axis == axis)
            .map(|reading| reading.archetype)
    }

    pub fn summary(&self) -> String {
        self.readings
            .iter()
            .map(|reading| reading.archetype.label())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
