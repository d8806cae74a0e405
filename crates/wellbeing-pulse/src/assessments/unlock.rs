//! Sequencing of the three instruments.
//!
//! Burnout is always open. Perception and preference stay locked until burnout
//! is recorded; a low burnout total (at or below [`OPTIONAL_THRESHOLD`]) makes
//! them optional and reports full progress straight away, otherwise they are
//! required and each contributes a fixed share of progress.

use serde::{Deserialize, Serialize};

use super::domain::Instrument;
use super::results::MemberResults;

/// Burnout totals at or below this value leave the follow-up instruments optional.
pub const OPTIONAL_THRESHOLD: u16 = 44;

const BURNOUT_SHARE: u8 = 40;
const FOLLOW_UP_SHARE: u8 = 30;
const FULL_PROGRESS: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockState {
    Locked,
    Available,
    Optional,
    Completed,
}

impl UnlockState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Available => "Available",
            Self::Optional => "Optional",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockStates {
    pub perception: UnlockState,
    pub preference: UnlockState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub percentage: u8,
    pub unlock_state: UnlockStates,
}

impl ProgressState {
    pub fn state_of(&self, instrument: Instrument) -> Option<UnlockState> {
        match instrument {
            Instrument::Burnout => None,
            Instrument::Perception => Some(self.unlock_state.perception),
            Instrument::Preference => Some(self.unlock_state.preference),
        }
    }

    pub fn can_start(&self, instrument: Instrument) -> bool {
        self.state_of(instrument) != Some(UnlockState::Locked)
    }

    pub fn is_complete(&self) -> bool {
        self.percentage >= FULL_PROGRESS
    }
}

pub struct UnlockGate;

impl UnlockGate {
    pub fn evaluate(results: &MemberResults) -> ProgressState {
        let burnout_total = results.burnout_total();
        let follow_up = match burnout_total {
            None => UnlockState::Locked,
            Some(total) if total <= OPTIONAL_THRESHOLD => UnlockState::Optional,
            Some(_) => UnlockState::Available,
        };

        let state_for = |instrument| {
            if results.is_completed(instrument) {
                UnlockState::Completed
            } else {
                follow_up
            }
        };

        ProgressState {
            percentage: percentage(results, burnout_total),
            unlock_state: UnlockStates {
                perception: state_for(Instrument::Perception),
                preference: state_for(Instrument::Preference),
            },
        }
    }
}

fn percentage(results: &MemberResults, burnout_total: Option<u16>) -> u8 {
    match burnout_total {
        None => 0,
        Some(total) if total <= OPTIONAL_THRESHOLD => FULL_PROGRESS,
        Some(_) => {
            let follow_ups = [Instrument::Perception, Instrument::Preference]
                .into_iter()
                .filter(|instrument| results.is_completed(*instrument))
                .count() as u8;
            (BURNOUT_SHARE + FOLLOW_UP_SHARE * follow_ups).min(FULL_PROGRESS)
        }
    }
}
