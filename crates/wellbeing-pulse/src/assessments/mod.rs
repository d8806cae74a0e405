//! Assessment scoring and cohort analytics.
//!
//! Everything up to [`cohort`] and [`export`] is pure computation over value
//! objects. [`repository`] declares the store collaborators, [`service`] wires
//! them to the engine, and [`router`] exposes the service over HTTP.

pub mod banding;
pub mod cohort;
pub mod domain;
pub mod export;
pub mod repository;
pub mod results;
pub mod router;
pub mod scoring;
pub mod selection;
pub mod service;
pub mod unlock;

#[cfg(test)]
mod tests;

pub use banding::{classify_band, classify_tier, BurnoutBand, RiskTier};
pub use cohort::{CohortAggregator, CohortSnapshot, RiskTierCounts};
pub use domain::{
    AnswerSet, GroupId, Instrument, MemberCompletionRecord, MemberId, MemberProfile, MemberRole,
    ScoringError,
};
pub use export::{
    ExportRow, ResultSerializer, SerializationError, StoreRow, EXPORT_HEADER, PLACEHOLDER,
};
pub use repository::{MemberDirectory, RepositoryError, ResultStore};
pub use results::{MemberResults, MemberResultsView};
pub use router::assessment_router;
pub use scoring::{
    BurnoutScore, Channel, PerceptionScore, PreferenceScore, ScoreCalculator, ScoreObject,
};
pub use selection::{dominant_channel, DominantChannel, PreferenceProfile};
pub use service::{AssessmentService, AssessmentServiceError, Submission};
pub use unlock::{ProgressState, UnlockGate, UnlockState};
