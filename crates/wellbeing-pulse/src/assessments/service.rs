use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::cohort::{CohortAggregator, CohortSnapshot};
use super::domain::{
    AnswerSet, GroupId, Instrument, MemberCompletionRecord, MemberId, MemberProfile, ScoringError,
};
use super::export::{ExportRow, ResultSerializer, SerializationError};
use super::repository::{MemberDirectory, RepositoryError, ResultStore};
use super::results::{MemberResults, MemberResultsView};
use super::scoring::ScoreCalculator;
use super::unlock::ProgressState;
use crate::config::AssessmentConfig;

/// Service composing the scoring engine with the store and member directory.
pub struct AssessmentService<S, D> {
    store: Arc<S>,
    directory: Arc<D>,
    calculator: ScoreCalculator,
    config: AssessmentConfig,
}

/// Stored record plus the member's progress after the write.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub record: MemberCompletionRecord,
    pub progress: ProgressState,
}

impl<S, D> AssessmentService<S, D>
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    pub fn new(store: Arc<S>, directory: Arc<D>, config: AssessmentConfig) -> Self {
        Self {
            store,
            directory,
            calculator: ScoreCalculator::new(),
            config,
        }
    }

    /// Validate, score, and upsert a submission. Nothing is written unless the
    /// answers are in range and the score is consistent, so a failed store call
    /// can be retried with the same arguments.
    pub fn submit(
        &self,
        member_id: &MemberId,
        instrument: Instrument,
        answers: &AnswerSet,
        completed_at: DateTime<Utc>,
    ) -> Result<Submission, AssessmentServiceError> {
        self.require_profile(member_id)?;
        let mut results = self.member_results(member_id)?;

        if self.config.enforce_unlock && !results.progress().can_start(instrument) {
            warn!(member = %member_id, %instrument, "rejected submission for locked instrument");
            return Err(AssessmentServiceError::InstrumentLocked(instrument));
        }

        answers.require_in_range(instrument)?;
        let score = self.calculator.score(instrument, answers)?;
        if !score.is_consistent() {
            return Err(ScoringError::InconsistentScore(instrument).into());
        }

        let record = MemberCompletionRecord::new(member_id.clone(), score, completed_at);
        self.store.upsert(record.clone())?;
        results.replace(&record);

        let progress = results.progress();
        info!(
            member = %member_id,
            %instrument,
            progress = progress.percentage,
            "stored assessment result"
        );

        Ok(Submission { record, progress })
    }

    pub fn progress(&self, member_id: &MemberId) -> Result<ProgressState, AssessmentServiceError> {
        self.require_profile(member_id)?;
        Ok(self.member_results(member_id)?.progress())
    }

    pub fn results(
        &self,
        member_id: &MemberId,
    ) -> Result<MemberResultsView, AssessmentServiceError> {
        self.require_profile(member_id)?;
        Ok(self.member_results(member_id)?.view(member_id))
    }

    pub fn cohort_snapshot(&self, group: &GroupId) -> Result<CohortSnapshot, AssessmentServiceError> {
        let roster: Vec<MemberId> = self
            .directory
            .group_members(group)?
            .into_iter()
            .map(|profile| profile.member_id)
            .collect();
        let records = self.store.group_records(group)?;
        Ok(CohortAggregator::aggregate(&roster, &records))
    }

    pub fn export_rows(&self, group: &GroupId) -> Result<Vec<ExportRow>, AssessmentServiceError> {
        let profiles = self.directory.group_members(group)?;
        let records = self.store.group_records(group)?;
        Ok(ResultSerializer::export_rows(&profiles, &records))
    }

    pub fn export_csv(&self, group: &GroupId) -> Result<String, AssessmentServiceError> {
        let rows = self.export_rows(group)?;
        Ok(ResultSerializer::to_csv_string(&rows)?)
    }

    fn require_profile(&self, member_id: &MemberId) -> Result<MemberProfile, AssessmentServiceError> {
        self.directory
            .profile(member_id)?
            .ok_or_else(|| AssessmentServiceError::MemberNotFound(member_id.clone()))
    }

    fn member_results(&self, member_id: &MemberId) -> Result<MemberResults, RepositoryError> {
        let records = self.store.member_records(member_id)?;
        Ok(MemberResults::from_records(&records))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    #[error("{0} is locked until the burnout inventory is completed")]
    InstrumentLocked(Instrument),
}
