use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerSet, GroupId, Instrument, MemberId, ScoringError};
use super::repository::{MemberDirectory, RepositoryError, ResultStore};
use super::service::{AssessmentService, AssessmentServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionRequest {
    pub(crate) answers: AnswerSet,
    #[serde(default)]
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

/// Router exposing member submissions, progress, and cohort dashboards.
pub fn assessment_router<S, D>(service: Arc<AssessmentService<S, D>>) -> Router
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/members/:member_id/assessments/:instrument",
            post(submit_handler::<S, D>),
        )
        .route(
            "/api/v1/members/:member_id/progress",
            get(progress_handler::<S, D>),
        )
        .route(
            "/api/v1/members/:member_id/results",
            get(results_handler::<S, D>),
        )
        .route(
            "/api/v1/groups/:group_id/snapshot",
            get(snapshot_handler::<S, D>),
        )
        .route(
            "/api/v1/groups/:group_id/export",
            get(export_handler::<S, D>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S, D>(
    State(service): State<Arc<AssessmentService<S, D>>>,
    Path((member_id, instrument)): Path<(String, String)>,
    Json(request): Json<SubmissionRequest>,
) -> Response
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    let instrument = match instrument.parse::<Instrument>() {
        Ok(instrument) => instrument,
        Err(error) => return error_response(AssessmentServiceError::Scoring(error)),
    };
    let completed_at = request.completed_at.unwrap_or_else(Utc::now);

    match service.submit(
        &MemberId(member_id),
        instrument,
        &request.answers,
        completed_at,
    ) {
        Ok(submission) => (StatusCode::CREATED, Json(submission)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<S, D>(
    State(service): State<Arc<AssessmentService<S, D>>>,
    Path(member_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    match service.progress(&MemberId(member_id)) {
        Ok(progress) => (StatusCode::OK, Json(progress)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_handler<S, D>(
    State(service): State<Arc<AssessmentService<S, D>>>,
    Path(member_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    match service.results(&MemberId(member_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<S, D>(
    State(service): State<Arc<AssessmentService<S, D>>>,
    Path(group_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    match service.cohort_snapshot(&GroupId(group_id)) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<S, D>(
    State(service): State<Arc<AssessmentService<S, D>>>,
    Path(group_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    match service.export_csv(&GroupId(group_id)) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Scoring(ScoringError::UnknownInstrument(_)) => {
            StatusCode::BAD_REQUEST
        }
        AssessmentServiceError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::InstrumentLocked(_) => StatusCode::CONFLICT,
        AssessmentServiceError::MemberNotFound(_)
        | AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(_) | AssessmentServiceError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
