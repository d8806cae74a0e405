use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use wellbeing_pulse::assessments::{
    assessment_router, AssessmentService, MemberDirectory, ResultStore,
};

pub(crate) fn with_assessment_routes<S, D>(service: Arc<AssessmentService<S, D>>) -> Router
where
    S: ResultStore + 'static,
    D: MemberDirectory + 'static,
{
    assessment_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryMemberDirectory, InMemoryResultStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;
    use wellbeing_pulse::config::AssessmentConfig;

    fn app(ready: bool) -> Router {
        let directory = Arc::new(InMemoryMemberDirectory::default());
        let store = Arc::new(InMemoryResultStore::new(directory.clone()));
        let service = Arc::new(AssessmentService::new(
            store,
            directory,
            AssessmentConfig::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_assessment_routes(service).layer(Extension(state))
    }

    async fn get_status(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let (status, body) = get_status(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get_status(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn readiness_flag_is_shared_with_state() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        flag.store(true, Ordering::Release);

        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let (status, body) = get_status(app(true), "/api/v1/members/nobody/progress").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }
}
