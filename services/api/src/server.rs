use crate::cli::ServeArgs;
use crate::demo::{seed_demo_cohort, DEMO_GROUP};
use crate::infra::{AppState, InMemoryMemberDirectory, InMemoryResultStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wellbeing_pulse::assessments::{AssessmentService, GroupId};
use wellbeing_pulse::config::AppConfig;
use wellbeing_pulse::error::AppError;
use wellbeing_pulse::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryMemberDirectory::default());
    let store = Arc::new(InMemoryResultStore::new(directory.clone()));
    let assessment_service = Arc::new(AssessmentService::new(
        store,
        directory.clone(),
        config.assessments,
    ));

    if config.assessments.seed_demo {
        let group = GroupId(DEMO_GROUP.to_string());
        let seeded = seed_demo_cohort(&directory, &assessment_service, &group, Utc::now())?;
        info!(%group, seeded, "seeded demo cohort");
    }

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        enforce_unlock = config.assessments.enforce_unlock,
        "wellbeing pulse api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
