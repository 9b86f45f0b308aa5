use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use carelead::admin::{
    admin_router, AdminService, ApplicationSource, CareApplication, JobApplication,
};
use carelead::chat::{chat_router, ChatBackend};
use carelead::intake::{intake_router, IntakeService, JobBoard, LeadSubmitter};
use serde_json::json;
use std::sync::Arc;

/// Every public route: intake wizards, admin browsing, chat, and the operational endpoints.
pub(crate) fn with_service_routes<S, J, A, C, B>(
    intake: Arc<IntakeService<S, J>>,
    admin: Arc<AdminService<A, C>>,
    chat: Arc<B>,
) -> axum::Router
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
    A: ApplicationSource<JobApplication> + 'static,
    C: ApplicationSource<CareApplication> + 'static,
    B: ChatBackend + 'static,
{
    intake_router(intake)
        .merge(admin_router(admin))
        .merge(chat_router(chat))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
