use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::blueprint::WizardKind;
use super::controller::WizardError;
use super::lead::LeadSubmitter;
use super::service::{IntakeService, JobBoard, WizardSubmissionRequest};

/// Router exposing the wizard catalog, lead submission, and job listings.
pub fn intake_router<S, J>(service: Arc<IntakeService<S, J>>) -> Router
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
{
    Router::new()
        .route("/api/v1/wizards", get(catalog_handler))
        .route("/api/v1/wizards/:kind", get(blueprint_handler::<S, J>))
        .route(
            "/api/v1/wizards/:kind/submissions",
            post(submit_handler::<S, J>),
        )
        .route("/api/v1/jobs", get(jobs_handler::<S, J>))
        .with_state(service)
}

pub(crate) async fn catalog_handler() -> Response {
    let kinds: Vec<_> = WizardKind::ordered()
        .into_iter()
        .map(|kind| json!({ "kind": kind.slug(), "label": kind.label() }))
        .collect();
    (StatusCode::OK, Json(kinds)).into_response()
}

pub(crate) async fn blueprint_handler<S, J>(
    State(service): State<Arc<IntakeService<S, J>>>,
    Path(kind): Path<String>,
) -> Response
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
{
    match WizardKind::parse(&kind).and_then(|kind| service.blueprint(kind)) {
        Some(blueprint) => (StatusCode::OK, Json(blueprint.as_ref().clone())).into_response(),
        None => unknown_wizard(&kind),
    }
}

pub(crate) async fn submit_handler<S, J>(
    State(service): State<Arc<IntakeService<S, J>>>,
    Path(kind): Path<String>,
    Json(request): Json<WizardSubmissionRequest>,
) -> Response
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
{
    let Some(wizard) = WizardKind::parse(&kind) else {
        return unknown_wizard(&kind);
    };

    match service.submit(wizard, &request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(
            error @ (WizardError::FieldNotOnStep(_)
            | WizardError::UnknownOption { .. }
            | WizardError::MissingField(_)
            | WizardError::IncompleteStep { .. }),
        ) => {
            let payload = json!({
                "success": false,
                "message": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "success": false,
                "message": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn jobs_handler<S, J>(
    State(service): State<Arc<IntakeService<S, J>>>,
) -> Response
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
{
    (StatusCode::OK, Json(service.job_listings())).into_response()
}

fn unknown_wizard(kind: &str) -> Response {
    let payload = json!({ "error": format!("unknown wizard '{kind}'") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
