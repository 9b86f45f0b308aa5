use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use super::browser::AdminBrowser;
use super::export::CsvExport;
use super::query::{BrowserQuery, BrowserQueryParams};
use super::record::{AdminRecord, CareApplication, JobApplication, RecordVariant};
use super::source::ApplicationSource;

/// Record sources behind the two admin tabs.
pub struct AdminService<J, C> {
    jobs: Arc<J>,
    care: Arc<C>,
}

impl<J, C> AdminService<J, C>
where
    J: ApplicationSource<JobApplication> + 'static,
    C: ApplicationSource<CareApplication> + 'static,
{
    pub fn new(jobs: Arc<J>, care: Arc<C>) -> Self {
        Self { jobs, care }
    }

    /// Fetches a tab's records fresh, as activating the tab does.
    pub fn job_browser(&self, query: BrowserQuery) -> AdminBrowser<JobApplication> {
        let mut browser = AdminBrowser::default().with_query(query);
        browser.load(self.jobs.as_ref());
        browser
    }

    pub fn care_browser(&self, query: BrowserQuery) -> AdminBrowser<CareApplication> {
        let mut browser = AdminBrowser::default().with_query(query);
        browser.load(self.care.as_ref());
        browser
    }
}

/// Router exposing the admin list and CSV export for both record variants.
pub fn admin_router<J, C>(service: Arc<AdminService<J, C>>) -> Router
where
    J: ApplicationSource<JobApplication> + 'static,
    C: ApplicationSource<CareApplication> + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/:variant/applications",
            get(list_handler::<J, C>),
        )
        .route(
            "/api/v1/admin/:variant/applications/export",
            get(export_handler::<J, C>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<J, C>(
    State(service): State<Arc<AdminService<J, C>>>,
    Path(variant): Path<String>,
    Query(params): Query<BrowserQueryParams>,
) -> Response
where
    J: ApplicationSource<JobApplication> + 'static,
    C: ApplicationSource<CareApplication> + 'static,
{
    let query = match BrowserQuery::from_params(&params) {
        Ok(query) => query,
        Err(err) => return bad_request(err.to_string()),
    };

    match RecordVariant::parse(&variant) {
        Some(RecordVariant::Job) => page_response(&service.job_browser(query)),
        Some(RecordVariant::Care) => page_response(&service.care_browser(query)),
        None => unknown_variant(&variant),
    }
}

pub(crate) async fn export_handler<J, C>(
    State(service): State<Arc<AdminService<J, C>>>,
    Path(variant): Path<String>,
    Query(params): Query<BrowserQueryParams>,
) -> Response
where
    J: ApplicationSource<JobApplication> + 'static,
    C: ApplicationSource<CareApplication> + 'static,
{
    let query = match BrowserQuery::from_params(&params) {
        Ok(query) => query,
        Err(err) => return bad_request(err.to_string()),
    };

    match RecordVariant::parse(&variant) {
        Some(RecordVariant::Job) => csv_response(&service.job_browser(query)),
        Some(RecordVariant::Care) => csv_response(&service.care_browser(query)),
        None => unknown_variant(&variant),
    }
}

fn page_response<R>(browser: &AdminBrowser<R>) -> Response
where
    R: AdminRecord + Serialize,
{
    let page = browser.page(Utc::now());
    let body = json!({
        "variant": R::VARIANT.slug(),
        "query": browser.query(),
        "page": page,
    });
    (StatusCode::OK, Json(body)).into_response()
}

fn csv_response<R: AdminRecord>(browser: &AdminBrowser<R>) -> Response {
    match browser.export(Utc::now()) {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CsvExport::content_type().to_string()),
                (header::CONTENT_DISPOSITION, export.content_disposition()),
            ],
            export.body,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn unknown_variant(variant: &str) -> Response {
    let payload = json!({ "error": format!("unknown application type '{variant}'") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
