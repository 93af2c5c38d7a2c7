use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use listlaunch_core::catalog::{self, DirectoryFilter, SeedOutcome};
use listlaunch_core::export::export_plan_csv;
use listlaunch_core::generator::TextGenerator;
use listlaunch_core::pack::{self, PackDraft};
use listlaunch_core::plan::{self, DEFAULT_DESIRED_COUNT, GeneratePlanOutcome};
use listlaunch_core::site::{self, SiteInput};
use listlaunch_core::PlannerError;
use listlaunch_db::models::{
    Directory, PlanEntry, PlanEntryWithDirectory, PlanStatus, Site, SiteGoal, SubmissionPack,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        let status = match &err {
            PlannerError::NotFound { .. } => StatusCode::NOT_FOUND,
            PlannerError::DuplicateKey(_) | PlannerError::EmptyCatalog => StatusCode::CONFLICT,
            PlannerError::InvalidStatus(_)
            | PlannerError::InvalidGoal(_)
            | PlannerError::InvalidInput(_)
            | PlannerError::SchemaViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlannerError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlannerError::Upstream(_) | PlannerError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            PlannerError::Export(_) | PlannerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, AppError>;

// ---------------------------------------------------------------------------
// Index page
// ---------------------------------------------------------------------------

/// Site list served at `/`. Values are HTML-escaped by the template.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html><head><title>listlaunch</title></head><body>
<h1>listlaunch</h1>
<p><a href="/api/sites">/api/sites</a> | <a href="/api/directories">/api/directories</a></p>
<table><tr><th>Site</th><th>Goal</th><th>ID</th></tr>
{% if sites.is_empty() %}<tr><td colspan="3">No sites yet.</td></tr>
{% endif %}{% for site in sites %}<tr><td><a href="/api/sites/{{ site.id }}/plan">{{ site.domain }}</a></td><td>{{ site.goal }}</td><td>{{ site.id }}</td></tr>
{% endfor %}</table>
</body></html>"#
)]
struct IndexTemplate<'a> {
    sites: &'a [Site],
}

// ---------------------------------------------------------------------------
// State and request types
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    niche: Option<String>,
    #[serde(alias = "minDr")]
    min_dr: Option<f64>,
    #[serde(alias = "maxDr")]
    max_dr: Option<f64>,
    #[serde(default, alias = "premiumOnly")]
    premium_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct SiteBody {
    id: Option<Uuid>,
    domain: String,
    name: Option<String>,
    goal: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    status: String,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotesBody {
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForceQuery {
    #[serde(default)]
    force: bool,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/directories", get(list_directories))
        .route("/api/directories/seed", post(seed_directories))
        .route("/api/sites", get(list_sites).post(upsert_site))
        .route("/api/sites/{id}", get(get_site))
        .route("/api/sites/{id}/plan", get(list_plan).post(generate_plan))
        .route("/api/sites/{id}/plan.csv", get(export_plan))
        .route("/api/plans/{id}/status", put(set_status))
        .route("/api/plans/{id}/notes", put(set_notes))
        .route("/api/plans/{id}/pack", get(get_pack).put(save_pack))
        .route("/api/plans/{id}/pack/generate", post(generate_pack))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve<G>(pool: SqlitePool, generator: Option<G>, bind: &str, port: u16) -> Result<()>
where
    G: TextGenerator + 'static,
{
    let state = AppState {
        pool,
        generator: generator.map(|g| Arc::new(g) as Arc<dyn TextGenerator>),
    };
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("listlaunch serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("listlaunch serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<AppState>) -> Result<axum::response::Response, AppError> {
    let sites = site::list_sites(&state.pool).await?;
    let page = IndexTemplate { sites: &sites };
    let html = page.render().map_err(|e| {
        tracing::error!(error = %e, "failed to render index page");
        AppError::internal("failed to render index page")
    })?;
    Ok(Html(html).into_response())
}

async fn list_directories(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> ApiResult<Vec<Directory>> {
    let filter = DirectoryFilter {
        niche: query.niche,
        min_dr: query.min_dr,
        max_dr: query.max_dr,
        premium_only: query.premium_only,
    };
    Ok(Json(catalog::list_directories(&state.pool, &filter).await?))
}

async fn seed_directories(State(state): State<AppState>) -> ApiResult<SeedOutcome> {
    Ok(Json(catalog::seed_directories(&state.pool).await?))
}

async fn list_sites(State(state): State<AppState>) -> ApiResult<Vec<Site>> {
    Ok(Json(site::list_sites(&state.pool).await?))
}

async fn upsert_site(State(state): State<AppState>, Json(body): Json<SiteBody>) -> ApiResult<Site> {
    let goal = body
        .goal
        .map(|g| g.parse::<SiteGoal>())
        .transpose()
        .map_err(PlannerError::from)?;
    let input = SiteInput {
        id: body.id,
        domain: body.domain,
        name: body.name,
        goal,
        notes: body.notes,
    };
    Ok(Json(site::upsert_site(&state.pool, input).await?))
}

async fn get_site(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Site> {
    Ok(Json(site::get_site(&state.pool, id).await?))
}

async fn list_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<PlanEntryWithDirectory>> {
    Ok(Json(plan::list_plan(&state.pool, id).await?))
}

async fn generate_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerateQuery>,
) -> ApiResult<GeneratePlanOutcome> {
    let count = query.count.unwrap_or(DEFAULT_DESIRED_COUNT);
    Ok(Json(plan::generate_plan(&state.pool, id, count).await?))
}

async fn export_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let mut buf = Vec::new();
    export_plan_csv(&state.pool, id, &mut buf).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"plan-{id}.csv\""),
            ),
        ],
        buf,
    )
        .into_response())
}

async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> ApiResult<PlanEntry> {
    let status: PlanStatus = body.status.parse().map_err(PlannerError::from)?;
    Ok(Json(
        plan::set_plan_status(&state.pool, id, status, body.notes.as_deref()).await?,
    ))
}

async fn set_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NotesBody>,
) -> ApiResult<PlanEntry> {
    Ok(Json(
        plan::set_plan_notes(&state.pool, id, body.notes.as_deref()).await?,
    ))
}

async fn get_pack(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<SubmissionPack> {
    match pack::get_pack(&state.pool, id).await? {
        Some(saved) => Ok(Json(saved)),
        None => Err(AppError::not_found(format!("no submission pack for plan entry {id}"))),
    }
}

async fn save_pack(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<SubmissionPack> {
    let draft = PackDraft::from_value(body)?;
    Ok(Json(pack::save_pack(&state.pool, id, draft).await?))
}

async fn generate_pack(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ForceQuery>,
) -> ApiResult<SubmissionPack> {
    let generator = state.generator.as_deref();
    Ok(Json(
        pack::generate_pack(&state.pool, generator, id, query.force).await?,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
