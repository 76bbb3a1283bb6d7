//! Axum router and HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get};
use axum::Router;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, warn};

use opt_core::error::OptError;
use opt_core::types::{Action, AnalyticsSummary, Exposure, NewAction, NewExposure, Settings, SettingsUpdate};
use opt_node_lib::{IncomeSeriesResponse, ListQuery};

use crate::AppState;

// ---------------------------------------------------------------------------
// Error helper
// ---------------------------------------------------------------------------

pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<OptError>() {
            Some(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(e: E) -> Self {
        ApiError(e.into())
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    let origin = &state.node.config().cors_origin;
    let allow_origin = match origin.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!(origin = %origin, "invalid CORS origin, allowing any");
            AllowOrigin::any()
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/actions", get(list_actions).post(create_action))
        .route(
            "/api/actions/:id",
            get(get_action).put(update_action).delete(delete_action),
        )
        .route("/api/exposures", get(list_exposures).post(create_exposure))
        .route("/api/exposures/:id", delete(delete_exposure))
        .route("/api/income-model/settings", get(get_settings).put(put_settings))
        .route("/api/income-model/series", get(income_series))
        .route("/api/analytics/summary", get(analytics_summary))
        .with_state(state)
        .layer(cors)
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// An action as returned to clients, with its derived delta.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionJson {
    #[serde(flatten)]
    pub action: Action,
    pub o_delta: i32,
}

impl From<Action> for ActionJson {
    fn from(action: Action) -> Self {
        let o_delta = action.o_delta();
        Self { action, o_delta }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl From<ListParams> for ListQuery {
    fn from(p: ListParams) -> Self {
        ListQuery {
            start: p.start,
            end: p.end,
            limit: p.limit,
            offset: p.offset.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RangeParams {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/actions`
async fn create_action(
    State(s): State<AppState>,
    Json(new): Json<NewAction>,
) -> ApiResult<ActionJson> {
    Ok(Json(s.node.store().insert_action(new)?.into()))
}

/// `GET /api/actions?start&end&limit&offset`: newest first.
async fn list_actions(
    State(s): State<AppState>,
    Query(q): Query<ListParams>,
) -> ApiResult<Vec<ActionJson>> {
    let actions = s.node.store().list_actions(&q.into())?;
    Ok(Json(actions.into_iter().map(ActionJson::from).collect()))
}

async fn get_action(State(s): State<AppState>, Path(id): Path<u64>) -> ApiResult<ActionJson> {
    Ok(Json(s.node.store().get_action(id)?.into()))
}

/// `PUT /api/actions/:id`: replaces every field.
async fn update_action(
    State(s): State<AppState>,
    Path(id): Path<u64>,
    Json(new): Json<NewAction>,
) -> ApiResult<ActionJson> {
    Ok(Json(s.node.store().update_action(id, new)?.into()))
}

async fn delete_action(State(s): State<AppState>, Path(id): Path<u64>) -> ApiResult<Value> {
    s.node.store().delete_action(id)?;
    Ok(Json(json!({ "deleted": true })))
}

async fn create_exposure(
    State(s): State<AppState>,
    Json(new): Json<NewExposure>,
) -> ApiResult<Exposure> {
    Ok(Json(s.node.store().insert_exposure(new)?))
}

async fn list_exposures(
    State(s): State<AppState>,
    Query(q): Query<ListParams>,
) -> ApiResult<Vec<Exposure>> {
    Ok(Json(s.node.store().list_exposures(&q.into())?))
}

async fn delete_exposure(State(s): State<AppState>, Path(id): Path<u64>) -> ApiResult<Value> {
    s.node.store().delete_exposure(id)?;
    Ok(Json(json!({ "deleted": true })))
}

async fn get_settings(State(s): State<AppState>) -> ApiResult<Settings> {
    Ok(Json(s.node.settings().current()?))
}

async fn put_settings(
    State(s): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Settings> {
    Ok(Json(s.node.settings().update(update)?))
}

/// `GET /api/income-model/series?start&end`: defaults to the trailing
/// configured range ending today.
async fn income_series(
    State(s): State<AppState>,
    Query(q): Query<RangeParams>,
) -> ApiResult<IncomeSeriesResponse> {
    let queries = s.node.queries();
    let range = queries.resolve_range(q.start, q.end, s.node.today())?;
    Ok(Json(queries.income_series(&range)?))
}

async fn analytics_summary(
    State(s): State<AppState>,
    Query(q): Query<RangeParams>,
) -> ApiResult<AnalyticsSummary> {
    let queries = s.node.queries();
    let range = queries.resolve_range(q.start, q.end, s.node.today())?;
    Ok(Json(queries.analytics_summary(&range)?))
}
