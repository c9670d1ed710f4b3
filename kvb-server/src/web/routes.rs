//! HTTP route handlers.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, warn};

use crate::kvb::{KvbError, cologne_now, normalize};
use crate::stations::{Confidence, ResolvedStation, StationError, StationRef, resolve};

use super::cors::apply_cors;
use super::dto::*;
use super::slack::{self, SlackCommand, SlackMessage};
use super::state::AppState;

const SUCCESS_MESSAGE: &str = "successfully downloaded info";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/station/", get(station_listing))
        .route("/station/:station/departures/", get(station_departures))
        .route("/station", post(post_station_departures))
        .route("/slack/kvb/departures", post(slack_departures))
        .layer(middleware::from_fn(apply_cors))
        .with_state(state)
}

/// Index: local time and available methods.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        local_time: cologne_now().to_rfc3339(),
        methods: IndexMethods {
            departures: "/station/{station_id}/departures/".to_string(),
            stations: "/station/".to_string(),
        },
    })
}

/// Full station directory, served through the TTL cache.
async fn station_listing(State(state): State<AppState>) -> Json<serde_json::Value> {
    let directory = state.directory.clone();
    let listing = state
        .listing_cache
        .get_or_compute("/station/", move || {
            serde_json::to_value(directory.all()).unwrap_or_default()
        })
        .await;
    Json((*listing).clone())
}

/// Live departures; the path segment may be an id or a name.
async fn station_departures(
    State(state): State<AppState>,
    Path(station): Path<String>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let station = StationRef::parse(&station);
    Ok(Json(departures_for(&state, &station).await?))
}

/// Live departures via JSON body, `{"station": <id-or-name>}`.
async fn post_station_departures(
    State(state): State<AppState>,
    Json(request): Json<PostStationRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    Ok(Json(departures_for(&state, &request.station).await?))
}

/// Slack slash command: departures as block-kit JSON.
async fn slack_departures(
    State(state): State<AppState>,
    Form(request): Form<SlackCommandRequest>,
) -> Result<Json<SlackMessage>, AppError> {
    match slack::parse_command(&request.text) {
        SlackCommand::Help => Ok(Json(slack::help_message())),
        SlackCommand::Departures { station, line } => {
            let station_ref = StationRef::parse(&station);
            let resolved = match resolve(&state.directory, &station_ref) {
                Ok(resolved) => resolved,
                Err(StationError::NoMatch { input }) => {
                    return Ok(Json(slack::invalid_station_message(&input)));
                }
                Err(e) => return Err(AppError::internal(e)),
            };

            let rows = state.kvb.fetch_departures(resolved.id).await?;
            if rows.is_empty() {
                warn!(station = resolved.id, "no timetable found for station");
            }
            let departures = normalize(rows, cologne_now());

            let display_name = resolved
                .name
                .clone()
                .unwrap_or_else(|| resolved.id.to_string());
            Ok(Json(slack::departures_message(
                &display_name,
                &departures,
                line.as_deref(),
            )))
        }
    }
}

/// Resolve, fetch, and normalize departures for one request.
///
/// An unresolvable station is a user-facing condition, reported with
/// HTTP 200 and a message (matching the original API contract), not a
/// 4xx. Fetch failures are request-level errors.
async fn departures_for(
    state: &AppState,
    station: &StationRef,
) -> Result<DeparturesResponse, AppError> {
    let resolved = match resolve(&state.directory, station) {
        Ok(resolved) => resolved,
        Err(StationError::NoMatch { input }) => {
            return Ok(DeparturesResponse {
                status: 200,
                local_time: cologne_now().to_rfc3339(),
                departures: Vec::new(),
                message: format!("input station {input} is invalid"),
                station: None,
            });
        }
        Err(e) => return Err(AppError::internal(e)),
    };

    let rows = state.kvb.fetch_departures(resolved.id).await?;
    if rows.is_empty() {
        warn!(station = resolved.id, "no timetable found for station");
    }

    let now = cologne_now();
    let departures = normalize(rows, now);

    Ok(DeparturesResponse {
        status: 200,
        local_time: now.to_rfc3339(),
        departures,
        message: resolution_message(&resolved),
        station: Some(StationEcho {
            name: resolved.name,
            id: resolved.id,
        }),
    })
}

/// Success message, extended with resolution detail after a fuzzy match.
fn resolution_message(resolved: &ResolvedStation) -> String {
    match resolved.confidence {
        Confidence::Fuzzy(score) => format!(
            "{SUCCESS_MESSAGE}; checking departures for {} (id {}, score {score})",
            resolved.name.as_deref().unwrap_or("?"),
            resolved.id,
        ),
        Confidence::Id | Confidence::Exact => SUCCESS_MESSAGE.to_string(),
    }
}

/// Application error type for the web layer.
#[derive(Debug)]
pub enum AppError {
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn internal(e: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<KvbError> for AppError {
    fn from(e: KvbError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
