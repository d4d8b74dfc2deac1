// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod seed;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tender_market_api::{
    ApiError, BidResponse, CreateBidRequest, CreateTenderRequest, DecisionResponse,
    EditBidRequest, EditTenderRequest, FeedbackResponse, TenderResponse, create_bid,
    create_tender, edit_bid, edit_tender, get_bid_status, get_tender_status,
    list_bids_for_tender, list_my_bids, list_my_tenders, list_reviews, list_tenders,
    parse_bid_id, parse_tender_id, rollback_bid, rollback_tender, submit_decision,
    submit_feedback, update_bid_status, update_tender_status,
};
use tender_market_domain::Page;
use tender_market_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::live::{LiveEventBroadcaster, MarketEvent, live_events_handler};
use crate::seed::{SeedData, apply_seed};

/// Tender Market Server - HTTP API for the tender marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, env = "SERVER_ADDRESS", default_value = "127.0.0.1:8080")]
    address: SocketAddr,

    /// JSON file of organizations, employees and representatives to load at startup
    #[arg(short, long, env = "SEED_FILE")]
    seed: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// Every handler takes the persistence lock for the duration of one
/// workflow call, so store access is serialized.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    live_events: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            live_events: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListTendersQuery {
    /// Comma-separated service types.
    service_type: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct UsernameQuery {
    username: String,
}

#[derive(Debug, Deserialize)]
struct UserPageQuery {
    username: String,
    limit: Option<u32>,
    offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct DecisionQuery {
    decision: String,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackQuery {
    bid_feedback: String,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsQuery {
    author_username: String,
    requester_username: String,
    limit: Option<u32>,
    offset: Option<u32>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. }
            | ApiError::InvalidStatus { .. }
            | ApiError::NoSuggestionToUpdate
            | ApiError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnknownUser { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } | ApiError::NoOrganization { .. } => {
                StatusCode::FORBIDDEN
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadyVoted { .. }
            | ApiError::TenderClosed { .. }
            | ApiError::BidRejected { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %err, "Request refused");
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tender handlers
// ============================================================================

/// Handler for GET `/api/ping`.
async fn handle_ping() -> &'static str {
    "ok"
}

/// Handler for GET `/api/tenders`.
async fn handle_list_tenders(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListTendersQuery>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let page = Page::new(query.limit, query.offset);
    let mut persistence = app_state.persistence.lock().await;
    let tenders = list_tenders(&mut persistence, query.service_type.as_deref(), page)?;
    Ok(Json(tenders))
}

/// Handler for POST `/api/tenders/new`.
async fn handle_create_tender(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTenderRequest>,
) -> Result<Json<TenderResponse>, HttpError> {
    info!(
        creator = %req.creator_username,
        organization_id = %req.organization_id,
        "Handling create_tender request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let tender = create_tender(&mut persistence, req)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::TenderCreated {
        tender_id: tender.id.clone(),
    });
    Ok(Json(tender))
}

/// Handler for GET `/api/tenders/my`.
async fn handle_list_my_tenders(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserPageQuery>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let page = Page::new(query.limit, query.offset);
    let mut persistence = app_state.persistence.lock().await;
    let tenders = list_my_tenders(&mut persistence, &query.username, page)?;
    Ok(Json(tenders))
}

/// Handler for GET `/api/tenders/{id}/status`.
async fn handle_get_tender_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let status = get_tender_status(&mut persistence, &tender_id)?;
    Ok(Json(status.as_str().to_string()))
}

/// Handler for PUT `/api/tenders/{id}/status`.
async fn handle_update_tender_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<TenderResponse>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let tender = update_tender_status(&mut persistence, &tender_id, &query.status, &query.username)?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(MarketEvent::TenderStatusChanged {
            tender_id: tender.id.clone(),
            status: tender.status.clone(),
            version: tender.version,
        });
    Ok(Json(tender))
}

/// Handler for PATCH `/api/tenders/{id}/edit`.
async fn handle_edit_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UsernameQuery>,
    Json(req): Json<EditTenderRequest>,
) -> Result<Json<TenderResponse>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let tender = edit_tender(&mut persistence, &tender_id, req, &query.username)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::TenderEdited {
        tender_id: tender.id.clone(),
        version: tender.version,
    });
    Ok(Json(tender))
}

/// Handler for PUT `/api/tenders/{id}/rollback/{version}`.
async fn handle_rollback_tender(
    AxumState(app_state): AxumState<AppState>,
    Path((id, version)): Path<(String, i64)>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<TenderResponse>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let tender = rollback_tender(&mut persistence, &tender_id, version, &query.username)?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(MarketEvent::TenderRolledBack {
            tender_id: tender.id.clone(),
            version: tender.version,
        });
    Ok(Json(tender))
}

// ============================================================================
// Bid handlers
// ============================================================================

/// Handler for POST `/api/bids/new`.
async fn handle_create_bid(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBidRequest>,
) -> Result<Json<BidResponse>, HttpError> {
    info!(
        tender_id = %req.tender_id,
        author_type = %req.author_type,
        author_id = %req.author_id,
        "Handling create_bid request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let bid = create_bid(&mut persistence, req)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::BidCreated {
        bid_id: bid.id.clone(),
    });
    Ok(Json(bid))
}

/// Handler for GET `/api/bids/my`.
async fn handle_list_my_bids(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserPageQuery>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let page = Page::new(query.limit, query.offset);
    let mut persistence = app_state.persistence.lock().await;
    let bids = list_my_bids(&mut persistence, &query.username, page)?;
    Ok(Json(bids))
}

/// Handler for GET `/api/bids/{id}/list`, where `id` is a tender id.
async fn handle_list_bids_for_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserPageQuery>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let page = Page::new(query.limit, query.offset);
    let mut persistence = app_state.persistence.lock().await;
    let bids = list_bids_for_tender(&mut persistence, &tender_id, &query.username, page)?;
    Ok(Json(bids))
}

/// Handler for GET `/api/bids/{id}/status`.
async fn handle_get_bid_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<String>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let status = get_bid_status(&mut persistence, &bid_id, &query.username)?;
    Ok(Json(status.as_str().to_string()))
}

/// Handler for PUT `/api/bids/{id}/status`.
async fn handle_update_bid_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let bid = update_bid_status(&mut persistence, &bid_id, &query.status, &query.username)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::BidStatusChanged {
        bid_id: bid.id.clone(),
        status: bid.status.clone(),
        version: bid.version,
    });
    Ok(Json(bid))
}

/// Handler for PATCH `/api/bids/{id}/edit`.
async fn handle_edit_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UsernameQuery>,
    Json(req): Json<EditBidRequest>,
) -> Result<Json<BidResponse>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let bid = edit_bid(&mut persistence, &bid_id, req, &query.username)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::BidEdited {
        bid_id: bid.id.clone(),
        version: bid.version,
    });
    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/rollback/{version}`.
async fn handle_rollback_bid(
    AxumState(app_state): AxumState<AppState>,
    Path((id, version)): Path<(String, i64)>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let bid = rollback_bid(&mut persistence, &bid_id, version, &query.username)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::BidRolledBack {
        bid_id: bid.id.clone(),
        version: bid.version,
    });
    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/submit_decision`.
async fn handle_submit_decision(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DecisionQuery>,
) -> Result<Json<DecisionResponse>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    info!(
        bid_id = %bid_id,
        decision = %query.decision,
        username = %query.username,
        "Handling submit_decision request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response = submit_decision(&mut persistence, &bid_id, &query.decision, &query.username)?;
    drop(persistence);

    app_state.live_events.broadcast(MarketEvent::DecisionRecorded {
        bid_id: response.bid.id.clone(),
        decision: query.decision,
    });
    if response.is_winner {
        app_state.live_events.broadcast(MarketEvent::TenderAwarded {
            bid_id: response.bid.id.clone(),
        });
    }
    Ok(Json(response))
}

/// Handler for PUT `/api/bids/{id}/feedback`.
async fn handle_submit_feedback(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<BidResponse>, HttpError> {
    let bid_id = parse_bid_id(&id)?;
    let mut persistence = app_state.persistence.lock().await;
    let bid = submit_feedback(&mut persistence, &bid_id, &query.bid_feedback, &query.username)?;
    Ok(Json(bid))
}

/// Handler for GET `/api/bids/{id}/reviews`, where `id` is a tender id.
async fn handle_list_reviews(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<FeedbackResponse>>, HttpError> {
    let tender_id = parse_tender_id(&id)?;
    let page = Page::new(query.limit, query.offset);
    let mut persistence = app_state.persistence.lock().await;
    let reviews = list_reviews(
        &mut persistence,
        &tender_id,
        &query.author_username,
        &query.requester_username,
        page,
    )?;
    Ok(Json(reviews))
}

/// Builds the application router with all endpoints.
///
/// Bid routes share one `{id}` segment: it names a tender for `list` and
/// `reviews` and a bid everywhere else.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(handle_ping))
        .route("/api/tenders", get(handle_list_tenders))
        .route("/api/tenders/new", post(handle_create_tender))
        .route("/api/tenders/my", get(handle_list_my_tenders))
        .route(
            "/api/tenders/{id}/status",
            get(handle_get_tender_status).put(handle_update_tender_status),
        )
        .route("/api/tenders/{id}/edit", patch(handle_edit_tender))
        .route(
            "/api/tenders/{id}/rollback/{version}",
            put(handle_rollback_tender),
        )
        .route("/api/bids/new", post(handle_create_bid))
        .route("/api/bids/my", get(handle_list_my_bids))
        .route("/api/bids/{id}/list", get(handle_list_bids_for_tender))
        .route(
            "/api/bids/{id}/status",
            get(handle_get_bid_status).put(handle_update_bid_status),
        )
        .route("/api/bids/{id}/edit", patch(handle_edit_bid))
        .route("/api/bids/{id}/submit_decision", put(handle_submit_decision))
        .route("/api/bids/{id}/feedback", put(handle_submit_feedback))
        .route("/api/bids/{id}/rollback/{version}", put(handle_rollback_bid))
        .route("/api/bids/{id}/reviews", get(handle_list_reviews))
        .route("/api/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tender Market Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path.display(), "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed_path) = &args.seed {
        info!(path = %seed_path.display(), "Loading directory seed");
        let seed: SeedData = SeedData::from_file(seed_path)?;
        apply_seed(&mut persistence, &seed)?;
    }

    let app: Router = build_router(AppState::new(persistence));

    info!(address = %args.address, "Server listening");
    let listener = tokio::net::TcpListener::bind(args.address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
