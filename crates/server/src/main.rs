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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use regsync_api::{
    ApiError, BulkUpsertRequest, ListUsersQuery, LocationCatalogResponse, MessageResponse,
    PermissionUpdateRequest, StationResponse, UserPage, get_station, get_users, list_locations,
    sync_stations, update_users, upsert_users,
};
use regsync_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// regsync server - HTTP server for the user registry
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the user registry.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Error response body.
///
/// Clients branch on `code`; `message` is for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// The stable machine-readable error code.
    code: String,
    /// The human-readable error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The stable machine-readable error code.
    code: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StationNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/api/users` endpoint.
///
/// Lists users with optional filters and pagination.
async fn handle_get_users(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserPage>, HttpError> {
    info!(
        page = query.page,
        size = query.size,
        "Handling list users request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let page: UserPage = get_users(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for POST `/api/users/bulk` endpoint.
///
/// Reconciles the registry against an HR snapshot.
async fn handle_bulk_upsert(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkUpsertRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        entries = req.data.len(),
        delete_absent = req.delete_non_exist_people,
        "Handling bulk upsert request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = upsert_users(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/users/update` endpoint.
///
/// Updates permissions for a batch of users.
async fn handle_update_users(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PermissionUpdateRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(entries = req.data.len(), "Handling permission update request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = update_users(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/locations` endpoint.
///
/// Returns the full location reference catalog.
async fn handle_list_locations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<LocationCatalogResponse>, HttpError> {
    info!("Handling location catalog request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LocationCatalogResponse = list_locations(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/stations/{code}` endpoint.
///
/// Looks up one station by code.
async fn handle_get_station(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationResponse>, HttpError> {
    info!(code = %code, "Handling station lookup request");

    let mut persistence = app_state.persistence.lock().await;
    let response: StationResponse = get_station(&mut persistence, &code)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/stations/sync` endpoint.
///
/// Runs one pass of the station feed sync.
async fn handle_sync_stations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!("Handling station sync request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = sync_stations(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(handle_get_users))
        .route("/api/users/bulk", post(handle_bulk_upsert))
        .route("/api/users/update", post(handle_update_users))
        .route("/api/locations", get(handle_list_locations))
        .route("/api/stations/{code}", get(handle_get_station))
        .route("/api/stations/sync", post(handle_sync_stations))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing regsync server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
