use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use shared::{Bill, LogEntry, LogResponse};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::domain::{BillService, BillServiceError, ReceiptUploadCommand};

/// Application state shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub bill_service: BillService,
}

impl AppState {
    pub fn new(bill_service: BillService) -> Self {
        Self { bill_service }
    }
}

impl IntoResponse for BillServiceError {
    fn into_response(self) -> Response {
        match self {
            BillServiceError::NotFound(key) => {
                (StatusCode::NOT_FOUND, format!("Bill not found: {}", key)).into_response()
            }
            BillServiceError::Validation(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            BillServiceError::AlreadySubmitted(key) => {
                (StatusCode::CONFLICT, format!("Bill already submitted: {}", key)).into_response()
            }
            BillServiceError::Storage(e) => {
                error!("Storage error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response()
            }
        }
    }
}

/// Query parameters for the bill list endpoint
#[derive(Deserialize, Debug)]
pub struct BillListQuery {
    pub email: Option<String>,
}

/// Axum handler function for GET /api/bills
pub async fn list_bills(
    State(state): State<AppState>,
    Query(query): Query<BillListQuery>,
) -> impl IntoResponse {
    info!("GET /api/bills - query: {:?}", query);

    match state.bill_service.list_bills(query.email.as_deref()).await {
        Ok(bills) => (StatusCode::OK, Json(bills)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for POST /api/bills (multipart `file` and `email`)
pub async fn create_bill(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    info!("POST /api/bills");

    let mut email = None;
    let mut file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email" => match field.text().await {
                Ok(text) => email = Some(text),
                Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            },
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((file_name, bytes.to_vec())),
                    Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
                }
            }
            other => debug!("Ignoring multipart field {}", other),
        }
    }

    let (Some(email), Some((file_name, bytes))) = (email, file) else {
        return (StatusCode::BAD_REQUEST, "Missing file or email").into_response();
    };

    let command = ReceiptUploadCommand {
        email,
        file_name,
        bytes,
    };
    match state.bill_service.create_bill(command).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for PATCH /api/bills/:key
pub async fn update_bill(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(bill): Json<Bill>,
) -> impl IntoResponse {
    info!("PATCH /api/bills/{}", key);

    match state.bill_service.update_bill(&key, bill).await {
        Ok(bill) => (StatusCode::OK, Json(bill)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum handler function for POST /api/logs
pub async fn log_message(Json(entry): Json<LogEntry>) -> Json<LogResponse> {
    let component = entry.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "debug" | "trace" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(LogResponse { success: true })
}

/// Build the application router: API routes under `/api`, receipts under `/public`
pub fn create_router(state: AppState, config: &ServerConfig) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    // CORS setup to allow the web client to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route("/bills/:key", patch(update_bill))
        .route("/logs", post(log_message));

    Ok(Router::new()
        .nest("/api", api_routes)
        .nest_service("/public", ServeDir::new(&config.upload_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .with_state(state))
}
