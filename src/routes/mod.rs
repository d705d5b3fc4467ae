// Route exports
pub mod admin;
pub mod auth;
pub mod faculty;
pub mod notifications;
pub mod queries;
pub mod student;

use actix_web::http::StatusCode;
use actix_web::{error::ResponseError, web, HttpResponse, Responder};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, PostgresError, TokenIssuer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub tokens: TokenIssuer,
    pub academic_year: String,
}

/// Typed error union at the request boundary
///
/// Handlers return this with `?`; the response body keeps the
/// `{error, message, status_code}` shape clients already consume.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] PostgresError),
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(PostgresError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Validate a request struct, mapping failures to a 400
pub fn validate(req: &impl validator::Validate) -> Result<(), ApiError> {
    req.validate().map_err(|errors| ApiError::Validation(errors.to_string()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .configure(auth::configure)
            .configure(student::configure)
            .configure(faculty::configure)
            .configure(queries::configure)
            .configure(notifications::configure)
            .configure(admin::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
