use actix_web::{web, HttpResponse};

use crate::models::SuccessResponse;
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications/{user_id}", web::get().to(list_notifications))
        .route("/notifications/{id}/read", web::post().to(mark_read));
}

/// Notifications for a user, newest first
///
/// GET /api/notifications/{user_id}
async fn list_notifications(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let notifications = state.postgres.list_notifications(user_id).await?;

    Ok(HttpResponse::Ok().json(notifications))
}

/// Mark a notification as read
///
/// POST /api/notifications/{id}/read
async fn mark_read(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let updated = state.postgres.mark_notification_read(id).await?;
    if !updated {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
