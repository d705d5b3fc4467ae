use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::models::FacultyTimetableSlotView;
use crate::routes::{ApiError, AppState};
use crate::services::postgres::FacultyDirectoryEntry;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/faculty/by-subject", web::get().to(get_faculty_by_subject))
        .route("/faculty/{id}/timetable", web::get().to(get_timetable));
}

/// Faculty timetable for the configured academic year
///
/// GET /api/faculty/{id}/timetable
///
/// Accepts a faculty record id or a user id; slots are matched by the
/// initials stored as the faculty code.
async fn get_timetable(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id_param = path.into_inner();

    let faculty = state
        .postgres
        .resolve_faculty(id_param)
        .await?
        .ok_or_else(|| ApiError::NotFound("Faculty not found".to_string()))?;

    let entries = state
        .postgres
        .faculty_timetable(&faculty.faculty_code, &state.academic_year)
        .await?;

    let slots: Vec<FacultyTimetableSlotView> = entries
        .iter()
        .map(|entry| FacultyTimetableSlotView {
            id: entry.id,
            day: entry.full_day(),
            time: entry.time_slot.clone(),
            subject: entry.subject.clone(),
            division: entry.division.clone().unwrap_or_else(|| "All".to_string()),
            batch: entry.batch.clone(),
            room: entry.room_number.clone(),
            semester: entry.semester,
        })
        .collect();

    Ok(HttpResponse::Ok().json(slots))
}

#[derive(Debug, Deserialize)]
struct SubjectQuery {
    subject: Option<String>,
}

/// Faculty teaching a given subject
///
/// GET /api/faculty/by-subject?subject=...
async fn get_faculty_by_subject(
    state: web::Data<AppState>,
    query: web::Query<SubjectQuery>,
) -> Result<HttpResponse, ApiError> {
    let Some(subject) = query.subject.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(HttpResponse::Ok().json(Vec::<FacultyDirectoryEntry>::new()));
    };

    let entries = state.postgres.list_faculty_by_subject(subject).await?;

    Ok(HttpResponse::Ok().json(entries))
}
