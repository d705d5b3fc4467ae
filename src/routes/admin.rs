use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::models::{
    AddFacultyRequest, ClubSummary, CreatedResponse, ExamScheduleRequest, ExamSlotBatch,
    ExamSlotOutcome, ExamSlotBatchResponse, NoticeUrgency, NoticeView, PublishNoticeRequest, Role,
    StatsResponse, SuccessResponse, UpdateFacultyRequest,
};
use crate::routes::{validate, ApiError, AppState};
use crate::services::{Claims, NewFacultyAccount, NewNotice};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/stats", web::get().to(get_stats))
        .route("/admin/faculty", web::get().to(get_all_faculty))
        .route("/admin/faculty", web::post().to(add_faculty))
        .route("/admin/faculty/{id}", web::get().to(get_faculty_details))
        .route("/admin/faculty/{id}", web::put().to(update_faculty))
        .route("/notices", web::get().to(get_notices))
        .route("/notices", web::post().to(publish_notice))
        .route("/admin/exams/schedule", web::post().to(create_exam_schedule))
        .route("/admin/exams/schedules", web::get().to(list_exam_schedules))
        .route("/admin/exams/timetable", web::post().to(manage_exam_timetable))
        .route("/exams/{schedule_id}/timetable", web::get().to(get_exam_timetable))
        .route("/clubs", web::get().to(get_clubs))
        .route("/subjects", web::get().to(get_subjects));
}

/// Verified claims from the Authorization header
fn bearer_claims(state: &AppState, req: &HttpRequest) -> Result<Claims, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::Unauthorized("Unauthorized".to_string()))
}

fn parse_date(value: &str) -> Result<chrono::NaiveDate, ApiError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("Invalid date: {}", value)))
}

/// Admin dashboard counters
///
/// GET /api/admin/stats
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (total_students, total_faculty, total_courses) =
        state.postgres.dashboard_counts().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_students,
        total_faculty,
        total_courses,
        total_fee_collection: 0,
    }))
}

// --- Faculty management ---

/// GET /api/admin/faculty
async fn get_all_faculty(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let roster = state.postgres.list_faculty_roster().await?;
    Ok(HttpResponse::Ok().json(roster))
}

/// POST /api/admin/faculty
///
/// Creates the user account (generated username, default password) and the
/// faculty record with a generated code.
async fn add_faculty(
    state: web::Data<AppState>,
    req: web::Json<AddFacultyRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*req)?;

    if state.postgres.email_exists(&req.email).await? {
        return Err(ApiError::Validation("Email already exists".to_string()));
    }

    let local_part = req.email.split('@').next().unwrap_or("faculty");
    let mut username = local_part.to_string();
    if state.postgres.username_exists(&username).await? {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        username = format!("{}{}", local_part, &suffix[..3]);
    }

    let password_hash = bcrypt::hash("faculty123", bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Validation(format!("Failed to hash password: {}", e)))?;

    let code_suffix = uuid::Uuid::new_v4().simple().to_string();
    let faculty_code = format!(
        "FAC{}{}",
        chrono::Utc::now().format("%Y"),
        code_suffix[..4].to_uppercase()
    );

    let account = NewFacultyAccount {
        username,
        email: req.email.clone(),
        password_hash,
        full_name: req.full_name.clone(),
        department: req.department.clone(),
        faculty_code,
        designation: req.designation.clone(),
        assigned_semesters: req.assigned_semesters.clone(),
        assigned_subjects: req.assigned_subjects.clone(),
    };

    state.postgres.create_faculty(&account).await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::with_message("Faculty added successfully")))
}

/// GET /api/admin/faculty/{id}
async fn get_faculty_details(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let detail = state
        .postgres
        .faculty_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Faculty not found".to_string()))?;

    Ok(HttpResponse::Ok().json(detail))
}

/// PUT /api/admin/faculty/{id}
async fn update_faculty(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<UpdateFacultyRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    state.postgres.update_faculty(id, &req).await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

// --- Notices ---

#[derive(Debug, Deserialize)]
struct NoticeQuery {
    role: Option<String>,
}

/// Active notices visible to a role, most urgent first
///
/// GET /api/notices?role=student|faculty|admin
async fn get_notices(
    state: web::Data<AppState>,
    query: web::Query<NoticeQuery>,
) -> Result<HttpResponse, ApiError> {
    let role = match query.role.as_deref() {
        Some("faculty") => Role::Faculty,
        Some("admin") => Role::Admin,
        _ => Role::Student,
    };

    let rows = state.postgres.list_notices_for(role).await?;

    let notices: Vec<NoticeView> = rows
        .into_iter()
        .map(|row| NoticeView {
            id: row.id,
            title: row.title,
            content: row.content,
            notice_type: row.urgency.as_str().to_string(),
            created_at: row.created_at.to_rfc3339(),
            author: row.author.unwrap_or_else(|| "System".to_string()),
        })
        .collect();

    Ok(HttpResponse::Ok().json(notices))
}

/// Publish a notice; the author comes from the verified bearer token
///
/// POST /api/notices
async fn publish_notice(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<PublishNoticeRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = bearer_claims(&state, &http_req)?;
    validate(&*req)?;

    let notice = NewNotice {
        title: req.title.clone(),
        content: req.content.clone(),
        created_by_user_id: claims.sub,
        created_by_role: claims.role,
        visible_to: req.visible_to,
        urgency: req.urgency.unwrap_or(NoticeUrgency::Low),
        target_branch: req.target_branch.clone(),
        target_semester: req.target_semester,
    };

    let id = state.postgres.insert_notice(&notice).await?;

    Ok(HttpResponse::Ok().json(CreatedResponse { success: true, id }))
}

// --- Exam management ---

/// POST /api/admin/exams/schedule
async fn create_exam_schedule(
    state: web::Data<AppState>,
    req: web::Json<ExamScheduleRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*req)?;

    let start_date = parse_date(&req.start_date)?;
    let end_date = parse_date(&req.end_date)?;

    let id = state
        .postgres
        .insert_exam_schedule(
            &req.name,
            &req.academic_year,
            req.semester_type.as_deref(),
            start_date,
            end_date,
        )
        .await?;

    Ok(HttpResponse::Ok().json(CreatedResponse { success: true, id }))
}

/// GET /api/admin/exams/schedules
async fn list_exam_schedules(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let schedules = state.postgres.list_exam_schedules().await?;
    Ok(HttpResponse::Ok().json(schedules))
}

/// Insert or update exam slots; accepts one entry or a batch
///
/// POST /api/admin/exams/timetable
async fn manage_exam_timetable(
    state: web::Data<AppState>,
    req: web::Json<ExamSlotBatch>,
) -> Result<HttpResponse, ApiError> {
    let entries = req.into_inner().into_vec();

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        validate(&entry)?;
        let exam_date = parse_date(&entry.exam_date)?;

        match entry.id {
            Some(slot_id) => {
                let updated = state
                    .postgres
                    .update_exam_slot(
                        slot_id,
                        entry.exam_schedule_id,
                        &entry.subject_name,
                        exam_date,
                        &entry.start_time,
                        &entry.end_time,
                        &entry.room_number,
                        entry.faculty_id,
                    )
                    .await?;
                if !updated {
                    return Err(ApiError::NotFound(format!("Exam slot {} not found", slot_id)));
                }
                results.push(ExamSlotOutcome { status: "updated".to_string(), id: slot_id });
            }
            None => {
                let id = state
                    .postgres
                    .insert_exam_slot(
                        entry.exam_schedule_id,
                        &entry.subject_name,
                        exam_date,
                        &entry.start_time,
                        &entry.end_time,
                        &entry.room_number,
                        entry.faculty_id,
                    )
                    .await?;
                results.push(ExamSlotOutcome { status: "created".to_string(), id });
            }
        }
    }

    Ok(HttpResponse::Ok().json(ExamSlotBatchResponse { success: true, results }))
}

/// GET /api/exams/{schedule_id}/timetable
async fn get_exam_timetable(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let schedule_id = path.into_inner();

    let slots = state.postgres.list_exam_slots(schedule_id).await?;

    Ok(HttpResponse::Ok().json(slots))
}

// --- Common ---

/// GET /api/clubs
async fn get_clubs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let clubs = state.postgres.list_active_clubs().await?;

    let summaries: Vec<ClubSummary> = clubs.iter().map(ClubSummary::from).collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// Distinct subjects seen in the timetable
///
/// GET /api/subjects
async fn get_subjects(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let subjects = state.postgres.distinct_subjects().await?;
    Ok(HttpResponse::Ok().json(subjects))
}
