use actix_web::{web, HttpResponse};

use crate::core::{eligibility, recommender};
use crate::models::{
    CandidateProfile, ClubMatch, ClubRegistrationRequest, IdCardView, MembershipView,
    RecommendationRequest, SuccessResponse, TimetableSlotView,
};
use crate::routes::{ApiError, AppState};
use crate::services::NotificationDraft;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/students/{id}/id-card", web::get().to(get_id_card))
        .route("/students/{id}/timetable", web::get().to(get_timetable))
        .route("/students/{id}/memberships", web::get().to(get_memberships))
        .route("/clubs/register", web::post().to(register_club))
        .route("/clubs/recommendations", web::post().to(recommend_clubs))
        .route("/scholarships/eligible", web::post().to(eligible_scholarships));
}

/// Student id-card view
///
/// GET /api/students/{id}/id-card
///
/// Accepts a student record id or a user id.
async fn get_id_card(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id_param = path.into_inner();

    let student = state
        .postgres
        .resolve_student(id_param)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let user = state
        .postgres
        .get_user(student.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(HttpResponse::Ok().json(IdCardView {
        full_name: user.full_name,
        roll_number: student.roll_number,
        enrollment_number: student.enrollment_number,
        branch: student.branch,
        semester: student.current_semester,
        admission_year: student.admission_year,
        photo_url: "https://via.placeholder.com/150x180".to_string(),
        valid_until: format!("{}-12-31", student.admission_year + 4),
    }))
}

/// Student timetable for the configured academic year
///
/// GET /api/students/{id}/timetable
///
/// Returns an empty array when the student or their batch is missing.
async fn get_timetable(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id_param = path.into_inner();

    let batch = match state.postgres.resolve_student(id_param).await? {
        Some(student) => student.batch,
        None => None,
    };

    let Some(batch) = batch else {
        return Ok(HttpResponse::Ok().json(Vec::<TimetableSlotView>::new()));
    };

    let entries = state
        .postgres
        .student_timetable(&batch, &state.academic_year)
        .await?;

    let slots: Vec<TimetableSlotView> = entries
        .iter()
        .map(|entry| TimetableSlotView {
            day: entry.full_day(),
            time: entry.time_slot.clone(),
            subject: entry.subject.clone(),
            faculty: entry.faculty_code.clone(),
            room: entry.room_number.clone(),
            kind: "Lecture".to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(slots))
}

/// Approved club memberships
///
/// GET /api/students/{id}/memberships
async fn get_memberships(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let student_id = path.into_inner();

    let rows = state.postgres.list_memberships(student_id).await?;

    let memberships: Vec<MembershipView> = rows
        .into_iter()
        .map(|row| MembershipView {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
            role: "Member".to_string(),
            joined_at: row.requested_at.format("%B %Y").to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(memberships))
}

/// Club registration request
///
/// POST /api/clubs/register
///
/// Creates a pending request and notifies the club's faculty coordinator.
async fn register_club(
    state: web::Data<AppState>,
    req: web::Json<ClubRegistrationRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Some(status) = state
        .postgres
        .find_club_request(req.student_id, req.club_id)
        .await?
    {
        return Err(ApiError::Validation(format!(
            "Request already exists (status: {})",
            status.as_str()
        )));
    }

    let club = state
        .postgres
        .get_club(req.club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club or Student not found".to_string()))?;

    let student = state
        .postgres
        .get_student(req.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club or Student not found".to_string()))?;

    let student_user = state
        .postgres
        .get_user(student.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club or Student not found".to_string()))?;

    // Coordinator notification only when the club has a linked faculty
    let mut notification = None;
    if let Some(coordinator_id) = club.faculty_coordinator {
        if let Some(coordinator) = state.postgres.get_faculty(coordinator_id).await? {
            notification = Some(NotificationDraft {
                user_id: coordinator.user_id,
                title: format!("New Club Registration: {}", club.name),
                message: format!(
                    "Student {} ({}) has requested to join {}.",
                    student_user.full_name, student.roll_number, club.name
                ),
                notification_type: "club_request",
            });
        }
    }

    state
        .postgres
        .create_club_request(req.student_id, req.club_id, notification)
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::with_message("Registration requested successfully")))
}

/// Interest-based club recommendations
///
/// POST /api/clubs/recommendations
async fn recommend_clubs(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.interests.is_empty() {
        return Ok(HttpResponse::Ok().json(Vec::<ClubMatch>::new()));
    }

    let catalog = state.postgres.list_active_clubs().await?;
    let recommendations = recommender::recommend(&req.interests, &catalog);

    tracing::debug!(
        "Recommended {} clubs for {} interest tokens",
        recommendations.len(),
        req.interests.len()
    );

    Ok(HttpResponse::Ok().json(recommendations))
}

/// Scholarship eligibility evaluation
///
/// POST /api/scholarships/eligible
async fn eligible_scholarships(
    state: web::Data<AppState>,
    req: web::Json<CandidateProfile>,
) -> Result<HttpResponse, ApiError> {
    let catalog = state.postgres.list_active_scholarships().await?;
    let eligible = eligibility::evaluate(&req, &catalog);

    tracing::debug!(
        "Candidate eligible for {} of {} active offers",
        eligible.len(),
        catalog.len()
    );

    Ok(HttpResponse::Ok().json(eligible))
}
