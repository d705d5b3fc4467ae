use actix_web::{web, HttpResponse};

use crate::models::{
    FacultyExtras, LoginRequest, LoginResponse, Role, StudentExtras, UserPayload,
};
use crate::routes::{validate, ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/users/{user_id}", web::get().to(get_current_user));
}

/// Login endpoint
///
/// POST /api/login
///
/// Verifies the password hash and returns the user payload with
/// role-specific extras and a signed session token.
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*req)?;

    let user = state
        .postgres
        .get_user_by_credentials(&req.username, req.role)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let password_ok = bcrypt::verify(&req.password, &user.password_hash).unwrap_or(false);
    if !password_ok || !user.is_active {
        tracing::info!("Rejected login for {} ({})", req.username, req.role.as_str());
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .tokens
        .issue(user.id, user.role)
        .map_err(|e| ApiError::Validation(format!("Failed to issue token: {}", e)))?;

    let mut payload = UserPayload {
        id: user.id,
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        role: user.role,
        department: user.department.clone(),
        token: Some(token),
        student: None,
        faculty: None,
    };

    match user.role {
        Role::Student => {
            if let Some(student) = state.postgres.get_student_by_user(user.id).await? {
                payload.student = Some(StudentExtras {
                    student_id: student.id,
                    roll_number: student.roll_number,
                    enrollment_number: student.enrollment_number,
                    current_semester: student.current_semester,
                    branch: student.branch,
                    batch: student.batch,
                    mentor: student.mentor,
                });
            }
        }
        Role::Faculty => {
            if let Some(faculty) = state.postgres.get_faculty_by_user(user.id).await? {
                payload.faculty = Some(FacultyExtras {
                    faculty_code: faculty.faculty_code,
                    faculty_table_id: faculty.id,
                    assigned_subjects: faculty.assigned_subjects,
                });
            }
        }
        Role::Admin => {}
    }

    tracing::info!("User {} logged in as {}", user.username, user.role.as_str());

    Ok(HttpResponse::Ok().json(LoginResponse { success: true, user: payload }))
}

/// Current-user lookup
///
/// GET /api/users/{user_id}
async fn get_current_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let user = state
        .postgres
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let mut payload = UserPayload {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        role: user.role,
        department: user.department,
        token: None,
        student: None,
        faculty: None,
    };

    if user.role == Role::Student {
        if let Some(student) = state.postgres.get_student_by_user(user.id).await? {
            payload.student = Some(StudentExtras {
                student_id: student.id,
                roll_number: student.roll_number,
                enrollment_number: student.enrollment_number,
                current_semester: student.current_semester,
                branch: student.branch,
                batch: student.batch,
                mentor: student.mentor,
            });
        }
    }

    Ok(HttpResponse::Ok().json(payload))
}
