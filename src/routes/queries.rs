use actix_web::{web, HttpResponse};

use crate::core::threads;
use crate::models::{
    AttachmentView, CreateQueryRequest, FacultyQuerySummaryView, PostRole, PostView, QueryKind,
    QuerySummaryView, ReplyRequest, StudentDetailsView, SuccessResponse, ThreadCreatedResponse,
    ThreadDetailView,
};
use crate::routes::{validate, ApiError, AppState};
use crate::services::{NewAttachment, NewPost, NewThread, NotificationDraft};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/queries", web::post().to(create_query))
        .route("/queries/student/{student_id}", web::get().to(get_student_queries))
        .route("/queries/faculty/{user_id}", web::get().to(get_faculty_queries))
        .route("/queries/{thread_id}", web::get().to(get_thread_details))
        .route("/queries/{thread_id}/reply", web::post().to(reply_to_query))
        .route("/queries/{thread_id}/resolve", web::post().to(resolve_query));
}

fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Dashboard preview of the latest post
fn preview(last_message: Option<String>) -> String {
    match last_message {
        Some(content) => {
            let head: String = content.chars().take(50).collect();
            format!("{}...", head)
        }
        None => String::new(),
    }
}

fn notification_title(kind: QueryKind) -> String {
    let name = kind.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("New {}{} Query", first.to_uppercase(), chars.as_str()),
        None => "New Query".to_string(),
    }
}

/// Open a query thread
///
/// POST /api/queries
///
/// Mentorship queries resolve the student's mentor by name; academic queries
/// need a subject and resolve the assigned faculty from it.
async fn create_query(
    state: web::Data<AppState>,
    req: web::Json<CreateQueryRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*req)?;

    let student = state
        .postgres
        .resolve_student(req.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let mut subject_name = req.subject_name.clone();
    let mut faculty_id = req.faculty_id;

    match req.query_type {
        QueryKind::Mentorship => {
            subject_name = Some("Mentorship".to_string());

            let mentor_name = student.mentor.clone().ok_or_else(|| {
                ApiError::Validation("No mentor assigned to your profile.".to_string())
            })?;

            faculty_id = match state.postgres.find_faculty_by_name(&mentor_name).await? {
                Some(mentor) => Some(mentor.id),
                None => state.postgres.first_faculty().await?.map(|f| f.id),
            };
        }
        QueryKind::Academic => {
            let subject = subject_name.clone().filter(|s| !s.is_empty()).ok_or_else(|| {
                ApiError::Validation("Subject is required for academic queries".to_string())
            })?;

            if faculty_id.is_none() {
                faculty_id = state
                    .postgres
                    .find_faculty_for_subject(&subject)
                    .await?
                    .map(|f| f.id);
            }
        }
    }

    let mut notification = None;
    if let Some(assigned_id) = faculty_id {
        if let Some(assigned) = state.postgres.get_faculty(assigned_id).await? {
            let student_user = state
                .postgres
                .get_user(student.user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

            notification = Some(NotificationDraft {
                user_id: assigned.user_id,
                title: notification_title(req.query_type),
                message: format!("New query from {}: {}", student_user.full_name, req.title),
                notification_type: "query",
            });
        }
    }

    let thread = NewThread {
        student_id: student.id,
        faculty_id,
        subject_name,
        title: req.title.clone(),
        query_type: req.query_type,
    };
    let first_post = NewPost {
        author_user_id: student.user_id,
        role: PostRole::Student,
        content: req.content.clone(),
    };

    let thread_id = state
        .postgres
        .create_thread(&thread, &first_post, notification)
        .await?;

    Ok(HttpResponse::Ok().json(ThreadCreatedResponse {
        success: true,
        message: "Query submitted".to_string(),
        thread_id,
    }))
}

/// Thread summaries for a student
///
/// GET /api/queries/student/{student_id}
async fn get_student_queries(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let student_id = path.into_inner();

    let rows = state.postgres.list_student_threads(student_id).await?;

    let summaries: Vec<QuerySummaryView> = rows
        .into_iter()
        .map(|row| QuerySummaryView {
            id: row.id,
            title: row.title,
            subject: row.subject_name,
            status: row.status,
            kind: row.query_type,
            faculty_name: row.faculty_name.unwrap_or_else(|| "Unassigned".to_string()),
            updated_at: format_timestamp(row.updated_at),
            last_message: preview(row.last_message),
        })
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// Thread summaries for a faculty member, pending first
///
/// GET /api/queries/faculty/{user_id}
async fn get_faculty_queries(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let Some(faculty) = state.postgres.get_faculty_by_user(user_id).await? else {
        return Ok(HttpResponse::Ok().json(Vec::<FacultyQuerySummaryView>::new()));
    };

    let rows = state.postgres.list_faculty_threads(faculty.id).await?;

    let summaries: Vec<FacultyQuerySummaryView> = rows
        .into_iter()
        .map(|row| FacultyQuerySummaryView {
            id: row.id,
            title: row.title,
            subject: row.subject_name,
            status: row.status,
            kind: row.query_type,
            student_name: row.student_name,
            student_roll: row.student_roll,
            updated_at: format_timestamp(row.updated_at),
            last_message: preview(row.last_message),
        })
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// Full thread detail with ordered posts and attachments
///
/// GET /api/queries/{thread_id}
async fn get_thread_details(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let thread_id = path.into_inner();

    let thread = state
        .postgres
        .get_thread(thread_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;

    let posts = state.postgres.thread_posts(thread_id).await?;
    let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let attachments = state.postgres.post_attachments(&post_ids).await?;

    let post_views: Vec<PostView> = posts
        .into_iter()
        .map(|post| {
            let post_attachments: Vec<AttachmentView> = attachments
                .iter()
                .filter(|a| a.post_id == post.id)
                .map(|a| AttachmentView {
                    file_url: a.file_url.clone(),
                    file_name: a.file_name.clone(),
                    file_type: a.file_type.clone(),
                })
                .collect();

            PostView {
                id: post.id,
                author_name: post.author_name,
                role: post.role,
                content: post.content,
                created_at: format_timestamp(post.created_at),
                attachments: post_attachments,
            }
        })
        .collect();

    let student = state
        .postgres
        .get_student(thread.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;
    let student_user = state
        .postgres
        .get_user(student.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;

    let faculty_name = match thread.faculty_id {
        Some(id) => state
            .postgres
            .faculty_user_name(id)
            .await?
            .unwrap_or_else(|| "Unassigned".to_string()),
        None => "Unassigned".to_string(),
    };

    Ok(HttpResponse::Ok().json(ThreadDetailView {
        id: thread.id,
        title: thread.title,
        subject: thread.subject_name,
        status: thread.status,
        kind: thread.query_type,
        faculty_id: thread.faculty_id,
        faculty_name,
        posts: post_views,
        student_details: StudentDetailsView {
            full_name: student_user.full_name,
            enrollment: student.enrollment_number,
            roll_number: student.roll_number,
            branch: student.branch,
            semester: student.current_semester,
        },
    }))
}

/// Reply to a thread
///
/// POST /api/queries/{thread_id}/reply
///
/// Applies the thread state machine and notifies the student on faculty
/// replies. Replies on resolved threads stay permitted.
async fn reply_to_query(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<ReplyRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*req)?;
    let thread_id = path.into_inner();

    let thread = state
        .postgres
        .get_thread(thread_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;

    let effect = threads::apply_reply(thread.status, req.role, req.status);

    let mut notification = None;
    if effect.notify_student {
        let student = state
            .postgres
            .get_student(thread.student_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;

        notification = Some(NotificationDraft {
            user_id: student.user_id,
            title: "Query Update".to_string(),
            message: format!("Faculty replied to: {}", thread.title),
            notification_type: "query",
        });
    }

    let post = NewPost {
        author_user_id: req.user_id,
        role: req.role,
        content: req.content.clone(),
    };
    let attachment = req.attachment.as_ref().map(|a| NewAttachment {
        file_url: a.file_url.clone(),
        file_name: a.file_name.clone(),
        file_type: a.file_type.clone(),
    });

    state
        .postgres
        .record_reply(thread_id, &post, attachment, effect.next_status, notification)
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// Force a thread to resolved
///
/// POST /api/queries/{thread_id}/resolve
async fn resolve_query(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let thread_id = path.into_inner();

    let thread = state
        .postgres
        .get_thread(thread_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Thread not found".to_string()))?;

    state
        .postgres
        .update_thread_status(thread_id, threads::resolve(thread.status))
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
