use serde::{Deserialize, Serialize};

use crate::models::domain::{QueryKind, Role, ThreadStatus};

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Generic success acknowledgment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }
}

/// Student fields flattened into the login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentExtras {
    pub student_id: i32,
    pub roll_number: String,
    pub enrollment_number: String,
    pub current_semester: i32,
    pub branch: String,
    pub batch: Option<String>,
    pub mentor: Option<String>,
}

/// Faculty fields flattened into the login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyExtras {
    pub faculty_code: String,
    pub faculty_table_id: i32,
    pub assigned_subjects: Option<String>,
}

/// User payload returned by login and current-user lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub student: Option<StudentExtras>,
    #[serde(flatten)]
    pub faculty: Option<FacultyExtras>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserPayload,
}

/// Student id-card view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdCardView {
    pub full_name: String,
    pub roll_number: String,
    pub enrollment_number: String,
    pub branch: String,
    pub semester: i32,
    pub admission_year: i32,
    pub photo_url: String,
    pub valid_until: String,
}

/// Student-facing timetable slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableSlotView {
    pub day: String,
    pub time: String,
    pub subject: Option<String>,
    pub faculty: Option<String>,
    pub room: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Faculty-facing timetable slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyTimetableSlotView {
    pub id: i32,
    pub day: String,
    pub time: String,
    pub subject: Option<String>,
    pub division: String,
    pub batch: Option<String>,
    pub room: Option<String>,
    pub semester: i32,
}

/// Approved club membership as shown on the student dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub role: String,
    pub joined_at: String,
}

/// Thread summary on the student side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySummaryView {
    pub id: i32,
    pub title: String,
    pub subject: Option<String>,
    pub status: ThreadStatus,
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub faculty_name: String,
    pub updated_at: String,
    pub last_message: String,
}

/// Thread summary on the faculty side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyQuerySummaryView {
    pub id: i32,
    pub title: String,
    pub subject: Option<String>,
    pub status: ThreadStatus,
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub student_name: String,
    pub student_roll: String,
    pub updated_at: String,
    pub last_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentView {
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i32,
    pub author_name: String,
    pub role: crate::models::domain::PostRole,
    pub content: String,
    pub created_at: String,
    pub attachments: Vec<AttachmentView>,
}

/// Student block on the thread detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetailsView {
    pub full_name: String,
    pub enrollment: String,
    pub roll_number: String,
    pub branch: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadDetailView {
    pub id: i32,
    pub title: String,
    pub subject: Option<String>,
    pub status: ThreadStatus,
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub faculty_id: Option<i32>,
    pub faculty_name: String,
    pub posts: Vec<PostView>,
    pub student_details: StudentDetailsView,
}

/// Notice as rendered on the dashboards; `notice_type` carries the urgency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub notice_type: String,
    pub created_at: String,
    pub author: String,
}

/// Admin dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_students: i64,
    pub total_faculty: i64,
    pub total_courses: i64,
    pub total_fee_collection: i64,
}

/// Response for a newly created entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

/// Per-entry outcome of an exam timetable batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSlotOutcome {
    pub status: String,
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSlotBatchResponse {
    pub success: bool,
    pub results: Vec<ExamSlotOutcome>,
}

/// Response after opening a query thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadCreatedResponse {
    pub success: bool,
    pub message: String,
    pub thread_id: i32,
}
