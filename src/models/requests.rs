use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{NoticeAudience, NoticeUrgency, PostRole, QueryKind, Role, ThreadStatus};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub role: Role,
}

/// Request to register a student with a club
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubRegistrationRequest {
    pub student_id: i32,
    pub club_id: i32,
}

/// Interest tokens for the club recommender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Request to open a query thread
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQueryRequest {
    pub student_id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub query_type: QueryKind,
    pub subject_name: Option<String>,
    pub faculty_id: Option<i32>,
}

/// Attachment metadata carried on a reply
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachmentUpload {
    #[validate(length(min = 1))]
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

/// Reply posted to an existing thread
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplyRequest {
    pub user_id: i32,
    pub role: PostRole,
    #[validate(length(min = 1))]
    pub content: String,
    /// Explicit status override, honored for faculty replies
    pub status: Option<ThreadStatus>,
    #[validate(nested)]
    pub attachment: Option<AttachmentUpload>,
}

/// Admin request to create a faculty account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFacultyRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub department: String,
    pub designation: Option<String>,
    pub assigned_semesters: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Partial faculty update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFacultyRequest {
    pub full_name: Option<String>,
    pub designation: Option<String>,
    pub assigned_semesters: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Notice publication request; the author comes from the bearer token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishNoticeRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub visible_to: NoticeAudience,
    pub urgency: Option<NoticeUrgency>,
    pub target_branch: Option<String>,
    pub target_semester: Option<i32>,
}

/// Request to create an exam window; dates are `%Y-%m-%d`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamScheduleRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub academic_year: String,
    pub semester_type: Option<String>,
    #[validate(length(min = 1))]
    pub start_date: String,
    #[validate(length(min = 1))]
    pub end_date: String,
}

/// One exam slot to insert (no id) or update (id present)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamSlotUpsert {
    pub id: Option<i32>,
    pub exam_schedule_id: i32,
    #[validate(length(min = 1))]
    pub subject_name: String,
    #[validate(length(min = 1))]
    pub exam_date: String,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
    #[validate(length(min = 1))]
    pub room_number: String,
    pub faculty_id: Option<i32>,
}

/// The exam timetable endpoint accepts a single slot or a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamSlotBatch {
    One(ExamSlotUpsert),
    Many(Vec<ExamSlotUpsert>),
}

impl ExamSlotBatch {
    pub fn into_vec(self) -> Vec<ExamSlotUpsert> {
        match self {
            ExamSlotBatch::One(slot) => vec![slot],
            ExamSlotBatch::Many(slots) => slots,
        }
    }
}
