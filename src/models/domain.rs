use serde::{Deserialize, Serialize};

/// Account role stored on every user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }
}

/// Portal account shared by students, faculty and admins
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Student record linked to a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentRecord {
    pub id: i32,
    pub user_id: i32,
    pub roll_number: String,
    pub enrollment_number: String,
    pub current_semester: i32,
    pub branch: String,
    pub division: Option<String>,
    pub batch: Option<String>,
    pub mentor: Option<String>,
    pub admission_year: i32,
}

/// Faculty record; `faculty_code` holds the initials used in timetables
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FacultyRecord {
    pub id: i32,
    pub user_id: i32,
    pub faculty_code: String,
    pub designation: Option<String>,
    pub assigned_semesters: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Scholarship offer with per-field eligibility thresholds
///
/// A zero `min_cgpa` or `max_family_income` means the field is unconstrained;
/// the comma lists accept the sentinel "all".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScholarshipOffer {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub eligibility_criteria: String,
    pub min_cgpa: f64,
    pub max_family_income: f64,
    pub eligible_categories: String,
    pub eligible_genders: String,
    pub amount: f64,
    pub deadline: chrono::NaiveDate,
    pub official_website: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Income supplied by a candidate; accepted as a number or a numeric string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncomeValue {
    Amount(f64),
    Text(String),
}

impl IncomeValue {
    /// Parsed amount, or None when the text is not a number
    pub fn parsed(&self) -> Option<f64> {
        match self {
            IncomeValue::Amount(v) => Some(*v),
            IncomeValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Per-request candidate profile tested against scholarship thresholds
///
/// Every field is optional; an omitted field disables the matching check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub family_income: Option<IncomeValue>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Offer the candidate qualified for, annotated for the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleOffer {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub deadline: chrono::NaiveDate,
    pub official_website: Option<String>,
    pub eligible: bool,
    pub eligibility_criteria: String,
}

impl From<&ScholarshipOffer> for EligibleOffer {
    fn from(offer: &ScholarshipOffer) -> Self {
        Self {
            id: offer.id,
            name: offer.name.clone(),
            description: offer.description.clone(),
            category: offer.category.clone(),
            amount: offer.amount,
            deadline: offer.deadline,
            official_website: offer.official_website.clone(),
            eligible: true,
            eligibility_criteria: offer.eligibility_criteria.clone(),
        }
    }
}

/// Club with its free-text comma-separated interest tags
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClubDefinition {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub interests: Option<String>,
    pub faculty_coordinator: Option<i32>,
    pub student_coordinator: Option<String>,
    pub meeting_schedule: Option<String>,
    pub contact_email: Option<String>,
    pub instagram_link: Option<String>,
    pub is_active: bool,
}

/// Club fields exposed in recommendation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub contact_email: Option<String>,
}

impl From<&ClubDefinition> for ClubSummary {
    fn from(club: &ClubDefinition) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            description: club.description.clone(),
            category: club.category.clone(),
            contact_email: club.contact_email.clone(),
        }
    }
}

/// Scored recommendation; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMatch {
    pub club: ClubSummary,
    pub match_score: u32,
    pub matching_interests: Vec<String>,
}

/// Membership request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Approved => "approved",
            MembershipStatus::Rejected => "rejected",
        }
    }
}

/// One timetable slot, ingested with raw day codes (e.g. "MON")
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimetableEntry {
    pub id: i32,
    pub division: Option<String>,
    pub batch: Option<String>,
    pub day_of_week: String,
    pub time_slot: String,
    pub subject: Option<String>,
    pub faculty_code: Option<String>,
    pub room_number: Option<String>,
    pub semester: i32,
    pub academic_year: Option<String>,
}

impl TimetableEntry {
    /// Expand the ingested day code to a full day name
    pub fn full_day(&self) -> String {
        match self.day_of_week.to_uppercase().as_str() {
            "MON" => "Monday".to_string(),
            "TUE" => "Tuesday".to_string(),
            "WED" => "Wednesday".to_string(),
            "THU" => "Thursday".to_string(),
            "FRI" => "Friday".to_string(),
            "SAT" => "Saturday".to_string(),
            "SUN" => "Sunday".to_string(),
            _ => {
                let mut chars = self.day_of_week.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        }
    }
}

/// Who a notice is visible to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notice_audience", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeAudience {
    Student,
    Faculty,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notice_urgency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeUrgency {
    Urgent,
    Moderate,
    Low,
}

impl NoticeUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeUrgency::Urgent => "urgent",
            NoticeUrgency::Moderate => "moderate",
            NoticeUrgency::Low => "low",
        }
    }
}

/// Notification row fanned out to a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Query-thread lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "thread_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Pending,
    Answered,
    Clarification,
    Resolved,
}

/// Academic queries go to a subject's faculty, mentorship queries to the mentor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "query_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Academic,
    Mentorship,
}

impl Default for QueryKind {
    fn default() -> Self {
        QueryKind::Academic
    }
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Academic => "academic",
            QueryKind::Mentorship => "mentorship",
        }
    }
}

/// Which side of the conversation authored a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostRole {
    Student,
    Faculty,
}

/// Conversation between a student and a faculty member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueryThread {
    pub id: i32,
    pub student_id: i32,
    pub faculty_id: Option<i32>,
    pub subject_name: Option<String>,
    pub title: String,
    pub status: ThreadStatus,
    pub query_type: QueryKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Attachment metadata recorded against a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueryAttachment {
    pub id: i32,
    pub post_id: i32,
    pub file_url: String,
    pub file_type: Option<String>,
    pub file_name: Option<String>,
}

/// Named exam window
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamSchedule {
    pub id: i32,
    pub name: String,
    pub academic_year: String,
    pub semester_type: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_published: bool,
}

/// Per-subject slot inside an exam schedule
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamSlot {
    pub id: i32,
    pub exam_schedule_id: i32,
    pub subject_name: String,
    pub exam_date: chrono::NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub room_number: String,
    pub faculty_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_value_parsing() {
        assert_eq!(IncomeValue::Amount(300000.0).parsed(), Some(300000.0));
        assert_eq!(IncomeValue::Text("250000".to_string()).parsed(), Some(250000.0));
        assert_eq!(IncomeValue::Text(" 1200.5 ".to_string()).parsed(), Some(1200.5));
        assert_eq!(IncomeValue::Text("not-a-number".to_string()).parsed(), None);
    }

    #[test]
    fn test_full_day_expansion() {
        let mut entry = TimetableEntry {
            id: 1,
            division: None,
            batch: Some("A1".to_string()),
            day_of_week: "MON".to_string(),
            time_slot: "09:00-10:00".to_string(),
            subject: Some("PS".to_string()),
            faculty_code: Some("MGV".to_string()),
            room_number: Some("201".to_string()),
            semester: 4,
            academic_year: Some("2025-26".to_string()),
        };
        assert_eq!(entry.full_day(), "Monday");

        entry.day_of_week = "tue".to_string();
        assert_eq!(entry.full_day(), "Tuesday");

        entry.day_of_week = "Wednesday".to_string();
        assert_eq!(entry.full_day(), "Wednesday");
    }

    #[test]
    fn test_candidate_income_from_json_number_or_string() {
        let numeric: CandidateProfile =
            serde_json::from_str(r#"{"cgpa": 8.0, "family_income": 300000}"#).unwrap();
        assert_eq!(numeric.family_income.unwrap().parsed(), Some(300000.0));

        let text: CandidateProfile =
            serde_json::from_str(r#"{"family_income": "300000"}"#).unwrap();
        assert_eq!(text.family_income.unwrap().parsed(), Some(300000.0));
    }
}
