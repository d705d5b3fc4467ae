use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    ClubDefinition, ExamSchedule, ExamSlot, FacultyRecord, MembershipStatus, NoticeAudience,
    NoticeUrgency, Notification, PostRole, QueryAttachment, QueryKind, QueryThread, Role,
    ScholarshipOffer, StudentRecord, ThreadStatus, TimetableEntry, UpdateFacultyRequest, User,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Notification to fan out as part of a write
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub notification_type: &'static str,
}

/// Fields for a new query thread
#[derive(Debug, Clone)]
pub struct NewThread {
    pub student_id: i32,
    pub faculty_id: Option<i32>,
    pub subject_name: Option<String>,
    pub title: String,
    pub query_type: QueryKind,
}

/// First or subsequent post on a thread
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_user_id: i32,
    pub role: PostRole,
    pub content: String,
}

/// Attachment metadata stored with a post
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

/// User plus faculty row created together by the admin endpoint
#[derive(Debug, Clone)]
pub struct NewFacultyAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub department: String,
    pub faculty_code: String,
    pub designation: Option<String>,
    pub assigned_semesters: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Notice row to publish
#[derive(Debug, Clone)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub created_by_user_id: i32,
    pub created_by_role: Role,
    pub visible_to: NoticeAudience,
    pub urgency: NoticeUrgency,
    pub target_branch: Option<String>,
    pub target_semester: Option<i32>,
}

/// Thread summary row for the student listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThreadSummaryRow {
    pub id: i32,
    pub title: String,
    pub subject_name: Option<String>,
    pub status: ThreadStatus,
    pub query_type: QueryKind,
    pub faculty_name: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub last_message: Option<String>,
}

/// Thread summary row for the faculty listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FacultyThreadSummaryRow {
    pub id: i32,
    pub title: String,
    pub subject_name: Option<String>,
    pub status: ThreadStatus,
    pub query_type: QueryKind,
    pub student_name: String,
    pub student_roll: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub last_message: Option<String>,
}

/// Post row joined to its author's name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i32,
    pub author_name: String,
    pub role: PostRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Approved membership joined to the club
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MembershipRow {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

/// Notice row joined to its author's name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoticeRow {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub urgency: NoticeUrgency,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: Option<String>,
}

/// Roster entry for the admin faculty listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FacultyRosterRow {
    pub id: i32,
    pub faculty_code: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Full faculty detail for the admin view
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FacultyDetailRow {
    pub id: i32,
    pub faculty_code: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub assigned_semesters: Option<String>,
    pub assigned_subjects: Option<String>,
}

/// Minimal faculty entry for subject lookups
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FacultyDirectoryEntry {
    pub id: i32,
    pub name: String,
}

/// PostgreSQL client backing every portal capability
///
/// Owns the connection pool and runs the schema migrations on startup.
/// Multi-statement writes run in a single transaction so a failure rolls
/// the whole request back.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    // --- Users & auth ---

    pub async fn get_user_by_credentials(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<User>, PostgresError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND role = $2",
        )
        .bind(username)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, PostgresError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // --- Students ---

    pub async fn get_student(&self, student_id: i32) -> Result<Option<StudentRecord>, PostgresError> {
        let student = sqlx::query_as::<_, StudentRecord>("SELECT * FROM students WHERE id = $1")
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    pub async fn get_student_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<StudentRecord>, PostgresError> {
        let student =
            sqlx::query_as::<_, StudentRecord>("SELECT * FROM students WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(student)
    }

    /// Look a student up by record id, falling back to the user id
    ///
    /// Dashboard clients send whichever id they have on hand.
    pub async fn resolve_student(
        &self,
        id_param: i32,
    ) -> Result<Option<StudentRecord>, PostgresError> {
        if let Some(student) = self.get_student(id_param).await? {
            return Ok(Some(student));
        }
        self.get_student_by_user(id_param).await
    }

    // --- Faculty ---

    pub async fn get_faculty(&self, faculty_id: i32) -> Result<Option<FacultyRecord>, PostgresError> {
        let faculty = sqlx::query_as::<_, FacultyRecord>("SELECT * FROM faculty WHERE id = $1")
            .bind(faculty_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(faculty)
    }

    pub async fn get_faculty_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<FacultyRecord>, PostgresError> {
        let faculty =
            sqlx::query_as::<_, FacultyRecord>("SELECT * FROM faculty WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(faculty)
    }

    /// Look faculty up by record id, falling back to the user id
    pub async fn resolve_faculty(
        &self,
        id_param: i32,
    ) -> Result<Option<FacultyRecord>, PostgresError> {
        if let Some(faculty) = self.get_faculty(id_param).await? {
            return Ok(Some(faculty));
        }
        self.get_faculty_by_user(id_param).await
    }

    /// Faculty whose user name contains the given name, for mentor lookup
    pub async fn find_faculty_by_name(
        &self,
        name: &str,
    ) -> Result<Option<FacultyRecord>, PostgresError> {
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            r#"
            SELECT f.*
            FROM faculty f
            JOIN users u ON u.id = f.user_id
            WHERE u.full_name ILIKE '%' || $1 || '%' AND u.role = 'faculty'
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faculty)
    }

    /// Fallback assignee when no mentor or subject faculty resolves
    pub async fn first_faculty(&self) -> Result<Option<FacultyRecord>, PostgresError> {
        let faculty =
            sqlx::query_as::<_, FacultyRecord>("SELECT * FROM faculty ORDER BY id LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        Ok(faculty)
    }

    pub async fn find_faculty_for_subject(
        &self,
        subject: &str,
    ) -> Result<Option<FacultyRecord>, PostgresError> {
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            "SELECT * FROM faculty WHERE assigned_subjects LIKE '%' || $1 || '%' LIMIT 1",
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faculty)
    }

    pub async fn list_faculty_by_subject(
        &self,
        subject: &str,
    ) -> Result<Vec<FacultyDirectoryEntry>, PostgresError> {
        let entries = sqlx::query_as::<_, FacultyDirectoryEntry>(
            r#"
            SELECT f.id, u.full_name AS name
            FROM faculty f
            JOIN users u ON u.id = f.user_id
            WHERE f.assigned_subjects LIKE '%' || $1 || '%'
            ORDER BY f.id
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Full name behind a faculty record, for thread views
    pub async fn faculty_user_name(&self, faculty_id: i32) -> Result<Option<String>, PostgresError> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT u.full_name FROM faculty f JOIN users u ON u.id = f.user_id WHERE f.id = $1",
        )
        .bind(faculty_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }

    // --- Scholarships ---

    pub async fn list_active_scholarships(&self) -> Result<Vec<ScholarshipOffer>, PostgresError> {
        let offers = sqlx::query_as::<_, ScholarshipOffer>(
            "SELECT * FROM scholarships WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(offers)
    }

    // --- Clubs ---

    pub async fn list_active_clubs(&self) -> Result<Vec<ClubDefinition>, PostgresError> {
        let clubs = sqlx::query_as::<_, ClubDefinition>(
            "SELECT * FROM clubs WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clubs)
    }

    pub async fn get_club(&self, club_id: i32) -> Result<Option<ClubDefinition>, PostgresError> {
        let club = sqlx::query_as::<_, ClubDefinition>("SELECT * FROM clubs WHERE id = $1")
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(club)
    }

    pub async fn find_club_request(
        &self,
        student_id: i32,
        club_id: i32,
    ) -> Result<Option<MembershipStatus>, PostgresError> {
        let status = sqlx::query_scalar::<_, MembershipStatus>(
            "SELECT status FROM club_requests WHERE student_id = $1 AND club_id = $2",
        )
        .bind(student_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    /// Create a pending membership request, optionally notifying the
    /// club's coordinator in the same transaction
    pub async fn create_club_request(
        &self,
        student_id: i32,
        club_id: i32,
        notification: Option<NotificationDraft>,
    ) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO club_requests (student_id, club_id, status) VALUES ($1, $2, 'pending')",
        )
        .bind(student_id)
        .bind(club_id)
        .execute(&mut *tx)
        .await?;

        if let Some(draft) = notification {
            insert_notification_tx(&mut tx, &draft).await?;
        }

        tx.commit().await?;

        tracing::debug!("Recorded club request: student {} -> club {}", student_id, club_id);

        Ok(())
    }

    pub async fn list_memberships(
        &self,
        student_id: i32,
    ) -> Result<Vec<MembershipRow>, PostgresError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT c.id, c.name, c.category, c.description, r.requested_at
            FROM club_requests r
            JOIN clubs c ON c.id = r.club_id
            WHERE r.student_id = $1 AND r.status = 'approved'
            ORDER BY r.requested_at
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // --- Notifications ---

    pub async fn list_notifications(
        &self,
        user_id: i32,
    ) -> Result<Vec<Notification>, PostgresError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_notification_read(&self, id: i32) -> Result<bool, PostgresError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Timetable ---

    pub async fn student_timetable(
        &self,
        batch: &str,
        academic_year: &str,
    ) -> Result<Vec<TimetableEntry>, PostgresError> {
        let entries = sqlx::query_as::<_, TimetableEntry>(
            "SELECT * FROM timetable WHERE batch = $1 AND academic_year = $2 ORDER BY id",
        )
        .bind(batch)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Faculty slots are matched by the initials stored in `faculty_code`
    pub async fn faculty_timetable(
        &self,
        faculty_code: &str,
        academic_year: &str,
    ) -> Result<Vec<TimetableEntry>, PostgresError> {
        let entries = sqlx::query_as::<_, TimetableEntry>(
            "SELECT * FROM timetable WHERE faculty_code = $1 AND academic_year = $2 ORDER BY id",
        )
        .bind(faculty_code)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn distinct_subjects(&self) -> Result<Vec<String>, PostgresError> {
        let subjects = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT subject FROM timetable WHERE subject IS NOT NULL ORDER BY subject",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    // --- Query threads ---

    /// Open a thread with its first post, optionally notifying the
    /// assigned faculty, all in one transaction
    pub async fn create_thread(
        &self,
        thread: &NewThread,
        first_post: &NewPost,
        notification: Option<NotificationDraft>,
    ) -> Result<i32, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let thread_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO query_threads (student_id, faculty_id, subject_name, title, status, query_type)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING id
            "#,
        )
        .bind(thread.student_id)
        .bind(thread.faculty_id)
        .bind(&thread.subject_name)
        .bind(&thread.title)
        .bind(thread.query_type)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO query_posts (thread_id, author_user_id, role, content)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(thread_id)
        .bind(first_post.author_user_id)
        .bind(first_post.role)
        .bind(&first_post.content)
        .execute(&mut *tx)
        .await?;

        if let Some(draft) = notification {
            insert_notification_tx(&mut tx, &draft).await?;
        }

        tx.commit().await?;

        tracing::debug!("Created query thread {} for student {}", thread_id, thread.student_id);

        Ok(thread_id)
    }

    pub async fn list_student_threads(
        &self,
        student_id: i32,
    ) -> Result<Vec<ThreadSummaryRow>, PostgresError> {
        let rows = sqlx::query_as::<_, ThreadSummaryRow>(
            r#"
            SELECT t.id, t.title, t.subject_name, t.status, t.query_type,
                   fu.full_name AS faculty_name,
                   t.updated_at,
                   (SELECT p.content FROM query_posts p
                    WHERE p.thread_id = t.id
                    ORDER BY p.created_at DESC, p.id DESC
                    LIMIT 1) AS last_message
            FROM query_threads t
            LEFT JOIN faculty f ON f.id = t.faculty_id
            LEFT JOIN users fu ON fu.id = f.user_id
            WHERE t.student_id = $1
            ORDER BY t.updated_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Faculty listing shows pending threads first, then newest activity
    pub async fn list_faculty_threads(
        &self,
        faculty_id: i32,
    ) -> Result<Vec<FacultyThreadSummaryRow>, PostgresError> {
        let rows = sqlx::query_as::<_, FacultyThreadSummaryRow>(
            r#"
            SELECT t.id, t.title, t.subject_name, t.status, t.query_type,
                   su.full_name AS student_name,
                   s.roll_number AS student_roll,
                   t.updated_at,
                   (SELECT p.content FROM query_posts p
                    WHERE p.thread_id = t.id
                    ORDER BY p.created_at DESC, p.id DESC
                    LIMIT 1) AS last_message
            FROM query_threads t
            JOIN students s ON s.id = t.student_id
            JOIN users su ON su.id = s.user_id
            WHERE t.faculty_id = $1
            ORDER BY (t.status = 'pending') DESC, t.updated_at DESC
            "#,
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_thread(&self, thread_id: i32) -> Result<Option<QueryThread>, PostgresError> {
        let thread =
            sqlx::query_as::<_, QueryThread>("SELECT * FROM query_threads WHERE id = $1")
                .bind(thread_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(thread)
    }

    pub async fn thread_posts(&self, thread_id: i32) -> Result<Vec<PostRow>, PostgresError> {
        let posts = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, u.full_name AS author_name, p.role, p.content, p.created_at
            FROM query_posts p
            JOIN users u ON u.id = p.author_user_id
            WHERE p.thread_id = $1
            ORDER BY p.created_at, p.id
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    pub async fn post_attachments(
        &self,
        post_ids: &[i32],
    ) -> Result<Vec<QueryAttachment>, PostgresError> {
        let attachments = sqlx::query_as::<_, QueryAttachment>(
            r#"
            SELECT id, post_id, file_url, file_type, file_name
            FROM query_attachments
            WHERE post_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(attachments)
    }

    /// Append a reply, move the thread to its next status, and fan out the
    /// notification, all in one transaction
    pub async fn record_reply(
        &self,
        thread_id: i32,
        post: &NewPost,
        attachment: Option<NewAttachment>,
        next_status: ThreadStatus,
        notification: Option<NotificationDraft>,
    ) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        let post_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO query_posts (thread_id, author_user_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(thread_id)
        .bind(post.author_user_id)
        .bind(post.role)
        .bind(&post.content)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(att) = attachment {
            sqlx::query(
                r#"
                INSERT INTO query_attachments (post_id, file_url, file_type, file_name)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(post_id)
            .bind(&att.file_url)
            .bind(&att.file_type)
            .bind(&att.file_name)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE query_threads SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(thread_id)
            .bind(next_status)
            .execute(&mut *tx)
            .await?;

        if let Some(draft) = notification {
            insert_notification_tx(&mut tx, &draft).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn update_thread_status(
        &self,
        thread_id: i32,
        status: ThreadStatus,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            "UPDATE query_threads SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(thread_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Admin ---

    pub async fn dashboard_counts(&self) -> Result<(i64, i64, i64), PostgresError> {
        let students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        let faculty = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faculty")
            .fetch_one(&self.pool)
            .await?;
        let courses = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        Ok((students, faculty, courses))
    }

    pub async fn list_faculty_roster(&self) -> Result<Vec<FacultyRosterRow>, PostgresError> {
        let rows = sqlx::query_as::<_, FacultyRosterRow>(
            r#"
            SELECT f.id, f.faculty_code, u.full_name, u.email, u.department,
                   f.designation, f.assigned_subjects
            FROM faculty f
            JOIN users u ON u.id = f.user_id
            WHERE u.is_active = TRUE
            ORDER BY f.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, PostgresError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, PostgresError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Create the user account and the faculty record together
    pub async fn create_faculty(&self, account: &NewFacultyAccount) -> Result<i32, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, email, password_hash, role, full_name, department)
            VALUES ($1, $2, $3, 'faculty', $4, $5)
            RETURNING id
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.full_name)
        .bind(&account.department)
        .fetch_one(&mut *tx)
        .await?;

        let faculty_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO faculty (user_id, faculty_code, designation, assigned_semesters, assigned_subjects)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&account.faculty_code)
        .bind(&account.designation)
        .bind(&account.assigned_semesters)
        .bind(&account.assigned_subjects)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Created faculty account {} ({})", account.faculty_code, faculty_id);

        Ok(faculty_id)
    }

    pub async fn faculty_detail(
        &self,
        faculty_id: i32,
    ) -> Result<Option<FacultyDetailRow>, PostgresError> {
        let row = sqlx::query_as::<_, FacultyDetailRow>(
            r#"
            SELECT f.id, f.faculty_code, u.full_name, u.email, u.department,
                   f.designation, f.assigned_semesters, f.assigned_subjects
            FROM faculty f
            JOIN users u ON u.id = f.user_id
            WHERE f.id = $1
            "#,
        )
        .bind(faculty_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial faculty update; absent fields keep their current value
    pub async fn update_faculty(
        &self,
        faculty_id: i32,
        update: &UpdateFacultyRequest,
    ) -> Result<(), PostgresError> {
        let faculty = self
            .get_faculty(faculty_id)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("faculty {}", faculty_id)))?;

        let mut tx = self.pool.begin().await?;

        if let Some(full_name) = &update.full_name {
            sqlx::query("UPDATE users SET full_name = $2 WHERE id = $1")
                .bind(faculty.user_id)
                .bind(full_name)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            UPDATE faculty
            SET designation = COALESCE($2, designation),
                assigned_semesters = COALESCE($3, assigned_semesters),
                assigned_subjects = COALESCE($4, assigned_subjects)
            WHERE id = $1
            "#,
        )
        .bind(faculty_id)
        .bind(&update.designation)
        .bind(&update.assigned_semesters)
        .bind(&update.assigned_subjects)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    // --- Notices ---

    /// Active notices visible to the role, most urgent first
    pub async fn list_notices_for(&self, role: Role) -> Result<Vec<NoticeRow>, PostgresError> {
        let audience_filter = match role {
            Role::Student => "AND (n.visible_to = 'student' OR n.visible_to = 'both')",
            Role::Faculty => "AND (n.visible_to = 'faculty' OR n.visible_to = 'both')",
            Role::Admin => "",
        };

        let query = format!(
            r#"
            SELECT n.id, n.title, n.content, n.urgency, n.created_at,
                   u.full_name AS author
            FROM notices n
            LEFT JOIN users u ON u.id = n.created_by_user_id
            WHERE n.is_active = TRUE {}
            ORDER BY CASE n.urgency::text
                         WHEN 'urgent' THEN 1
                         WHEN 'moderate' THEN 2
                         ELSE 3
                     END,
                     n.created_at DESC
            "#,
            audience_filter
        );

        let rows = sqlx::query_as::<_, NoticeRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn insert_notice(&self, notice: &NewNotice) -> Result<i32, PostgresError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO notices (title, content, created_by_user_id, created_by_role,
                                 visible_to, urgency, target_branch, target_semester)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&notice.title)
        .bind(&notice.content)
        .bind(notice.created_by_user_id)
        .bind(notice.created_by_role)
        .bind(notice.visible_to)
        .bind(notice.urgency)
        .bind(&notice.target_branch)
        .bind(notice.target_semester)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // --- Exams ---

    pub async fn insert_exam_schedule(
        &self,
        name: &str,
        academic_year: &str,
        semester_type: Option<&str>,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<i32, PostgresError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO exam_schedules (name, academic_year, semester_type, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(academic_year)
        .bind(semester_type)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn insert_exam_slot(
        &self,
        schedule_id: i32,
        subject_name: &str,
        exam_date: chrono::NaiveDate,
        start_time: &str,
        end_time: &str,
        room_number: &str,
        faculty_id: Option<i32>,
    ) -> Result<i32, PostgresError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO exam_timetable (exam_schedule_id, subject_name, exam_date,
                                        start_time, end_time, room_number, faculty_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(schedule_id)
        .bind(subject_name)
        .bind(exam_date)
        .bind(start_time)
        .bind(end_time)
        .bind(room_number)
        .bind(faculty_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update_exam_slot(
        &self,
        slot_id: i32,
        schedule_id: i32,
        subject_name: &str,
        exam_date: chrono::NaiveDate,
        start_time: &str,
        end_time: &str,
        room_number: &str,
        faculty_id: Option<i32>,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            r#"
            UPDATE exam_timetable
            SET exam_schedule_id = $2, subject_name = $3, exam_date = $4,
                start_time = $5, end_time = $6, room_number = $7, faculty_id = $8
            WHERE id = $1
            "#,
        )
        .bind(slot_id)
        .bind(schedule_id)
        .bind(subject_name)
        .bind(exam_date)
        .bind(start_time)
        .bind(end_time)
        .bind(room_number)
        .bind(faculty_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_exam_schedules(&self) -> Result<Vec<ExamSchedule>, PostgresError> {
        let schedules = sqlx::query_as::<_, ExamSchedule>(
            "SELECT * FROM exam_schedules ORDER BY start_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    pub async fn list_exam_slots(&self, schedule_id: i32) -> Result<Vec<ExamSlot>, PostgresError> {
        let slots = sqlx::query_as::<_, ExamSlot>(
            r#"
            SELECT * FROM exam_timetable
            WHERE exam_schedule_id = $1
            ORDER BY exam_date, start_time
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }
}

async fn insert_notification_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    draft: &NotificationDraft,
) -> Result<(), PostgresError> {
    sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, message, notification_type)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(draft.user_id)
    .bind(&draft.title)
    .bind(&draft.message)
    .bind(draft.notification_type)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_draft_fields() {
        let draft = NotificationDraft {
            user_id: 7,
            title: "Query Update".to_string(),
            message: "Faculty replied to: Doubt in recursion".to_string(),
            notification_type: "query",
        };
        assert_eq!(draft.user_id, 7);
        assert_eq!(draft.notification_type, "query");
    }
}
