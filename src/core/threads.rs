use crate::models::{PostRole, ThreadStatus};

/// Outcome of applying a reply to a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyEffect {
    pub next_status: ThreadStatus,
    pub notify_student: bool,
}

/// Apply a reply to the thread state machine
///
/// A faculty reply moves the thread to `answered` (or the explicit override)
/// and always notifies the student. A student reply on an `answered` thread
/// opens a clarification round; otherwise the status is left alone. Replies
/// on a resolved thread stay permitted, so a faculty reply re-opens it.
pub fn apply_reply(
    current: ThreadStatus,
    author: PostRole,
    requested: Option<ThreadStatus>,
) -> ReplyEffect {
    match author {
        PostRole::Faculty => ReplyEffect {
            next_status: requested.unwrap_or(ThreadStatus::Answered),
            notify_student: true,
        },
        PostRole::Student => {
            let next_status = if current == ThreadStatus::Answered {
                ThreadStatus::Clarification
            } else {
                current
            };
            ReplyEffect { next_status, notify_student: false }
        }
    }
}

/// Explicit resolve action; terminal until a later reply re-opens the thread
pub fn resolve(_current: ThreadStatus) -> ThreadStatus {
    ThreadStatus::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_reply_answers_pending_thread() {
        let effect = apply_reply(ThreadStatus::Pending, PostRole::Faculty, None);
        assert_eq!(effect.next_status, ThreadStatus::Answered);
        assert!(effect.notify_student);
    }

    #[test]
    fn test_faculty_reply_honors_status_override() {
        let effect = apply_reply(
            ThreadStatus::Pending,
            PostRole::Faculty,
            Some(ThreadStatus::Resolved),
        );
        assert_eq!(effect.next_status, ThreadStatus::Resolved);
        assert!(effect.notify_student);
    }

    #[test]
    fn test_student_reply_on_answered_opens_clarification() {
        let effect = apply_reply(ThreadStatus::Answered, PostRole::Student, None);
        assert_eq!(effect.next_status, ThreadStatus::Clarification);
        assert!(!effect.notify_student);
    }

    #[test]
    fn test_student_reply_on_pending_leaves_status() {
        let effect = apply_reply(ThreadStatus::Pending, PostRole::Student, None);
        assert_eq!(effect.next_status, ThreadStatus::Pending);
        assert!(!effect.notify_student);
    }

    #[test]
    fn test_clarification_cycles_back_through_answered() {
        let answered = apply_reply(ThreadStatus::Clarification, PostRole::Faculty, None);
        assert_eq!(answered.next_status, ThreadStatus::Answered);

        let clarification = apply_reply(answered.next_status, PostRole::Student, None);
        assert_eq!(clarification.next_status, ThreadStatus::Clarification);
    }

    #[test]
    fn test_faculty_reply_reopens_resolved_thread() {
        let effect = apply_reply(ThreadStatus::Resolved, PostRole::Faculty, None);
        assert_eq!(effect.next_status, ThreadStatus::Answered);
        assert!(effect.notify_student);
    }

    #[test]
    fn test_student_reply_on_resolved_leaves_it_resolved() {
        let effect = apply_reply(ThreadStatus::Resolved, PostRole::Student, None);
        assert_eq!(effect.next_status, ThreadStatus::Resolved);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        assert_eq!(resolve(ThreadStatus::Pending), ThreadStatus::Resolved);
        assert_eq!(resolve(ThreadStatus::Resolved), ThreadStatus::Resolved);
    }
}
