// Service exports
pub mod postgres;
pub mod tokens;

pub use postgres::{
    NewAttachment, NewFacultyAccount, NewNotice, NewPost, NewThread, NotificationDraft,
    PostgresClient, PostgresError,
};
pub use tokens::{Claims, TokenError, TokenIssuer};
