use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub application_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

/// The two users allowed on an application's thread, with the job
/// context needed for notification texts.
#[derive(Debug, Clone, FromRow)]
pub struct ThreadParties {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_company: String,
}
